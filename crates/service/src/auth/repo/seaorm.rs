use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_user(u: models::user::Model) -> AuthUser {
    AuthUser { id: u.id, username: u.username, email: u.email }
}

fn to_credentials(c: models::user_credentials::Model) -> Credentials {
    Credentials { user_id: c.user_id, password_hash: c.password_hash, password_algorithm: c.password_algorithm }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::find_by_username(&self.db, username).await?;
        Ok(res.map(to_user))
    }

    async fn create_user(&self, username: &str, email: &str) -> Result<AuthUser, AuthError> {
        let created = models::user::create(&self.db, username, email).await?;
        Ok(to_user(created))
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), AuthError> {
        Ok(models::user::hard_delete(&self.db, user_id).await?)
    }

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
        let res = models::user_credentials::find_by_user(&self.db, user_id).await?;
        Ok(res.map(to_credentials))
    }

    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
        let c = models::user_credentials::upsert_password(&self.db, user_id, password_hash, &password_algorithm).await?;
        Ok(to_credentials(c))
    }

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AuthError> {
        Ok(models::user_role::roles_for_user(&self.db, user_id).await?)
    }

    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), AuthError> {
        Ok(models::user_role::assign(&self.db, user_id, role).await?)
    }
}
