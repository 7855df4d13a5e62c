use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for the user store: accounts, password hashes and role assignments.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, username: &str, email: &str) -> Result<AuthUser, AuthError>;
    /// Removes the account together with its credentials and roles.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), AuthError>;

    async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError>;
    async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError>;

    async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AuthError>;
    async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, AuthUser>>,        // key: username
        creds: Mutex<HashMap<Uuid, Credentials>>,       // key: user_id
        roles: Mutex<HashMap<Uuid, Vec<String>>>,       // key: user_id
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn create_user(&self, username: &str, email: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) || users.values().any(|u| u.email == email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), username: username.to_string(), email: email.to_string() };
            users.insert(username.to_string(), user.clone());
            Ok(user)
        }

        async fn delete_user(&self, user_id: Uuid) -> Result<(), AuthError> {
            self.users.lock().unwrap().retain(|_, u| u.id != user_id);
            self.creds.lock().unwrap().remove(&user_id);
            self.roles.lock().unwrap().remove(&user_id);
            Ok(())
        }

        async fn get_credentials(&self, user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.lock().unwrap();
            Ok(creds.get(&user_id).cloned())
        }

        async fn upsert_password(&self, user_id: Uuid, password_hash: String, password_algorithm: String) -> Result<Credentials, AuthError> {
            let mut creds = self.creds.lock().unwrap();
            let c = Credentials { user_id, password_hash, password_algorithm };
            creds.insert(user_id, c.clone());
            Ok(c)
        }

        async fn get_roles(&self, user_id: Uuid) -> Result<Vec<String>, AuthError> {
            let roles = self.roles.lock().unwrap();
            Ok(roles.get(&user_id).cloned().unwrap_or_default())
        }

        async fn assign_role(&self, user_id: Uuid, role: &str) -> Result<(), AuthError> {
            let mut roles = self.roles.lock().unwrap();
            let held = roles.entry(user_id).or_default();
            if !held.iter().any(|r| r == role) {
                held.push(role.to_string());
            }
            Ok(())
        }
    }

    /// Store whose every call fails, standing in for an unreachable database.
    #[derive(Default)]
    pub struct FailingAuthRepository;

    #[async_trait]
    impl AuthRepository for FailingAuthRepository {
        async fn find_user_by_username(&self, _username: &str) -> Result<Option<AuthUser>, AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }

        async fn create_user(&self, _username: &str, _email: &str) -> Result<AuthUser, AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }

        async fn delete_user(&self, _user_id: Uuid) -> Result<(), AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }

        async fn get_credentials(&self, _user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }

        async fn upsert_password(&self, _user_id: Uuid, _password_hash: String, _password_algorithm: String) -> Result<Credentials, AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }

        async fn get_roles(&self, _user_id: Uuid) -> Result<Vec<String>, AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }

        async fn assign_role(&self, _user_id: Uuid, _role: &str) -> Result<(), AuthError> {
            Err(AuthError::Repository("connection refused".into()))
        }
    }

    /// Store whose lookups never finish in time.
    pub struct StalledAuthRepository {
        pub delay: std::time::Duration,
    }

    #[async_trait]
    impl AuthRepository for StalledAuthRepository {
        async fn find_user_by_username(&self, _username: &str) -> Result<Option<AuthUser>, AuthError> {
            tokio::time::sleep(self.delay).await;
            Ok(None)
        }

        async fn create_user(&self, _username: &str, _email: &str) -> Result<AuthUser, AuthError> {
            Err(AuthError::Repository("stalled store is read-only".into()))
        }

        async fn delete_user(&self, _user_id: Uuid) -> Result<(), AuthError> {
            Err(AuthError::Repository("stalled store is read-only".into()))
        }

        async fn get_credentials(&self, _user_id: Uuid) -> Result<Option<Credentials>, AuthError> {
            tokio::time::sleep(self.delay).await;
            Ok(None)
        }

        async fn upsert_password(&self, _user_id: Uuid, _password_hash: String, _password_algorithm: String) -> Result<Credentials, AuthError> {
            Err(AuthError::Repository("stalled store is read-only".into()))
        }

        async fn get_roles(&self, _user_id: Uuid) -> Result<Vec<String>, AuthError> {
            tokio::time::sleep(self.delay).await;
            Ok(Vec::new())
        }

        async fn assign_role(&self, _user_id: Uuid, _role: &str) -> Result<(), AuthError> {
            Err(AuthError::Repository("stalled store is read-only".into()))
        }
    }
}
