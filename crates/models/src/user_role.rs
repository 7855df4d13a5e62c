use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, QueryFilter, QueryOrder, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const ROLE_MAX_LEN: usize = 64;

/// Role names assigned to a user, in assignment order.
pub async fn roles_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<String>, ModelError> {
    let rows = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(ModelError::db)?;
    Ok(rows.into_iter().map(|r| r.role).collect())
}

/// Assign `role` unless the user already holds it.
pub async fn assign(db: &DatabaseConnection, user_id: Uuid, role: &str) -> Result<(), ModelError> {
    if role.trim().is_empty() {
        return Err(ModelError::Validation("role name required".into()));
    }
    if role.chars().count() > ROLE_MAX_LEN {
        return Err(ModelError::Validation("role name too long (<=64)".into()));
    }
    let existing = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Role.eq(role.to_string()))
        .one(db)
        .await
        .map_err(ModelError::db)?;
    if existing.is_some() {
        return Ok(());
    }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        role: Set(role.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(ModelError::db)?;
    Ok(())
}
