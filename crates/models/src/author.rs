use sea_orm::{entity::prelude::*, DatabaseConnection, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::book;
use crate::errors::ModelError;

/// Column width of `firstname` and `lastname`.
pub const NAME_MAX_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub bio: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Book,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Book => Entity::has_many(book::Entity).into() }
    }
}

impl Related<book::Entity> for Entity {
    fn to() -> RelationDef { Relation::Book.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// One page of rows ordered by id; `page_idx` is 0-based.
pub async fn list(db: &DatabaseConnection, page_idx: u64, per_page: u64) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(ModelError::db)
}

pub async fn create(db: &DatabaseConnection, firstname: &str, lastname: &str, bio: Option<&str>) -> Result<Model, ModelError> {
    let am = ActiveModel {
        firstname: Set(firstname.to_string()),
        lastname: Set(lastname.to_string()),
        bio: Set(bio.map(str::to_string)),
        ..Default::default()
    };
    am.insert(db).await.map_err(ModelError::db)
}

/// Overwrite all columns of an existing author. `Ok(None)` when the id is unknown.
pub async fn update(db: &DatabaseConnection, id: i32, firstname: &str, lastname: &str, bio: Option<&str>) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(ModelError::db)? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.firstname = Set(firstname.to_string());
    am.lastname = Set(lastname.to_string());
    am.bio = Set(bio.map(str::to_string));
    let updated = am.update(db).await.map_err(ModelError::db)?;
    Ok(Some(updated))
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}
