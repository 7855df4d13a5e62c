use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, PaginatorTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::author;
use crate::errors::ModelError;

// varchar widths from the book migration
pub const TITLE_MAX_LEN: usize = 256;
pub const ISBN_MAX_LEN: usize = 32;
pub const IMAGE_MAX_LEN: usize = 512;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    #[sea_orm(column_type = "Double", nullable)]
    pub price: Option<f64>,
    pub author_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Author,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Author => Entity::belongs_to(author::Entity)
                .from(Column::AuthorId)
                .to(author::Column::Id)
                .into(),
        }
    }
}

impl Related<author::Entity> for Entity {
    fn to() -> RelationDef { Relation::Author.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for insert/update.
#[derive(Clone, Debug, PartialEq)]
pub struct BookFields {
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub author_id: i32,
}

impl BookFields {
    fn apply(self, am: &mut ActiveModel) {
        am.title = Set(self.title);
        am.year = Set(self.year);
        am.isbn = Set(self.isbn);
        am.summary = Set(self.summary);
        am.image = Set(self.image);
        am.price = Set(self.price);
        am.author_id = Set(self.author_id);
    }
}

/// One page of rows ordered by id; `page_idx` is 0-based.
pub async fn list(db: &DatabaseConnection, page_idx: u64, per_page: u64) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(ModelError::db)
}

pub async fn list_by_author(db: &DatabaseConnection, author_id: i32) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .filter(Column::AuthorId.eq(author_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(ModelError::db)
}

pub async fn create(db: &DatabaseConnection, fields: BookFields) -> Result<Model, ModelError> {
    let mut am = <ActiveModel as Default>::default();
    fields.apply(&mut am);
    am.insert(db).await.map_err(ModelError::db)
}

/// `Ok(None)` when the id is unknown.
pub async fn update(db: &DatabaseConnection, id: i32, fields: BookFields) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(ModelError::db)? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    fields.apply(&mut am);
    let updated = am.update(db).await.map_err(ModelError::db)?;
    Ok(Some(updated))
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(ModelError::db)?;
    Ok(res.rows_affected > 0)
}
