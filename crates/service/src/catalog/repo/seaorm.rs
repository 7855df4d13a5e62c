use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::catalog::domain::{Author, AuthorInput, Book, BookInput};
use crate::catalog::repository::{AuthorRepository, BookRepository};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// SeaORM-backed catalog; implements both repositories over one connection pool.
pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl AuthorRepository for SeaOrmCatalogRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<Author>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        let rows = models::author::list(&self.db, page_idx, per_page).await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Author>, ServiceError> {
        let found = models::author::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Author::from))
    }

    async fn create(&self, input: AuthorInput) -> Result<Author, ServiceError> {
        let created = models::author::create(&self.db, &input.firstname, &input.lastname, input.bio.as_deref()).await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, input: AuthorInput) -> Result<Option<Author>, ServiceError> {
        let updated = models::author::update(&self.db, id, &input.firstname, &input.lastname, input.bio.as_deref()).await?;
        Ok(updated.map(Author::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::author::delete(&self.db, id).await?)
    }
}

#[async_trait]
impl BookRepository for SeaOrmCatalogRepository {
    async fn list(&self, page: Pagination) -> Result<Vec<Book>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        let rows = models::book::list(&self.db, page_idx, per_page).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn list_by_author(&self, author_id: i32) -> Result<Vec<Book>, ServiceError> {
        let rows = models::book::list_by_author(&self.db, author_id).await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Book>, ServiceError> {
        let found = models::book::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Book::from))
    }

    async fn create(&self, input: BookInput) -> Result<Book, ServiceError> {
        let created = models::book::create(&self.db, input.into()).await?;
        Ok(created.into())
    }

    async fn update(&self, id: i32, input: BookInput) -> Result<Option<Book>, ServiceError> {
        let updated = models::book::update(&self.db, id, input.into()).await?;
        Ok(updated.map(Book::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::book::delete(&self.db, id).await?)
    }
}
