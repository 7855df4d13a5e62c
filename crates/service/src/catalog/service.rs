use std::sync::Arc;

use models::{author::NAME_MAX_LEN, book::{IMAGE_MAX_LEN, ISBN_MAX_LEN, TITLE_MAX_LEN}};
use tracing::{info, instrument};

use super::domain::{Author, AuthorInput, Book, BookInput};
use super::repository::{AuthorRepository, BookRepository};
use crate::errors::ServiceError;
use crate::pagination::Pagination;

/// Author and book operations with input validation.
#[derive(Clone)]
pub struct CatalogService {
    authors: Arc<dyn AuthorRepository>,
    books: Arc<dyn BookRepository>,
}

fn require(field: &str, value: &str, max_len: usize) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    fit(field, value, max_len)
}

// Postgres varchar(n) counts characters, not bytes.
fn fit(field: &str, value: &str, max_len: usize) -> Result<(), ServiceError> {
    if value.chars().count() > max_len {
        return Err(ServiceError::Validation(format!("{} exceeds {} characters", field, max_len)));
    }
    Ok(())
}

fn check_author(input: &AuthorInput) -> Result<(), ServiceError> {
    require("firstname", &input.firstname, NAME_MAX_LEN)?;
    require("lastname", &input.lastname, NAME_MAX_LEN)
}

fn check_book(input: &BookInput) -> Result<(), ServiceError> {
    require("title", &input.title, TITLE_MAX_LEN)?;
    require("isbn", &input.isbn, ISBN_MAX_LEN)?;
    if let Some(image) = &input.image {
        fit("image", image, IMAGE_MAX_LEN)?;
    }
    match input.price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(ServiceError::Validation("price must be a non-negative number".into())),
        _ => Ok(()),
    }
}

impl CatalogService {
    pub fn new(authors: Arc<dyn AuthorRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { authors, books }
    }

    pub async fn list_authors(&self, page: Pagination) -> Result<Vec<Author>, ServiceError> {
        self.authors.list(page).await
    }

    pub async fn get_author(&self, id: i32) -> Result<Author, ServiceError> {
        self.authors.find(id).await?.ok_or_else(|| ServiceError::not_found("author", id))
    }

    /// Books written by an author; an unknown author is `NotFound`, not an empty list.
    pub async fn author_books(&self, id: i32) -> Result<Vec<Book>, ServiceError> {
        self.get_author(id).await?;
        self.books.list_by_author(id).await
    }

    #[instrument(skip_all)]
    pub async fn create_author(&self, input: AuthorInput) -> Result<Author, ServiceError> {
        check_author(&input)?;
        let author = self.authors.create(input).await?;
        info!(author_id = author.id, "author_created");
        Ok(author)
    }

    #[instrument(skip_all, fields(author_id = id))]
    pub async fn update_author(&self, id: i32, input: AuthorInput) -> Result<Author, ServiceError> {
        check_author(&input)?;
        self.authors.update(id, input).await?.ok_or_else(|| ServiceError::not_found("author", id))
    }

    /// Deletes the author together with its books.
    #[instrument(skip_all, fields(author_id = id))]
    pub async fn delete_author(&self, id: i32) -> Result<(), ServiceError> {
        if !self.authors.delete(id).await? {
            return Err(ServiceError::not_found("author", id));
        }
        info!("author_deleted");
        Ok(())
    }

    pub async fn list_books(&self, page: Pagination) -> Result<Vec<Book>, ServiceError> {
        self.books.list(page).await
    }

    pub async fn get_book(&self, id: i32) -> Result<Book, ServiceError> {
        self.books.find(id).await?.ok_or_else(|| ServiceError::not_found("book", id))
    }

    #[instrument(skip_all, fields(author_id = input.author_id))]
    pub async fn create_book(&self, input: BookInput) -> Result<Book, ServiceError> {
        check_book(&input)?;
        self.ensure_author(input.author_id).await?;
        let book = self.books.create(input).await?;
        info!(book_id = book.id, "book_created");
        Ok(book)
    }

    #[instrument(skip_all, fields(book_id = id))]
    pub async fn update_book(&self, id: i32, input: BookInput) -> Result<Book, ServiceError> {
        check_book(&input)?;
        self.ensure_author(input.author_id).await?;
        self.books.update(id, input).await?.ok_or_else(|| ServiceError::not_found("book", id))
    }

    #[instrument(skip_all, fields(book_id = id))]
    pub async fn delete_book(&self, id: i32) -> Result<(), ServiceError> {
        if !self.books.delete(id).await? {
            return Err(ServiceError::not_found("book", id));
        }
        Ok(())
    }

    // A book pointing at a missing author is a bad request, not a missing resource.
    async fn ensure_author(&self, author_id: i32) -> Result<(), ServiceError> {
        if self.authors.find(author_id).await?.is_none() {
            return Err(ServiceError::Validation(format!("author {} does not exist", author_id)));
        }
        Ok(())
    }
}
