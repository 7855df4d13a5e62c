use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub bio: Option<String>,
}

/// Create/update payload for an author
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorInput {
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub author_id: i32,
}

/// Create/update payload for a book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub isbn: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub author_id: i32,
}

impl From<models::author::Model> for Author {
    fn from(m: models::author::Model) -> Self {
        Self { id: m.id, firstname: m.firstname, lastname: m.lastname, bio: m.bio }
    }
}

impl From<models::book::Model> for Book {
    fn from(m: models::book::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            isbn: m.isbn,
            summary: m.summary,
            image: m.image,
            price: m.price,
            author_id: m.author_id,
        }
    }
}

impl From<BookInput> for models::book::BookFields {
    fn from(i: BookInput) -> Self {
        Self {
            title: i.title,
            year: i.year,
            isbn: i.isbn,
            summary: i.summary,
            image: i.image,
            price: i.price,
            author_id: i.author_id,
        }
    }
}
