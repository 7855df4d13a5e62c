//! Catalog module: authors and books.
//!
//! Books reference authors by id; an author's books come from an explicit
//! query (`BookRepository::list_by_author`) rather than a loaded collection.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CatalogService;
