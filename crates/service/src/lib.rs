//! Service layer for the bookstore API.
//! - `auth`: credential validation, token issuing and verification, account enrolment.
//! - `catalog`: author/book CRUD behind repository traits.
//! - Independent of the HTTP framework; reuses entity definitions from `models`.

pub mod errors;
pub mod auth;
pub mod catalog;
pub mod pagination;
#[cfg(test)]
pub mod test_support;
