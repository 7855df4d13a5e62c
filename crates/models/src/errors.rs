use std::fmt::Display;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors raised by entity helpers; the service layer maps them onto its own taxonomy.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn db(e: impl Display) -> Self { Self::Db(e.to_string()) }

    /// Like [`db`](Self::db), but a unique-constraint violation becomes `Conflict`.
    pub fn from_insert(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::Conflict(msg),
            _ => Self::db(e),
        }
    }
}
