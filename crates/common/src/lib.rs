//! Shared plumbing for the bookstore crates: logging setup and small wire types.

pub mod types;
pub mod utils;
