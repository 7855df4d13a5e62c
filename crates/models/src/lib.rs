//! sea-orm entities for the bookstore schema plus small write helpers.

pub mod errors;
pub mod db;
pub mod author;
pub mod book;
pub mod user;
pub mod user_credentials;
pub mod user_role;

#[cfg(test)]
mod tests;
