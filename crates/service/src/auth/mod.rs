//! Auth module: credential validation, token issuing and account enrolment.
//!
//! Flow: `CredentialValidator` checks a username/password against the
//! `AuthRepository`, `TokenIssuer` mints an HS256 token for the principal, and
//! the HTTP layer calls `TokenIssuer::verify` on every protected request.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;
pub mod validator;

pub use service::AuthService;
pub use token::TokenIssuer;
pub use validator::CredentialValidator;
