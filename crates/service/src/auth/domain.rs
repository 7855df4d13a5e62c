use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token::AccessToken;

/// Login input. The password is never persisted or logged.
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput").field("username", &self.username).finish_non_exhaustive()
    }
}

/// Registration input
#[derive(Clone, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("roles", &self.roles)
            .finish_non_exhaustive()
    }
}

/// Domain user (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Outcome of a credential check. A rejection never says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCheck {
    Authenticated(AuthUser),
    Rejected,
}

/// Login result
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthUser,
    pub roles: Vec<String>,
    pub token: AccessToken,
}
