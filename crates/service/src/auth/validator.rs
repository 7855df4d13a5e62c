use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use super::domain::{AuthUser, CredentialCheck, Credentials};
use super::errors::AuthError;
use super::password::verify_password;
use super::repository::AuthRepository;

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks a username/password pair against the user store.
///
/// Wrong usernames and wrong passwords are indistinguishable to the caller.
/// A failing or slow store is reported as `AuthError::Unavailable`, never as a
/// rejection.
pub struct CredentialValidator {
    repo: Arc<dyn AuthRepository>,
    lookup_timeout: Duration,
}

impl CredentialValidator {
    pub fn new(repo: Arc<dyn AuthRepository>, lookup_timeout: Duration) -> Self {
        Self { repo, lookup_timeout }
    }

    /// # Examples
    /// ```
    /// use service::auth::{validator::CredentialValidator, repository::{AuthRepository, mock::MockAuthRepository}};
    /// use service::auth::{domain::CredentialCheck, password};
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let user = tokio_test::block_on(repo.create_user("alice", "alice@bookstore.com")).unwrap();
    /// let hash = password::hash_password("correct").unwrap();
    /// tokio_test::block_on(repo.upsert_password(user.id, hash, "argon2".into())).unwrap();
    /// let validator = CredentialValidator::new(repo, Duration::from_secs(1));
    /// let ok = tokio_test::block_on(validator.validate("alice", "correct")).unwrap();
    /// assert_eq!(ok, CredentialCheck::Authenticated(user));
    /// let bad = tokio_test::block_on(validator.validate("alice", "wrong")).unwrap();
    /// assert_eq!(bad, CredentialCheck::Rejected);
    /// ```
    #[instrument(skip_all, fields(username = %username))]
    pub async fn validate(&self, username: &str, password: &str) -> Result<CredentialCheck, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Validation("username and password are required".into()));
        }

        let found = match tokio::time::timeout(self.lookup_timeout, self.lookup(username)).await {
            Ok(res) => res.map_err(AuthError::into_unavailable)?,
            Err(_) => {
                warn!(timeout_ms = self.lookup_timeout.as_millis() as u64, "credential store lookup timed out");
                return Err(AuthError::Unavailable("credential store lookup timed out".into()));
            }
        };

        let Some((user, creds)) = found else {
            debug!("no account or no stored credentials");
            return Ok(CredentialCheck::Rejected);
        };

        let candidate = password.to_string();
        let stored = creds.password_hash;
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored))
            .await
            .map_err(|e| AuthError::HashError(e.to_string()))??;

        if matches {
            Ok(CredentialCheck::Authenticated(user))
        } else {
            debug!("password mismatch");
            Ok(CredentialCheck::Rejected)
        }
    }

    async fn lookup(&self, username: &str) -> Result<Option<(AuthUser, Credentials)>, AuthError> {
        let Some(user) = self.repo.find_user_by_username(username).await? else {
            return Ok(None);
        };
        let creds = self.repo.get_credentials(user.id).await?;
        Ok(creds.map(|c| (user, c)))
    }
}
