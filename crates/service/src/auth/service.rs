use std::sync::Arc;
use std::time::Duration;

use tracing::{info, debug, error, warn, instrument};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, CredentialCheck, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::token::TokenIssuer;
use super::validator::CredentialValidator;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const DEFAULT_ROLE: &str = "Customer";

fn check_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!("password too short (>={})", MIN_PASSWORD_LEN)));
    }
    Ok(())
}

async fn hash_off_runtime(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AuthError::HashError(e.to_string()))?
}

/// Auth business service independent of web framework.
///
/// Composes the credential validator and the token issuer; every collaborator
/// is handed in through `new`.
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    validator: CredentialValidator,
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, issuer: Arc<TokenIssuer>, lookup_timeout: Duration) -> Self {
        let validator = CredentialValidator::new(Arc::clone(&repo), lookup_timeout);
        Self { repo, validator, issuer }
    }

    pub fn issuer(&self) -> &Arc<TokenIssuer> { &self.issuer }

    /// Register a new user with a hashed password. Without explicit roles the
    /// account gets `Customer`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenIssuer, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let issuer = Arc::new(TokenIssuer::new("bookstore", b"doc-secret", chrono::Duration::hours(5)).unwrap());
    /// let svc = AuthService::new(repo, issuer, Duration::from_secs(1));
    /// let input = RegisterInput { username: "user".into(), email: "user@example.com".into(), password: "Secret123".into(), roles: vec![] };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip_all, fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        models::user::validate_username(&input.username)?;
        models::user::validate_email(&input.email)?;
        check_password(&input.password)?;
        if let Some(existing) = self.repo.find_user_by_username(input.username.trim()).await? {
            debug!("user exists: {}", existing.username);
            return Err(AuthError::Conflict);
        }

        let hash = hash_off_runtime(input.password).await?;
        let user = self.repo.create_user(input.username.trim(), input.email.trim()).await?;
        let roles = if input.roles.is_empty() { vec![DEFAULT_ROLE.to_string()] } else { input.roles };

        if let Err(e) = self.complete_account(user.id, hash, &roles).await {
            warn!(user_id = %user.id, error = %e, "registration incomplete, removing account");
            if let Err(undo) = self.repo.delete_user(user.id).await {
                error!(user_id = %user.id, error = %undo, "failed to remove incomplete account");
            }
            return Err(e);
        }
        info!(user_id = %user.id, username = %user.username, roles = ?roles, "user_registered");
        Ok(user)
    }

    async fn complete_account(&self, user_id: Uuid, hash: String, roles: &[String]) -> Result<(), AuthError> {
        self.repo.upsert_password(user_id, hash, password::ALGORITHM.to_string()).await?;
        for role in roles {
            self.repo.assign_role(user_id, role).await?;
        }
        Ok(())
    }

    /// Idempotent registration used for startup seeding: an existing account
    /// keeps its password and only gains any missing roles. An account left
    /// without credentials gets the configured password.
    #[instrument(skip_all, fields(username = %input.username))]
    pub async fn ensure_user(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        let Some(existing) = self.repo.find_user_by_username(input.username.trim()).await? else {
            return self.register(input).await;
        };
        if self.repo.get_credentials(existing.id).await?.is_none() {
            check_password(&input.password)?;
            let hash = hash_off_runtime(input.password).await?;
            self.repo.upsert_password(existing.id, hash, password::ALGORITHM.to_string()).await?;
            info!(user_id = %existing.id, "seed user password restored");
        }
        for role in &input.roles {
            self.repo.assign_role(existing.id, role).await?;
        }
        debug!(user_id = %existing.id, "seed user already present");
        Ok(existing)
    }

    /// Authenticate a user and issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenIssuer, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let issuer = Arc::new(TokenIssuer::new("bookstore", b"doc-secret", chrono::Duration::hours(5)).unwrap());
    /// let svc = AuthService::new(repo, issuer, Duration::from_secs(1));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "u".into(), email: "u@e.com".into(), password: "Passw0rd".into(), roles: vec![] }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "u".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert_eq!(session.roles, vec!["Customer".to_string()]);
    /// assert!(!session.token.token.is_empty());
    /// ```
    #[instrument(skip_all, fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = match self.validator.validate(&input.username, &input.password).await? {
            CredentialCheck::Authenticated(user) => user,
            CredentialCheck::Rejected => {
                warn!("sign in failed");
                return Err(AuthError::Unauthorized);
            }
        };

        let roles = self.repo.get_roles(user.id).await.map_err(AuthError::into_unavailable)?;
        let token = self.issuer.issue(&user, &roles)?;
        info!(user_id = %user.id, token_id = %token.token_id, expires_at = %token.expires_at, "user_logged_in");
        Ok(AuthSession { user, roles, token })
    }
}
