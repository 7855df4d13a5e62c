use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use configs::LoginFailureStatus;
use service::auth::{
    domain::{LoginInput, RegisterInput},
    errors::AuthError,
    AuthService,
};
use service::catalog::CatalogService;

use crate::errors::{JsonApiError, GENERIC_FAILURE};

pub const ADMINISTRATOR: &str = "Administrator";

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub catalog: Arc<CatalogService>,
    /// Status for rejected logins: 401, or 404 for legacy clients.
    pub login_failure_status: StatusCode,
}

impl ServerState {
    pub fn new(auth: Arc<AuthService>, catalog: Arc<CatalogService>, on_login_failure: LoginFailureStatus) -> Self {
        let login_failure_status = match on_login_failure {
            LoginFailureStatus::Unauthorized => StatusCode::UNAUTHORIZED,
            LoginFailureStatus::NotFound => StatusCode::NOT_FOUND,
        };
        Self { auth, catalog, login_failure_status }
    }
}

/// Both fields are optional on the wire so a missing one is a 400, not a body rejection.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
}

pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, JsonApiError> {
    let Json(req) = payload.map_err(|e| {
        warn!(error = %e, "malformed login body");
        JsonApiError::bad_request("username and password are required")
    })?;
    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => (u, p),
        _ => {
            warn!("login without username or password");
            return Err(JsonApiError::bad_request("username and password are required"));
        }
    };

    match state.auth.login(LoginInput { username, password }).await {
        Ok(session) => Ok(Json(LoginResponse { token: session.token.token })),
        Err(AuthError::Unauthorized) => Err(JsonApiError::new(state.login_failure_status, "invalid username or password")),
        Err(AuthError::Validation(msg)) => Err(JsonApiError::bad_request(msg)),
        Err(e) => {
            error!(code = e.code(), error = %e, "login failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE))
        }
    }
}

/// Anonymous enrolment. Callers cannot pick roles; new accounts are customers.
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, JsonApiError> {
    let Json(req) = payload?;
    let input = RegisterInput { username: req.username, email: req.email, password: req.password, roles: Vec::new() };
    let user = state.auth.register(input).await?;
    Ok(Json(RegisterResponse { user_id: user.id }))
}

/// Per-request identity derived from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    pub subject: String,
    pub user_id: Uuid,
    pub roles: Vec<String>,
    pub token_id: String,
}

impl SecurityContext {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_role(&self, role: &str) -> Result<(), JsonApiError> {
        if self.has_role(role) {
            return Ok(());
        }
        warn!(user_id = %self.user_id, required = role, "missing role");
        Err(JsonApiError::forbidden().with_detail(format!("requires role {}", role)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SecurityContext
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<SecurityContext>().cloned().ok_or_else(JsonApiError::unauthorized)
    }
}

/// Extractor that admits only callers holding the `Administrator` role.
/// Runs before any body extractor, so a forbidden caller never gets its body parsed.
#[derive(Debug, Clone)]
pub struct Administrator(pub SecurityContext);

#[async_trait]
impl<S> FromRequestParts<S> for Administrator
where
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = SecurityContext::from_request_parts(parts, state).await?;
        ctx.require_role(ADMINISTRATOR)?;
        Ok(Administrator(ctx))
    }
}

/// Token from an `Authorization` value; the scheme name is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Gate for protected routes: requires `Authorization: Bearer <token>` with a
/// valid signature and unexpired `exp`, then exposes the claims as a
/// [`SecurityContext`] request extension. Rejections never reach the handler.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_owned();
    let token = match req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(h) => match bearer_token(h) {
            Some(t) => t.to_owned(),
            None => {
                warn!(path = %path, "invalid Authorization format (expect Bearer)");
                return Err(JsonApiError::unauthorized());
            }
        },
        None => {
            warn!(path = %path, "missing Authorization header");
            return Err(JsonApiError::unauthorized());
        }
    };

    let claims = state.auth.issuer().verify(&token).map_err(|e| {
        warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::unauthorized()
    })?;
    let user_id = Uuid::parse_str(&claims.nameid).map_err(|_| {
        warn!(path = %path, "token carries a malformed principal id");
        JsonApiError::unauthorized()
    })?;

    req.extensions_mut().insert(SecurityContext {
        subject: claims.sub,
        user_id,
        roles: claims.role,
        token_id: claims.jti,
    });
    Ok(next.run(req).await)
}
