#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::Service;

use configs::LoginFailureStatus;
use server::routes::{self, ServerState};
use service::auth::password;
use service::auth::repository::{mock::MockAuthRepository, AuthRepository};
use service::auth::{AuthService, TokenIssuer};
use service::catalog::repository::mock::InMemoryCatalog;
use service::catalog::CatalogService;

pub const KEY: &[u8] = b"integration-signing-key-0123456789abcdef";
pub const ISSUER: &str = "bookstore";

pub fn issuer() -> Arc<TokenIssuer> {
    Arc::new(TokenIssuer::new(ISSUER, KEY, chrono::Duration::hours(5)).unwrap())
}

pub fn state_with(repo: Arc<dyn AuthRepository>, lookup_timeout: Duration, on_failure: LoginFailureStatus) -> ServerState {
    let auth = Arc::new(AuthService::new(repo, issuer(), lookup_timeout));
    let store = Arc::new(InMemoryCatalog::default());
    let catalog = Arc::new(CatalogService::new(store.clone(), store));
    ServerState::new(auth, catalog, on_failure)
}

/// Mock store holding alice/correct (Customer) and admin/P@ssword1 (Administrator).
pub async fn seeded_repo() -> Arc<MockAuthRepository> {
    let repo = Arc::new(MockAuthRepository::default());
    for (name, pw, role) in [("alice", "correct", "Customer"), ("admin", "P@ssword1", "Administrator")] {
        let u = repo.create_user(name, &format!("{}@bookstore.com", name)).await.unwrap();
        repo.upsert_password(u.id, password::hash_password(pw).unwrap(), password::ALGORITHM.into()).await.unwrap();
        repo.assign_role(u.id, role).await.unwrap();
    }
    repo
}

pub async fn seeded_state(on_failure: LoginFailureStatus) -> ServerState {
    state_with(seeded_repo().await, Duration::from_secs(5), on_failure)
}

pub async fn app(on_failure: LoginFailureStatus) -> (Router, ServerState) {
    let state = seeded_state(on_failure).await;
    (routes::build_router(state.clone()), state)
}

pub fn json_request(method: &str, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {}", t));
    }
    b.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {}", t));
    }
    b.body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().call(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn login(app: &Router, username: &str, pw: &str) -> String {
    let (status, body) = send(app, json_request("POST", "/api/users/login", &serde_json::json!({"username": username, "password": pw}), None)).await;
    assert_eq!(status, StatusCode::OK, "login {} failed: {}", username, body);
    body["token"].as_str().unwrap().to_string()
}
