use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod auth;
pub mod authors;
pub mod books;
pub mod home;

pub use auth::ServerState;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the application router. Everything except `/health`, login and
/// register sits behind the bearer-token gate.
pub fn build_router(state: ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/users/login", post(auth::login))
        // path used by legacy clients
        .route("/api/Users", post(auth::login))
        .route("/api/users/register", post(auth::register));

    let protected = Router::new()
        .route("/api/home", get(home::list))
        .route("/api/home/:id", get(home::get))
        .route("/api/authors", get(authors::list).post(authors::create))
        .route("/api/authors/:id", get(authors::get).put(authors::update).delete(authors::delete))
        .route("/api/authors/:id/books", get(authors::books))
        .route("/api/books", get(books::list).post(books::create))
        .route("/api/books/:id", get(books::get).put(books::update).delete(books::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token));

    public
        .merge(protected)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
