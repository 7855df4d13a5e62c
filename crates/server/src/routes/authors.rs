use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use service::catalog::domain::{Author, AuthorInput, Book};
use service::pagination::Pagination;

use super::auth::{Administrator, ServerState};
use crate::errors::JsonApiError;

// Extractor rejections are taken as `Result` so they render as `JsonApiError`.

pub async fn list(
    State(state): State<ServerState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Author>>, JsonApiError> {
    let Query(page) = page?;
    Ok(Json(state.catalog.list_authors(page).await?))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Author>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.catalog.get_author(id).await?))
}

pub async fn books(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Vec<Book>>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.catalog.author_books(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    _admin: Administrator,
    input: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), JsonApiError> {
    let Json(input) = input?;
    let author = state.catalog.create_author(input).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

pub async fn update(
    State(state): State<ServerState>,
    _admin: Administrator,
    id: Result<Path<i32>, PathRejection>,
    input: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<Json<Author>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = input?;
    Ok(Json(state.catalog.update_author(id, input).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    _admin: Administrator,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.catalog.delete_author(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
