use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use service::catalog::domain::{Book, BookInput};
use service::pagination::Pagination;

use super::auth::{Administrator, ServerState};
use crate::errors::JsonApiError;

pub async fn list(
    State(state): State<ServerState>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Book>>, JsonApiError> {
    let Query(page) = page?;
    Ok(Json(state.catalog.list_books(page).await?))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Book>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.catalog.get_book(id).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    Administrator(ctx): Administrator,
    input: Result<Json<BookInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), JsonApiError> {
    let Json(input) = input?;
    let book = state.catalog.create_book(input).await?;
    tracing::info!(book_id = book.id, by = %ctx.subject, "book added to catalog");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update(
    State(state): State<ServerState>,
    _admin: Administrator,
    id: Result<Path<i32>, PathRejection>,
    input: Result<Json<BookInput>, JsonRejection>,
) -> Result<Json<Book>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = input?;
    Ok(Json(state.catalog.update_book(id, input).await?))
}

pub async fn delete(
    State(state): State<ServerState>,
    _admin: Administrator,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
