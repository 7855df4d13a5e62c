use axum::{
    extract::{rejection::PathRejection, Path},
    Json,
};

use crate::errors::JsonApiError;

pub async fn list() -> Json<Vec<&'static str>> {
    Json(vec!["value1", "value2"])
}

pub async fn get(id: Result<Path<i32>, PathRejection>) -> Result<Json<&'static str>, JsonApiError> {
    let Path(_id) = id?;
    Ok(Json("value"))
}
