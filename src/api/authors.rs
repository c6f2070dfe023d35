use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::author::{Author, AuthorInput};

pub async fn list_authors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Author>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.authors().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.authors().get(id).await?)))
}

pub async fn create_author(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AuthorInput>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    Ok(Json(ApiResponse::success(state.authors().create(payload).await?)))
}

pub async fn update_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<AuthorInput>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.authors().update(id, payload).await?)))
}

pub async fn duplicate_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Author>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.authors().duplicate(id).await?)))
}

pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.authors().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Author deleted"))))
}
