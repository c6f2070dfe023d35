use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::book::{Book, BookInput};

pub async fn list_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Book>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.books().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.books().get(id).await?)))
}

/// Authors and genres must exist and may not be empty.
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookInput>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    Ok(Json(ApiResponse::success(state.books().create(payload).await?)))
}

pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<BookInput>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.books().update(id, payload).await?)))
}

pub async fn duplicate_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Book>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.books().duplicate(id).await?)))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.books().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Book deleted"))))
}
