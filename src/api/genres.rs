use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::genre::{Genre, GenreInput};

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Genre>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.genres().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.genres().get(id).await?)))
}

pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenreInput>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    Ok(Json(ApiResponse::success(state.genres().create(payload).await?)))
}

pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<GenreInput>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.genres().update(id, payload).await?)))
}

pub async fn duplicate_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.genres().duplicate(id).await?)))
}

pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.genres().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Genre deleted"))))
}
