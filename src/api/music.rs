use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::music::{Music, MusicInput};

pub async fn list_music(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Music>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.music().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_music_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Music>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.music().get(id).await?)))
}

pub async fn create_music_item(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MusicInput>,
) -> Result<Json<ApiResponse<Music>>, ApiError> {
    Ok(Json(ApiResponse::success(state.music().create(payload).await?)))
}

pub async fn update_music_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<MusicInput>,
) -> Result<Json<ApiResponse<Music>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.music().update(id, payload).await?)))
}

pub async fn duplicate_music_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Music>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.music().duplicate(id).await?)))
}

pub async fn delete_music_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.music().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Music deleted"))))
}
