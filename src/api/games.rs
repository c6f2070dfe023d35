use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::game::{Cheat, CheatInput, Game, GameInput};

pub async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Game>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.games().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.games().get(id).await?)))
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GameInput>,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    Ok(Json(ApiResponse::success(state.games().create(payload).await?)))
}

pub async fn update_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<GameInput>,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(
        state.games().update(id, payload).await?,
    )))
}

/// Copies the game; its cheat, if any, is copied along.
pub async fn duplicate_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Game>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.games().duplicate(id).await?)))
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.games().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Game deleted"))))
}

/// GET /games/{id}/cheat
pub async fn get_cheat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Cheat>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.games().get_cheat(id).await?)))
}

/// PUT /games/{id}/cheat
/// Creates the cheat or replaces it; data rows are matched by position.
pub async fn put_cheat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<CheatInput>,
) -> Result<Json<ApiResponse<Cheat>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(
        state.games().put_cheat(id, payload).await?,
    )))
}

/// DELETE /games/{id}/cheat
pub async fn delete_cheat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.games().remove_cheat(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Cheat deleted"))))
}
