//! Show endpoints, including the nested season resources.
//!
//! Seasons live under `/shows/{id}/seasons`; a season is only visible
//! through the show that owns it.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::show::{Season, SeasonInput, Show, ShowInput};

pub async fn list_shows(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Show>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.shows().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Show>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.shows().get(id).await?)))
}

pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ShowInput>,
) -> Result<Json<ApiResponse<Show>>, ApiError> {
    Ok(Json(ApiResponse::success(state.shows().create(payload).await?)))
}

pub async fn update_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ShowInput>,
) -> Result<Json<ApiResponse<Show>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(
        state.shows().update(id, payload).await?,
    )))
}

/// Copies the show with all seasons and episodes.
///
/// # Endpoint
/// `POST /api/shows/{id}/duplicate`
pub async fn duplicate_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Show>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.shows().duplicate(id).await?)))
}

pub async fn delete_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.shows().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Show deleted"))))
}

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<Season>>>, ApiError> {
    let show_id = validate_id(show_id)?;
    let seasons = state.shows().list_seasons(show_id).await?;
    Ok(Json(ApiResponse::success(seasons)))
}

pub async fn get_season(
    State(state): State<Arc<AppState>>,
    Path((show_id, season_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let (show_id, season_id) = (validate_id(show_id)?, validate_id(season_id)?);
    let season = state.shows().get_season(show_id, season_id).await?;
    Ok(Json(ApiResponse::success(season)))
}

/// Appends a season; its position is one past the current last season.
///
/// # Endpoint
/// `POST /api/shows/{id}/seasons`
pub async fn add_season(
    State(state): State<Arc<AppState>>,
    Path(show_id): Path<i32>,
    Json(payload): Json<SeasonInput>,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let show_id = validate_id(show_id)?;
    let season = state.shows().add_season(show_id, payload).await?;
    Ok(Json(ApiResponse::success(season)))
}

/// Replaces a season; episodes are matched by position.
///
/// # Endpoint
/// `PUT /api/shows/{id}/seasons/{season_id}`
pub async fn update_season(
    State(state): State<Arc<AppState>>,
    Path((show_id, season_id)): Path<(i32, i32)>,
    Json(payload): Json<SeasonInput>,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let (show_id, season_id) = (validate_id(show_id)?, validate_id(season_id)?);
    let season = state
        .shows()
        .update_season(show_id, season_id, payload)
        .await?;
    Ok(Json(ApiResponse::success(season)))
}

pub async fn remove_season(
    State(state): State<Arc<AppState>>,
    Path((show_id, season_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let (show_id, season_id) = (validate_id(show_id)?, validate_id(season_id)?);
    state.shows().remove_season(show_id, season_id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Season removed",
    ))))
}
