use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::movie::{Movie, MovieInput};

/// Lists movies ordered by their collation key.
///
/// # Endpoint
/// `GET /api/movies?name=&page=&limit=`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Movie>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.movies().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.movies().get(id).await?)))
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MovieInput>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    Ok(Json(ApiResponse::success(state.movies().create(payload).await?)))
}

/// Replaces a movie. Media are matched by position, so the first
/// `min(old, new)` media keep their ids.
///
/// # Endpoint
/// `PUT /api/movies/{id}`
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<MovieInput>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.movies().update(id, payload).await?)))
}

/// # Endpoint
/// `POST /api/movies/{id}/duplicate`
pub async fn duplicate_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.movies().duplicate(id).await?)))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.movies().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Movie deleted"))))
}
