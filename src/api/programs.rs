use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{filter, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::program::{Program, ProgramInput};

pub async fn list_programs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Program>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.programs().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_program(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.programs().get(id).await?)))
}

pub async fn create_program(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ProgramInput>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    Ok(Json(ApiResponse::success(state.programs().create(payload).await?)))
}

pub async fn update_program(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<ProgramInput>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.programs().update(id, payload).await?)))
}

pub async fn duplicate_program(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Program>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.programs().duplicate(id).await?)))
}

pub async fn delete_program(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.programs().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new("Program deleted"))))
}
