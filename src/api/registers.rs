use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::register::{REGISTERS, RegisterItem};

fn known_register(name: &str) -> Result<&'static str, ApiError> {
    REGISTERS
        .into_iter()
        .find(|r| *r == name)
        .ok_or_else(|| ApiError::not_found("Register", name))
}

/// GET /registers
pub async fn list_registers() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(REGISTERS.to_vec()))
}

/// GET /registers/{register}
pub async fn list_items(
    State(state): State<Arc<AppState>>,
    Path(register): Path<String>,
) -> Result<Json<ApiResponse<Vec<RegisterItem>>>, ApiError> {
    let register = known_register(&register)?;
    let items = state.store().registers().list(register).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// GET /registers/{register}/{code}
pub async fn get_item(
    State(state): State<Arc<AppState>>,
    Path((register, code)): Path<(String, String)>,
) -> Result<Json<ApiResponse<RegisterItem>>, ApiError> {
    let register = known_register(&register)?;
    let item = state
        .store()
        .registers()
        .get(register, &code)
        .await?
        .ok_or_else(|| ApiError::not_found(register, &code))?;

    Ok(Json(ApiResponse::success(item)))
}
