use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::statistics::Statistics;

/// GET /statistics
pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Statistics>>, ApiError> {
    let statistics = state.store().statistics().collect().await?;
    Ok(Json(ApiResponse::success(statistics)))
}
