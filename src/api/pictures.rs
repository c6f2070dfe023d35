use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{paging, validate_id};
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::Page;
use crate::models::picture::{EncodedPicture, PictureData};

/// GET /pictures
/// Lists ids only; the `name` parameter is ignored.
pub async fn list_pictures(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<i32>>>, ApiError> {
    let paging = paging(&query, &state.config().catalog)?;
    let page = state.pictures().list_ids(paging).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_picture(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EncodedPicture>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(state.pictures().get(id).await?)))
}

pub async fn create_picture(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PictureData>,
) -> Result<Json<ApiResponse<EncodedPicture>>, ApiError> {
    Ok(Json(ApiResponse::success(
        state.pictures().create(payload).await?,
    )))
}

pub async fn update_picture(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<PictureData>,
) -> Result<Json<ApiResponse<EncodedPicture>>, ApiError> {
    let id = validate_id(id)?;
    Ok(Json(ApiResponse::success(
        state.pictures().update(id, payload).await?,
    )))
}

pub async fn delete_picture(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = validate_id(id)?;
    state.pictures().delete(id).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Picture deleted",
    ))))
}
