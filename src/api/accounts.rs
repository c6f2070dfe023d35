//! Account administration, restricted to `ROLE_ADMIN`.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::filter;
use super::{ApiError, ApiResponse, AppState, ListQuery, MessageResponse};
use crate::domain::{Page, Role};
use crate::models::account::{Account, NewAccount};

#[derive(Debug, Deserialize)]
pub struct UpdateRolesRequest {
    pub roles: Vec<Role>,
}

pub async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Page<Account>>>, ApiError> {
    let filter = filter(query, &state.config().catalog)?;
    let page = state.accounts().list(&filter).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
) -> Result<Json<ApiResponse<Account>>, ApiError> {
    let account = state.accounts().get(&uuid).await?;
    Ok(Json(ApiResponse::success(account)))
}

pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> Result<Json<ApiResponse<Account>>, ApiError> {
    let account = state.accounts().create(payload).await?;
    Ok(Json(ApiResponse::success(account)))
}

pub async fn update_roles(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    Json(payload): Json<UpdateRolesRequest>,
) -> Result<Json<ApiResponse<Account>>, ApiError> {
    let account = state.accounts().update_roles(&uuid, payload.roles).await?;
    Ok(Json(ApiResponse::success(account)))
}

pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<Account>,
    Path(uuid): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.accounts().delete(&actor, &uuid).await?;
    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Account deleted",
    ))))
}
