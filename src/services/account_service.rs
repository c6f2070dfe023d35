//! Domain service for authentication and account management.
//!
//! Handles login, password changes, API key rotation and the admin-only
//! account administration.

use crate::domain::{Filter, Page, Role};
use crate::models::account::{Account, NewAccount};
use serde::Serialize;
use thiserror::Error;

/// Errors specific to account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AccountError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AccountError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Login result containing the username and API key.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub username: String,
    pub api_key: String,
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AccountError>;

    /// Resolves the account owning `api_key`, if any.
    async fn authenticate_api_key(&self, api_key: &str) -> Result<Option<Account>, AccountError>;

    /// Resolves a session's username to its account, if it still exists.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Changes a password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] if the current password is wrong
    /// or the new one is too short or unchanged.
    async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AccountError>;

    /// Returns the new key.
    async fn regenerate_api_key(&self, username: &str) -> Result<String, AccountError>;

    async fn list(&self, filter: &Filter) -> Result<Page<Account>, AccountError>;

    async fn get(&self, uuid: &str) -> Result<Account, AccountError>;

    /// # Errors
    ///
    /// Returns [`AccountError::Conflict`] when the username is taken.
    async fn create(&self, account: NewAccount) -> Result<Account, AccountError>;

    async fn update_roles(&self, uuid: &str, roles: Vec<Role>) -> Result<Account, AccountError>;

    /// Deletes an account other than `actor`'s own.
    async fn delete(&self, actor: &Account, uuid: &str) -> Result<(), AccountError>;
}
