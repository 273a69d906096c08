use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::accounts::AccountRepository;
use crate::config::AppConfig;
use crate::session::{CookieSettings, TokenConfig};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub account_repository: Arc<dyn AccountRepository + Send + Sync>,
    pub token_config: TokenConfig,
    pub cookie: CookieSettings,
    pub password_hash_cost: u32,
}

impl AppState {
    pub fn new(
        account_repository: Arc<dyn AccountRepository + Send + Sync>,
        token_config: TokenConfig,
        cookie: CookieSettings,
    ) -> Self {
        Self {
            account_repository,
            token_config,
            cookie,
            password_hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// bcrypt cost for new accounts and for failed lookups
    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }

    pub fn from_config(
        config: &AppConfig,
        account_repository: Arc<dyn AccountRepository + Send + Sync>,
    ) -> Self {
        Self::new(
            account_repository,
            TokenConfig::new(config.jwt_secret.clone(), config.session_ttl),
            config.cookie.clone(),
        )
        .with_password_hash_cost(config.password_hash_cost)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("JWT error: {0}")]
    JwtError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::JwtError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Hashing(_) | AppError::Configuration(_) | AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
