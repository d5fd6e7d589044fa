//! Web API module for Armory
//!
//! Provides endpoints for:
//! - Home page and health check
//! - Operator list and detail
//! - Weapon categories, category listings and weapon detail
//! - Account registration, login and logout
//! - Damage simulator

pub mod accounts;
pub mod damage;
pub mod health;
pub mod home;
pub mod operators;
pub mod weapons;


use crate::middleware::session::SessionSettings;
use armory_core::ArmoryStore;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json, Router,
};
use serde::Serialize;
use tracing::error;

pub use accounts::accounts_routes;
pub use damage::damage_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use operators::operators_routes;
pub use weapons::weapons_routes;

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// User-facing notice (flash message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Handler error mapped onto an HTTP status and the JSON envelope.
#[derive(Debug)]
pub struct ApiError(pub armory_core::Error);

impl From<armory_core::Error> for ApiError {
    fn from(err: armory_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use armory_core::Error;

        let (status, message) = match &self.0 {
            Error::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
            // Form pages are shown again with a notice, so these stay 200.
            Error::DuplicateEmail(_) => (
                StatusCode::OK,
                "An account with this email already exists.".to_string(),
            ),
            Error::InvalidCredentials => {
                (StatusCode::OK, "Invalid email or password.".to_string())
            }
            Error::Database(_) | Error::Internal(_) => {
                error!("Request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// Not-found page for unmatched routes and unparseable ids.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("Page not found")),
    )
        .into_response()
}

/// Create the application router with all pages.
pub fn app_router(store: ArmoryStore, settings: SessionSettings) -> Router {
    Router::new()
        .merge(home_routes())
        .merge(health_routes())
        .merge(operators_routes())
        .merge(weapons_routes())
        .merge(accounts_routes())
        .merge(damage_routes())
        .fallback(not_found)
        .layer(Extension(store))
        .layer(Extension(settings))
}
