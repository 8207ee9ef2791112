/// Error types for the emote service
///
/// Errors are converted to appropriate HTTP responses for API clients.
/// Internal detail is logged but never leaked in 5xx bodies.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for emote-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Post content rejected (empty, too long, or not emoji-only)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Author exceeded the posting quota for the current window
    #[error("Too many posts, slow down")]
    RateLimited,

    /// No matching entity
    #[error("Not found: {0}")]
    NotFound(String),

    /// Post store unavailable or write failure
    #[error("Database error: {0}")]
    Database(String),

    /// Identity provider transport failure
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// Feed join invariant violated (missing or incomplete author data)
    #[error("Enrichment error: {0}")]
    Enrichment(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Identity(_) | AppError::Enrichment(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Actionable message for client errors, generic message for 5xx
        let message = if status.is_server_error() {
            tracing::error!("request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Identity(err.to_string())
    }
}
