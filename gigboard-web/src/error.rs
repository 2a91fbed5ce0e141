//! Error types for gigboard-web
//!
//! Handler failures map onto the dedicated error pages: missing records and
//! unknown routes render the 404 page, everything unexpected the 500 page.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::render;

#[derive(Error, Debug)]
pub enum AppError {
    /// Record or route does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Database or other internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type for handlers
pub type Result<T> = std::result::Result<T, AppError>;

impl From<gigboard_common::Error> for AppError {
    fn from(e: gigboard_common::Error) -> Self {
        use gigboard_common::Error as E;
        match e {
            E::NotFound(what) => AppError::NotFound(what),
            E::InvalidInput(msg) => AppError::BadRequest(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Internal(msg) => error!("Request failed: {}", msg),
            AppError::BadRequest(msg) => warn!("Bad request: {}", msg),
            AppError::NotFound(what) => warn!("Not found: {}", what),
        }

        (status, Html(render::error_page(status))).into_response()
    }
}

/// Parse an id path segment; anything but a positive integer is not found
pub fn parse_id(raw: &str, kind: &str) -> Result<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound(format!("{} {}", kind, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_errors_map_to_status() {
        let not_found: AppError = gigboard_common::Error::NotFound("venue 3".into()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: AppError = gigboard_common::Error::InvalidInput("bad".into()).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let config: AppError = gigboard_common::Error::Config("x".into()).into();
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12", "venue").unwrap(), 12);
        assert!(matches!(parse_id("abc", "venue"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("0", "venue"), Err(AppError::NotFound(_))));
        assert!(matches!(parse_id("-4", "venue"), Err(AppError::NotFound(_))));
    }
}
