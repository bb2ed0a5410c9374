//! Error types for the topic preview service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use forum_client::ForumError;
use serde_json::json;
use std::fmt;

/// Failure to produce a preview for a request
#[derive(Debug)]
pub enum PreviewError {
    /// Topic id or slug was missing or blank
    MissingInput,
    /// The forum could not be reached or answered with an error
    Upstream(ForumError),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::MissingInput => write!(f, "Missing topic ID or slug"),
            PreviewError::Upstream(err) => write!(f, "Upstream error: {}", err),
        }
    }
}

impl std::error::Error for PreviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreviewError::Upstream(err) => Some(err),
            PreviewError::MissingInput => None,
        }
    }
}

impl From<ForumError> for PreviewError {
    fn from(err: ForumError) -> Self {
        PreviewError::Upstream(err)
    }
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PreviewError::MissingInput => (StatusCode::BAD_REQUEST, "Missing topic ID or slug"),
            PreviewError::Upstream(ForumError::Status(code)) => {
                tracing::warn!(status = code, "Forum returned error status for preview");
                (
                    StatusCode::from_u16(*code).unwrap_or(StatusCode::BAD_GATEWAY),
                    "Failed to fetch topic",
                )
            }
            PreviewError::Upstream(err) => {
                tracing::error!(error = %err, "Failed to fetch preview");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

/// Startup and configuration errors
#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Forum(ForumError),
    Io(Box<std::io::Error>),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ServiceError::Forum(err) => write!(f, "Forum client error: {}", err),
            ServiceError::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Forum(err) => Some(err),
            ServiceError::Io(err) => Some(err.as_ref()),
            ServiceError::Config(_) => None,
        }
    }
}

impl From<ForumError> for ServiceError {
    fn from(err: ForumError) -> Self {
        ServiceError::Forum(err)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(Box::new(err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for ServiceError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_display() {
        assert_eq!(
            PreviewError::MissingInput.to_string(),
            "Missing topic ID or slug"
        );
    }

    #[test]
    fn test_missing_input_is_bad_request() {
        let response = PreviewError::MissingInput.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_status_is_forwarded() {
        let response = PreviewError::Upstream(ForumError::Status(404)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PreviewError::Upstream(ForumError::Status(503)).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_upstream_transport_error_is_internal() {
        let err = ForumError::from(url::Url::parse("::").unwrap_err());
        let response = PreviewError::Upstream(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_display() {
        let err = ServiceError::Config("invalid FORUM_BASE_URL".to_string());
        assert_eq!(
            format!("{}", err),
            "Configuration error: invalid FORUM_BASE_URL"
        );
    }

    #[test]
    fn test_error_is_debug() {
        let err = ServiceError::Config("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
    }
}
