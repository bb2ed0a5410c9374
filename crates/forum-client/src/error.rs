//! Error types for the forum client

use std::fmt;

/// Errors that can occur when talking to the forum
#[derive(Debug)]
pub enum ForumError {
    /// The topic URL could not be built from the base URL
    InvalidUrl(url::ParseError),
    /// HTTP request failed or the body could not be decoded
    Http(reqwest::Error),
    /// The forum answered with a non-success status
    Status(u16),
}

impl ForumError {
    /// Upstream HTTP status, when the forum answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}

impl fmt::Display for ForumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(e) => write!(f, "Invalid forum URL: {e}"),
            Self::Http(e) => write!(f, "Forum HTTP error: {e}"),
            Self::Status(code) => write!(f, "Forum returned status {code}"),
        }
    }
}

impl std::error::Error for ForumError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidUrl(e) => Some(e),
            Self::Http(e) => Some(e),
            Self::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for ForumError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<url::ParseError> for ForumError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e)
    }
}

/// Result type for forum client operations
pub type Result<T> = std::result::Result<T, ForumError>;
