//! Lookup client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("number not found")]
    NotFound,

    #[error("invalid API key")]
    Unauthorized,

    #[error("upstream rate limit")]
    RateLimited,

    #[error("status {status}")]
    Upstream { status: u16 },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure classification surfaced to the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Timeout,
    ConnectionError,
    NotFound,
    Unauthorized,
    RateLimited,
    UpstreamError,
}

impl LookupError {
    /// Classify a transport failure from reqwest.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            LookupError::Timeout
        } else if err.is_connect() {
            LookupError::Connection(err.to_string())
        } else {
            LookupError::Network(err.to_string())
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Timeout => ErrorKind::Timeout,
            LookupError::Connection(_) | LookupError::Network(_) | LookupError::Client(_) => {
                ErrorKind::ConnectionError
            }
            LookupError::NotFound => ErrorKind::NotFound,
            LookupError::Unauthorized => ErrorKind::Unauthorized,
            LookupError::RateLimited => ErrorKind::RateLimited,
            LookupError::Upstream { .. } => ErrorKind::UpstreamError,
        }
    }

    /// Text shown to the chat user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            LookupError::Timeout => {
                "Request timeout. The API is taking too long to respond.".into()
            }
            LookupError::Connection(_) => {
                "Unable to connect to the API. Please try again later.".into()
            }
            LookupError::Network(_) | LookupError::Client(_) => {
                "Network error occurred while contacting the API.".into()
            }
            LookupError::NotFound => "Number not found in database".into(),
            LookupError::Unauthorized => "Invalid API key".into(),
            LookupError::RateLimited => "API rate limit exceeded. Please try again later.".into(),
            LookupError::Upstream { status } => format!("API returned status code {}", status),
        }
    }
}
