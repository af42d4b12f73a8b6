//! Telegram client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error {code}: {description}")]
    Api { code: i32, description: String },
}

// Request URLs embed the bot token, so they are stripped before the error
// can reach a log line.
impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err.without_url())
    }
}

impl TelegramError {
    /// Editing a message to identical content is rejected by Telegram.
    pub fn is_not_modified(&self) -> bool {
        matches!(
            self,
            TelegramError::Api { description, .. } if description.contains("message is not modified")
        )
    }
}
