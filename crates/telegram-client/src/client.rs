//! Telegram Bot API HTTP client.

use crate::error::TelegramError;
use crate::types::*;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Extra time allowed on top of the long-poll duration.
const POLL_GRACE: Duration = Duration::from_secs(10);

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl TelegramClient {
    /// Create a new Telegram client.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: SecretString::new(token.into()),
        })
    }

    /// Get the bot's own account.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Long-poll for updates after `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: vec!["message".into(), "callback_query".into()],
        };

        let updates: Vec<Update> = self
            .call("getUpdates", &request, Some(poll_timeout + POLL_GRACE))
            .await?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a message to a chat.
    #[instrument(skip(self, text, keyboard))]
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<Message, TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
            reply_markup: keyboard,
        };

        let message: Message = self.call("sendMessage", &request, None).await?;
        debug!("Sent message {} to chat {}", message.message_id, chat_id);
        Ok(message)
    }

    /// Replace the text (and keyboard) of a message the bot sent.
    #[instrument(skip(self, text, keyboard))]
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        parse_mode: Option<ParseMode>,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let request = EditMessageTextRequest {
            chat_id,
            message_id,
            text,
            parse_mode,
            reply_markup: keyboard,
        };

        // Result is the edited Message, or `true` for inline messages.
        let _: serde_json::Value = self.call("editMessageText", &request, None).await?;
        debug!("Edited message {} in chat {}", message_id, chat_id);
        Ok(())
    }

    /// Acknowledge a button press, optionally with a toast.
    #[instrument(skip(self))]
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TelegramError> {
        let request = AnswerCallbackQueryRequest {
            callback_query_id,
            text,
        };

        let _: bool = self.call("answerCallbackQuery", &request, None).await?;
        Ok(())
    }

    async fn call<T, B>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!(
            "{}/bot{}/{}",
            self.base_url,
            self.token.expose_secret(),
            method
        );

        let mut request = self.client.post(url).json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str::<ApiResponse<T>>(&text) {
            Ok(ApiResponse {
                ok: true,
                result: Some(result),
                ..
            }) => Ok(result),
            Ok(api) => {
                let description = api
                    .description
                    .unwrap_or_else(|| "Unknown error".into());
                warn!("{} failed: {}", method, description);
                Err(TelegramError::Api {
                    code: api.error_code.unwrap_or(i32::from(status.as_u16())),
                    description,
                })
            }
            Err(_) if !status.is_success() => Err(TelegramError::Api {
                code: i32::from(status.as_u16()),
                description: text.chars().take(200).collect(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
