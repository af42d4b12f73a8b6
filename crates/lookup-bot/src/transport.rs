//! Outbound chat operations used by the handlers.

use crate::menu::Menu;
use async_trait::async_trait;
use telegram_client::{ParseMode, TelegramClient, TelegramError};
use tracing::debug;

/// Sends and edits MarkdownV2 messages and answers button presses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a message, returning its id.
    async fn send(&self, chat_id: i64, text: String, menu: Option<Menu>)
        -> Result<i64, TelegramError>;

    /// Replace the text and keyboard of a sent message.
    async fn edit(
        &self,
        chat_id: i64,
        message_id: i64,
        text: String,
        menu: Option<Menu>,
    ) -> Result<(), TelegramError>;

    /// Acknowledge a button press, with an optional toast.
    async fn answer_callback(
        &self,
        callback_id: String,
        notice: Option<String>,
    ) -> Result<(), TelegramError>;
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send(
        &self,
        chat_id: i64,
        text: String,
        menu: Option<Menu>,
    ) -> Result<i64, TelegramError> {
        let keyboard = menu.map(|m| m.keyboard());
        let message = self
            .send_message(chat_id, &text, Some(ParseMode::MarkdownV2), keyboard.as_ref())
            .await?;
        Ok(message.message_id)
    }

    async fn edit(
        &self,
        chat_id: i64,
        message_id: i64,
        text: String,
        menu: Option<Menu>,
    ) -> Result<(), TelegramError> {
        let keyboard = menu.map(|m| m.keyboard());
        match self
            .edit_message_text(
                chat_id,
                message_id,
                &text,
                Some(ParseMode::MarkdownV2),
                keyboard.as_ref(),
            )
            .await
        {
            // Refreshing an unchanged screen is not an error.
            Err(e) if e.is_not_modified() => {
                debug!("Message {} unchanged", message_id);
                Ok(())
            }
            other => other,
        }
    }

    async fn answer_callback(
        &self,
        callback_id: String,
        notice: Option<String>,
    ) -> Result<(), TelegramError> {
        self.answer_callback_query(&callback_id, notice.as_deref())
            .await
    }
}
