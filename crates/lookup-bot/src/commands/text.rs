//! Default handler - plain text that may be a phone number.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::lookup::{LookupRequest, LookupService};
use crate::phone;
use crate::screens;
use crate::transport::ChatTransport;
use async_trait::async_trait;
use std::sync::Arc;
use telegram_client::IncomingMessage;
use tracing::debug;

pub struct TextHandler {
    lookups: Arc<LookupService>,
    transport: Arc<dyn ChatTransport>,
}

impl TextHandler {
    pub fn new(lookups: Arc<LookupService>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { lookups, transport }
    }
}

#[async_trait]
impl CommandHandler for TextHandler {
    fn is_default(&self) -> bool {
        true
    }

    async fn execute(&self, message: &IncomingMessage) -> AppResult<()> {
        let text = message.text.trim();

        if !phone::is_valid(text) {
            debug!(
                "Not a phone number from user {}: {:?}",
                message.user_id,
                phone::sanitize(text)
            );
            self.transport
                .send(message.chat_id, screens::not_understood(), None)
                .await?;
            return Ok(());
        }

        self.lookups
            .handle(LookupRequest::new(text, message.user_id, message.chat_id))
            .await?;
        Ok(())
    }
}
