//! Help command - displays usage and limits.

use crate::commands::CommandHandler;
use crate::config::BotSettings;
use crate::error::AppResult;
use crate::screens;
use crate::transport::ChatTransport;
use async_trait::async_trait;
use std::sync::Arc;
use telegram_client::IncomingMessage;
use tracing::info;

pub struct HelpHandler {
    transport: Arc<dyn ChatTransport>,
    settings: Arc<BotSettings>,
}

impl HelpHandler {
    pub fn new(transport: Arc<dyn ChatTransport>, settings: Arc<BotSettings>) -> Self {
        Self {
            transport,
            settings,
        }
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn trigger(&self) -> Option<&str> {
        Some("help")
    }

    async fn execute(&self, message: &IncomingMessage) -> AppResult<()> {
        info!("Help command received from user {}", message.user_id);

        let screen = screens::help(&self.settings);
        self.transport
            .send(message.chat_id, screen.text, Some(screen.menu))
            .await?;
        Ok(())
    }
}
