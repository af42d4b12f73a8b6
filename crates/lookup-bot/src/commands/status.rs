//! Status command - checks the lookup API and reports configuration.

use crate::commands::CommandHandler;
use crate::config::BotSettings;
use crate::error::AppResult;
use crate::screens;
use crate::status::StatusSnapshot;
use crate::transport::ChatTransport;
use async_trait::async_trait;
use lookup_client::LookupClient;
use std::sync::Arc;
use telegram_client::IncomingMessage;
use tracing::info;

pub struct StatusHandler {
    transport: Arc<dyn ChatTransport>,
    client: Arc<LookupClient>,
    settings: Arc<BotSettings>,
}

impl StatusHandler {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        client: Arc<LookupClient>,
        settings: Arc<BotSettings>,
    ) -> Self {
        Self {
            transport,
            client,
            settings,
        }
    }
}

#[async_trait]
impl CommandHandler for StatusHandler {
    fn trigger(&self) -> Option<&str> {
        Some("status")
    }

    async fn execute(&self, message: &IncomingMessage) -> AppResult<()> {
        info!("Status command received from user {}", message.user_id);

        let placeholder = self
            .transport
            .send(message.chat_id, screens::checking_status(), None)
            .await?;

        let snapshot = StatusSnapshot::probe(&self.client).await;
        let screen = screens::status(
            &snapshot,
            &self.settings,
            self.settings.is_admin(message.user_id),
        );

        self.transport
            .edit(message.chat_id, placeholder, screen.text, Some(screen.menu))
            .await?;
        Ok(())
    }
}
