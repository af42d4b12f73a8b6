//! Lookup command - `/lookup <number>`.

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

pub struct LookupHandler {
    lookups: Arc<LookupService>,
    transport: Arc<dyn ChatTransport>,
}

impl LookupHandler {
    pub fn new(lookups: Arc<LookupService>, transport: Arc<dyn ChatTransport>) -> Self {
        Self { lookups, transport }
    }
}

#[async_trait]
impl CommandHandler for LookupHandler {
    fn trigger(&self) -> Option<&str> {
        Some("lookup")
    }

    async fn execute(&self, message: &IncomingMessage) -> AppResult<()> {
        let args = message.command().map(|c| c.args).unwrap_or_default();

        // Anything that is not a phone number is answered without spending
        // a rate limit slot.
        if !phone::is_valid(&args) {
            debug!("Lookup without a valid number from user {}", message.user_id);
            self.transport
                .send(message.chat_id, screens::lookup_usage(), None)
                .await?;
            return Ok(());
        }

        self.lookups
            .handle(LookupRequest::new(args, message.user_id, message.chat_id))
            .await?;
        Ok(())
    }
}
