//! Inline button presses: menu transitions keyed by action token.

use crate::config::BotSettings;
use crate::error::AppResult;
use crate::menu::MenuAction;
use crate::phone;
use crate::screens::{self, Screen};
use crate::status::StatusSnapshot;
use crate::transport::ChatTransport;
use lookup_client::LookupClient;
use std::sync::Arc;
use telegram_client::CallbackEvent;
use tracing::{debug, error, info};

pub struct CallbackHandler {
    transport: Arc<dyn ChatTransport>,
    client: Arc<LookupClient>,
    settings: Arc<BotSettings>,
}

impl CallbackHandler {
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

    /// Apply the transition and answer the callback, with an error toast if
    /// the transition failed.
    pub async fn handle(&self, event: &CallbackEvent) -> AppResult<()> {
        info!(
            "Callback query '{}' from user {}",
            phone::sanitize(&event.data),
            event.user_id
        );

        let notice = match self.apply(event).await {
            Ok(()) => None,
            Err(e) => {
                error!("Error handling callback: {}", e);
                Some(screens::CALLBACK_ERROR.to_string())
            }
        };

        self.transport
            .answer_callback(event.id.clone(), notice)
            .await?;
        Ok(())
    }

    async fn apply(&self, event: &CallbackEvent) -> AppResult<()> {
        let (Some(chat_id), Some(message_id)) = (event.chat_id, event.message_id) else {
            debug!("Callback {} has no message to edit", event.id);
            return Ok(());
        };

        let Some(action) = MenuAction::from_token(&event.data) else {
            debug!("Ignoring unknown callback action");
            return Ok(());
        };

        let screen = self.screen_for(action, event.user_id).await;
        self.transport
            .edit(chat_id, message_id, screen.text, Some(screen.menu))
            .await?;
        Ok(())
    }

    async fn screen_for(&self, action: MenuAction, user_id: i64) -> Screen {
        match action {
            MenuAction::Lookup => screens::instructions(),
            MenuAction::Help => screens::help(&self.settings),
            MenuAction::Examples => screens::examples(),
            MenuAction::BackMain => screens::welcome(),
            MenuAction::Status => {
                let snapshot = StatusSnapshot::probe(&self.client).await;
                screens::status(&snapshot, &self.settings, self.settings.is_admin(user_id))
            }
        }
    }
}
