//! Start command - welcome text and main menu.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::screens;
use crate::transport::ChatTransport;
use async_trait::async_trait;
use std::sync::Arc;
use telegram_client::IncomingMessage;
use tracing::info;

pub struct StartHandler {
    transport: Arc<dyn ChatTransport>,
}

impl StartHandler {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CommandHandler for StartHandler {
    fn trigger(&self) -> Option<&str> {
        Some("start")
    }

    async fn execute(&self, message: &IncomingMessage) -> AppResult<()> {
        info!("Start command received from user {}", message.user_id);

        let screen = screens::welcome();
        self.transport
            .send(message.chat_id, screen.text, Some(screen.menu))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::message;
    use crate::menu::Menu;
    use crate::transport::MockChatTransport;

    #[tokio::test]
    async fn test_start_sends_main_menu() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(|chat, text, menu| {
                *chat == 100 && text.contains("Welcome") && *menu == Some(Menu::Main)
            })
            .times(1)
            .returning(|_, _, _| Ok(1));

        let handler = StartHandler::new(Arc::new(transport));
        assert!(handler.matches(&message("/start")));
        assert!(handler.matches(&message("/START@lookup_bot")));
        assert!(!handler.matches(&message("/started")));
        assert!(!handler.matches(&message("start")));

        handler.execute(&message("/start")).await.unwrap();
    }
}
