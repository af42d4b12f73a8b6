//! Routes bot events to handlers. The outermost error boundary.

use crate::callbacks::CallbackHandler;
use crate::commands::*;
use crate::config::BotSettings;
use crate::lookup::LookupService;
use crate::screens;
use crate::transport::ChatTransport;
use lookup_client::LookupClient;
use rate_limiter::RateLimiter;
use std::sync::Arc;
use telegram_client::{BotEvent, CallbackEvent, IncomingMessage};
use tracing::{debug, error};

pub struct Dispatcher {
    handlers: Vec<Box<dyn CommandHandler>>,
    callbacks: CallbackHandler,
    transport: Arc<dyn ChatTransport>,
}

impl Dispatcher {
    /// Build the dispatcher with the standard handler set.
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        client: Arc<LookupClient>,
        limiter: RateLimiter,
        settings: Arc<BotSettings>,
    ) -> Self {
        let lookups = Arc::new(LookupService::new(
            client.clone(),
            limiter,
            transport.clone(),
        ));

        let handlers: Vec<Box<dyn CommandHandler>> = vec![
            Box::new(StartHandler::new(transport.clone())),
            Box::new(HelpHandler::new(transport.clone(), settings.clone())),
            Box::new(LookupHandler::new(lookups.clone(), transport.clone())),
            Box::new(StatusHandler::new(
                transport.clone(),
                client.clone(),
                settings.clone(),
            )),
            Box::new(TextHandler::new(lookups, transport.clone())),
        ];

        let callbacks = CallbackHandler::new(transport.clone(), client, settings);

        Self {
            handlers,
            callbacks,
            transport,
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Handle one event. Errors are logged here and never propagate.
    pub async fn dispatch(&self, event: BotEvent) {
        match event {
            BotEvent::Message(message) => self.on_message(&message).await,
            BotEvent::Callback(callback) => self.on_callback(&callback).await,
        }
    }

    async fn on_message(&self, message: &IncomingMessage) {
        let handler = self.handlers.iter().find(|h| h.matches(message));

        let result = match handler {
            Some(handler) => handler.execute(message).await,
            None => {
                debug!("Unknown command from user {}", message.user_id);
                self.transport
                    .send(message.chat_id, screens::not_understood(), None)
                    .await
                    .map(|_| ())
                    .map_err(Into::into)
            }
        };

        if let Err(e) = result {
            error!("Handler error: {}", e);
            if let Err(e) = self
                .transport
                .send(message.chat_id, screens::apology(), None)
                .await
            {
                error!("Failed to send apology: {}", e);
            }
        }
    }

    async fn on_callback(&self, callback: &CallbackEvent) {
        if let Err(e) = self.callbacks.handle(callback).await {
            error!("Failed to answer callback {}: {}", callback.id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{message, settings};
    use crate::transport::MockChatTransport;
    use std::time::Duration;
    use telegram_client::TelegramError;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn dispatcher(transport: MockChatTransport, uri: String) -> Dispatcher {
        let client = Arc::new(LookupClient::new("k", uri, Duration::from_secs(5)).unwrap());
        Dispatcher::new(
            Arc::new(transport),
            client,
            RateLimiter::new(5, Duration::from_secs(60)),
            Arc::new(settings()),
        )
    }

    async fn silent_api() -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_invalid_text_not_understood() {
        let api = silent_api().await;

        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(|chat, text, _| *chat == 100 && text.contains("didn't understand"))
            .times(1)
            .returning(|_, _, _| Ok(1));

        let dispatcher = dispatcher(transport, api.uri());
        assert_eq!(dispatcher.handler_count(), 5);
        dispatcher.dispatch(BotEvent::Message(message("abc"))).await;
    }

    #[tokio::test]
    async fn test_unknown_command_not_understood() {
        let api = silent_api().await;

        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(|_, text, _| text.contains("didn't understand"))
            .times(1)
            .returning(|_, _, _| Ok(1));

        dispatcher(transport, api.uri())
            .dispatch(BotEvent::Message(message("/frobnicate 1234567890")))
            .await;
    }

    #[tokio::test]
    async fn test_handler_error_becomes_apology() {
        let api = silent_api().await;

        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(|_, text, _| text.contains("Welcome"))
            .times(1)
            .returning(|_, _, _| {
                Err(TelegramError::Api {
                    code: 400,
                    description: "Bad Request: can't parse entities".into(),
                })
            });
        transport
            .expect_send()
            .withf(|_, text, _| text.contains("An error occurred"))
            .times(1)
            .returning(|_, _, _| Ok(2));

        dispatcher(transport, api.uri())
            .dispatch(BotEvent::Message(message("/start")))
            .await;
    }

    #[tokio::test]
    async fn test_callback_routed() {
        let api = silent_api().await;

        let mut transport = MockChatTransport::new();
        transport.expect_edit().times(1).returning(|_, _, _, _| Ok(()));
        transport
            .expect_answer_callback()
            .times(1)
            .returning(|_, _| Ok(()));

        dispatcher(transport, api.uri())
            .dispatch(BotEvent::Callback(CallbackEvent {
                id: "cb".into(),
                user_id: 7,
                first_name: "Ada".into(),
                chat_id: Some(100),
                message_id: Some(3),
                data: "examples".into(),
            }))
            .await;
    }
}
