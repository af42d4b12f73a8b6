//! Common test utilities for integration tests.

use lookup_bot::{BotSettings, ChatTransport, Dispatcher};
use lookup_client::LookupClient;
use rate_limiter::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use telegram_client::{BotEvent, IncomingMessage, TelegramClient};
use wiremock::ResponseTemplate;

pub const BOT_TOKEN: &str = "test-token";
pub const USER_ID: i64 = 4242;
pub const CHAT_ID: i64 = 4242;

/// Path of a Bot API method on the mock Telegram server.
pub fn telegram_path(method: &str) -> String {
    format!("/bot{}/{}", BOT_TOKEN, method)
}

/// Successful Bot API response carrying a sent message.
pub fn sent_message(message_id: i64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ok": true,
        "result": {
            "message_id": message_id,
            "chat": { "id": CHAT_ID, "type": "private" },
            "date": 1700000000,
            "text": "ok"
        }
    }))
}

pub fn test_settings(max_requests: usize, window: Duration) -> BotSettings {
    BotSettings {
        max_requests,
        window,
        lookup_timeout: Duration::from_secs(5),
        log_level: "debug".into(),
        api_endpoint: "http://lookup.test/api".into(),
        admin_ids: vec![],
    }
}

pub fn test_lookup_client(uri: String) -> Arc<LookupClient> {
    Arc::new(LookupClient::new("test-api-key", uri, Duration::from_secs(5)).unwrap())
}

/// Dispatcher wired to mock Telegram and lookup servers.
pub fn test_dispatcher(telegram_uri: String, lookup_uri: String) -> Dispatcher {
    let telegram = TelegramClient::new(telegram_uri, BOT_TOKEN, Duration::from_secs(5)).unwrap();
    let transport: Arc<dyn ChatTransport> = Arc::new(telegram);
    let window = Duration::from_secs(60);

    Dispatcher::new(
        transport,
        test_lookup_client(lookup_uri),
        RateLimiter::new(5, window),
        Arc::new(test_settings(5, window)),
    )
}

pub fn text_event(text: &str) -> BotEvent {
    BotEvent::Message(IncomingMessage {
        chat_id: CHAT_ID,
        message_id: 1,
        user_id: USER_ID,
        first_name: "Tester".into(),
        text: text.into(),
    })
}
