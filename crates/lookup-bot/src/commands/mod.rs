//! Bot command handlers.

mod help;
mod lookup;
mod start;
mod status;
mod text;

pub use help::HelpHandler;
pub use lookup::LookupHandler;
pub use start::StartHandler;
pub use status::StatusHandler;
pub use text::TextHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use telegram_client::IncomingMessage;

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name without the slash (e.g., "help").
    fn trigger(&self) -> Option<&str> {
        None
    }

    /// Whether this is the default handler for non-command messages.
    fn is_default(&self) -> bool {
        false
    }

    /// Check if this handler matches the message.
    fn matches(&self, message: &IncomingMessage) -> bool {
        match (self.trigger(), message.command()) {
            (Some(trigger), Some(command)) => command.name.eq_ignore_ascii_case(trigger),
            (None, None) => self.is_default(),
            _ => false,
        }
    }

    /// Execute the command, replying through the chat transport.
    async fn execute(&self, message: &IncomingMessage) -> AppResult<()>;
}
