//! Number Lookup Bot - Telegram front end for a phone number lookup API.
//!
//! A number sent by a user passes a per-user rate limit, is normalized,
//! looked up, and the report is edited into a "searching" placeholder.
//! Menus are inline keyboards whose buttons carry action tokens.

pub mod callbacks;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod format;
pub mod health;
pub mod lookup;
pub mod markdown;
pub mod menu;
pub mod phone;
pub mod screens;
pub mod status;
pub mod transport;

pub use config::{BotSettings, Config};
pub use dispatcher::Dispatcher;
pub use error::{AppError, AppResult};
pub use transport::ChatTransport;
