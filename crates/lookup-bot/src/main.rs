//! Number Lookup Bot - Main entry point.

use anyhow::Context;
use lookup_bot::config::{BotConfig, LogFormat};
use lookup_bot::health::{self, HealthState};
use lookup_bot::{AppResult, BotSettings, ChatTransport, Config, Dispatcher};
use lookup_client::LookupClient;
use rate_limiter::RateLimiter;
use secrecy::ExposeSecret;
use std::fs::OpenOptions;
use std::sync::Arc;
use std::time::Duration;
use telegram_client::{TelegramClient, UpdateReceiver};
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Timeout for Telegram calls other than long polling.
const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot)?;

    info!("Starting Number Lookup Bot...");

    // Initialize clients
    let lookup = Arc::new(LookupClient::with_user_agent(
        config.lookup.api_key.expose_secret(),
        &config.lookup.base_url,
        config.lookup.timeout,
        &config.lookup.user_agent,
    )?);

    let telegram = TelegramClient::new(
        &config.telegram.api_url,
        config.telegram.bot_token.expose_secret(),
        TELEGRAM_TIMEOUT,
    )?;

    // Health checks
    match telegram.get_me().await {
        Ok(me) => info!(
            "Telegram bot authorized as @{}",
            me.username.as_deref().unwrap_or(&me.first_name)
        ),
        Err(e) => {
            error!("Telegram API rejected the bot token or is unreachable: {}", e);
            return Err(e.into());
        }
    }

    if lookup.check_availability().await {
        info!("Lookup API reachable at {}", lookup.base_url());
    } else {
        warn!("Lookup API status check failed - will retry on requests");
    }

    let limiter = RateLimiter::new(config.rate_limit.max_requests, config.rate_limit.window);
    let cleanup = limiter.spawn_cleanup(config.rate_limit.window);

    let settings = Arc::new(BotSettings::from(&config));

    if config.health.enabled {
        let addr = config.health.socket_addr()?;
        let state = HealthState::new(lookup.clone(), settings.clone());
        tokio::spawn(async move {
            if let Err(e) = health::serve(addr, state).await {
                error!("Health server error: {}", e);
            }
        });
    }

    let transport: Arc<dyn ChatTransport> = Arc::new(telegram.clone());
    let dispatcher = Arc::new(Dispatcher::new(transport, lookup, limiter, settings));

    info!("Registered {} command handlers", dispatcher.handler_count());
    info!(
        "Rate limit: {} requests per {:?}",
        config.rate_limit.max_requests, config.rate_limit.window
    );
    info!("Listening for updates...");

    // Start update receiver
    let receiver = UpdateReceiver::new(telegram, config.telegram.poll_timeout);
    let mut stream = Box::pin(receiver.stream());

    // Main update loop, one task per update
    loop {
        tokio::select! {
            Some(event) = stream.next() => {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move {
                    dispatcher.dispatch(event).await;
                });
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    cleanup.abort();
    info!("Shutting down...");
    Ok(())
}

fn init_logging(bot: &BotConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&bot.log_level));

    let file_layer = match &bot.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    match bot.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }

    Ok(())
}
