//! Application configuration loaded from environment variables.

use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Lookup API configuration
    pub lookup: LookupConfig,

    /// Per-user rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,

    /// Health server configuration
    #[serde(default)]
    pub health: HealthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token issued by BotFather
    pub bot_token: SecretString,

    /// Bot API base URL
    #[serde(default = "default_telegram_url")]
    pub api_url: String,

    /// Long-poll duration for getUpdates
    #[serde(default = "default_poll_timeout", with = "humantime_serde")]
    pub poll_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// Lookup API key
    pub api_key: SecretString,

    /// API base URL
    #[serde(default = "default_lookup_url")]
    pub base_url: String,

    /// Request timeout
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per user within the window
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,

    /// Trailing window length
    #[serde(default = "default_window", with = "humantime_serde")]
    pub window: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Telegram user ids allowed to see admin-only details
    #[serde(default, deserialize_with = "comma_separated_ids")]
    pub admin_ids: Vec<i64>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Optional log file, written in addition to stdout
    #[serde(default)]
    pub log_file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Serve the health endpoints
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl HealthConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid health listen address: {}", self.listen_addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

// Default implementations
impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window: default_window(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            admin_ids: Vec::new(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

// Default value functions
fn default_telegram_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_lookup_url() -> String {
    "http://pirate-osint.onrender.com/api".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    lookup_client::DEFAULT_USER_AGENT.into()
}

fn default_max_requests() -> usize {
    5
}

fn default_window() -> Duration {
    Duration::from_secs(60)
}

fn default_log_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    5555
}

/// Parse `"1, 2,3"` into ids. Entries that are not integers are skipped.
fn comma_separated_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter_map(|id| id.parse().ok())
        .collect())
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::default())
    }

    /// Load configuration from an environment source.
    pub fn from_environment(environment: config::Environment) -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(
                environment
                    .separator("__")
                    // Tokens look like "123:abc" and keys may be all digits; keep strings as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.expose_secret().trim().is_empty() {
            bail!("TELEGRAM__BOT_TOKEN must not be empty");
        }
        if self.lookup.api_key.expose_secret().trim().is_empty() {
            bail!("LOOKUP__API_KEY must not be empty");
        }
        if self.rate_limit.max_requests == 0 {
            bail!("RATE_LIMIT__MAX_REQUESTS must be at least 1");
        }
        if self.rate_limit.window.is_zero() {
            bail!("RATE_LIMIT__WINDOW must be longer than zero");
        }
        Ok(())
    }
}

/// Runtime settings shared by the handlers.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub max_requests: usize,
    pub window: Duration,
    pub lookup_timeout: Duration,
    pub log_level: String,
    pub api_endpoint: String,
    pub admin_ids: Vec<i64>,
}

impl BotSettings {
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

impl From<&Config> for BotSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_requests: config.rate_limit.max_requests,
            window: config.rate_limit.window,
            lookup_timeout: config.lookup.timeout,
            log_level: config.bot.log_level.clone(),
            api_endpoint: config.lookup.base_url.clone(),
            admin_ids: config.bot.admin_ids.clone(),
        }
    }
}
