//! Lookup API HTTP client.

use crate::error::LookupError;
use crate::types::*;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Number sent by the availability probe.
pub const PROBE_NUMBER: &str = "1234567890";

/// Timeout for the availability probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default User-Agent header.
pub const DEFAULT_USER_AGENT: &str = concat!("number-lookup-bot/", env!("CARGO_PKG_VERSION"));

/// Phone number lookup API client.
///
/// One GET per lookup, no retries. The API key is stored using
/// `SecretString` so it never shows up in debug output.
#[derive(Clone)]
pub struct LookupClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    timeout: Duration,
}

impl LookupClient {
    /// Create a new lookup client.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        Self::with_user_agent(api_key, base_url, timeout, DEFAULT_USER_AGENT)
    }

    /// Create a new lookup client with a custom User-Agent.
    pub fn with_user_agent(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, LookupError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: SecretString::new(api_key.into()),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Look up a normalized phone number.
    ///
    /// Any 2xx is a success; a body that is not JSON is wrapped as a raw
    /// record rather than failing the call.
    #[instrument(skip(self, number))]
    pub async fn lookup(&self, number: &str) -> Result<LookupPayload, LookupError> {
        let response = self
            .get(number, self.timeout)
            .await
            .map_err(LookupError::from_transport)?;

        let status = response.status();
        info!("Lookup API response status: {}", status.as_u16());

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(LookupError::from_transport)?;
            debug!(
                "Response body: {}",
                body.chars().take(200).collect::<String>()
            );

            let payload = LookupPayload::from_body(&body);
            if matches!(payload, LookupPayload::Record(ref r) if r.raw_response.is_some()) {
                warn!("Non-JSON response received from lookup API");
            }
            return Ok(payload);
        }

        Err(match status {
            StatusCode::NOT_FOUND => LookupError::NotFound,
            StatusCode::UNAUTHORIZED => {
                warn!("Lookup API rejected the API key");
                LookupError::Unauthorized
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Lookup API rate limit exceeded");
                LookupError::RateLimited
            }
            other => LookupError::Upstream {
                status: other.as_u16(),
            },
        })
    }

    /// Probe whether the API answers at all.
    ///
    /// 200, 404, 401 and 429 all count as reachable: the service responded,
    /// even if a real lookup would fail.
    pub async fn check_availability(&self) -> bool {
        match self.get(PROBE_NUMBER, PROBE_TIMEOUT).await {
            Ok(response) => matches!(
                response.status(),
                StatusCode::OK
                    | StatusCode::NOT_FOUND
                    | StatusCode::UNAUTHORIZED
                    | StatusCode::TOO_MANY_REQUESTS
            ),
            Err(e) => {
                warn!("Lookup API status check failed: {}", e.without_url());
                false
            }
        }
    }

    /// Configuration summary for status endpoints.
    pub fn api_info(&self) -> ApiInfo {
        let has_api_key = !self.api_key.expose_secret().is_empty();
        ApiInfo {
            base_url: self.base_url.clone(),
            has_api_key,
            timeout_secs: self.timeout.as_secs(),
            status: if has_api_key {
                "configured".into()
            } else {
                "not_configured".into()
            },
        }
    }

    async fn get(&self, number: &str, timeout: Duration) -> Result<Response, reqwest::Error> {
        self.client
            .get(&self.base_url)
            .query(&[("key", self.api_key.expose_secret().as_str()), ("num", number)])
            .timeout(timeout)
            .send()
            .await
    }
}
