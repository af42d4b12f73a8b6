//! Lookup flow: rate check, normalize, placeholder, query, edit in place.

use crate::error::AppResult;
use crate::format::format_report;
use crate::menu::Menu;
use crate::phone;
use crate::screens;
use crate::transport::ChatTransport;
use chrono::{DateTime, Utc};
use lookup_client::{ErrorKind, LookupClient};
use rate_limiter::RateLimiter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// A user's request to look up a number.
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub raw_input: String,
    pub user_id: i64,
    pub chat_id: i64,
    pub requested_at: DateTime<Utc>,
}

impl LookupRequest {
    pub fn new(raw_input: impl Into<String>, user_id: i64, chat_id: i64) -> Self {
        Self {
            raw_input: raw_input.into(),
            user_id,
            chat_id,
            requested_at: Utc::now(),
        }
    }
}

/// How a lookup request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Rejected before any network call.
    RateLimited,
    /// The report replaced the placeholder.
    Completed,
    /// The failure reason replaced the placeholder.
    Failed(ErrorKind),
}

/// Runs lookups for the command and text handlers.
pub struct LookupService {
    client: Arc<LookupClient>,
    limiter: RateLimiter,
    transport: Arc<dyn ChatTransport>,
}

impl LookupService {
    pub fn new(
        client: Arc<LookupClient>,
        limiter: RateLimiter,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            client,
            limiter,
            transport,
        }
    }

    /// Process one request. Only transport failures are returned as errors;
    /// lookup failures are reported to the user.
    #[instrument(skip(self, request), fields(user_id = request.user_id))]
    pub async fn handle(&self, request: LookupRequest) -> AppResult<LookupOutcome> {
        if !self.limiter.allow(request.user_id).await {
            warn!("Rate limit exceeded for user {}", request.user_id);
            let retry_after = self
                .limiter
                .retry_after(request.user_id, Instant::now())
                .await;
            let notice = screens::rate_limited(
                self.limiter.max_requests(),
                self.limiter.window(),
                retry_after,
            );
            self.transport.send(request.chat_id, notice, None).await?;
            return Ok(LookupOutcome::RateLimited);
        }

        let number = phone::normalize(&phone::sanitize(&request.raw_input));
        let fingerprint = phone::fingerprint(&number);
        let remaining = self
            .limiter
            .remaining_at(request.user_id, Instant::now())
            .await;
        info!(
            "Lookup request for {} from user {} ({} left in window)",
            fingerprint, request.user_id, remaining
        );

        let placeholder = self
            .transport
            .send(request.chat_id, screens::searching(&number), None)
            .await?;

        let outcome = match self.client.lookup(&number).await {
            Ok(payload) => {
                let report = format_report(&number, &payload, Utc::now());
                self.transport
                    .edit(request.chat_id, placeholder, report, Some(Menu::Result))
                    .await?;
                info!(
                    "Successful lookup for {} in {}ms",
                    fingerprint,
                    elapsed_ms(request.requested_at)
                );
                LookupOutcome::Completed
            }
            Err(e) => {
                warn!(
                    "Failed lookup for {} after {}ms: {}",
                    fingerprint,
                    elapsed_ms(request.requested_at),
                    e
                );
                self.transport
                    .edit(
                        request.chat_id,
                        placeholder,
                        screens::lookup_failed(&e.user_message()),
                        None,
                    )
                    .await?;
                LookupOutcome::Failed(e.kind())
            }
        };

        Ok(outcome)
    }
}

fn elapsed_ms(since: DateTime<Utc>) -> i64 {
    (Utc::now() - since).num_milliseconds()
}
