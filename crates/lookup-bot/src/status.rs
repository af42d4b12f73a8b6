//! Lookup API availability snapshot.

use chrono::{DateTime, Utc};
use lookup_client::LookupClient;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub api_online: bool,
    pub checked_at: DateTime<Utc>,
}

impl StatusSnapshot {
    /// Probe the lookup API once.
    pub async fn probe(client: &LookupClient) -> Self {
        let api_online = client.check_availability().await;
        info!("Lookup API status: {}", if api_online { "online" } else { "offline" });

        Self {
            api_online,
            checked_at: Utc::now(),
        }
    }
}

/// Host part of a URL, without scheme, credentials, path or query.
pub fn endpoint_host(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    authority.rsplit('@').next().unwrap_or(authority)
}
