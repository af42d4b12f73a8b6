//! Client for the third-party phone number lookup API.
//!
//! `GET <base_url>?key=<key>&num=<digits>`, one attempt per call.

mod client;
mod error;
mod types;

pub use client::{LookupClient, DEFAULT_USER_AGENT, PROBE_NUMBER, PROBE_TIMEOUT};
pub use error::{ErrorKind, LookupError};
pub use types::*;
