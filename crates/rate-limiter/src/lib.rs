//! In-memory per-user rate limiting.
//!
//! A sliding window over a per-user request log. State lives for the
//! lifetime of the process and is never persisted.

mod limiter;

pub use limiter::RateLimiter;
