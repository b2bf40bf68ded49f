//! Rate-limit-aware HTTP layer.

mod client;
mod retry;

pub use client::RateLimitedHttpClient;
pub use retry::{RETRY_DELAY, RetryPolicy, ThrottleError};
