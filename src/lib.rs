pub mod config;
pub mod credentials;
pub mod http;
pub mod sites;

pub use config::{ClientConfig, Protocol};
pub use http::{RateLimitedHttpClient, RetryPolicy, ThrottleError};
