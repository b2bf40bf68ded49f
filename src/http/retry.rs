//! Throttle-retry policy for requests answered with HTTP 429.

use std::time::Duration;

/// Pause between send attempts while the server is throttling.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Controls how long the client keeps resending a throttled request.
///
/// The default resends forever with a fixed one-second pause: a persistently
/// throttling server holds the caller indefinitely. Callers that need a
/// bound set [`max_attempts`](Self::with_max_attempts) or a wall-clock
/// [`deadline`](Self::with_deadline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Pause between attempts.
    pub delay: Duration,
    /// Total number of send attempts allowed. `None` means unlimited.
    pub max_attempts: Option<u32>,
    /// Wall-clock budget for the whole call, pauses included.
    /// `None` means unlimited.
    pub deadline: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: RETRY_DELAY,
            max_attempts: None,
            deadline: None,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Raised when a bounded policy gives up on a still-throttling server.
#[derive(Debug)]
pub enum ThrottleError {
    /// The configured attempt cap was reached without a non-429 response.
    AttemptsExhausted { attempts: u32 },
    /// The configured wall-clock budget ran out.
    DeadlineExceeded { elapsed: Duration },
}

impl std::fmt::Display for ThrottleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThrottleError::AttemptsExhausted { attempts } => {
                write!(
                    f,
                    "Server kept throttling: gave up after {} attempts",
                    attempts
                )
            }
            ThrottleError::DeadlineExceeded { elapsed } => {
                write!(
                    f,
                    "Server kept throttling: deadline exceeded after {:.1}s",
                    elapsed.as_secs_f64()
                )
            }
        }
    }
}

impl std::error::Error for ThrottleError {}
