//! Retry behaviour of the HTTP transport.
//!
//! Only network-level failures (timeouts, refused or dropped connections,
//! bodies cut short) are retried, after a fixed pause and up to a bounded
//! number of tries. Any HTTP response read in full, whatever its status, is
//! final and handed back to the caller.

use std::time::{Duration, SystemTime};

use reqwest_retry::{RetryDecision, RetryPolicy, Retryable, default_on_request_failure};

/// Retry policy waiting the same interval before every new attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    max_retries: u32,
    interval: Duration,
}

impl FixedInterval {
    /// Allow `max_tries` attempts in total, `interval` apart.
    ///
    /// `max_tries` of zero is treated as one: the first attempt always runs.
    pub fn new(max_tries: u32, interval: Duration) -> Self {
        Self {
            max_retries: max_tries.saturating_sub(1),
            interval,
        }
    }

    /// Number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Pause before each retry.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl RetryPolicy for FixedInterval {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        if n_past_retries < self.max_retries {
            RetryDecision::Retry {
                execute_after: SystemTime::now() + self.interval,
            }
        } else {
            RetryDecision::DoNotRetry
        }
    }
}

/// Classifies failed attempts, retrying network failures only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkFailuresOnly;

impl NetworkFailuresOnly {
    /// Decide whether a failed attempt may be retried.
    ///
    /// Errors raised while the response body is read (a stalled or reset
    /// connection after the headers arrived) are transient. Everything else
    /// follows [`default_on_request_failure`].
    pub fn handle_failure(&self, error: &reqwest_middleware::Error) -> Option<Retryable> {
        match error {
            reqwest_middleware::Error::Reqwest(e) if e.is_body() || e.is_decode() => {
                Some(Retryable::Transient)
            }
            other => default_on_request_failure(other),
        }
    }
}
