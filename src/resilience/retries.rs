//! Retry policy for transaction attempts.
//!
//! # Responsibilities
//! - Run an attempt repeatedly until it succeeds
//! - Stop on non-retryable errors, exhausted attempts, or cancellation
//! - Log every failed attempt with its number and reason

use std::future::Future;
use std::time::Duration;

use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::RetryConfig;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::resilience::backoff::calculate_backoff;

/// How many times to attempt an operation and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// `None` retries until success or cancellation.
    max_attempts: Option<u32>,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    /// Retry immediately, forever.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }

    /// Retry immediately, at most `max_attempts` attempts in total.
    pub fn limited(max_attempts: u32) -> Self {
        Self {
            max_attempts: Some(max_attempts.max(1)),
            ..Self::unbounded()
        }
    }

    /// Policy with the given attempt bound and the configured delays.
    pub fn from_config(max_attempts: Option<u32>, config: &RetryConfig) -> Self {
        Self {
            max_attempts: max_attempts.map(|n| n.max(1)),
            base_delay_ms: config.base_delay_ms,
            max_delay_ms: config.max_delay_ms,
        }
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Whether another attempt may follow `attempts_made` failures.
    pub fn allows_another(&self, attempts_made: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts_made < max)
    }

    /// Delay before the attempt following `attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.base_delay_ms, self.max_delay_ms)
    }

    /// Run `op` until it succeeds.
    ///
    /// `op` receives the 1-based attempt number. Every retryable error is
    /// logged and followed by a fresh attempt; a non-retryable error is
    /// returned as is, and running out of attempts yields
    /// [`BlockchainError::RetriesExhausted`]. A triggered `signal` yields
    /// [`BlockchainError::Cancelled`], also mid-attempt.
    pub async fn run<T, F, Fut>(
        &self,
        stage: &'static str,
        signal: &mut ShutdownSignal,
        mut op: F,
    ) -> BlockchainResult<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = BlockchainResult<T>>,
    {
        let mut attempt = 0u32;

        loop {
            if signal.is_triggered() {
                return Err(BlockchainError::Cancelled);
            }
            attempt = attempt.saturating_add(1);

            let outcome = tokio::select! {
                result = op(attempt) => result,
                _ = signal.cancelled() => return Err(BlockchainError::Cancelled),
            };

            let error = match outcome {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            metrics::record_attempt_failure(stage, error.reason());

            if !error.is_retryable() {
                tracing::error!(stage, attempt, error = %error, "Attempt failed, not retryable");
                return Err(error);
            }
            if !self.allows_another(attempt) {
                tracing::error!(stage, attempt, error = %error, "Attempt failed, no attempts left");
                return Err(BlockchainError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(error),
                });
            }

            tracing::warn!(stage, attempt, error = %error, "Attempt failed, retrying");

            let delay = self.delay_after(attempt);
            if !delay.is_zero() {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = signal.cancelled() => return Err(BlockchainError::Cancelled),
                }
            }
        }
    }
}
