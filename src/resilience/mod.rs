//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Transaction attempt:
//!     → retries.rs (RetryPolicy: classify the error, count attempts, stop on cancel)
//!     → backoff.rs (delay before the next attempt; zero by default)
//! ```
//!
//! # Design Decisions
//! - Attempts are unbounded unless the policy sets a maximum
//! - Only errors that can change between attempts are retried
//! - Cancellation is checked before and during every attempt

pub mod backoff;
pub mod retries;

pub use retries::RetryPolicy;
