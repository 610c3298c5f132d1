//! Receipt log correlation.
//!
//! # Data Flow
//! ```text
//! Receipt.logs (emission order)
//!     → decode.rs   (per record: Decoded(event) | Skipped(reason))
//!     → mint.rs     (pass 1: MintDeployed from the fan-out address → children, NFT;
//!                    pass 2: Transfer to a child → token ids)
//!     → withdraw.rs (per-token withdraw results and totals)
//! ```
//!
//! Everything here is a pure function over a log slice. A record that does
//! not match the expected event is a skip, never an error; only a record that
//! could not have come from the EVM aborts correlation.

pub mod decode;
pub mod mint;
pub mod withdraw;

use thiserror::Error;

pub use decode::{LogOutcome, SkipReason};
pub use mint::{correlate_mint, Correlation};
pub use withdraw::{summarize_withdraw, WithdrawSummary};

/// Structure-level receipt faults.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorrelationError {
    #[error("Log record {index} is malformed: {reason}")]
    MalformedLog { index: usize, reason: String },
}
