//! Workflow orchestration.
//!
//! # Data Flow
//! ```text
//! session → verify_chain → Network (before any key is read)
//!     RunRequest (mode, NFT, quantity, gas price)
//!     → orchestrator.rs (verify chain, price, balance, mint, correlate, withdraw)
//!     → RunOutcome | WorkflowError
//! ```
//!
//! The mode is fixed before the run starts. A withdraw failure after a
//! successful mint is reported with the mint hash; the mint stands.

pub mod orchestrator;
pub mod types;

pub use orchestrator::{verify_chain, Orchestrator};
pub use types::{CostCheck, Mode, RunOutcome, RunRequest, WithdrawOutcome, WorkflowError};
