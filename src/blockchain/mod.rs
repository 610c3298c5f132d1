//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable or prompt (private key), RPC URL
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC session with timeouts, ChainRpc seam)
//!     → chains.rs (allow-list lookup after chain id verification)
//!     → transaction.rs (build, sign, broadcast, confirm, retry)
//! units.rs converts between operator input and base units throughout.
//! ```
//!
//! # Security Constraints
//! - Private keys never come from a command line flag
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod chains;
pub mod client;
pub mod transaction;
pub mod types;
pub mod units;
pub mod wallet;

pub use chains::{ChainEntry, Network};
pub use client::{BlockchainClient, ChainRpc};
pub use transaction::{TxEngine, TxSettings};
pub use types::{BlockchainError, BlockchainResult, ChainId, LogRecord, Receipt};
pub use units::GasPriceInput;
pub use wallet::Wallet;
