//! Contract call binder.
//!
//! # Data Flow
//! ```text
//! static interface (sol! bindings)
//!     → seadrop.rs   (public drop read: price and window)
//!     → multimint.rs (mintMulti / withdrawAllForNft calls, fan-out events)
//!     → erc721.rs    (Transfer event shape)
//!     → ContractCall (target, calldata, value) handed to the lifecycle engine
//! ```

pub mod erc721;
pub mod multimint;
pub mod seadrop;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;
use thiserror::Error;

use crate::blockchain::types::BlockchainError;

pub use multimint::MultiMint;
pub use seadrop::{DropPricing, SeaDrop};

/// Errors from contract reads.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Call failed: {0}")]
    Call(#[from] BlockchainError),

    #[error("Could not decode return data: {0}")]
    Decode(String),
}

/// One encoded state-changing call, ready for the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    /// Short name used in logs and metrics, e.g. `mint`.
    pub label: &'static str,
    pub to: Address,
    pub data: Bytes,
    /// Native value attached to the call.
    pub value: U256,
}

impl ContractCall {
    /// Request carrying sender, target, value and calldata; gas, price and
    /// nonce are left for the engine to fill.
    pub fn request(&self, from: Address) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(from)
            .with_to(self.to)
            .with_value(self.value)
            .with_input(self.data.clone())
    }
}
