//! Workflow request, outcome and error types.

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use thiserror::Error;

use crate::blockchain::chains::Network;
use crate::blockchain::types::{BlockchainError, ChainId};
use crate::blockchain::units::GasPriceInput;
use crate::contracts::DropPricing;
use crate::correlation::{Correlation, CorrelationError, WithdrawSummary};

/// What a run does, chosen once before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mint, correlate the receipt, then withdraw.
    MintAndWithdraw,
    /// Mint and stop.
    MintOnly,
    /// Correlate an already-mined mint transaction, then withdraw.
    WithdrawFromHash(TxHash),
}

impl Mode {
    pub fn withdraws(&self) -> bool {
        !matches!(self, Mode::MintOnly)
    }
}

/// Everything a run needs besides the session and the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub mode: Mode,
    /// Drop contract; unused for [`Mode::WithdrawFromHash`].
    pub nft: Address,
    /// Tokens to mint; unused for [`Mode::WithdrawFromHash`].
    pub quantity: u64,
    pub gas_price: GasPriceInput,
}

/// Fatal workflow conditions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Chain {chain_id} is not supported (supported: {supported})")]
    UnsupportedChain { chain_id: ChainId, supported: String },

    #[error("Failed to read price from drop contract: {0}")]
    PriceRead(String),

    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: U256, required: U256 },

    #[error("No child contracts found in receipt logs, nothing to withdraw")]
    CorrelationEmpty,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Mint {mint_tx} succeeded but withdraw failed: {source}")]
    WithdrawAfterMint {
        mint_tx: TxHash,
        #[source]
        source: Box<WorkflowError>,
    },

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

impl WorkflowError {
    /// Whether the run ended because the operator interrupted it.
    pub fn is_cancelled(&self) -> bool {
        match self {
            WorkflowError::Blockchain(BlockchainError::Cancelled) => true,
            WorkflowError::WithdrawAfterMint { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}

/// Cost check result, shown to the operator before minting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostCheck {
    pub pricing: DropPricing,
    pub quantity: u64,
    pub required: U256,
    pub balance: U256,
}

/// A confirmed withdraw and what the fan-out contract reported for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawOutcome {
    pub tx_hash: TxHash,
    pub summary: WithdrawSummary,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub network: Network,
    pub cost: Option<CostCheck>,
    pub mint_tx: Option<TxHash>,
    pub correlation: Option<Correlation>,
    pub withdraw: Option<WithdrawOutcome>,
}

impl RunOutcome {
    pub(crate) fn new(network: Network) -> Self {
        Self {
            network,
            cost: None,
            mint_tx: None,
            correlation: None,
            withdraw: None,
        }
    }
}
