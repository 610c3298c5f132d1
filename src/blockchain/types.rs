//! Chain-specific types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, B256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// Endpoint unreachable or URL unusable.
    #[error("Connection error: {0}")]
    Connection(String),

    /// RPC request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Receipt lookup for a hash the node does not know.
    #[error("Transaction receipt not found: {0}")]
    NotFound(TxHash),

    /// Gas estimation rejected the call (it would revert).
    #[error("Gas estimation failed: {0}")]
    Estimation(String),

    /// Transaction was not mined within the confirmation window.
    #[error("Transaction {tx_hash} not confirmed after {timeout_secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, timeout_secs: u64 },

    /// Transaction was mined with a failure status.
    #[error("Transaction reverted on-chain: {0}")]
    Reverted(TxHash),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// The operator cancelled the run.
    #[error("Cancelled")]
    Cancelled,

    /// A bounded retry policy ran out of attempts.
    #[error("Gave up after {attempts} attempts, last error: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<BlockchainError>,
    },
}

impl BlockchainError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Key and signing faults are local and deterministic, and cancellation
    /// is an operator decision; everything else is treated as transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            BlockchainError::Wallet(_)
                | BlockchainError::Cancelled
                | BlockchainError::RetriesExhausted { .. }
        )
    }

    /// Short label used for metrics and attempt logs.
    pub fn reason(&self) -> &'static str {
        match self {
            BlockchainError::Connection(_) => "connection",
            BlockchainError::Rpc(_) => "rpc",
            BlockchainError::Timeout(_) => "rpc_timeout",
            BlockchainError::NotFound(_) => "not_found",
            BlockchainError::Estimation(_) => "estimation",
            BlockchainError::ConfirmationTimeout { .. } => "confirmation_timeout",
            BlockchainError::Reverted(_) => "reverted",
            BlockchainError::Wallet(_) => "wallet",
            BlockchainError::Cancelled => "cancelled",
            BlockchainError::RetriesExhausted { .. } => "retries_exhausted",
        }
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// One log entry as emitted during execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Contract that emitted the log.
    pub address: Address,
    /// Topic words, topic0 being the event signature hash.
    pub topics: Vec<B256>,
    /// Unindexed ABI-encoded arguments.
    pub data: Bytes,
}

/// Final outcome of a mined transaction.
///
/// `success` is the only signal trusted for success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Logs in emission order.
    pub logs: Vec<LogRecord>,
}

impl From<&alloy::rpc::types::Log> for LogRecord {
    fn from(log: &alloy::rpc::types::Log) -> Self {
        Self {
            address: log.inner.address,
            topics: log.inner.data.topics().to_vec(),
            data: log.inner.data.data.clone(),
        }
    }
}

impl From<&alloy::rpc::types::TransactionReceipt> for Receipt {
    fn from(receipt: &alloy::rpc::types::TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            success: receipt.status(),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            logs: receipt.inner.logs().iter().map(LogRecord::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
        assert_eq!(chain_id.to_string(), "1");
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(60);
        assert_eq!(err.to_string(), "RPC timeout after 60 seconds");

        let err = BlockchainError::RetriesExhausted {
            attempts: 3,
            last: Box::new(BlockchainError::Estimation("execution reverted: NotActive".into())),
        };
        assert!(err.to_string().contains("3 attempts"));
        assert!(err.to_string().contains("NotActive"));
    }

    #[test]
    fn test_retry_classification() {
        assert!(BlockchainError::Estimation("revert".into()).is_retryable());
        assert!(BlockchainError::Reverted(TxHash::ZERO).is_retryable());
        assert!(BlockchainError::ConfirmationTimeout {
            tx_hash: TxHash::ZERO,
            timeout_secs: 600
        }
        .is_retryable());
        assert!(BlockchainError::Rpc("connection reset".into()).is_retryable());
        assert!(!BlockchainError::Wallet("bad key".into()).is_retryable());
        assert!(!BlockchainError::Cancelled.is_retryable());
    }
}
