//! Blockchain RPC session with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to one JSON-RPC endpoint and prove it answers
//! - Query chain state (chain id, balances, nonces, gas price)
//! - Estimate, call, broadcast raw transactions and poll for receipts
//!
//! Nothing is cached: every query reflects chain state at call time.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, Receipt};
use crate::config::schema::RpcConfig;

/// The JSON-RPC surface the lifecycle engine and workflow depend on.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Chain id reported by the node.
    async fn chain_id(&self) -> BlockchainResult<ChainId>;

    /// Native balance in base units.
    async fn balance_of(&self, address: Address) -> BlockchainResult<U256>;

    /// Next nonce for `address`.
    async fn nonce_of(&self, address: Address) -> BlockchainResult<u64>;

    /// Current legacy gas price in base units.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// Gas needed for `tx` against current state. A call that would revert
    /// fails with [`BlockchainError::Estimation`].
    async fn estimate_gas(&self, tx: &TransactionRequest) -> BlockchainResult<u64>;

    /// Read-only `eth_call`.
    async fn call(&self, tx: &TransactionRequest) -> BlockchainResult<Bytes>;

    /// Broadcast a signed transaction.
    async fn send_raw(&self, raw: &[u8]) -> BlockchainResult<TxHash>;

    /// Receipt lookup; `None` while the transaction is pending or unknown.
    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<Receipt>>;

    /// Delay between receipt polls.
    fn poll_interval(&self) -> Duration {
        Duration::from_secs(2)
    }

    /// Receipt of an already-mined transaction.
    async fn fetch_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Receipt> {
        self.get_receipt(tx_hash)
            .await?
            .ok_or(BlockchainError::NotFound(tx_hash))
    }

    /// Poll until the transaction is mined or `timeout_secs` elapse.
    async fn wait_for_receipt(&self, tx_hash: TxHash, timeout_secs: u64) -> BlockchainResult<Receipt> {
        let poll_interval = self.poll_interval();

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);
            loop {
                ticker.tick().await;
                match self.get_receipt(tx_hash).await {
                    Ok(Some(receipt)) => return receipt,
                    Ok(None) => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
                    Err(e) => tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt poll failed"),
                }
            }
        })
        .await;

        result.map_err(|_| BlockchainError::ConfirmationTimeout {
            tx_hash,
            timeout_secs,
        })
    }
}

/// Alloy-backed session against a single endpoint.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    config: RpcConfig,
    /// Per-request timeout.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect to the configured endpoint.
    ///
    /// The node must answer a chain id query within the request timeout,
    /// otherwise this fails with [`BlockchainError::Connection`].
    pub async fn connect(config: RpcConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.url.trim().parse().map_err(|e| {
            BlockchainError::Connection(format!("Invalid RPC URL '{}': {}", config.url, e))
        })?;

        let client = Self {
            provider: Arc::new(ProviderBuilder::new().connect_http(url))
                as Arc<dyn Provider + Send + Sync>,
            timeout_duration: Duration::from_secs(config.request_timeout_secs),
            config,
        };

        match client.chain_id().await {
            Ok(chain_id) => {
                tracing::info!(rpc_url = %client.config.url, chain_id = %chain_id, "Connected to RPC");
                Ok(client)
            }
            Err(e) => Err(BlockchainError::Connection(format!(
                "Unable to reach {}: {}",
                client.config.url, e
            ))),
        }
    }

    async fn request<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        self.request_as(method, fut, BlockchainError::Rpc).await
    }

    /// Like `request`, with node errors mapped through `on_error`.
    async fn request_as<T, E, F>(
        &self,
        method: &'static str,
        fut: F,
        on_error: fn(String) -> BlockchainError,
    ) -> BlockchainResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(on_error(format!("{}: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

#[async_trait]
impl ChainRpc for BlockchainClient {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.request("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn balance_of(&self, address: Address) -> BlockchainResult<U256> {
        self.request("eth_getBalance", self.provider.get_balance(address).into_future())
            .await
    }

    async fn nonce_of(&self, address: Address) -> BlockchainResult<u64> {
        self.request(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).into_future(),
        )
        .await
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.request("eth_gasPrice", self.provider.get_gas_price()).await
    }

    async fn estimate_gas(&self, tx: &TransactionRequest) -> BlockchainResult<u64> {
        self.request_as(
            "eth_estimateGas",
            self.provider.estimate_gas(tx.clone()).into_future(),
            BlockchainError::Estimation,
        )
        .await
    }

    async fn call(&self, tx: &TransactionRequest) -> BlockchainResult<Bytes> {
        self.request("eth_call", self.provider.call(tx.clone()).into_future())
            .await
    }

    async fn send_raw(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        let pending = self
            .request("eth_sendRawTransaction", self.provider.send_raw_transaction(raw))
            .await?;
        Ok(*pending.tx_hash())
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<Receipt>> {
        let receipt = self
            .request(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash).into_future(),
            )
            .await?;
        Ok(receipt.as_ref().map(Receipt::from))
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.url)
            .field("timeout_secs", &self.config.request_timeout_secs)
            .finish()
    }
}
