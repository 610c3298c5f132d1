//! Transaction lifecycle: build, estimate, sign, broadcast, confirm.
//!
//! # Responsibilities
//! - Query a fresh nonce and gas price for every attempt
//! - Estimate gas against current state and add the safety buffer
//! - Sign legacy transactions and broadcast the raw bytes
//! - Wait for the receipt and treat a failed status as a failed attempt
//! - Repeat attempts under a [`RetryPolicy`]

use alloy::network::TransactionBuilder;
use alloy::rpc::types::TransactionRequest;
use std::sync::Arc;

use crate::blockchain::client::ChainRpc;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, Receipt};
use crate::blockchain::units::{format_gwei, scale, scale_gas, GasPriceInput};
use crate::blockchain::wallet::Wallet;
use crate::config::MintConfig;
use crate::contracts::ContractCall;
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::resilience::RetryPolicy;

/// Gas buffers and confirmation window for the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TxSettings {
    /// Applied to every gas estimate.
    pub gas_limit_multiplier: f64,
    /// Applied to the node's gas price for [`GasPriceInput::Network`].
    pub gas_price_multiplier: f64,
    /// How long to wait for a receipt after broadcast.
    pub receipt_timeout_secs: u64,
}

impl Default for TxSettings {
    fn default() -> Self {
        Self {
            gas_limit_multiplier: 1.2,
            gas_price_multiplier: 1.2,
            receipt_timeout_secs: 600,
        }
    }
}

impl From<&MintConfig> for TxSettings {
    fn from(config: &MintConfig) -> Self {
        Self {
            gas_limit_multiplier: config.gas.limit_multiplier,
            gas_price_multiplier: config.gas.price_multiplier,
            receipt_timeout_secs: config.rpc.receipt_timeout_secs,
        }
    }
}

/// Drives one logical transaction from intent to a successful receipt.
pub struct TxEngine<C: ChainRpc + ?Sized> {
    client: Arc<C>,
    wallet: Wallet,
    /// Verified once per run.
    chain_id: ChainId,
    settings: TxSettings,
}

impl<C: ChainRpc + ?Sized> TxEngine<C> {
    pub fn new(client: Arc<C>, wallet: Wallet, chain_id: ChainId, settings: TxSettings) -> Self {
        Self {
            client,
            wallet,
            chain_id,
            settings,
        }
    }

    /// Gas price for the next attempt.
    pub async fn resolve_gas_price(&self, input: GasPriceInput) -> BlockchainResult<u128> {
        match input {
            GasPriceInput::Fixed(price) => Ok(price),
            GasPriceInput::Network => {
                let network = self.client.gas_price().await?;
                Ok(scale(network, self.settings.gas_price_multiplier))
            }
        }
    }

    /// Populate `call` into a signable legacy transaction.
    ///
    /// Fails with [`BlockchainError::Estimation`] when the node says the call
    /// would revert.
    pub async fn build(
        &self,
        call: &ContractCall,
        gas_price: GasPriceInput,
    ) -> BlockchainResult<TransactionRequest> {
        let from = self.wallet.address();
        let nonce = self.client.nonce_of(from).await?;
        let gas_price = self.resolve_gas_price(gas_price).await?;

        let request = call.request(from);
        let estimated = self.client.estimate_gas(&request).await?;
        let gas_limit = scale_gas(estimated, self.settings.gas_limit_multiplier);

        tracing::info!(
            stage = call.label,
            nonce,
            estimated_gas = estimated,
            gas_limit,
            gas_price_gwei = %format_gwei(gas_price),
            "Transaction built"
        );

        Ok(request
            .with_nonce(nonce)
            .with_chain_id(self.chain_id.0)
            .with_gas_price(gas_price)
            .with_gas_limit(gas_limit))
    }

    /// One attempt: build, sign, broadcast, and wait for the receipt.
    ///
    /// A mined receipt with a failed status is [`BlockchainError::Reverted`].
    pub async fn submit_and_confirm(
        &self,
        call: &ContractCall,
        gas_price: GasPriceInput,
    ) -> BlockchainResult<Receipt> {
        let tx = self.build(call, gas_price).await?;
        let raw = self.wallet.sign_transaction(tx).await?;

        let tx_hash = self.client.send_raw(&raw).await?;
        tracing::info!(stage = call.label, tx_hash = %tx_hash, "Transaction sent");

        let receipt = self
            .client
            .wait_for_receipt(tx_hash, self.settings.receipt_timeout_secs)
            .await?;

        if !receipt.success {
            return Err(BlockchainError::Reverted(tx_hash));
        }

        metrics::record_confirmed(call.label);
        tracing::info!(
            stage = call.label,
            tx_hash = %tx_hash,
            block = ?receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );
        Ok(receipt)
    }

    /// Attempt `call` under `policy` until a successful receipt.
    ///
    /// Each attempt starts from scratch: fresh nonce, fresh gas price,
    /// fresh estimate.
    pub async fn submit_until_confirmed(
        &self,
        call: &ContractCall,
        gas_price: GasPriceInput,
        policy: &RetryPolicy,
        signal: &mut ShutdownSignal,
    ) -> BlockchainResult<Receipt> {
        policy
            .run(call.label, signal, |attempt| {
                metrics::record_attempt(call.label);
                tracing::info!(stage = call.label, attempt, "Building transaction");
                self.submit_and_confirm(call, gas_price)
            })
            .await
    }
}
