//! Run state machine.
//!
//! ```text
//! VerifyChain ─┬─ ReadPrice → CheckBalance → Mint ─┬─ (MintOnly) done
//!              │                                   └─ Correlate → Withdraw
//!              └─ FetchReceipt(hash) ──────────────── Correlate → Withdraw
//! ```
//!
//! Every stage is a public method so callers can compose them differently.
//! The binary calls [`verify_chain`] right after connecting, before any key
//! is read, and then [`Orchestrator::run_on`] with the verified network.

use alloy::primitives::{Address, TxHash, U256};
use std::sync::Arc;

use crate::blockchain::chains::{self, ChainEntry, Network};
use crate::blockchain::client::ChainRpc;
use crate::blockchain::transaction::{TxEngine, TxSettings};
use crate::blockchain::types::Receipt;
use crate::blockchain::units::{format_native, required_cost, GasPriceInput};
use crate::blockchain::wallet::Wallet;
use crate::config::MintConfig;
use crate::contracts::{DropPricing, MultiMint, SeaDrop};
use crate::correlation::{correlate_mint, summarize_withdraw, Correlation};
use crate::lifecycle::ShutdownSignal;
use crate::resilience::RetryPolicy;
use crate::workflow::types::{
    CostCheck, Mode, RunOutcome, RunRequest, WithdrawOutcome, WorkflowError,
};

/// Sequences one run against one session and one wallet.
pub struct Orchestrator<C: ChainRpc + ?Sized> {
    client: Arc<C>,
    wallet: Wallet,
    seadrop: SeaDrop,
    multimint: MultiMint,
    chains: Vec<ChainEntry>,
    settings: TxSettings,
    mint_policy: RetryPolicy,
    withdraw_policy: RetryPolicy,
    signal: ShutdownSignal,
}

impl<C: ChainRpc + ?Sized> Orchestrator<C> {
    /// Build an orchestrator from a validated configuration.
    pub fn new(
        client: Arc<C>,
        wallet: Wallet,
        config: &MintConfig,
        signal: ShutdownSignal,
    ) -> Result<Self, WorkflowError> {
        let seadrop = parse_address("contracts.seadrop", &config.contracts.seadrop)?;
        let multimint = parse_address("contracts.multimint", &config.contracts.multimint)?;

        Ok(Self {
            client,
            wallet,
            seadrop: SeaDrop::new(seadrop),
            multimint: MultiMint::new(multimint),
            chains: config.chains.supported.clone(),
            settings: TxSettings::from(config),
            mint_policy: RetryPolicy::from_config(config.retry.mint_max_attempts, &config.retry),
            withdraw_policy: RetryPolicy::from_config(
                config.retry.withdraw_max_attempts,
                &config.retry,
            ),
            signal,
        })
    }

    /// Query the chain id and bind the run to an allow-listed network.
    pub async fn verify_chain(&self) -> Result<Network, WorkflowError> {
        verify_chain(&*self.client, &self.chains).await
    }

    /// Read the drop's public pricing. Any failure is fatal.
    pub async fn read_price(&self, nft: Address) -> Result<DropPricing, WorkflowError> {
        let pricing = self
            .seadrop
            .read_pricing(&*self.client, nft)
            .await
            .map_err(|e| WorkflowError::PriceRead(e.to_string()))?;

        tracing::info!(
            nft = %nft,
            mint_price = %pricing.mint_price,
            start_time = pricing.start_time,
            end_time = pricing.end_time,
            max_per_wallet = pricing.max_total_mintable_by_wallet,
            "Public drop read"
        );
        Ok(pricing)
    }

    /// Compute `price × quantity` and compare it with the wallet balance.
    ///
    /// Runs once, before the first attempt; never retried.
    pub async fn check_balance(
        &self,
        network: &Network,
        pricing: DropPricing,
        quantity: u64,
    ) -> Result<CostCheck, WorkflowError> {
        if quantity == 0 {
            return Err(WorkflowError::InvalidInput(
                "quantity must be at least 1".to_string(),
            ));
        }
        let required = required_cost(pricing.mint_price, quantity).ok_or_else(|| {
            WorkflowError::InvalidInput("total cost overflows 256 bits".to_string())
        })?;
        let balance = self.client.balance_of(self.wallet.address()).await?;

        tracing::info!(
            price = %format!("{} {}", format_native(pricing.mint_price), network.symbol),
            total = %format!("{} {}", format_native(required), network.symbol),
            balance = %format!("{} {}", format_native(balance), network.symbol),
            quantity,
            "Cost computed"
        );

        if balance < required {
            return Err(WorkflowError::InsufficientBalance { balance, required });
        }

        Ok(CostCheck {
            pricing,
            quantity,
            required,
            balance,
        })
    }

    /// Lifecycle engine bound to the verified network.
    pub fn engine(&self, network: &Network) -> TxEngine<C> {
        TxEngine::new(
            Arc::clone(&self.client),
            self.wallet.clone(),
            network.chain_id,
            self.settings,
        )
    }

    /// Submit `mintMulti` until a successful receipt, under the mint policy.
    pub async fn mint(
        &self,
        engine: &TxEngine<C>,
        nft: Address,
        quantity: u64,
        value: U256,
        gas_price: GasPriceInput,
    ) -> Result<Receipt, WorkflowError> {
        let call = self.multimint.mint_call(quantity, nft, value);
        let mut signal = self.signal.clone();

        let receipt = engine
            .submit_until_confirmed(&call, gas_price, &self.mint_policy, &mut signal)
            .await?;

        tracing::info!(tx_hash = %receipt.transaction_hash, "Mint succeeded");
        Ok(receipt)
    }

    /// Receipt of an earlier mint.
    pub async fn fetch_mint_receipt(&self, tx_hash: TxHash) -> Result<Receipt, WorkflowError> {
        let receipt = self.client.fetch_receipt(tx_hash).await?;
        if !receipt.success {
            tracing::warn!(tx_hash = %tx_hash, "Transaction did not succeed; its logs are likely empty");
        }
        Ok(receipt)
    }

    /// Recover helpers and token ids from a mint receipt.
    pub fn correlate(&self, receipt: &Receipt) -> Result<Correlation, WorkflowError> {
        let correlation = correlate_mint(&receipt.logs, self.multimint.address())?;

        tracing::info!(
            nft = ?correlation.nft_address,
            children = correlation.child_addresses.len(),
            token_ids = ?correlation.token_ids,
            "Mint receipt correlated"
        );
        Ok(correlation)
    }

    /// Submit `withdrawAllForNft` for a correlation, under the withdraw policy.
    ///
    /// Fails with [`WorkflowError::CorrelationEmpty`] when the correlation
    /// names no helper or no NFT contract.
    pub async fn withdraw(
        &self,
        engine: &TxEngine<C>,
        correlation: &Correlation,
        gas_price: GasPriceInput,
    ) -> Result<WithdrawOutcome, WorkflowError> {
        let nft = match correlation.nft_address {
            Some(nft) if !correlation.is_empty() => nft,
            _ => return Err(WorkflowError::CorrelationEmpty),
        };
        if correlation.token_ids.is_empty() {
            tracing::warn!(nft = %nft, "Helpers found but no token transfers; withdrawing anyway");
        }

        let call = self.multimint.withdraw_call(nft, &correlation.token_ids);
        let mut signal = self.signal.clone();

        let receipt = engine
            .submit_until_confirmed(&call, gas_price, &self.withdraw_policy, &mut signal)
            .await?;
        let summary = summarize_withdraw(&receipt.logs, self.multimint.address())?;

        tracing::info!(
            tx_hash = %receipt.transaction_hash,
            succeeded = summary.succeeded.len(),
            failed = summary.failed.len(),
            "Withdraw succeeded"
        );
        Ok(WithdrawOutcome {
            tx_hash: receipt.transaction_hash,
            summary,
        })
    }

    /// Correlate a mint receipt and withdraw what it produced.
    async fn correlate_and_withdraw(
        &self,
        engine: &TxEngine<C>,
        receipt: &Receipt,
        gas_price: GasPriceInput,
        outcome: &mut RunOutcome,
    ) -> Result<(), WorkflowError> {
        let correlation = self.correlate(receipt)?;
        outcome.correlation = Some(correlation.clone());
        outcome.withdraw = Some(self.withdraw(engine, &correlation, gas_price).await?);
        Ok(())
    }

    /// Verify the chain, then run the stages `request.mode` selects.
    pub async fn run(&self, request: &RunRequest) -> Result<RunOutcome, WorkflowError> {
        let network = self.verify_chain().await?;
        self.run_on(&network, request).await
    }

    /// Run the stages `request.mode` selects on an already verified network.
    pub async fn run_on(
        &self,
        network: &Network,
        request: &RunRequest,
    ) -> Result<RunOutcome, WorkflowError> {
        let engine = self.engine(network);
        let mut outcome = RunOutcome::new(network.clone());

        if let Mode::WithdrawFromHash(tx_hash) = request.mode {
            let receipt = self.fetch_mint_receipt(tx_hash).await?;
            self.correlate_and_withdraw(&engine, &receipt, request.gas_price, &mut outcome)
                .await?;
            return Ok(outcome);
        }

        let pricing = self.read_price(request.nft).await?;
        let cost = self
            .check_balance(network, pricing, request.quantity)
            .await?;
        let receipt = self
            .mint(
                &engine,
                request.nft,
                request.quantity,
                cost.required,
                request.gas_price,
            )
            .await?;
        outcome.cost = Some(cost);
        outcome.mint_tx = Some(receipt.transaction_hash);

        if request.mode.withdraws() {
            self.correlate_and_withdraw(&engine, &receipt, request.gas_price, &mut outcome)
                .await
                .map_err(|e| WorkflowError::WithdrawAfterMint {
                    mint_tx: receipt.transaction_hash,
                    source: Box::new(e),
                })?;
        }

        Ok(outcome)
    }
}

/// Query the chain id and match it against `supported`.
///
/// Needs only the session, so it can run before a wallet exists.
pub async fn verify_chain<C: ChainRpc + ?Sized>(
    client: &C,
    supported: &[ChainEntry],
) -> Result<Network, WorkflowError> {
    let chain_id = client.chain_id().await?;

    match chains::resolve(chain_id, supported) {
        Some(network) => {
            tracing::info!(chain_id = %network.chain_id, symbol = %network.symbol, "Chain verified");
            Ok(network)
        }
        None => Err(WorkflowError::UnsupportedChain {
            chain_id,
            supported: chains::describe(supported),
        }),
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address, WorkflowError> {
    value
        .parse()
        .map_err(|_| WorkflowError::InvalidInput(format!("{field}: '{value}' is not an address")))
}
