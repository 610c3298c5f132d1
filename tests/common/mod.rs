//! Shared utilities for integration tests: a scripted in-memory chain.

#![allow(dead_code)]

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{keccak256, Address, Bytes, LogData, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::{SolEvent, SolType};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use multimint::blockchain::{BlockchainError, BlockchainResult, ChainId, ChainRpc, LogRecord, Receipt};
use multimint::contracts::erc721::Transfer;
use multimint::contracts::multimint::{MintDeployed, MintWithdrawSuccess, MULTIMINT_ADDRESS};
use multimint::contracts::seadrop::PublicDrop;

/// Anvil's first development key.
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Every method name a write goes through.
pub const WRITE_METHODS: &[&str] = &["eth_sendRawTransaction"];

#[derive(Default)]
struct State {
    chain_id: u64,
    balance: U256,
    nonce: u64,
    gas_prices: VecDeque<u128>,
    gas_price: u128,
    estimates: VecDeque<BlockchainResult<u64>>,
    call_output: Option<Bytes>,
    /// `None` leaves the broadcast pending forever.
    outcomes: VecDeque<Option<(bool, Vec<LogRecord>)>>,
    mined: HashMap<TxHash, Receipt>,
    sent: Vec<Bytes>,
    calls: Vec<&'static str>,
}

/// A [`ChainRpc`] whose answers are scripted up front.
///
/// Every broadcast consumes one nonce and is mined immediately with the next
/// scripted outcome (success with no logs when none is scripted). A broadcast
/// scripted as pending is recorded but never mined and keeps its nonce free.
pub struct MockChain {
    state: Mutex<State>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            state: Mutex::new(State {
                chain_id,
                gas_price: 1_000_000_000,
                ..State::default()
            }),
        }
    }

    pub fn with_balance(self, balance: U256) -> Self {
        self.state.lock().unwrap().balance = balance;
        self
    }

    pub fn with_nonce(self, nonce: u64) -> Self {
        self.state.lock().unwrap().nonce = nonce;
        self
    }

    pub fn with_gas_price(self, gas_price: u128) -> Self {
        self.state.lock().unwrap().gas_price = gas_price;
        self
    }

    /// Gas prices returned by successive queries before falling back to the
    /// default.
    pub fn with_gas_price_sequence(self, prices: &[u128]) -> Self {
        self.state.lock().unwrap().gas_prices = prices.iter().copied().collect();
        self
    }

    pub fn with_mint_price(self, mint_price: u64) -> Self {
        self.state.lock().unwrap().call_output = Some(public_drop(mint_price));
        self
    }

    pub fn script_estimate(&self, result: BlockchainResult<u64>) {
        self.state.lock().unwrap().estimates.push_back(result);
    }

    pub fn script_outcome(&self, success: bool, logs: Vec<LogRecord>) {
        self.state.lock().unwrap().outcomes.push_back(Some((success, logs)));
    }

    /// The next broadcast is accepted but never mined.
    pub fn script_pending(&self) {
        self.state.lock().unwrap().outcomes.push_back(None);
    }

    /// Pretend `receipt` was mined earlier.
    pub fn insert_receipt(&self, receipt: Receipt) {
        self.state
            .lock()
            .unwrap()
            .mined
            .insert(receipt.transaction_hash, receipt);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|call| **call == method).count()
    }

    pub fn wrote_anything(&self) -> bool {
        self.calls().iter().any(|call| WRITE_METHODS.contains(call))
    }

    /// Every broadcast transaction, decoded.
    pub fn sent(&self) -> Vec<TxEnvelope> {
        self.state
            .lock()
            .unwrap()
            .sent
            .iter()
            .map(|raw| TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap())
            .collect()
    }

    fn record(&self, method: &'static str) {
        self.state.lock().unwrap().calls.push(method);
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn chain_id(&self) -> BlockchainResult<ChainId> {
        self.record("eth_chainId");
        Ok(ChainId(self.state.lock().unwrap().chain_id))
    }

    async fn balance_of(&self, _address: Address) -> BlockchainResult<U256> {
        self.record("eth_getBalance");
        Ok(self.state.lock().unwrap().balance)
    }

    async fn nonce_of(&self, _address: Address) -> BlockchainResult<u64> {
        self.record("eth_getTransactionCount");
        Ok(self.state.lock().unwrap().nonce)
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.record("eth_gasPrice");
        let mut state = self.state.lock().unwrap();
        let default = state.gas_price;
        Ok(state.gas_prices.pop_front().unwrap_or(default))
    }

    async fn estimate_gas(&self, _tx: &TransactionRequest) -> BlockchainResult<u64> {
        self.record("eth_estimateGas");
        self.state
            .lock()
            .unwrap()
            .estimates
            .pop_front()
            .unwrap_or(Ok(100_000))
    }

    async fn call(&self, _tx: &TransactionRequest) -> BlockchainResult<Bytes> {
        self.record("eth_call");
        self.state
            .lock()
            .unwrap()
            .call_output
            .clone()
            .ok_or_else(|| BlockchainError::Rpc("execution reverted".into()))
    }

    async fn send_raw(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        self.record("eth_sendRawTransaction");
        let mut state = self.state.lock().unwrap();
        let tx_hash = keccak256(raw);
        let outcome = state
            .outcomes
            .pop_front()
            .unwrap_or(Some((true, Vec::new())));
        let block_number = 100 + state.sent.len() as u64;

        state.sent.push(Bytes::copy_from_slice(raw));
        let Some((success, logs)) = outcome else {
            return Ok(tx_hash);
        };
        state.nonce += 1;
        state.mined.insert(
            tx_hash,
            Receipt {
                transaction_hash: tx_hash,
                success,
                block_number: Some(block_number),
                gas_used: 90_000,
                logs,
            },
        );
        Ok(tx_hash)
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<Receipt>> {
        self.record("eth_getTransactionReceipt");
        Ok(self.state.lock().unwrap().mined.get(&tx_hash).cloned())
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(1)
    }
}

/// `getPublicDrop` return data with the given price.
pub fn public_drop(mint_price: u64) -> Bytes {
    let drop = PublicDrop {
        mintPrice: alloy::primitives::aliases::U80::from(mint_price),
        startTime: alloy::primitives::aliases::U48::from(1_700_000_000u64),
        endTime: alloy::primitives::aliases::U48::from(1_900_000_000u64),
        maxTotalMintableByWallet: 100,
        feeBps: 1000,
        restrictFeeRecipients: true,
    };
    Bytes::from(<PublicDrop as SolType>::abi_encode(&drop))
}

pub fn fan_out() -> Address {
    MULTIMINT_ADDRESS.parse().unwrap()
}

fn record(address: Address, data: LogData) -> LogRecord {
    LogRecord {
        address,
        topics: data.topics().to_vec(),
        data: data.data,
    }
}

/// `MintDeployed` from the fan-out contract.
pub fn deployed_log(deployer: Address, nft: Address, child: Address) -> LogRecord {
    let event = MintDeployed {
        deployer,
        nftAddress: nft,
        mintContract: child,
    };
    record(fan_out(), event.encode_log_data())
}

/// ERC-721 `Transfer` emitted by `nft`.
pub fn transfer_log(nft: Address, to: Address, token_id: u64) -> LogRecord {
    let event = Transfer {
        from: Address::ZERO,
        to,
        tokenId: U256::from(token_id),
    };
    record(nft, event.encode_log_data())
}

/// `MintWithdrawSuccess` from the fan-out contract.
pub fn withdraw_success_log(deployer: Address, nft: Address, child: Address, token_id: u64) -> LogRecord {
    let event = MintWithdrawSuccess {
        deployer,
        nftAddress: nft,
        mintContract: child,
        tokenId: U256::from(token_id),
    };
    record(fan_out(), event.encode_log_data())
}

/// Legacy gas price of a broadcast transaction.
pub fn gas_price_of(tx: &TxEnvelope) -> u128 {
    tx.gas_price().unwrap_or_default()
}
