//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file, and
//! every field has a default so an absent file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::blockchain::chains::{default_chains, ChainEntry};
use crate::contracts::multimint::MULTIMINT_ADDRESS;
use crate::contracts::seadrop::SEADROP_ADDRESS;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MintConfig {
    /// RPC endpoint and its timeouts.
    pub rpc: RpcConfig,

    /// Fixed contract addresses.
    pub contracts: ContractsConfig,

    /// Networks a run may bind to.
    pub chains: ChainsConfig,

    /// Gas limit and gas price buffers.
    pub gas: GasConfig,

    /// Attempt policy for mint and withdraw.
    pub retry: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL; prompted for when empty.
    pub url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// How long to wait for a receipt after broadcast, in seconds.
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            request_timeout_secs: 60,
            receipt_timeout_secs: 600,
            poll_interval_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractsConfig {
    /// Drop-sale contract.
    pub seadrop: String,
    /// Fan-out mint contract.
    pub multimint: String,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            seadrop: SEADROP_ADDRESS.to_string(),
            multimint: MULTIMINT_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainsConfig {
    pub supported: Vec<ChainEntry>,
}

impl Default for ChainsConfig {
    fn default() -> Self {
        Self {
            supported: default_chains(),
        }
    }
}

/// Gas buffers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    /// Applied to every gas estimate (1.2 = 20% buffer).
    pub limit_multiplier: f64,

    /// Applied to the node's gas price when no price is given.
    pub price_multiplier: f64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            limit_multiplier: 1.2,
            price_multiplier: 1.2,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Mint attempts before giving up; absent means retry until success.
    pub mint_max_attempts: Option<u32>,

    /// Withdraw attempts before giving up.
    pub withdraw_max_attempts: Option<u32>,

    /// Base delay between attempts in milliseconds (0 = immediate).
    pub base_delay_ms: u64,

    /// Maximum delay between attempts in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            mint_max_attempts: None,
            withdraw_max_attempts: Some(1),
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Expose Prometheus counters.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
