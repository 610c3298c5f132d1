//! Command line flags and operator input parsing.

use alloy::primitives::{Address, TxHash};
use clap::Parser;
use std::path::PathBuf;

use crate::blockchain::units::{parse_gas_price_input, GasPriceInput};
use crate::cli::CliError;

#[derive(Parser, Debug)]
#[command(name = "multimint")]
#[command(about = "Mint a SeaDrop public drop through the fan-out contract, then withdraw", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint, overrides rpc.url
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// 1 / mint-and-withdraw, 2 / mint-only, 3 / withdraw
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<ModeChoice>,

    /// NFT drop contract address
    #[arg(long, value_parser = parse_address)]
    pub nft: Option<Address>,

    /// Number of tokens to mint
    #[arg(short, long, value_parser = parse_quantity)]
    pub quantity: Option<u64>,

    /// Gas price in gwei; empty string uses the network price
    #[arg(long)]
    pub gas_price: Option<String>,

    /// Mint transaction to withdraw from (mode 3)
    #[arg(long, value_parser = parse_tx_hash)]
    pub tx_hash: Option<TxHash>,

    /// Give up minting after this many attempts
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Print the run outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Mode as chosen by the operator, before a transaction hash is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    MintAndWithdraw,
    MintOnly,
    Withdraw,
}

pub fn parse_mode(input: &str) -> Result<ModeChoice, CliError> {
    match input.trim().to_lowercase().as_str() {
        "1" | "mint-and-withdraw" => Ok(ModeChoice::MintAndWithdraw),
        "2" | "mint-only" => Ok(ModeChoice::MintOnly),
        "3" | "withdraw" => Ok(ModeChoice::Withdraw),
        other => Err(CliError::Invalid(format!("unknown mode '{other}', choose 1, 2 or 3"))),
    }
}

pub fn parse_address(input: &str) -> Result<Address, CliError> {
    input
        .trim()
        .parse()
        .map_err(|_| CliError::Invalid(format!("'{}' is not an address", input.trim())))
}

/// Quantity to mint; at least one.
pub fn parse_quantity(input: &str) -> Result<u64, CliError> {
    match input.trim().parse::<u64>() {
        Ok(0) => Err(CliError::Invalid("quantity must be at least 1".to_string())),
        Ok(quantity) => Ok(quantity),
        Err(e) => Err(CliError::Invalid(format!("invalid quantity '{}': {e}", input.trim()))),
    }
}

/// A `0x`-prefixed 32-byte transaction hash.
pub fn parse_tx_hash(input: &str) -> Result<TxHash, CliError> {
    let trimmed = input.trim();
    let valid = trimmed.len() == 66
        && trimmed.starts_with("0x")
        && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(CliError::Invalid(format!(
            "invalid transaction hash '{trimmed}', expected 0x followed by 64 hex digits"
        )));
    }
    trimmed
        .parse()
        .map_err(|_| CliError::Invalid(format!("invalid transaction hash '{trimmed}'")))
}

/// Gas price input; unparseable input falls back to the network price.
pub fn gas_price_or_network(input: &str) -> GasPriceInput {
    match parse_gas_price_input(input) {
        Ok(price) => price,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid gas price, using network price");
            GasPriceInput::Network
        }
    }
}
