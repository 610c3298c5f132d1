//! Conversions between base units and display units.
//!
//! All arithmetic on amounts is integer arithmetic. Multipliers are applied
//! in basis points so that `x * 1.2` is exact for every integer `x`.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;
use thiserror::Error;

/// Base units per gwei.
pub const GWEI: u128 = 1_000_000_000;

const BPS_SCALE: u128 = 10_000;

/// Errors converting user input into base units.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid gas price '{input}': {reason}")]
    InvalidGasPrice { input: String, reason: String },

    #[error("Amount does not fit in 128 bits")]
    Overflow,
}

/// How the gas price of each attempt is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasPriceInput {
    /// Query the node and apply the configured multiplier, per attempt.
    Network,
    /// Operator-supplied price in base units, used verbatim.
    Fixed(u128),
}

/// Parse an operator gas price given in gwei.
///
/// Blank input selects the network price. A trailing or embedded `gwei` is
/// stripped case-insensitively. `"0"` is a valid explicit price of zero.
pub fn parse_gas_price_input(input: &str) -> Result<GasPriceInput, ConversionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(GasPriceInput::Network);
    }

    let normalized = trimmed.to_lowercase().replace("gwei", "");
    let normalized = normalized.trim();
    let invalid = |reason: String| ConversionError::InvalidGasPrice {
        input: input.to_string(),
        reason,
    };

    match parse_units(normalized, "gwei").map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(wei) => u128::try_from(wei)
            .map(GasPriceInput::Fixed)
            .map_err(|_| ConversionError::Overflow),
        ParseUnits::I256(_) => Err(invalid("gas price cannot be negative".to_string())),
    }
}

/// Multiply by a decimal factor, rounding the factor to basis points and the
/// result down.
pub fn scale(value: u128, multiplier: f64) -> u128 {
    let bps = (multiplier * BPS_SCALE as f64).round() as u128;
    value.saturating_mul(bps) / BPS_SCALE
}

/// [`scale`] for gas limits.
pub fn scale_gas(gas: u64, multiplier: f64) -> u64 {
    u64::try_from(scale(gas as u128, multiplier)).unwrap_or(u64::MAX)
}

/// Exact `price * quantity`, `None` on overflow.
pub fn required_cost(price_per_unit: U256, quantity: u64) -> Option<U256> {
    price_per_unit.checked_mul(U256::from(quantity))
}

/// Render base units as a native-currency amount, e.g. `0.003`.
pub fn format_native(wei: U256) -> String {
    match format_units(wei, "ether") {
        Ok(s) => trim_decimal(s),
        Err(_) => wei.to_string(),
    }
}

/// Render a gas price in gwei, e.g. `1.5`.
pub fn format_gwei(wei: u128) -> String {
    match format_units(U256::from(wei), "gwei") {
        Ok(s) => trim_decimal(s),
        Err(_) => wei.to_string(),
    }
}

fn trim_decimal(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
