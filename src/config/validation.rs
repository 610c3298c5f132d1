//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and cross-field rules.
//! Every problem is reported, not just the first.

use alloy::primitives::Address;
use std::collections::HashSet;

use crate::config::schema::MintConfig;

/// One semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &MintConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rpc.request_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.request_timeout_secs", "must be > 0"));
    }
    if config.rpc.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc.receipt_timeout_secs", "must be > 0"));
    }
    if config.rpc.poll_interval_ms == 0 {
        errors.push(ValidationError::new("rpc.poll_interval_ms", "must be > 0"));
    }

    for (field, value) in [
        ("contracts.seadrop", &config.contracts.seadrop),
        ("contracts.multimint", &config.contracts.multimint),
    ] {
        if value.parse::<Address>().is_err() {
            errors.push(ValidationError::new(field, format!("'{}' is not an address", value)));
        }
    }

    if config.chains.supported.is_empty() {
        errors.push(ValidationError::new("chains.supported", "at least one chain is required"));
    }
    let mut seen = HashSet::new();
    for entry in &config.chains.supported {
        if !seen.insert(entry.chain_id) {
            errors.push(ValidationError::new(
                "chains.supported",
                format!("chain {} listed twice", entry.chain_id),
            ));
        }
        if entry.symbol.trim().is_empty() {
            errors.push(ValidationError::new(
                "chains.supported",
                format!("chain {} has an empty symbol", entry.chain_id),
            ));
        }
    }

    for (field, value) in [
        ("gas.limit_multiplier", config.gas.limit_multiplier),
        ("gas.price_multiplier", config.gas.price_multiplier),
    ] {
        if !value.is_finite() || value < 1.0 {
            errors.push(ValidationError::new(field, "must be >= 1.0"));
        }
    }

    for (field, value) in [
        ("retry.mint_max_attempts", config.retry.mint_max_attempts),
        ("retry.withdraw_max_attempts", config.retry.withdraw_max_attempts),
    ] {
        if value == Some(0) {
            errors.push(ValidationError::new(field, "must be >= 1 when set"));
        }
    }
    if config.retry.max_delay_ms < config.retry.base_delay_ms {
        errors.push(ValidationError::new(
            "retry.max_delay_ms",
            "must be >= retry.base_delay_ms",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::chains::ChainEntry;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&MintConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = MintConfig::default();
        config.rpc.receipt_timeout_secs = 0;
        config.gas.limit_multiplier = 0.9;
        config.retry.mint_max_attempts = Some(0);
        config.contracts.multimint = "0x1234".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "rpc.receipt_timeout_secs",
                "contracts.multimint",
                "gas.limit_multiplier",
                "retry.mint_max_attempts",
            ]
        );
    }

    #[test]
    fn test_duplicate_chain_rejected() {
        let mut config = MintConfig::default();
        config.chains.supported.push(ChainEntry {
            chain_id: 1,
            symbol: "ETH".into(),
        });
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("chain 1 listed twice"));
    }
}
