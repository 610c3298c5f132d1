//! Supported networks and their native currency symbols.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::ChainId;

/// Networks the fan-out contract is deployed on.
pub const DEFAULT_SUPPORTED: &[(u64, &str)] = &[
    (1, "ETH"),
    (10, "ETH"),
    (42161, "ETH"),
    (8453, "ETH"),
    (143, "MON"),
    (137, "POL"),
    (2741, "ETH"),
    (43114, "AVAX"),
    (80094, "BERA"),
    (999, "HYPE"),
];

/// An allow-listed chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChainEntry {
    pub chain_id: u64,
    /// Native currency symbol used for display.
    pub symbol: String,
}

/// The chain a run is bound to, fixed after verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub chain_id: ChainId,
    pub symbol: String,
}

/// Default allow-list.
pub fn default_chains() -> Vec<ChainEntry> {
    DEFAULT_SUPPORTED
        .iter()
        .map(|(chain_id, symbol)| ChainEntry {
            chain_id: *chain_id,
            symbol: (*symbol).to_string(),
        })
        .collect()
}

/// Look up a chain id in the allow-list.
pub fn resolve(chain_id: ChainId, supported: &[ChainEntry]) -> Option<Network> {
    supported
        .iter()
        .find(|entry| entry.chain_id == chain_id.0)
        .map(|entry| Network {
            chain_id,
            symbol: entry.symbol.clone(),
        })
}

/// Comma separated ids for operator messages.
pub fn describe(supported: &[ChainEntry]) -> String {
    supported
        .iter()
        .map(|entry| entry.chain_id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_supported() {
        let chains = default_chains();
        let network = resolve(ChainId(137), &chains).unwrap();
        assert_eq!(network.symbol, "POL");
        assert_eq!(resolve(ChainId(8453), &chains).unwrap().symbol, "ETH");
    }

    #[test]
    fn test_bsc_not_supported() {
        assert!(resolve(ChainId(56), &default_chains()).is_none());
    }

    #[test]
    fn test_describe() {
        let chains = vec![
            ChainEntry { chain_id: 1, symbol: "ETH".into() },
            ChainEntry { chain_id: 999, symbol: "HYPE".into() },
        ];
        assert_eq!(describe(&chains), "1, 999");
    }
}
