//! Recover helper contracts and minted token ids from a fan-out receipt.

use alloy::primitives::{Address, U256};
use serde::Serialize;
use std::collections::HashSet;

use crate::blockchain::types::LogRecord;
use crate::contracts::erc721::{Transfer, TRANSFER_TOPICS};
use crate::contracts::multimint::{MintDeployed, FAN_OUT_TOPICS};
use crate::correlation::decode::{check_structure, decode_event, LogOutcome};
use crate::correlation::CorrelationError;

/// What a fan-out mint produced, as far as its logs tell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Correlation {
    /// NFT contract named by the first `MintDeployed` record.
    pub nft_address: Option<Address>,
    /// Helper contracts in first-seen order.
    pub child_addresses: Vec<Address>,
    /// Token ids transferred to helpers, in emission order.
    pub token_ids: Vec<U256>,
}

impl Correlation {
    /// No helper contract was found; nothing can be withdrawn.
    pub fn is_empty(&self) -> bool {
        self.child_addresses.is_empty()
    }
}

/// Two-pass correlation over `logs`.
///
/// Pass 1 keeps `MintDeployed` records emitted by `fan_out`. Pass 2 runs only
/// if pass 1 found a helper, and collects every `Transfer` whose recipient is
/// one of those helpers, whatever contract emitted it.
pub fn correlate_mint(logs: &[LogRecord], fan_out: Address) -> Result<Correlation, CorrelationError> {
    check_structure(logs)?;

    let mut result = Correlation::default();
    let mut children = HashSet::new();

    for (index, log) in logs.iter().enumerate() {
        if log.address != fan_out {
            continue;
        }
        match decode_event::<MintDeployed>(log, FAN_OUT_TOPICS) {
            LogOutcome::Decoded(event) => {
                if children.insert(event.mintContract) {
                    result.child_addresses.push(event.mintContract);
                }
                result.nft_address.get_or_insert(event.nftAddress);
            }
            LogOutcome::Skipped(reason) => {
                tracing::debug!(index, ?reason, "Skipping fan-out log");
            }
        }
    }

    if result.is_empty() {
        return Ok(Correlation::default());
    }

    for (index, log) in logs.iter().enumerate() {
        match decode_event::<Transfer>(log, TRANSFER_TOPICS) {
            LogOutcome::Decoded(event) if children.contains(&event.to) => {
                result.token_ids.push(event.tokenId);
            }
            LogOutcome::Decoded(_) => {}
            LogOutcome::Skipped(reason) => {
                tracing::trace!(index, ?reason, "Not a token transfer");
            }
        }
    }

    tracing::debug!(
        children = result.child_addresses.len(),
        tokens = result.token_ids.len(),
        "Correlated mint receipt"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, B256};
    use alloy::sol_types::SolEvent;

    const FAN_OUT: Address = Address::new([0xf0; 20]);
    const NFT: Address = Address::new([0x42; 20]);
    const DEPLOYER: Address = Address::new([0x01; 20]);

    fn deployed(emitter: Address, child: Address) -> LogRecord {
        let event = MintDeployed {
            deployer: DEPLOYER,
            nftAddress: NFT,
            mintContract: child,
        };
        let data = event.encode_log_data();
        LogRecord {
            address: emitter,
            topics: data.topics().to_vec(),
            data: data.data,
        }
    }

    fn transfer(to: Address, token_id: u64) -> LogRecord {
        LogRecord {
            address: NFT,
            topics: vec![
                Transfer::SIGNATURE_HASH,
                Address::ZERO.into_word(),
                to.into_word(),
                B256::from(U256::from(token_id)),
            ],
            data: Bytes::new(),
        }
    }

    fn unrelated(emitter: Address) -> LogRecord {
        LogRecord {
            address: emitter,
            topics: vec![B256::repeat_byte(0x99)],
            data: Bytes::from(vec![1, 2, 3]),
        }
    }

    #[test]
    fn test_no_logs() {
        assert_eq!(correlate_mint(&[], FAN_OUT).unwrap(), Correlation::default());
    }

    #[test]
    fn test_children_and_tokens_in_emission_order() {
        let a = Address::repeat_byte(0xa1);
        let b = Address::repeat_byte(0xb2);
        let c = Address::repeat_byte(0xc3);
        let logs = vec![
            deployed(FAN_OUT, a),
            unrelated(Address::repeat_byte(0x77)),
            transfer(a, 30),
            deployed(FAN_OUT, b),
            transfer(b, 12),
            unrelated(FAN_OUT),
            deployed(FAN_OUT, c),
            transfer(c, 21),
        ];

        let result = correlate_mint(&logs, FAN_OUT).unwrap();
        assert_eq!(result.nft_address, Some(NFT));
        assert_eq!(result.child_addresses, vec![a, b, c]);
        assert_eq!(
            result.token_ids,
            vec![U256::from(30), U256::from(12), U256::from(21)]
        );
    }

    #[test]
    fn test_foreign_emitter_is_ignored() {
        let child = Address::repeat_byte(0xa1);
        let impostor = Address::repeat_byte(0xee);
        let logs = vec![
            deployed(FAN_OUT, child),
            deployed(Address::repeat_byte(0x66), impostor),
            transfer(child, 1),
            transfer(impostor, 2),
        ];

        let result = correlate_mint(&logs, FAN_OUT).unwrap();
        assert_eq!(result.child_addresses, vec![child]);
        assert_eq!(result.token_ids, vec![U256::from(1)]);
    }

    #[test]
    fn test_transfers_without_children_are_not_collected() {
        let logs = vec![transfer(Address::repeat_byte(0xa1), 1), unrelated(FAN_OUT)];
        let result = correlate_mint(&logs, FAN_OUT).unwrap();
        assert!(result.is_empty());
        assert_eq!(result, Correlation::default());
    }

    #[test]
    fn test_transfers_elsewhere_are_ignored() {
        let child = Address::repeat_byte(0xa1);
        let logs = vec![
            deployed(FAN_OUT, child),
            transfer(Address::repeat_byte(0x55), 4),
            transfer(child, 5),
        ];
        let result = correlate_mint(&logs, FAN_OUT).unwrap();
        assert_eq!(result.token_ids, vec![U256::from(5)]);
    }

    #[test]
    fn test_duplicate_child_listed_once() {
        let child = Address::repeat_byte(0xa1);
        let logs = vec![deployed(FAN_OUT, child), deployed(FAN_OUT, child)];
        let result = correlate_mint(&logs, FAN_OUT).unwrap();
        assert_eq!(result.child_addresses, vec![child]);
    }

    #[test]
    fn test_malformed_fan_out_record_is_skipped() {
        let child = Address::repeat_byte(0xa1);
        let mut truncated = deployed(FAN_OUT, Address::repeat_byte(0xbb));
        truncated.data = Bytes::from(vec![0u8; 5]);
        let logs = vec![truncated, deployed(FAN_OUT, child), transfer(child, 8)];

        let result = correlate_mint(&logs, FAN_OUT).unwrap();
        assert_eq!(result.child_addresses, vec![child]);
        assert_eq!(result.token_ids, vec![U256::from(8)]);
    }

    #[test]
    fn test_structurally_invalid_receipt_errors() {
        let mut bad = unrelated(FAN_OUT);
        bad.topics = vec![B256::ZERO; 5];
        assert!(correlate_mint(&[bad], FAN_OUT).is_err());
    }
}
