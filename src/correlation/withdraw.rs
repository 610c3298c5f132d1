//! Per-token results of a fan-out withdraw.

use alloy::primitives::{Address, U256};
use serde::Serialize;

use crate::blockchain::types::LogRecord;
use crate::contracts::multimint::{
    MintWithdrawFailed, MintWithdrawSuccess, MultiWithdrawSummary, FAN_OUT_TOPICS,
};
use crate::correlation::decode::{check_structure, decode_event};
use crate::correlation::CorrelationError;

/// One token the fan-out contract tried to pull from a helper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawnToken {
    pub mint_contract: Address,
    pub token_id: U256,
}

/// Totals reported by the contract itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WithdrawTotals {
    pub attempted: U256,
    pub succeeded: U256,
    pub failed: U256,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WithdrawSummary {
    pub succeeded: Vec<WithdrawnToken>,
    pub failed: Vec<WithdrawnToken>,
    pub totals: Option<WithdrawTotals>,
}

/// Collect withdraw events emitted by `fan_out`, in emission order.
pub fn summarize_withdraw(
    logs: &[LogRecord],
    fan_out: Address,
) -> Result<WithdrawSummary, CorrelationError> {
    check_structure(logs)?;

    let mut summary = WithdrawSummary::default();
    for log in logs.iter().filter(|log| log.address == fan_out) {
        if let Some(event) = decode_event::<MintWithdrawSuccess>(log, FAN_OUT_TOPICS).decoded() {
            summary.succeeded.push(WithdrawnToken {
                mint_contract: event.mintContract,
                token_id: event.tokenId,
            });
        } else if let Some(event) = decode_event::<MintWithdrawFailed>(log, FAN_OUT_TOPICS).decoded() {
            summary.failed.push(WithdrawnToken {
                mint_contract: event.mintContract,
                token_id: event.tokenId,
            });
        } else if let Some(event) = decode_event::<MultiWithdrawSummary>(log, FAN_OUT_TOPICS).decoded() {
            summary.totals = Some(WithdrawTotals {
                attempted: event.attempted,
                succeeded: event.succeeded,
                failed: event.failed,
            });
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::LogData;
    use alloy::sol_types::SolEvent;

    const FAN_OUT: Address = Address::new([0xf0; 20]);

    fn record(emitter: Address, data: LogData) -> LogRecord {
        LogRecord {
            address: emitter,
            topics: data.topics().to_vec(),
            data: data.data,
        }
    }

    #[test]
    fn test_summary_splits_success_and_failure() {
        let deployer = Address::repeat_byte(0x01);
        let nft = Address::repeat_byte(0x42);
        let helper_a = Address::repeat_byte(0xa1);
        let helper_b = Address::repeat_byte(0xb2);

        let logs = vec![
            record(
                FAN_OUT,
                MintWithdrawSuccess {
                    deployer,
                    nftAddress: nft,
                    mintContract: helper_a,
                    tokenId: U256::from(5),
                }
                .encode_log_data(),
            ),
            record(
                FAN_OUT,
                MintWithdrawFailed {
                    deployer,
                    nftAddress: nft,
                    mintContract: helper_b,
                    tokenId: U256::from(6),
                }
                .encode_log_data(),
            ),
            record(
                FAN_OUT,
                MultiWithdrawSummary {
                    deployer,
                    nftAddress: nft,
                    attempted: U256::from(2),
                    succeeded: U256::from(1),
                    failed: U256::from(1),
                }
                .encode_log_data(),
            ),
        ];

        let summary = summarize_withdraw(&logs, FAN_OUT).unwrap();
        assert_eq!(
            summary.succeeded,
            vec![WithdrawnToken { mint_contract: helper_a, token_id: U256::from(5) }]
        );
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].token_id, U256::from(6));
        assert_eq!(summary.totals.unwrap().attempted, U256::from(2));
    }

    #[test]
    fn test_events_from_other_contracts_ignored() {
        let event = MintWithdrawSuccess {
            deployer: Address::ZERO,
            nftAddress: Address::ZERO,
            mintContract: Address::ZERO,
            tokenId: U256::from(1),
        };
        let logs = vec![record(Address::repeat_byte(0x33), event.encode_log_data())];
        assert_eq!(summarize_withdraw(&logs, FAN_OUT).unwrap(), WithdrawSummary::default());
    }
}
