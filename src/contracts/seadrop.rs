//! Drop-sale contract: public drop pricing lookup.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::{SolCall, SolType};
use serde::Serialize;

use crate::blockchain::client::ChainRpc;
use crate::contracts::ContractError;

/// Canonical SeaDrop deployment, identical on every supported chain.
pub const SEADROP_ADDRESS: &str = "0x00005EA00Ac477B1030CE78506496e8C2dE24bf5";

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct PublicDrop {
        uint80 mintPrice;
        uint48 startTime;
        uint48 endTime;
        uint16 maxTotalMintableByWallet;
        uint16 feeBps;
        bool restrictFeeRecipients;
    }

    function getPublicDrop(address nftContract) external view returns (PublicDrop memory);
}

/// Public drop parameters for one NFT contract, read fresh per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropPricing {
    /// Price of one token in base units.
    pub mint_price: U256,
    pub start_time: u64,
    pub end_time: u64,
    pub max_total_mintable_by_wallet: u16,
    pub fee_bps: u16,
    pub restrict_fee_recipients: bool,
}

impl From<PublicDrop> for DropPricing {
    fn from(drop: PublicDrop) -> Self {
        Self {
            mint_price: U256::from(drop.mintPrice),
            start_time: drop.startTime.to::<u64>(),
            end_time: drop.endTime.to::<u64>(),
            max_total_mintable_by_wallet: drop.maxTotalMintableByWallet,
            fee_bps: drop.feeBps,
            restrict_fee_recipients: drop.restrictFeeRecipients,
        }
    }
}

/// Binding of the drop-sale contract at a fixed address.
#[derive(Debug, Clone, Copy)]
pub struct SeaDrop {
    address: Address,
}

impl SeaDrop {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// `eth_call` request for `getPublicDrop(nft)`.
    pub fn public_drop_request(&self, nft: Address) -> TransactionRequest {
        TransactionRequest::default()
            .with_to(self.address)
            .with_input(getPublicDropCall { nftContract: nft }.abi_encode())
    }

    /// Decode `getPublicDrop` return data.
    pub fn decode_public_drop(data: &[u8]) -> Result<DropPricing, ContractError> {
        <PublicDrop as SolType>::abi_decode(data)
            .map(DropPricing::from)
            .map_err(|e| ContractError::Decode(e.to_string()))
    }

    /// Read the current public drop for `nft`.
    pub async fn read_pricing<C>(&self, client: &C, nft: Address) -> Result<DropPricing, ContractError>
    where
        C: ChainRpc + ?Sized,
    {
        let output = client.call(&self.public_drop_request(nft)).await?;
        Self::decode_public_drop(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::aliases::{U48, U80};

    fn sample_drop() -> PublicDrop {
        PublicDrop {
            mintPrice: U80::from(1_000_000_000_000_000u64),
            startTime: U48::from(1_700_000_000u64),
            endTime: U48::from(1_800_000_000u64),
            maxTotalMintableByWallet: 10,
            feeBps: 1000,
            restrictFeeRecipients: true,
        }
    }

    #[test]
    fn test_decode_public_drop() {
        let encoded = <PublicDrop as SolType>::abi_encode(&sample_drop());
        let pricing = SeaDrop::decode_public_drop(&encoded).unwrap();
        assert_eq!(pricing.mint_price, U256::from(1_000_000_000_000_000u64));
        assert_eq!(pricing.start_time, 1_700_000_000);
        assert_eq!(pricing.max_total_mintable_by_wallet, 10);
        assert!(pricing.restrict_fee_recipients);
    }

    #[test]
    fn test_decode_short_return_data_fails() {
        let result = SeaDrop::decode_public_drop(&[0u8; 31]);
        assert!(matches!(result, Err(ContractError::Decode(_))));
    }

    #[test]
    fn test_public_drop_request_targets_seadrop() {
        let seadrop = SeaDrop::new(SEADROP_ADDRESS.parse().unwrap());
        let nft = Address::repeat_byte(0x42);
        let request = seadrop.public_drop_request(nft);

        let input = request.input.input().unwrap();
        assert_eq!(&input[..4], getPublicDropCall::SELECTOR.as_slice());
        assert_eq!(&input[16..36], nft.as_slice());
    }
}
