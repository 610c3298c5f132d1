//! Fan-out contract: batch mint through per-token helper contracts, then
//! pull the minted tokens back to the caller.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::contracts::ContractCall;

/// Canonical fan-out deployment.
pub const MULTIMINT_ADDRESS: &str = "0x0000436623460303688165dF6a00466B507d0259";

sol! {
    /// One helper contract deployed for one mint.
    #[derive(Debug, PartialEq, Eq)]
    event MintDeployed(address indexed deployer, address indexed nftAddress, address mintContract);

    #[derive(Debug, PartialEq, Eq)]
    event MintWithdrawSuccess(address indexed deployer, address indexed nftAddress, address mintContract, uint256 tokenId);

    #[derive(Debug, PartialEq, Eq)]
    event MintWithdrawFailed(address indexed deployer, address indexed nftAddress, address mintContract, uint256 tokenId);

    #[derive(Debug, PartialEq, Eq)]
    event MultiWithdrawSummary(address indexed deployer, address indexed nftAddress, uint256 attempted, uint256 succeeded, uint256 failed);

    function mintMulti(uint256 total, address nftaddress) external payable;

    function withdrawAllForNft(address nftAddress, uint256[] tokenIds) external;
}

/// topic0 plus `deployer` and `nftAddress`; shared by every fan-out event.
pub const FAN_OUT_TOPICS: usize = 3;

/// Binding of the fan-out contract at a fixed address.
#[derive(Debug, Clone, Copy)]
pub struct MultiMint {
    address: Address,
}

impl MultiMint {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `mintMulti(quantity, nft)` paying `value`.
    pub fn mint_call(&self, quantity: u64, nft: Address, value: U256) -> ContractCall {
        let data = mintMultiCall {
            total: U256::from(quantity),
            nftaddress: nft,
        }
        .abi_encode();

        ContractCall {
            label: "mint",
            to: self.address,
            data: Bytes::from(data),
            value,
        }
    }

    /// `withdrawAllForNft(nft, token_ids)`.
    pub fn withdraw_call(&self, nft: Address, token_ids: &[U256]) -> ContractCall {
        let data = withdrawAllForNftCall {
            nftAddress: nft,
            tokenIds: token_ids.to_vec(),
        }
        .abi_encode();

        ContractCall {
            label: "withdraw",
            to: self.address,
            data: Bytes::from(data),
            value: U256::ZERO,
        }
    }
}
