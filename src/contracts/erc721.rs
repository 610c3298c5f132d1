//! Standard ownership-transfer event emitted by minted tokens.

use alloy::sol;

sol! {
    /// ERC-721 transfer; all three arguments are indexed.
    #[derive(Debug, PartialEq, Eq)]
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
}

/// topic0 plus three indexed arguments.
pub const TRANSFER_TOPICS: usize = 4;
