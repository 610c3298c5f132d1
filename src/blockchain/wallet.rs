//! Account key handling and transaction signing.
//!
//! # Security
//! - The private key comes from an environment variable or an interactive prompt
//! - Keys are never logged or serialized; only the derived address is
//! - Nonces are not tracked here; they are queried from the chain per build

use alloy::eips::eip2718::Encodable2718;
use alloy::network::{Ethereum, EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "MULTIMINT_PRIVATE_KEY";

/// The operator's account: a private key and its derived address.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// Accepts the key with or without a `0x` prefix.
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet loaded");

        Ok(Self { signer })
    }

    /// Load wallet from `MULTIMINT_PRIVATE_KEY`, if set.
    pub fn from_env() -> Option<BlockchainResult<Self>> {
        std::env::var(PRIVATE_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| Self::from_private_key(&key))
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign a fully populated transaction request and return its raw
    /// EIP-2718 encoding, ready for `eth_sendRawTransaction`.
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> BlockchainResult<Bytes> {
        let wallet = EthereumWallet::from(self.signer.clone());
        let envelope = <TransactionRequest as TransactionBuilder<Ethereum>>::build(tx, &wallet)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))?;
        Ok(Bytes::from(envelope.encoded_2718()))
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet = Wallet::from_private_key(&format!("  0x{}\n", TEST_PRIVATE_KEY)).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = Wallet::from_private_key("invalid_key");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let printed = format!("{:?}", wallet);
        assert!(!printed.contains(TEST_PRIVATE_KEY));
    }

    #[tokio::test]
    async fn test_sign_legacy_transaction() {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let tx = TransactionRequest::default()
            .with_from(wallet.address())
            .with_to(Address::repeat_byte(0x11))
            .with_value(U256::from(1_000u64))
            .with_nonce(7)
            .with_chain_id(1)
            .with_gas_limit(21_000)
            .with_gas_price(1_000_000_000);

        let raw = wallet.sign_transaction(tx).await.unwrap();
        // Legacy transactions encode as a bare RLP list.
        assert!(raw[0] >= 0xc0);
    }
}
