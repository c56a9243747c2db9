//! Local private-key signing backend.
//!
//! Holds a secp256k1 key in process memory and signs digests with it. The
//! `v` byte of produced signatures is the raw y-parity (0 or 1), matching
//! what node and hardware signers commonly return.

use crate::{AccountError, AccountFactory, AccountInterface, AccountRegistry};
use alloy_primitives::B256;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use mintgate_types::{
	without_0x_prefix, Address, ConfigSchema, Field, FieldType, ImplementationRegistry, Schema,
	SecretString, Signature, ValidationError,
};

/// Signing backend backed by an in-memory private key.
pub struct LocalWallet {
	signer: PrivateKeySigner,
}

impl LocalWallet {
	/// Creates a wallet from a `0x`-prefixed or bare 64-character hex key.
	pub fn new(private_key: &SecretString) -> Result<Self, AccountError> {
		let signer = private_key.with_exposed(|key| {
			without_0x_prefix(key)
				.parse::<PrivateKeySigner>()
				.map_err(|e| AccountError::InvalidKey(e.to_string()))
		})?;
		Ok(Self { signer })
	}
}

#[async_trait]
impl AccountInterface for LocalWallet {
	async fn address(&self) -> Result<Address, AccountError> {
		Ok(self.signer.address())
	}

	async fn sign_hash(&self, hash: &B256) -> Result<Signature, AccountError> {
		let signature = self
			.signer
			.sign_hash(hash)
			.await
			.map_err(|e| AccountError::SigningFailed(e.to_string()))?;

		let mut bytes: [u8; 65] = signature.as_bytes();
		// Strip the legacy offset so callers always see the raw parity
		if bytes[64] >= 27 {
			bytes[64] -= 27;
		}
		Ok(Signature::from_bytes(bytes))
	}
}

/// Configuration schema for LocalWallet.
pub struct LocalWalletSchema;

impl ConfigSchema for LocalWalletSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			vec![Field::new("private_key", FieldType::String).with_validator(|value| {
				let key = value.as_str().unwrap_or_default();
				let digits = without_0x_prefix(key);
				if digits.len() != 64 {
					return Err("Private key must be 64 hex characters".to_string());
				}
				if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
					return Err("Private key must be hex encoded".to_string());
				}
				Ok(())
			})],
			vec![],
		);
		schema.validate(config)
	}
}

/// Factory function to create a local signing backend from configuration.
///
/// Configuration parameters:
/// - `private_key`: hex encoded secp256k1 key, optionally `0x` prefixed
pub fn create_account(config: &toml::Value) -> Result<Box<dyn AccountInterface>, AccountError> {
	LocalWalletSchema
		.validate(config)
		.map_err(|e| AccountError::InvalidKey(e.to_string()))?;

	let private_key = config
		.get("private_key")
		.and_then(|v| v.as_str())
		.map(SecretString::from)
		.ok_or_else(|| AccountError::InvalidKey("private_key is required".to_string()))?;

	let wallet = LocalWallet::new(&private_key)?;
	tracing::debug!(address = %wallet.signer.address(), "Loaded local signing key");
	Ok(Box::new(wallet))
}

/// Registry for the local account implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "local";
	type Factory = AccountFactory;

	fn factory() -> Self::Factory {
		create_account
	}
}

impl AccountRegistry for Registry {
	fn config_schema() -> Box<dyn ConfigSchema> {
		Box::new(LocalWalletSchema)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::keccak256;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	fn config(key: &str) -> toml::Value {
		toml::from_str(&format!("private_key = \"{}\"", key)).unwrap()
	}

	#[tokio::test]
	async fn test_address_from_key() {
		let account = create_account(&config(KEY)).unwrap();
		let expected = mintgate_types::parse_address(ADDRESS).unwrap();
		assert_eq!(account.address().await.unwrap(), expected);
	}

	#[tokio::test]
	async fn test_unprefixed_key() {
		let account = create_account(&config(&KEY[2..])).unwrap();
		let expected = mintgate_types::parse_address(ADDRESS).unwrap();
		assert_eq!(account.address().await.unwrap(), expected);
	}

	#[tokio::test]
	async fn test_signature_has_raw_parity() {
		let account = create_account(&config(KEY)).unwrap();
		for i in 0u8..8 {
			let sig = account.sign_hash(&keccak256([i])).await.unwrap();
			assert!(sig.v() <= 1, "unexpected v {}", sig.v());
		}
	}

	#[test]
	fn test_rejects_short_key() {
		let result = create_account(&config("0x1234"));
		assert!(matches!(result, Err(AccountError::InvalidKey(_))));
	}

	#[test]
	fn test_rejects_missing_key() {
		let empty = toml::Value::Table(toml::map::Map::new());
		let result = create_account(&empty);
		assert!(
			matches!(result, Err(AccountError::InvalidKey(msg)) if msg.contains("private_key"))
		);
	}

	#[test]
	fn test_rejects_non_hex_key() {
		let result = create_account(&config(&format!("0x{}", "g".repeat(64))));
		assert!(matches!(result, Err(AccountError::InvalidKey(msg)) if msg.contains("hex")));
	}
}
