//! Signed mint authorizations for the mintgate system.
//!
//! An authorization binds a recipient and a nonce (and optionally an amount)
//! to a signature from the mint's authorizing key. The packed message is
//! hashed with the Ethereum personal-sign prefix, signed by an
//! [`AccountInterface`] backend, and its recovery identifier is normalized so
//! the consuming contract's `ecrecover` accepts exactly one encoding.
//!
//! Inputs are validated before anything is hashed or signed; a backend
//! failure is returned to the caller without retrying.

use alloy_primitives::{Address, PrimitiveSignature, B256, U256};
use mintgate_account::{AccountError, AccountInterface};
use mintgate_types::{parse_address, Signature};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod message;
pub mod normalize;

pub use message::{eth_signed_message_hash, packed_message, ETH_SIGNED_MESSAGE_PREFIX};
pub use normalize::{normalize_signature, normalize_signature_hex, RECOVERY_ID_OFFSET};

/// Errors that can occur while building or checking an authorization.
#[derive(Debug, Error)]
pub enum SignatureError {
	/// The recipient is not a well-formed 20-byte address.
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	/// The amount does not fit in a `uint16`.
	#[error("Amount {0} exceeds maximum of {max}", max = u16::MAX)]
	AmountOutOfRange(u64),
	/// The signing backend rejected the request.
	#[error("Signing error: {0}")]
	Signing(#[from] AccountError),
	/// A signature could not be decoded or recovered.
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
	/// The recovery identifier uses neither the raw nor the legacy convention.
	#[error("Unsupported recovery id: {0}")]
	UnsupportedRecoveryId(u8),
}

/// A message digest together with its normalized signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
	/// Personal-sign digest of the packed message.
	pub message_hash: B256,
	/// Signature over `message_hash` with `v` in {27, 28}.
	pub signature: Signature,
}

/// Builds an authorization over `address ‖ nonce`.
pub async fn build_authorization(
	recipient: &str,
	nonce: U256,
	signer: &dyn AccountInterface,
) -> Result<Authorization, SignatureError> {
	let recipient = parse_recipient(recipient)?;
	authorize(packed_message(&recipient, nonce, None), signer).await
}

/// Builds an authorization over `address ‖ nonce ‖ uint16(amount)`.
pub async fn build_authorization_with_amount(
	recipient: &str,
	nonce: U256,
	signer: &dyn AccountInterface,
	amount: u64,
) -> Result<Authorization, SignatureError> {
	let recipient = parse_recipient(recipient)?;
	let amount = u16::try_from(amount).map_err(|_| SignatureError::AmountOutOfRange(amount))?;
	authorize(packed_message(&recipient, nonce, Some(amount)), signer).await
}

/// Recovers the address that produced `authorization.signature`.
///
/// This is the check an on-chain verifier performs with `ecrecover`.
pub fn recover_signer(authorization: &Authorization) -> Result<Address, SignatureError> {
	let signature = normalize_signature(authorization.signature)?;
	let r = U256::from_be_slice(signature.r().as_slice());
	let s = U256::from_be_slice(signature.s().as_slice());
	let y_parity = signature.v() == RECOVERY_ID_OFFSET + 1;

	PrimitiveSignature::new(r, s, y_parity)
		.recover_address_from_prehash(&authorization.message_hash)
		.map_err(|e| SignatureError::InvalidSignature(e.to_string()))
}

fn parse_recipient(recipient: &str) -> Result<Address, SignatureError> {
	parse_address(recipient).map_err(SignatureError::InvalidAddress)
}

async fn authorize(
	message: Vec<u8>,
	signer: &dyn AccountInterface,
) -> Result<Authorization, SignatureError> {
	let message_hash = eth_signed_message_hash(&message);
	tracing::debug!(
		message_len = message.len(),
		message_hash = %message_hash,
		"Packed authorization message"
	);

	let raw = signer.sign_hash(&message_hash).await?;
	let signature = normalize_signature(raw)?;

	tracing::info!(message_hash = %message_hash, "Issued mint authorization");
	Ok(Authorization {
		message_hash,
		signature,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use mintgate_account::implementations::local::create_account;

	const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
	const OTHER_KEY: &str = "0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
	const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

	fn signer(key: &str) -> Box<dyn AccountInterface> {
		let config: toml::Value = toml::from_str(&format!("private_key = \"{}\"", key)).unwrap();
		create_account(&config).unwrap()
	}

	/// Backend that always fails, counting how often it was asked.
	struct FailingSigner {
		calls: std::sync::atomic::AtomicUsize,
	}

	#[async_trait]
	impl AccountInterface for FailingSigner {
		async fn address(&self) -> Result<Address, AccountError> {
			Ok(Address::ZERO)
		}

		async fn sign_hash(&self, _hash: &B256) -> Result<Signature, AccountError> {
			self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
			Err(AccountError::SigningFailed("key locked".to_string()))
		}
	}

	/// Backend returning a fixed signature with an arbitrary `v`.
	struct FixedSigner(u8);

	#[async_trait]
	impl AccountInterface for FixedSigner {
		async fn address(&self) -> Result<Address, AccountError> {
			Ok(Address::ZERO)
		}

		async fn sign_hash(&self, _hash: &B256) -> Result<Signature, AccountError> {
			Ok(Signature::from_parts(&B256::repeat_byte(1), &B256::repeat_byte(2), self.0))
		}
	}

	#[tokio::test]
	async fn test_recovered_signer_matches() {
		let account = signer(KEY);
		let expected = account.address().await.unwrap();

		for nonce in [0u64, 1, 42, u64::MAX] {
			let auth = build_authorization(RECIPIENT, U256::from(nonce), account.as_ref())
				.await
				.unwrap();
			assert_eq!(recover_signer(&auth).unwrap(), expected);
		}

		let auth = build_authorization(RECIPIENT, U256::MAX, account.as_ref())
			.await
			.unwrap();
		assert_eq!(recover_signer(&auth).unwrap(), expected);
	}

	#[tokio::test]
	async fn test_signature_is_normalized() {
		let account = signer(KEY);
		for nonce in 0u64..8 {
			let auth = build_authorization(RECIPIENT, U256::from(nonce), account.as_ref())
				.await
				.unwrap();
			assert!(matches!(auth.signature.v(), 27 | 28));
		}
	}

	#[tokio::test]
	async fn test_message_hash_matches_packing() {
		let account = signer(KEY);
		let auth = build_authorization(RECIPIENT, U256::from(7u64), account.as_ref())
			.await
			.unwrap();

		let recipient = parse_address(RECIPIENT).unwrap();
		let expected = eth_signed_message_hash(&packed_message(&recipient, U256::from(7u64), None));
		assert_eq!(auth.message_hash, expected);
	}

	#[tokio::test]
	async fn test_different_signer_does_not_recover() {
		let auth = build_authorization(RECIPIENT, U256::from(1u64), signer(OTHER_KEY).as_ref())
			.await
			.unwrap();
		let expected = signer(KEY).address().await.unwrap();
		assert_ne!(recover_signer(&auth).unwrap(), expected);
	}

	#[tokio::test]
	async fn test_amount_boundary() {
		let account = signer(KEY);
		let expected = account.address().await.unwrap();

		let auth =
			build_authorization_with_amount(RECIPIENT, U256::from(1u64), account.as_ref(), 65535)
				.await
				.unwrap();
		assert_eq!(recover_signer(&auth).unwrap(), expected);

		let result =
			build_authorization_with_amount(RECIPIENT, U256::from(1u64), account.as_ref(), 65536)
				.await;
		assert!(matches!(result, Err(SignatureError::AmountOutOfRange(65536))));
	}

	#[tokio::test]
	async fn test_amount_changes_digest() {
		let account = signer(KEY);
		let plain = build_authorization(RECIPIENT, U256::from(1u64), account.as_ref())
			.await
			.unwrap();
		let with_amount =
			build_authorization_with_amount(RECIPIENT, U256::from(1u64), account.as_ref(), 1)
				.await
				.unwrap();
		assert_ne!(plain.message_hash, with_amount.message_hash);
	}

	#[tokio::test]
	async fn test_invalid_recipient_fails_before_signing() {
		let failing = FailingSigner {
			calls: Default::default(),
		};
		for recipient in ["0x1234", "not an address", ""] {
			let result = build_authorization(recipient, U256::ZERO, &failing).await;
			assert!(matches!(result, Err(SignatureError::InvalidAddress(_))));
		}

		let result = build_authorization_with_amount(RECIPIENT, U256::ZERO, &failing, 70000).await;
		assert!(matches!(result, Err(SignatureError::AmountOutOfRange(70000))));

		assert_eq!(failing.calls.load(std::sync::atomic::Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn test_backend_failure_is_surfaced_once() {
		let failing = FailingSigner {
			calls: Default::default(),
		};
		let result = build_authorization(RECIPIENT, U256::ZERO, &failing).await;
		assert!(matches!(
			result,
			Err(SignatureError::Signing(AccountError::SigningFailed(_)))
		));
		assert_eq!(failing.calls.load(std::sync::atomic::Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_legacy_backend_passes_through() {
		let auth = build_authorization(RECIPIENT, U256::ZERO, &FixedSigner(28))
			.await
			.unwrap();
		assert_eq!(auth.signature.v(), 28);
	}

	#[tokio::test]
	async fn test_unknown_backend_convention_is_flagged() {
		let result = build_authorization(RECIPIENT, U256::ZERO, &FixedSigner(37)).await;
		assert!(matches!(result, Err(SignatureError::UnsupportedRecoveryId(37))));
	}

	#[tokio::test]
	async fn test_authorization_json() {
		let account = signer(KEY);
		let auth = build_authorization(RECIPIENT, U256::from(3u64), account.as_ref())
			.await
			.unwrap();
		let json = serde_json::to_value(auth).unwrap();

		assert_eq!(json["messageHash"], format!("{}", auth.message_hash));
		assert_eq!(json["signature"], auth.signature.to_hex());
	}
}
