//! Packed authorization messages and their personal-sign digest.

use alloy_primitives::{keccak256, Address, B256, U256};
use mintgate_types::PackedEncoder;

/// Prefix prepended by `eth_sign` / `personal_sign` before hashing.
pub const ETH_SIGNED_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Packs `recipient ‖ nonce [‖ amount]` as `abi.encodePacked(address, uint256[, uint16])`.
///
/// The result is 52 bytes without an amount and 54 bytes with one.
pub fn packed_message(recipient: &Address, nonce: U256, amount: Option<u16>) -> Vec<u8> {
	let mut enc = PackedEncoder::new();
	enc.push_address(recipient).push_u256(nonce);
	if let Some(amount) = amount {
		enc.push_u16(amount);
	}
	enc.finish()
}

/// Computes `keccak256(prefix ‖ decimal(len(message)) ‖ message)`.
///
/// The length is that of `message` itself, written in ASCII decimal.
pub fn eth_signed_message_hash(message: &[u8]) -> B256 {
	let length = message.len().to_string();
	let mut preimage =
		Vec::with_capacity(ETH_SIGNED_MESSAGE_PREFIX.len() + length.len() + message.len());
	preimage.extend_from_slice(ETH_SIGNED_MESSAGE_PREFIX.as_bytes());
	preimage.extend_from_slice(length.as_bytes());
	preimage.extend_from_slice(message);
	keccak256(preimage)
}
