//! Conversion utilities for strictly parsing hex inputs.
//!
//! Both parsers accept an optional `0x` prefix and reject anything that does
//! not decode to exactly the expected width. Checksums are not enforced.

use super::formatting::without_0x_prefix;
use alloy_primitives::{hex, Address, B256};

/// Parses a 20-byte Ethereum address from its hex representation.
///
/// # Arguments
///
/// * `value` - 40 hex characters, optionally prefixed with `0x`
///
/// # Returns
///
/// The parsed address, or a message describing why the input was rejected.
pub fn parse_address(value: &str) -> Result<Address, String> {
	let bytes = decode_exact::<20>(value.trim())?;
	Ok(Address::from(bytes))
}

/// Parses a 32-byte word (hash, Merkle root or proof element) from hex.
pub fn parse_b256(value: &str) -> Result<B256, String> {
	let bytes = decode_exact::<32>(value.trim())?;
	Ok(B256::from(bytes))
}

fn decode_exact<const N: usize>(value: &str) -> Result<[u8; N], String> {
	let digits = without_0x_prefix(value);
	if digits.len() != N * 2 {
		return Err(format!(
			"Expected {} hex characters, got {} in '{}'",
			N * 2,
			digits.len(),
			value
		));
	}
	let decoded = hex::decode(digits).map_err(|e| format!("Invalid hex '{}': {}", value, e))?;
	let mut out = [0u8; N];
	out.copy_from_slice(&decoded);
	Ok(out)
}
