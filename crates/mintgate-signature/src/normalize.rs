//! Recovery identifier normalization.
//!
//! Two conventions exist for the final signature byte: the raw y-parity
//! {0, 1} and the legacy {27, 28}. Verifying contracts accept only the
//! latter, so raw values are shifted by 27. Any other value is rejected.

use crate::SignatureError;
use mintgate_types::{without_0x_prefix, Signature, SIGNATURE_LENGTH};

/// Offset between raw y-parity and the legacy recovery identifier.
pub const RECOVERY_ID_OFFSET: u8 = 27;

fn normalized_v(v: u8) -> Result<u8, SignatureError> {
	match v {
		0 | 1 => Ok(v + RECOVERY_ID_OFFSET),
		27 | 28 => Ok(v),
		other => Err(SignatureError::UnsupportedRecoveryId(other)),
	}
}

/// Normalizes the `v` byte of a signature to {27, 28}.
pub fn normalize_signature(signature: Signature) -> Result<Signature, SignatureError> {
	let v = normalized_v(signature.v())?;
	Ok(signature.with_v(v))
}

/// Normalizes the final byte pair of a hex-encoded 65-byte signature.
///
/// The `r` and `s` characters are copied through unchanged (including their
/// case); only the last two hex digits may be rewritten. The output always
/// carries a `0x` prefix.
pub fn normalize_signature_hex(signature: &str) -> Result<String, SignatureError> {
	let digits = without_0x_prefix(signature.trim());
	if digits.len() != SIGNATURE_LENGTH * 2 {
		return Err(SignatureError::InvalidSignature(format!(
			"expected {} hex characters, got {}",
			SIGNATURE_LENGTH * 2,
			digits.len()
		)));
	}
	if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(SignatureError::InvalidSignature(
			"signature is not hex encoded".to_string(),
		));
	}

	let (rs, v_hex) = digits.split_at(digits.len() - 2);
	let v = u8::from_str_radix(v_hex, 16)
		.map_err(|e| SignatureError::InvalidSignature(e.to_string()))?;
	let v = normalized_v(v)?;

	Ok(format!("0x{}{:02x}", rs, v))
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::B256;

	fn sig(v: u8) -> Signature {
		Signature::from_parts(&B256::repeat_byte(0x0a), &B256::repeat_byte(0x0b), v)
	}

	#[test]
	fn test_raw_parity_is_shifted() {
		assert_eq!(normalize_signature(sig(0)).unwrap().v(), 27);
		assert_eq!(normalize_signature(sig(1)).unwrap().v(), 28);
	}

	#[test]
	fn test_normalization_is_idempotent() {
		for v in [0u8, 1, 27, 28] {
			let once = normalize_signature(sig(v)).unwrap();
			let twice = normalize_signature(once).unwrap();
			assert_eq!(once, twice);
		}
		assert_eq!(normalize_signature(sig(27)).unwrap(), sig(27));
	}

	#[test]
	fn test_r_and_s_untouched() {
		let normalized = normalize_signature(sig(1)).unwrap();
		assert_eq!(normalized.r(), B256::repeat_byte(0x0a));
		assert_eq!(normalized.s(), B256::repeat_byte(0x0b));
	}

	#[test]
	fn test_unknown_recovery_id_is_rejected() {
		for v in [2u8, 26, 29, 37, 0xff] {
			let result = normalize_signature(sig(v));
			assert!(matches!(result, Err(SignatureError::UnsupportedRecoveryId(x)) if x == v));
		}
	}

	#[test]
	fn test_hex_final_byte_pair() {
		let raw = sig(1).to_hex();
		let normalized = normalize_signature_hex(&raw).unwrap();
		assert_eq!(&normalized[..130], &raw[..130]);
		assert!(normalized.ends_with("1c"));

		let raw = sig(0).to_hex();
		assert!(normalize_signature_hex(&raw).unwrap().ends_with("1b"));
	}

	#[test]
	fn test_hex_idempotent_and_case_preserving() {
		let upper = format!("{}{}1B", "AB".repeat(32), "CD".repeat(32));
		let normalized = normalize_signature_hex(&upper).unwrap();
		assert_eq!(normalized, format!("0x{}{}1b", "AB".repeat(32), "CD".repeat(32)));
		assert_eq!(normalize_signature_hex(&normalized).unwrap(), normalized);
	}

	#[test]
	fn test_hex_rejects_malformed_input() {
		assert!(matches!(
			normalize_signature_hex("0x1234"),
			Err(SignatureError::InvalidSignature(_))
		));
		let not_hex = format!("0x{}", "zz".repeat(SIGNATURE_LENGTH));
		assert!(matches!(
			normalize_signature_hex(&not_hex),
			Err(SignatureError::InvalidSignature(_))
		));
		let bad_v = format!("0x{}05", "00".repeat(SIGNATURE_LENGTH - 1));
		assert!(matches!(
			normalize_signature_hex(&bad_v),
			Err(SignatureError::UnsupportedRecoveryId(5))
		));
	}
}
