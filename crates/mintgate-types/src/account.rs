//! Signature types shared between signing backends and their callers.
//!
//! A signature is kept in the 65-byte `r ‖ s ‖ v` layout that on-chain
//! `ecrecover` wrappers consume. No interpretation of `v` happens here;
//! normalization is the responsibility of the authorization builder.

use crate::utils::without_0x_prefix;
use alloy_primitives::B256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Length in bytes of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Errors raised while decoding a signature from its hex form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureFormatError {
	/// The input was not valid hex.
	#[error("Invalid signature hex: {0}")]
	InvalidHex(String),
	/// The decoded input did not have the expected length.
	#[error("Invalid signature length: expected {SIGNATURE_LENGTH} bytes, got {0}")]
	InvalidLength(usize),
}

/// A 65-byte ECDSA signature in `r ‖ s ‖ v` order.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
	/// Wraps raw signature bytes.
	pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
		Self(bytes)
	}

	/// Assembles a signature from its components.
	pub fn from_parts(r: &B256, s: &B256, v: u8) -> Self {
		let mut bytes = [0u8; SIGNATURE_LENGTH];
		bytes[..32].copy_from_slice(r.as_slice());
		bytes[32..64].copy_from_slice(s.as_slice());
		bytes[64] = v;
		Self(bytes)
	}

	/// Decodes a signature from hex, with or without `0x` prefix.
	pub fn from_hex(value: &str) -> Result<Self, SignatureFormatError> {
		let decoded = hex::decode(without_0x_prefix(value))
			.map_err(|e| SignatureFormatError::InvalidHex(e.to_string()))?;
		let bytes: [u8; SIGNATURE_LENGTH] = decoded
			.as_slice()
			.try_into()
			.map_err(|_| SignatureFormatError::InvalidLength(decoded.len()))?;
		Ok(Self(bytes))
	}

	pub fn r(&self) -> B256 {
		B256::from_slice(&self.0[..32])
	}

	pub fn s(&self) -> B256 {
		B256::from_slice(&self.0[32..64])
	}

	/// The recovery identifier as emitted by the producer.
	pub fn v(&self) -> u8 {
		self.0[64]
	}

	/// Returns a copy of this signature carrying a different recovery identifier.
	pub fn with_v(mut self, v: u8) -> Self {
		self.0[64] = v;
		self
	}

	pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
		&self.0
	}

	/// Lowercase hex encoding with `0x` prefix (132 characters).
	pub fn to_hex(&self) -> String {
		format!("0x{}", hex::encode(self.0))
	}
}

impl fmt::Debug for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Signature({})", self.to_hex())
	}
}

impl fmt::Display for Signature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_hex())
	}
}

impl Serialize for Signature {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_hex())
	}
}

impl<'de> Deserialize<'de> for Signature {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Signature::from_hex(&s).map_err(serde::de::Error::custom)
	}
}
