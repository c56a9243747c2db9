//! Non-standard packed ABI encoding.
//!
//! Mirrors Solidity's `abi.encodePacked`: each value occupies exactly its
//! type width with no padding, in the order pushed. The verifying contract
//! hashes the same bytes, so widths and order must match exactly.

use alloy_primitives::{Address, U256};

/// Minimal encoder for the static types used in mint authorizations.
#[derive(Debug, Default)]
pub struct PackedEncoder {
	buf: Vec<u8>,
}

impl PackedEncoder {
	pub fn new() -> Self {
		Self::default()
	}

	/// `address`: 20 bytes.
	pub fn push_address(&mut self, addr: &Address) -> &mut Self {
		self.buf.extend_from_slice(addr.as_slice());
		self
	}

	/// `uint256`: 32 bytes big-endian.
	pub fn push_u256(&mut self, v: U256) -> &mut Self {
		self.buf.extend_from_slice(&v.to_be_bytes::<32>());
		self
	}

	/// `uint16`: 2 bytes big-endian.
	pub fn push_u16(&mut self, v: u16) -> &mut Self {
		self.buf.extend_from_slice(&v.to_be_bytes());
		self
	}

	pub fn len(&self) -> usize {
		self.buf.len()
	}

	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}
