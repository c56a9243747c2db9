//! Merkle allowlists for the mintgate system.
//!
//! This crate builds allowlist trees, issues membership proofs and verifies
//! them exactly as an allowlist-gated mint contract does. The [`gate`]
//! module models that contract's admin and payment checks on top of
//! [`verify`].

use alloy_primitives::Address;
use thiserror::Error;

pub mod gate;
pub mod tree;

pub use gate::{AllowlistMint, GateError, GateState};
pub use tree::{
	hash_pair, leaf_hash, verify, verify_leaf, AllowlistEntry, MerkleProof, MerkleTree,
};

/// Errors that can occur while building a tree or requesting a proof.
#[derive(Debug, Error)]
pub enum AllowlistError {
	/// An input address could not be parsed.
	#[error("Invalid address: {0}")]
	InvalidAddress(String),
	/// A tree needs at least one address.
	#[error("Allowlist is empty")]
	EmptyAllowlist,
	/// A proof was requested for an address that is not in the tree.
	#[error("Address {0} is not in the allowlist")]
	NotFound(Address),
}
