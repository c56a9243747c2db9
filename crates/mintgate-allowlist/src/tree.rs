//! Sorted-pair keccak Merkle tree over allowlisted addresses.
//!
//! Leaves are `keccak256(address)` over the 20 address bytes. Every internal
//! node is `keccak256(min(a, b) ‖ max(a, b))`, which makes a proof a plain
//! list of siblings with no left/right flags. Leaves are sorted and
//! de-duplicated before building, so the root depends only on the set of
//! addresses. An unpaired node at the end of a layer moves up unchanged.

use crate::AllowlistError;
use alloy_primitives::{keccak256, Address, B256};
use mintgate_types::parse_address;
use serde::Serialize;

/// Sibling hashes from a leaf up to the root.
pub type MerkleProof = Vec<B256>;

/// The leaf committed for an address.
pub fn leaf_hash(address: &Address) -> B256 {
	keccak256(address.as_slice())
}

/// Hashes two sibling nodes in ascending numeric order.
pub fn hash_pair(a: &B256, b: &B256) -> B256 {
	let (low, high) = if a <= b { (a, b) } else { (b, a) };
	let mut buf = [0u8; 64];
	buf[..32].copy_from_slice(low.as_slice());
	buf[32..].copy_from_slice(high.as_slice());
	keccak256(buf)
}

/// Folds `proof` over `leaf` and compares the result with `root`.
pub fn verify_leaf(root: &B256, leaf: &B256, proof: &[B256]) -> bool {
	let computed = proof
		.iter()
		.fold(*leaf, |node, sibling| hash_pair(&node, sibling));
	computed == *root
}

/// Checks that `address` belongs to the allowlist committed to by `root`.
pub fn verify(root: &B256, address: &Address, proof: &[B256]) -> bool {
	verify_leaf(root, &leaf_hash(address), proof)
}

/// Proof material for one allowlisted address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowlistEntry {
	pub root: B256,
	pub address: Address,
	pub leaf: B256,
	pub proof: MerkleProof,
}

/// All layers of a built tree, leaves first.
#[derive(Debug, Clone)]
pub struct MerkleTree {
	layers: Vec<Vec<B256>>,
}

impl MerkleTree {
	/// Builds a tree from the given addresses.
	///
	/// Duplicates are ignored and input order does not affect the root.
	pub fn build(addresses: &[Address]) -> Result<Self, AllowlistError> {
		if addresses.is_empty() {
			return Err(AllowlistError::EmptyAllowlist);
		}

		let mut leaves: Vec<B256> = addresses.iter().map(leaf_hash).collect();
		leaves.sort_unstable();
		leaves.dedup();
		tracing::debug!(
			addresses = addresses.len(),
			leaves = leaves.len(),
			"Building allowlist tree"
		);

		let mut layers = vec![leaves];
		while let Some(current) = layers.last().filter(|layer| layer.len() > 1) {
			let pairs = current.chunks_exact(2);
			// An unpaired last node is promoted unchanged
			let promoted = pairs.remainder().first().copied();
			let next: Vec<B256> = pairs
				.map(|pair| hash_pair(&pair[0], &pair[1]))
				.chain(promoted)
				.collect();
			layers.push(next);
		}

		Ok(Self { layers })
	}

	/// Parses hex addresses and builds a tree from them.
	pub fn from_strs<S: AsRef<str>>(addresses: &[S]) -> Result<Self, AllowlistError> {
		let parsed = addresses
			.iter()
			.map(|a| parse_address(a.as_ref()).map_err(AllowlistError::InvalidAddress))
			.collect::<Result<Vec<_>, _>>()?;
		Self::build(&parsed)
	}

	pub fn root(&self) -> B256 {
		// build() never produces an empty tree
		self.layers[self.layers.len() - 1][0]
	}

	/// Sorted, de-duplicated leaves.
	pub fn leaves(&self) -> &[B256] {
		&self.layers[0]
	}

	/// Number of distinct addresses in the tree.
	pub fn len(&self) -> usize {
		self.leaves().len()
	}

	pub fn is_empty(&self) -> bool {
		self.leaves().is_empty()
	}

	/// Number of layers above the leaves.
	pub fn depth(&self) -> usize {
		self.layers.len() - 1
	}

	pub fn contains(&self, address: &Address) -> bool {
		self.leaves().binary_search(&leaf_hash(address)).is_ok()
	}

	/// Returns the sibling path for `address`.
	pub fn proof(&self, address: &Address) -> Result<MerkleProof, AllowlistError> {
		let mut index = self
			.leaves()
			.binary_search(&leaf_hash(address))
			.map_err(|_| AllowlistError::NotFound(*address))?;

		let mut proof = Vec::with_capacity(self.depth());
		for layer in &self.layers[..self.layers.len() - 1] {
			let sibling = index ^ 1;
			if let Some(node) = layer.get(sibling) {
				proof.push(*node);
			}
			index /= 2;
		}
		Ok(proof)
	}

	/// Bundles root, leaf and proof for `address`.
	pub fn entry(&self, address: &Address) -> Result<AllowlistEntry, AllowlistError> {
		Ok(AllowlistEntry {
			root: self.root(),
			address: *address,
			leaf: leaf_hash(address),
			proof: self.proof(address)?,
		})
	}
}
