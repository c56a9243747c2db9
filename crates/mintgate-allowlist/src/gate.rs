//! Allowlist-gated mint model.
//!
//! Reproduces the checks a gated mint contract applies: an admin publishes a
//! Merkle root, after which callers mint by presenting a proof of membership
//! and paying exactly `unit_price * quantity`.
//!
//! The gate is a plain value; callers that share it across threads must
//! serialize access themselves.

use crate::tree::verify;
use alloy_primitives::{Address, B256, U256};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that can occur when configuring or minting through the gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
	/// No allowlist root has been published yet.
	#[error("Allowlist not configured")]
	NotConfigured,
	/// The caller is not the gate's admin.
	#[error("Caller {0} is not the admin")]
	Unauthorized(Address),
	/// The proof does not place the caller in the published allowlist.
	#[error("Not on allowlist: {0}")]
	NotOnAllowlist(Address),
	/// Quantity must be at least one.
	#[error("Invalid quantity: {0}")]
	InvalidQuantity(u64),
	/// Payment is lower than the exact price.
	#[error("Insufficient payment: expected {expected}, got {actual}")]
	InsufficientPayment { expected: U256, actual: U256 },
	/// Payment is higher than the exact price.
	#[error("Excess payment: expected {expected}, got {actual}")]
	ExcessPayment { expected: U256, actual: U256 },
	/// `unit_price * quantity` does not fit in 256 bits.
	#[error("Price overflow for quantity {0}")]
	PriceOverflow(u64),
	/// Minting `quantity` would overflow the caller's or the total counter.
	#[error("Mint counter overflow for quantity {0}")]
	QuantityOverflow(u64),
}

/// Lifecycle of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
	/// No root published; every mint fails.
	Unset,
	/// Root published, nothing minted yet.
	Configured,
	/// At least one mint has succeeded.
	Active,
}

impl fmt::Display for GateState {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GateState::Unset => write!(f, "unset"),
			GateState::Configured => write!(f, "configured"),
			GateState::Active => write!(f, "active"),
		}
	}
}

/// A mint gated by a Merkle allowlist and an exact unit price.
#[derive(Debug, Clone)]
pub struct AllowlistMint {
	admin: Address,
	unit_price: U256,
	root: Option<B256>,
	minted: HashMap<Address, u64>,
	total_minted: u64,
}

impl AllowlistMint {
	pub fn new(admin: Address, unit_price: U256) -> Self {
		Self {
			admin,
			unit_price,
			root: None,
			minted: HashMap::new(),
			total_minted: 0,
		}
	}

	pub fn state(&self) -> GateState {
		match (self.root, self.total_minted) {
			(None, _) => GateState::Unset,
			(Some(_), 0) => GateState::Configured,
			(Some(_), _) => GateState::Active,
		}
	}

	pub fn root(&self) -> Option<B256> {
		self.root
	}

	pub fn unit_price(&self) -> U256 {
		self.unit_price
	}

	/// Tokens minted by `account` so far.
	pub fn minted(&self, account: &Address) -> u64 {
		self.minted.get(account).copied().unwrap_or(0)
	}

	pub fn total_minted(&self) -> u64 {
		self.total_minted
	}

	/// Publishes or replaces the allowlist root. Admin only.
	pub fn set_root(&mut self, caller: &Address, root: B256) -> Result<(), GateError> {
		if *caller != self.admin {
			return Err(GateError::Unauthorized(*caller));
		}
		self.root = Some(root);
		tracing::info!(root = %root, state = %self.state(), "Published allowlist root");
		Ok(())
	}

	/// The exact payment required for `quantity` tokens.
	pub fn price_for(&self, quantity: u64) -> Result<U256, GateError> {
		self.unit_price
			.checked_mul(U256::from(quantity))
			.ok_or(GateError::PriceOverflow(quantity))
	}

	/// Mints `quantity` tokens to `caller`.
	///
	/// Checks run in order: root published, quantity non-zero, membership,
	/// exact payment, counter capacity. Returns the caller's new minted
	/// balance. A rejected mint leaves the gate unchanged.
	pub fn mint(
		&mut self,
		caller: &Address,
		quantity: u64,
		value: U256,
		proof: &[B256],
	) -> Result<u64, GateError> {
		let root = self.root.ok_or(GateError::NotConfigured)?;
		if quantity == 0 {
			return Err(GateError::InvalidQuantity(quantity));
		}
		if !verify(&root, caller, proof) {
			tracing::warn!(caller = %caller, "Rejected mint: not on allowlist");
			return Err(GateError::NotOnAllowlist(*caller));
		}

		let expected = self.price_for(quantity)?;
		if value < expected {
			tracing::warn!(
				caller = %caller,
				%expected,
				actual = %value,
				"Rejected mint: underpaid"
			);
			return Err(GateError::InsufficientPayment {
				expected,
				actual: value,
			});
		}
		if value > expected {
			tracing::warn!(
				caller = %caller,
				%expected,
				actual = %value,
				"Rejected mint: overpaid"
			);
			return Err(GateError::ExcessPayment {
				expected,
				actual: value,
			});
		}

		let balance = self
			.minted(caller)
			.checked_add(quantity)
			.ok_or(GateError::QuantityOverflow(quantity))?;
		let total = self
			.total_minted
			.checked_add(quantity)
			.ok_or(GateError::QuantityOverflow(quantity))?;

		self.minted.insert(*caller, balance);
		self.total_minted = total;
		tracing::info!(caller = %caller, quantity, total = self.total_minted, "Minted");

		Ok(balance)
	}
}
