//! Signing backend module for the mintgate system.
//!
//! This module provides the abstraction over whatever holds the authorizing
//! key. Callers hand it a 32-byte digest and receive a raw 65-byte signature;
//! the recovery identifier is left in the backend's own convention so that
//! callers normalize it explicitly.

use alloy_primitives::B256;
use async_trait::async_trait;
use mintgate_types::{Address, ConfigSchema, ImplementationRegistry, Signature};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// The backend rejected the signing request.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// The configured key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
	/// Any other failure inside the implementation.
	#[error("Implementation error: {0}")]
	Implementation(String),
}

/// Trait defining the interface for signing backends.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// The address whose key produces this backend's signatures.
	async fn address(&self) -> Result<Address, AccountError>;

	/// Signs a 32-byte digest without applying any further prefixing.
	///
	/// The returned `v` byte is whatever the backend emits ({0, 1} for
	/// y-parity backends, {27, 28} for legacy ones).
	async fn sign_hash(&self, hash: &B256) -> Result<Signature, AccountError>;
}

/// Type alias for account factory functions.
pub type AccountFactory = fn(&toml::Value) -> Result<Box<dyn AccountInterface>, AccountError>;

/// Type alias for functions returning an implementation's config schema.
pub type SchemaFactory = fn() -> Box<dyn ConfigSchema>;

/// Registry trait for account implementations.
pub trait AccountRegistry: ImplementationRegistry<Factory = AccountFactory> {
	/// Returns the configuration schema for this implementation.
	///
	/// The schema is checked against the implementation's TOML table before
	/// the factory is invoked.
	fn config_schema() -> Box<dyn ConfigSchema>;
}

/// Get all registered account implementations.
///
/// Returns a vector of (name, factory, schema) tuples used by the binary to
/// build its factory table at startup.
pub fn get_all_implementations() -> Vec<(&'static str, AccountFactory, SchemaFactory)> {
	use implementations::local;

	vec![(
		local::Registry::NAME,
		local::Registry::factory(),
		local::Registry::config_schema as SchemaFactory,
	)]
}

/// Service that manages account operations.
///
/// Wraps a single backend chosen from configuration.
pub struct AccountService {
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	pub async fn get_address(&self) -> Result<Address, AccountError> {
		self.implementation.address().await
	}

	/// Borrows the underlying backend, e.g. to pass it to the authorization builder.
	pub fn backend(&self) -> &dyn AccountInterface {
		self.implementation.as_ref()
	}
}
