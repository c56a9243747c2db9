//! Common types module for the mintgate system.
//!
//! This module defines the data types shared by the signing, allowlist and
//! configuration crates so that every component agrees on byte layouts and
//! hex representations.

/// Signature types produced by signing backends.
pub mod account;
/// Registry trait for self-registering implementations.
pub mod registry;
/// Redacting wrapper for private keys.
pub mod secret_string;
/// Utility functions for hex handling, address parsing and packed encoding.
pub mod utils;
/// Configuration validation types for implementation-specific TOML tables.
pub mod validation;

pub use account::{Signature, SIGNATURE_LENGTH};
pub use alloy_primitives::{Address, B256, U256};
pub use registry::ImplementationRegistry;
pub use secret_string::SecretString;
pub use utils::{parse_address, parse_b256, without_0x_prefix, PackedEncoder};
pub use validation::*;
