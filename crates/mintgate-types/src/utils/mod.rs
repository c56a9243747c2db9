//! Utility functions for common type conversions and transformations.
//!
//! This module provides helpers for hex prefix handling, strict parsing of
//! addresses and 32-byte words, and the packed encoding that mirrors
//! Solidity's `abi.encodePacked`.

pub mod conversion;
pub mod formatting;
pub mod packing;

pub use conversion::{parse_address, parse_b256};
pub use formatting::without_0x_prefix;
pub use packing::PackedEncoder;
