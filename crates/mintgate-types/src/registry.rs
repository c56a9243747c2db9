//! Registry trait for self-registering implementations.
//!
//! Implementations are resolved through an explicit table of factories built
//! when the binary starts, never by looking names up at call time.

/// Base trait for implementation registries.
///
/// Each pluggable implementation module provides a `Registry` struct that
/// implements this trait, declaring the name it is configured under and the
/// factory that constructs it.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation,
	/// e.g. "local" for `[account.implementations.local]`.
	const NAME: &'static str;

	/// The factory function type this implementation provides.
	type Factory;

	/// Get the factory function for this implementation.
	fn factory() -> Self::Factory;
}
