//! Factory registry for signing backends.
//!
//! Every account implementation registers its factory here once at startup;
//! configuration then selects one by name.

use mintgate_account::{AccountFactory, AccountService, SchemaFactory};
use mintgate_config::Config;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Registry of all known implementation factories.
pub struct FactoryRegistry {
	pub account: HashMap<String, AccountFactory>,
	pub account_schemas: HashMap<String, SchemaFactory>,
}

impl FactoryRegistry {
	pub fn new() -> Self {
		Self {
			account: HashMap::new(),
			account_schemas: HashMap::new(),
		}
	}

	/// Register an account implementation
	pub fn register_account(
		&mut self,
		name: impl Into<String>,
		factory: AccountFactory,
		schema: SchemaFactory,
	) {
		let name = name.into();
		self.account_schemas.insert(name.clone(), schema);
		self.account.insert(name, factory);
	}

	/// Builds the primary signing backend named in `config`.
	///
	/// The implementation's table is checked against its schema before the
	/// factory runs.
	pub fn build_account(&self, config: &Config) -> Result<AccountService, String> {
		let name = &config.account.primary;
		let factory = self
			.account
			.get(name)
			.ok_or_else(|| format!("Unknown account implementation '{}'", name))?;
		let table = config
			.account
			.primary_config()
			.ok_or_else(|| format!("Missing configuration for account '{}'", name))?;

		if let Some(schema) = self.account_schemas.get(name) {
			schema().validate(table).map_err(|e| {
				format!("Invalid configuration for account '{}': {}", name, e)
			})?;
		}

		let implementation = factory(table).map_err(|e| e.to_string())?;
		tracing::debug!(implementation = %name, "Built signing backend");
		Ok(AccountService::new(implementation))
	}
}

impl Default for FactoryRegistry {
	fn default() -> Self {
		Self::new()
	}
}

static REGISTRY: OnceLock<FactoryRegistry> = OnceLock::new();

/// Initialize the global registry with all available implementations
pub fn initialize_registry() -> &'static FactoryRegistry {
	REGISTRY.get_or_init(|| {
		let mut registry = FactoryRegistry::new();

		for (name, factory, schema) in mintgate_account::get_all_implementations() {
			tracing::debug!("Registering account implementation: {}", name);
			registry.register_account(name, factory, schema);
		}

		registry
	})
}
