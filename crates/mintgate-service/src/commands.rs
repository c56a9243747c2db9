//! Command implementations for the mintgate binary.

use crate::factory_registry::initialize_registry;
use crate::Command;
use alloy_primitives::U256;
use mintgate_allowlist::{verify, MerkleTree};
use mintgate_config::Config;
use mintgate_signature::{build_authorization, build_authorization_with_amount};
use mintgate_types::{parse_address, parse_b256};
use serde_json::{json, Value};
use std::error::Error;
use std::path::Path;
use std::str::FromStr;

/// Runs `command`, loading configuration from `config_path` only if needed.
pub async fn run(config_path: &Path, command: Command) -> Result<Value, Box<dyn Error>> {
	match command {
		Command::Authorize {
			recipient,
			nonce,
			amount,
		} => {
			let config = load(config_path).await?;
			authorize(&config, &recipient, &nonce, amount).await
		},
		Command::Root => {
			let tree = allowlist_tree(&load(config_path).await?)?;
			Ok(json!({ "root": tree.root(), "size": tree.len() }))
		},
		Command::Proof { address } => {
			let tree = allowlist_tree(&load(config_path).await?)?;
			let address = parse_address(&address)?;
			Ok(serde_json::to_value(tree.entry(&address)?)?)
		},
		Command::Verify {
			root,
			address,
			proof,
		} => {
			let root = parse_b256(&root)?;
			let address = parse_address(&address)?;
			let proof = proof
				.iter()
				.map(|p| parse_b256(p))
				.collect::<Result<Vec<_>, _>>()?;
			Ok(json!({ "valid": verify(&root, &address, &proof) }))
		},
	}
}

async fn load(path: &Path) -> Result<Config, Box<dyn Error>> {
	let config = Config::from_file(path).await?;
	tracing::info!("Loaded configuration [{}]", config.service.id);
	Ok(config)
}

async fn authorize(
	config: &Config,
	recipient: &str,
	nonce: &str,
	amount: Option<u64>,
) -> Result<Value, Box<dyn Error>> {
	let nonce = U256::from_str(nonce).map_err(|e| format!("Invalid nonce '{}': {}", nonce, e))?;
	let account = initialize_registry().build_account(config)?;
	let signer = account.get_address().await?;

	let authorization = match amount {
		Some(amount) => {
			build_authorization_with_amount(recipient, nonce, account.backend(), amount).await?
		},
		None => build_authorization(recipient, nonce, account.backend()).await?,
	};

	Ok(json!({
		"messageHash": authorization.message_hash,
		"signature": authorization.signature,
		"signer": signer,
		"nonce": nonce.to_string(),
		"amount": amount,
	}))
}

fn allowlist_tree(config: &Config) -> Result<MerkleTree, Box<dyn Error>> {
	let allowlist = config
		.allowlist
		.as_ref()
		.ok_or("No [allowlist] section in configuration")?;
	Ok(MerkleTree::from_strs(&allowlist.addresses)?)
}
