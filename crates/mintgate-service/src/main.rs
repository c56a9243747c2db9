//! Main entry point for the mintgate command line.
//!
//! Issues signed mint authorizations with the configured signing backend and
//! produces or checks allowlist proofs. Results are printed to stdout as
//! JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod factory_registry;

/// Command-line arguments for the mintgate binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "MINTGATE_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
	/// Sign an authorization for `recipient ‖ nonce [‖ amount]`
	Authorize {
		/// Recipient address
		#[arg(long)]
		recipient: String,
		/// Nonce, decimal or 0x-prefixed hex
		#[arg(long)]
		nonce: String,
		/// Optional uint16 amount
		#[arg(long)]
		amount: Option<u64>,
	},
	/// Print the root of the configured allowlist
	Root,
	/// Print the proof for an allowlisted address
	Proof {
		#[arg(long)]
		address: String,
	},
	/// Check an address and proof against a root
	Verify {
		#[arg(long)]
		root: String,
		#[arg(long)]
		address: String,
		/// Proof elements, leaf to root
		#[arg(long, num_args = 0..)]
		proof: Vec<String>,
	},
}

/// Main entry point.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Initializes logging infrastructure
/// 3. Loads configuration when the command needs it
/// 4. Runs the command and prints its JSON result
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	let output = commands::run(&args.config, args.command).await?;
	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_args_default_values() {
		let args = Args::try_parse_from(["mintgate", "root"]).unwrap();
		assert_eq!(args.config, PathBuf::from("config.toml"));
		assert_eq!(args.log_level, "info");
		assert_eq!(args.command, Command::Root);
	}

	#[test]
	fn test_authorize_args() {
		let args = Args::try_parse_from([
			"mintgate",
			"--config",
			"drop.toml",
			"authorize",
			"--recipient",
			"0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
			"--nonce",
			"7",
			"--amount",
			"3",
		])
		.unwrap();

		assert_eq!(args.config, PathBuf::from("drop.toml"));
		assert_eq!(
			args.command,
			Command::Authorize {
				recipient: "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".to_string(),
				nonce: "7".to_string(),
				amount: Some(3),
			}
		);
	}

	#[test]
	fn test_verify_args_collect_proof() {
		let args = Args::try_parse_from([
			"mintgate", "verify", "--root", "0x01", "--address", "0x02", "--proof", "0x03", "0x04",
		])
		.unwrap();

		match args.command {
			Command::Verify { proof, .. } => assert_eq!(proof, vec!["0x03", "0x04"]),
			other => panic!("unexpected command {:?}", other),
		}
	}

	#[test]
	fn test_missing_subcommand_rejected() {
		assert!(Args::try_parse_from(["mintgate"]).is_err());
	}
}
