// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! logferry - ship CloudWatch Logs to a Splunk HTTP Event Collector.
//!
//! `logferry forward` runs one invocation and prints its result as JSON;
//! meant to be driven by a scheduler.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use logferry_config::{load_config_with_cli, CliOverrides, LogFormat, LoggingConfig};
use logferry_core::{FetchStrategy, SecretSchema};
use logferry_secrets::{fetch_secret, SecretsManagerStore};

mod secret;

/// logferry - CloudWatch Logs to HEC forwarder
#[derive(Parser, Debug)]
#[command(name = "logferry", version, about, long_about = None)]
struct Args {
	/// Path to configuration file (default /etc/logferry/logferry.toml)
	#[arg(short, long, env = "LOGFERRY_CONFIG")]
	config: Option<PathBuf>,

	/// Log level (overrides config)
	#[arg(short, long)]
	log_level: Option<String>,

	/// Output logs as JSON (overrides config)
	#[arg(long)]
	json_logs: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Forward the trailing window of a log group to HEC
	Forward {
		/// Log group to read
		#[arg(long)]
		group: Option<String>,

		/// stream-enumeration or filtered-query
		#[arg(long)]
		strategy: Option<FetchStrategy>,
	},

	/// Fetch a secret and report which entries it holds
	Secret {
		secret_id: String,

		#[arg(long)]
		region: Option<String>,

		/// key-value or positional
		#[arg(long)]
		schema: Option<SecretSchema>,

		/// Keys to report (repeatable)
		#[arg(long = "key", value_name = "KEY")]
		keys: Vec<String>,

		/// Print values, not just presence
		#[arg(long)]
		reveal: bool,
	},

	/// Print the resolved configuration with secrets redacted
	Config,
}

impl From<&Args> for CliOverrides {
	fn from(args: &Args) -> Self {
		let mut overrides = Self {
			log_level: args.log_level.clone(),
			log_format: args.json_logs.then_some(LogFormat::Json),
			config_file: args.config.clone(),
			..Default::default()
		};

		match &args.command {
			Command::Forward { group, strategy } => {
				overrides.group_name = group.clone();
				overrides.strategy = *strategy;
			}
			Command::Secret { region, schema, .. } => {
				overrides.region = region.clone();
				overrides.secret_schema = *schema;
			}
			Command::Config => {}
		}
		overrides
	}
}

/// Logs go to stderr; stdout carries command output.
fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("logferry={}", logging.level)));

	match logging.format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(std::io::stderr))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().pretty().with_writer(std::io::stderr))
				.init();
		}
	}
}

fn exit_code(ok: bool) -> ExitCode {
	if ok {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	}
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	let config =
		load_config_with_cli(CliOverrides::from(&args)).context("failed to load configuration")?;

	init_tracing(&config.logging);
	debug!(version = env!("CARGO_PKG_VERSION"), "starting logferry");

	match args.command {
		Command::Forward { .. } => {
			let result = logferry_pipeline::invoke(&config).await;
			let output =
				serde_json::to_string_pretty(&result).context("failed to serialize invocation result")?;
			println!("{output}");
			Ok(exit_code(result.is_success()))
		}
		Command::Secret {
			secret_id,
			keys,
			reveal,
			..
		} => {
			let keys = if keys.is_empty() {
				secret::DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
			} else {
				keys
			};

			info!(secret_id = %secret_id, schema = %config.secrets.schema, "fetching secret");
			let store = SecretsManagerStore::connect(config.aws.region.as_deref()).await;
			let lookup = fetch_secret(&store, &secret_id, config.secrets.schema).await;

			print!("{}", secret::render(&secret_id, &lookup, &keys, reveal));
			Ok(exit_code(lookup.is_found()))
		}
		Command::Config => {
			let output =
				serde_json::to_string_pretty(&config).context("failed to serialize configuration")?;
			println!("{output}");
			Ok(ExitCode::SUCCESS)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn forward_flags_become_overrides() {
		let args = Args::parse_from([
			"logferry",
			"--json-logs",
			"forward",
			"--group",
			"/aws/transfer/s-1234",
			"--strategy",
			"filtered-query",
		]);
		let overrides = CliOverrides::from(&args);

		assert_eq!(overrides.group_name.as_deref(), Some("/aws/transfer/s-1234"));
		assert_eq!(overrides.strategy, Some(FetchStrategy::FilteredQuery));
		assert_eq!(overrides.log_format, Some(LogFormat::Json));
		assert!(overrides.region.is_none());
	}

	#[test]
	fn secret_flags_become_overrides() {
		let args = Args::parse_from([
			"logferry",
			"secret",
			"ALPFR/GLOBAL/APPS/DYNATRACE/CONNECT-INFO",
			"--region",
			"eu-west-1",
			"--schema",
			"positional",
			"--key",
			"TOKEN",
		]);
		let overrides = CliOverrides::from(&args);

		assert_eq!(overrides.region.as_deref(), Some("eu-west-1"));
		assert_eq!(overrides.secret_schema, Some(SecretSchema::Positional));
		assert!(overrides.log_format.is_none());
		match args.command {
			Command::Secret { keys, reveal, .. } => {
				assert_eq!(keys, vec!["TOKEN".to_string()]);
				assert!(!reveal);
			}
			other => panic!("unexpected command {other:?}"),
		}
	}

	#[test]
	fn unknown_strategy_is_rejected() {
		let result = Args::try_parse_from(["logferry", "forward", "--strategy", "tail"]);
		assert!(result.is_err());
	}
}
