// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for logferry.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`LOGFERRY_<SECTION>_<FIELD>`)
//!
//! # Usage
//!
//! ```ignore
//! use logferry_config::{load_config_with_cli, CliOverrides};
//!
//! let config = load_config_with_cli(CliOverrides::default())?;
//! println!("reading {:?}", config.source.group_name);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::LogferryConfigLayer;
pub use sections::*;
pub use sources::{
	CliOverrides, CliSource, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
	SYSTEM_CONFIG_PATH,
};

use logferry_core::TransformProfile;
use serde::Serialize;
use tracing::{debug, info, warn};

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogferryConfig {
	pub source: SourceConfig,
	/// `None` when no `[hec]` setting is present at all.
	pub hec: Option<HecConfig>,
	pub aws: AwsConfig,
	pub transform: TransformConfig,
	pub egress: EgressConfig,
	pub secrets: SecretsConfig,
	pub logging: LoggingConfig,
}

impl LogferryConfig {
	pub fn require_hec(&self) -> Result<&HecConfig> {
		self.hec.as_ref().ok_or(ConfigError::MissingField {
			key: "hec.endpoint_url",
			env: "LOGFERRY_HEC_ENDPOINT_URL",
		})
	}
}

/// Load configuration with command-line overrides on top.
///
/// `overrides.config_file` replaces the system config path when set.
pub fn load_config_with_cli(overrides: CliOverrides) -> Result<LogferryConfig> {
	let toml = match overrides.config_file.clone() {
		Some(path) => TomlSource::new(path),
		None => TomlSource::system(),
	};
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(toml),
		Box::new(EnvSource::process()),
		Box::new(CliSource::new(overrides)),
	])
}

/// Merge the given sources in precedence order and finalize.
pub fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<LogferryConfig> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = LogferryConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: LogferryConfigLayer) -> Result<LogferryConfig> {
	let source = layer.source.unwrap_or_default().finalize()?;
	let hec = layer.hec.unwrap_or_default().build()?;
	let aws = layer.aws.unwrap_or_default().finalize();
	let transform = layer.transform.unwrap_or_default().finalize();
	let egress = layer.egress.unwrap_or_default().finalize()?;
	let secrets = layer.secrets.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&transform, &egress);

	info!(
		group = source.group_name.as_deref().unwrap_or("<unset>"),
		strategy = %source.strategy,
		pagination = %source.pagination,
		window_offset_secs = source.window_offset_secs,
		hec_configured = hec.is_some(),
		profile = %transform.profile,
		egress_enabled = egress.enabled,
		"logferry configuration loaded"
	);

	Ok(LogferryConfig {
		source,
		hec,
		aws,
		transform,
		egress,
		secrets,
		logging,
	})
}

/// Cross-section checks; these only warn.
fn validate_config(transform: &TransformConfig, egress: &EgressConfig) {
	if egress.enabled && transform.profile == TransformProfile::Passthrough {
		warn!("egress discovery is enabled but the passthrough profile does not attach it");
	}
}
