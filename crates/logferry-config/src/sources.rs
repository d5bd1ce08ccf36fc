// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, a TOML file and the environment.

use std::path::PathBuf;
use std::str::FromStr;

use logferry_common_config::{load_secret_with, SecretString};
use logferry_core::{FetchStrategy, SecretSchema};
use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::LogferryConfigLayer;
use crate::sections::{
	AwsConfigLayer, EgressConfigLayer, HecConfigLayer, LogFormat, LoggingConfigLayer,
	SecretsConfigLayer, SourceConfigLayer, TransformConfigLayer,
};

pub const SYSTEM_CONFIG_PATH: &str = "/etc/logferry/logferry.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	Cli = 60,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<LogferryConfigLayer, ConfigError>;
}

pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<LogferryConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(LogferryConfigLayer::default())
	}
}

/// A missing file is not an error; the layer is simply empty.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<LogferryConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(LogferryConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: LogferryConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Convention: LOGFERRY_<SECTION>_<FIELD>. The unprefixed `LOG_GROUP_NAME`,
/// `SPLUNK_HEC_URL`, `SPLUNK_HEC_TOKEN`, `SPLUNK_HEC_CHANNEL` and `SPLUNK_INDEX`
/// are read when the prefixed variable is unset.
pub struct EnvSource {
	lookup: Lookup,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn process() -> Self {
		Self::with_lookup(|name| std::env::var(name).ok())
	}

	pub fn with_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		match self.var(name) {
			Some(v) => match v.to_ascii_lowercase().as_str() {
				"true" | "1" | "yes" => Ok(Some(true)),
				"false" | "0" | "no" => Ok(Some(false)),
				_ => Err(ConfigError::InvalidValue {
					key: name.to_string(),
					message: format!("invalid boolean value '{v}'"),
				}),
			},
			None => Ok(None),
		}
	}

	fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|e| ConfigError::InvalidValue {
				key: name.to_string(),
				message: format!("'{v}': {e}"),
			}),
			None => Ok(None),
		}
	}

	fn secret(&self, name: &str) -> Result<Option<SecretString>, ConfigError> {
		load_secret_with(name, |n| (self.lookup)(n)).map_err(|e| ConfigError::Secret(e.to_string()))
	}

	fn load_source(&self) -> Result<SourceConfigLayer, ConfigError> {
		Ok(SourceConfigLayer {
			group_name: self
				.var("LOGFERRY_SOURCE_GROUP_NAME")
				.or_else(|| self.var("LOG_GROUP_NAME")),
			stream_name: self.var("LOGFERRY_SOURCE_STREAM_NAME"),
			strategy: self.parsed("LOGFERRY_SOURCE_STRATEGY")?,
			window_offset_secs: self.parsed("LOGFERRY_SOURCE_WINDOW_OFFSET_SECS")?,
			result_cap: self.parsed("LOGFERRY_SOURCE_RESULT_CAP")?,
			pagination: self.parsed("LOGFERRY_SOURCE_PAGINATION")?,
			max_pages: self.parsed("LOGFERRY_SOURCE_MAX_PAGES")?,
		})
	}

	fn load_hec(&self) -> Result<HecConfigLayer, ConfigError> {
		Ok(HecConfigLayer {
			endpoint_url: self
				.var("LOGFERRY_HEC_ENDPOINT_URL")
				.or_else(|| self.var("SPLUNK_HEC_URL")),
			token: match self.secret("LOGFERRY_HEC_TOKEN")? {
				Some(token) => Some(token),
				None => self.secret("SPLUNK_HEC_TOKEN")?,
			},
			channel_id: self
				.var("LOGFERRY_HEC_CHANNEL_ID")
				.or_else(|| self.var("SPLUNK_HEC_CHANNEL")),
			auth_scheme: self.var("LOGFERRY_HEC_AUTH_SCHEME"),
			payload_shape: self.parsed("LOGFERRY_HEC_PAYLOAD_SHAPE")?,
			verify_tls: self.bool("LOGFERRY_HEC_VERIFY_TLS")?,
			timeout_secs: self.parsed("LOGFERRY_HEC_TIMEOUT_SECS")?,
		})
	}

	fn load_aws(&self) -> AwsConfigLayer {
		AwsConfigLayer {
			region: self.var("LOGFERRY_AWS_REGION"),
		}
	}

	fn load_transform(&self) -> Result<TransformConfigLayer, ConfigError> {
		Ok(TransformConfigLayer {
			profile: self.parsed("LOGFERRY_TRANSFORM_PROFILE")?,
			event_type: self.var("LOGFERRY_TRANSFORM_EVENT_TYPE"),
			source: self.var("LOGFERRY_TRANSFORM_SOURCE"),
			sourcetype: self.var("LOGFERRY_TRANSFORM_SOURCETYPE"),
			host: self.var("LOGFERRY_TRANSFORM_HOST"),
			index: self
				.var("LOGFERRY_TRANSFORM_INDEX")
				.or_else(|| self.var("SPLUNK_INDEX")),
		})
	}

	fn load_egress(&self) -> Result<EgressConfigLayer, ConfigError> {
		Ok(EgressConfigLayer {
			enabled: self.bool("LOGFERRY_EGRESS_ENABLED")?,
			lookup_url: self.var("LOGFERRY_EGRESS_LOOKUP_URL"),
			timeout_secs: self.parsed("LOGFERRY_EGRESS_TIMEOUT_SECS")?,
		})
	}

	fn load_secrets(&self) -> Result<SecretsConfigLayer, ConfigError> {
		Ok(SecretsConfigLayer {
			schema: self.parsed("LOGFERRY_SECRETS_SCHEMA")?,
		})
	}

	fn load_logging(&self) -> Result<LoggingConfigLayer, ConfigError> {
		Ok(LoggingConfigLayer {
			level: self.var("LOGFERRY_LOG_LEVEL"),
			format: self.parsed("LOGFERRY_LOG_FORMAT")?,
		})
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<LogferryConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(LogferryConfigLayer {
			source: Some(self.load_source()?),
			hec: Some(self.load_hec()?),
			aws: Some(self.load_aws()),
			transform: Some(self.load_transform()?),
			egress: Some(self.load_egress()?),
			secrets: Some(self.load_secrets()?),
			logging: Some(self.load_logging()?),
		})
	}
}

/// Command-line argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub group_name: Option<String>,
	pub strategy: Option<FetchStrategy>,
	pub region: Option<String>,
	pub secret_schema: Option<SecretSchema>,
	pub log_level: Option<String>,
	pub log_format: Option<LogFormat>,
	pub config_file: Option<PathBuf>,
}

pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<LogferryConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let o = &self.overrides;
		let mut layer = LogferryConfigLayer::default();

		if o.group_name.is_some() || o.strategy.is_some() {
			layer.source = Some(SourceConfigLayer {
				group_name: o.group_name.clone(),
				strategy: o.strategy,
				..Default::default()
			});
		}

		if let Some(ref region) = o.region {
			layer.aws = Some(AwsConfigLayer {
				region: Some(region.clone()),
			});
		}

		if let Some(schema) = o.secret_schema {
			layer.secrets = Some(SecretsConfigLayer {
				schema: Some(schema),
			});
		}

		if o.log_level.is_some() || o.log_format.is_some() {
			layer.logging = Some(LoggingConfigLayer {
				level: o.log_level.clone(),
				format: o.log_format,
			});
		}

		Ok(layer)
	}
}
