// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP Event Collector section.

use std::time::Duration;

use logferry_common_config::SecretString;
use logferry_core::PayloadShape;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_AUTH_SCHEME: &str = "Splunk";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HecConfigLayer {
	pub endpoint_url: Option<String>,
	#[serde(skip_serializing)]
	pub token: Option<SecretString>,
	pub channel_id: Option<String>,
	pub auth_scheme: Option<String>,
	pub payload_shape: Option<PayloadShape>,
	pub verify_tls: Option<bool>,
	pub timeout_secs: Option<u64>,
}

impl HecConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.endpoint_url.is_some() {
			self.endpoint_url = other.endpoint_url;
		}
		if other.token.is_some() {
			self.token = other.token;
		}
		if other.channel_id.is_some() {
			self.channel_id = other.channel_id;
		}
		if other.auth_scheme.is_some() {
			self.auth_scheme = other.auth_scheme;
		}
		if other.payload_shape.is_some() {
			self.payload_shape = other.payload_shape;
		}
		if other.verify_tls.is_some() {
			self.verify_tls = other.verify_tls;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	/// `Ok(None)` when no endpoint, token or channel is set at all; an error
	/// when only some of them are.
	pub fn build(self) -> Result<Option<HecConfig>, ConfigError> {
		let endpoint_url = self.endpoint_url.filter(|u| !u.trim().is_empty());
		let token = self.token.filter(|t| !t.is_blank());
		let channel_id = self.channel_id.filter(|c| !c.trim().is_empty());

		if endpoint_url.is_none() && token.is_none() && channel_id.is_none() {
			return Ok(None);
		}

		let endpoint_url = endpoint_url.ok_or(ConfigError::MissingField {
			key: "hec.endpoint_url",
			env: "LOGFERRY_HEC_ENDPOINT_URL",
		})?;
		let token = token.ok_or(ConfigError::MissingField {
			key: "hec.token",
			env: "LOGFERRY_HEC_TOKEN",
		})?;
		let channel_id = channel_id.ok_or(ConfigError::MissingField {
			key: "hec.channel_id",
			env: "LOGFERRY_HEC_CHANNEL_ID",
		})?;

		if !(endpoint_url.starts_with("https://") || endpoint_url.starts_with("http://")) {
			return Err(ConfigError::InvalidValue {
				key: "hec.endpoint_url".to_string(),
				message: format!("'{endpoint_url}' is not an http(s) URL"),
			});
		}

		let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "hec.timeout_secs".to_string(),
				message: "must be at least 1".to_string(),
			});
		}

		Ok(Some(HecConfig {
			endpoint_url,
			token,
			channel_id,
			auth_scheme: self
				.auth_scheme
				.filter(|s| !s.trim().is_empty())
				.unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_string()),
			payload_shape: self.payload_shape.unwrap_or_default(),
			verify_tls: self.verify_tls.unwrap_or(true),
			timeout_secs,
		}))
	}
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HecConfig {
	pub endpoint_url: String,
	/// Serialized as `[REDACTED]`.
	pub token: SecretString,
	pub channel_id: String,
	pub auth_scheme: String,
	pub payload_shape: PayloadShape,
	pub verify_tls: bool,
	pub timeout_secs: u64,
}

impl HecConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn complete() -> HecConfigLayer {
		HecConfigLayer {
			endpoint_url: Some("https://hec.example.com:8088/services/collector/event".to_string()),
			token: Some("hec-token".into()),
			channel_id: Some("18fafdc0-bc0a-3845-a038-4deef382c6d2".to_string()),
			..Default::default()
		}
	}

	#[test]
	fn empty_layer_is_unconfigured() {
		assert!(HecConfigLayer::default().build().unwrap().is_none());
	}

	#[test]
	fn complete_layer_gets_secure_defaults() {
		let config = complete().build().unwrap().unwrap();
		assert_eq!(config.auth_scheme, "Splunk");
		assert_eq!(config.payload_shape, PayloadShape::EventArray);
		assert!(config.verify_tls);
		assert_eq!(config.timeout(), Duration::from_secs(30));
	}

	#[test]
	fn partial_layer_names_the_missing_field() {
		let layer = HecConfigLayer {
			channel_id: None,
			..complete()
		};
		let err = layer.build().unwrap_err();
		assert!(matches!(
			err,
			ConfigError::MissingField {
				key: "hec.channel_id",
				..
			}
		));
	}

	#[test]
	fn blank_token_counts_as_missing() {
		let layer = HecConfigLayer {
			token: Some("   ".into()),
			..complete()
		};
		assert!(matches!(
			layer.build(),
			Err(ConfigError::MissingField { key: "hec.token", .. })
		));
	}

	#[test]
	fn non_http_endpoint_is_rejected() {
		let layer = HecConfigLayer {
			endpoint_url: Some("hec.example.com:8088".to_string()),
			..complete()
		};
		assert!(matches!(
			layer.build(),
			Err(ConfigError::InvalidValue { .. })
		));
	}

	#[test]
	fn token_is_never_serialized() {
		let config = complete().build().unwrap().unwrap();
		let json = serde_json::to_string(&config).unwrap();
		assert!(!json.contains("hec-token"));
		assert!(json.contains("[REDACTED]"));

		let layer_json = serde_json::to_string(&complete()).unwrap();
		assert!(!layer_json.contains("hec-token"));
	}

	#[test]
	fn parses_from_toml() {
		let layer: HecConfigLayer = toml::from_str(
			r#"
			endpoint_url = "https://hec.example.com:8088/services/collector/event"
			token = "from-toml"
			channel_id = "chan"
			payload_shape = "channel-events"
			verify_tls = false
			"#,
		)
		.unwrap();
		let config = layer.build().unwrap().unwrap();
		assert_eq!(config.token.expose(), "from-toml");
		assert_eq!(config.payload_shape, PayloadShape::ChannelEvents);
		assert!(!config.verify_tls);
	}
}
