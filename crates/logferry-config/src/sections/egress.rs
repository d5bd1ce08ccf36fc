// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Egress IP discovery section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_LOOKUP_URL: &str = "https://api.ipify.org?format=json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EgressConfigLayer {
	pub enabled: Option<bool>,
	pub lookup_url: Option<String>,
	pub timeout_secs: Option<u64>,
}

impl EgressConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.lookup_url.is_some() {
			self.lookup_url = other.lookup_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	pub fn finalize(self) -> Result<EgressConfig, ConfigError> {
		let timeout_secs = self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
		if timeout_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "egress.timeout_secs".to_string(),
				message: "must be at least 1".to_string(),
			});
		}

		Ok(EgressConfig {
			enabled: self.enabled.unwrap_or(false),
			lookup_url: self
				.lookup_url
				.filter(|u| !u.trim().is_empty())
				.unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string()),
			timeout_secs,
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EgressConfig {
	pub enabled: bool,
	pub lookup_url: String,
	pub timeout_secs: u64,
}

impl EgressConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

impl Default for EgressConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			lookup_url: DEFAULT_LOOKUP_URL.to_string(),
			timeout_secs: DEFAULT_TIMEOUT_SECS,
		}
	}
}
