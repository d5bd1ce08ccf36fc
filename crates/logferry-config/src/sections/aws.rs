// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! AWS section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsConfigLayer {
	pub region: Option<String>,
}

impl AwsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.region.is_some() {
			self.region = other.region;
		}
	}

	pub fn finalize(self) -> AwsConfig {
		AwsConfig {
			region: self.region.filter(|r| !r.trim().is_empty()),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AwsConfig {
	/// `None` defers to the SDK provider chain (`AWS_REGION`, profile, IMDS).
	pub region: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_region_defers_to_sdk() {
		let config = AwsConfigLayer {
			region: Some(String::new()),
		}
		.finalize();
		assert!(config.region.is_none());
	}

	#[test]
	fn merge_overrides_region() {
		let mut layer = AwsConfigLayer {
			region: Some("us-east-1".to_string()),
		};
		layer.merge(AwsConfigLayer {
			region: Some("eu-west-2".to_string()),
		});
		assert_eq!(layer.finalize().region.as_deref(), Some("eu-west-2"));
	}
}
