// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret store section.

use logferry_core::SecretSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecretsConfigLayer {
	pub schema: Option<SecretSchema>,
}

impl SecretsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.schema.is_some() {
			self.schema = other.schema;
		}
	}

	pub fn finalize(self) -> SecretsConfig {
		SecretsConfig {
			schema: self.schema.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecretsConfig {
	pub schema: SecretSchema,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_to_key_value() {
		assert_eq!(
			SecretsConfigLayer::default().finalize().schema,
			SecretSchema::KeyValue
		);
	}
}
