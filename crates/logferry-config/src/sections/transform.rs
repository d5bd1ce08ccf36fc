// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event transform section.

use logferry_core::TransformProfile;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EVENT_TYPE: &str = "StepStarted";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransformConfigLayer {
	pub profile: Option<TransformProfile>,
	pub event_type: Option<String>,
	pub source: Option<String>,
	pub sourcetype: Option<String>,
	pub host: Option<String>,
	pub index: Option<String>,
}

impl TransformConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.profile.is_some() {
			self.profile = other.profile;
		}
		if other.event_type.is_some() {
			self.event_type = other.event_type;
		}
		if other.source.is_some() {
			self.source = other.source;
		}
		if other.sourcetype.is_some() {
			self.sourcetype = other.sourcetype;
		}
		if other.host.is_some() {
			self.host = other.host;
		}
		if other.index.is_some() {
			self.index = other.index;
		}
	}

	pub fn finalize(self) -> TransformConfig {
		let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
		TransformConfig {
			profile: self.profile.unwrap_or_default(),
			event_type: non_blank(self.event_type).unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string()),
			source: non_blank(self.source),
			sourcetype: non_blank(self.sourcetype),
			host: non_blank(self.host),
			index: non_blank(self.index),
		}
	}
}

/// Unset overrides fall back to the profile's own values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformConfig {
	pub profile: TransformProfile,
	/// Discriminator kept by the transfer-workflow profile.
	pub event_type: String,
	pub source: Option<String>,
	pub sourcetype: Option<String>,
	pub host: Option<String>,
	pub index: Option<String>,
}

impl Default for TransformConfig {
	fn default() -> Self {
		TransformConfigLayer::default().finalize()
	}
}
