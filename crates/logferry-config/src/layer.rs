// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration layer for merging from multiple sources.

use serde::Deserialize;

use crate::sections::{
	AwsConfigLayer, EgressConfigLayer, HecConfigLayer, LoggingConfigLayer, SecretsConfigLayer,
	SourceConfigLayer, TransformConfigLayer,
};

/// All fields are `Option` so that a layer only overrides what it sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogferryConfigLayer {
	#[serde(default)]
	pub source: Option<SourceConfigLayer>,
	#[serde(default)]
	pub hec: Option<HecConfigLayer>,
	#[serde(default)]
	pub aws: Option<AwsConfigLayer>,
	#[serde(default)]
	pub transform: Option<TransformConfigLayer>,
	#[serde(default)]
	pub egress: Option<EgressConfigLayer>,
	#[serde(default)]
	pub secrets: Option<SecretsConfigLayer>,
	#[serde(default)]
	pub logging: Option<LoggingConfigLayer>,
}

impl LogferryConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: LogferryConfigLayer) {
		merge_option(&mut self.source, other.source, SourceConfigLayer::merge);
		merge_option(&mut self.hec, other.hec, HecConfigLayer::merge);
		merge_option(&mut self.aws, other.aws, AwsConfigLayer::merge);
		merge_option(
			&mut self.transform,
			other.transform,
			TransformConfigLayer::merge,
		);
		merge_option(&mut self.egress, other.egress, EgressConfigLayer::merge);
		merge_option(&mut self.secrets, other.secrets, SecretsConfigLayer::merge);
		merge_option(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}
