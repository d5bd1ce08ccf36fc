// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Log source section: which group to read and how much of it.

use std::time::Duration;

use logferry_core::{FetchStrategy, Pagination};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Stream enumeration looks back 30 minutes.
pub const DEFAULT_STREAM_WINDOW_SECS: u64 = 30 * 60;
/// The filtered query looks back one hour.
pub const DEFAULT_FILTER_WINDOW_SECS: u64 = 60 * 60;
pub const DEFAULT_RESULT_CAP: u32 = 100;
/// FilterLogEvents accepts at most 10,000 events per call.
pub const MAX_RESULT_CAP: u32 = 10_000;
pub const DEFAULT_MAX_PAGES: u32 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceConfigLayer {
	pub group_name: Option<String>,
	pub stream_name: Option<String>,
	pub strategy: Option<FetchStrategy>,
	pub window_offset_secs: Option<u64>,
	pub result_cap: Option<u32>,
	pub pagination: Option<Pagination>,
	pub max_pages: Option<u32>,
}

impl SourceConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.group_name.is_some() {
			self.group_name = other.group_name;
		}
		if other.stream_name.is_some() {
			self.stream_name = other.stream_name;
		}
		if other.strategy.is_some() {
			self.strategy = other.strategy;
		}
		if other.window_offset_secs.is_some() {
			self.window_offset_secs = other.window_offset_secs;
		}
		if other.result_cap.is_some() {
			self.result_cap = other.result_cap;
		}
		if other.pagination.is_some() {
			self.pagination = other.pagination;
		}
		if other.max_pages.is_some() {
			self.max_pages = other.max_pages;
		}
	}

	pub fn finalize(self) -> Result<SourceConfig, ConfigError> {
		let strategy = self.strategy.unwrap_or_default();
		let window_offset_secs = self.window_offset_secs.unwrap_or(match strategy {
			FetchStrategy::StreamEnumeration => DEFAULT_STREAM_WINDOW_SECS,
			FetchStrategy::FilteredQuery => DEFAULT_FILTER_WINDOW_SECS,
		});
		let result_cap = self.result_cap.unwrap_or(DEFAULT_RESULT_CAP);
		let max_pages = self.max_pages.unwrap_or(DEFAULT_MAX_PAGES);

		if window_offset_secs == 0 {
			return Err(ConfigError::InvalidValue {
				key: "source.window_offset_secs".to_string(),
				message: "must be at least 1".to_string(),
			});
		}
		if result_cap == 0 || result_cap > MAX_RESULT_CAP {
			return Err(ConfigError::InvalidValue {
				key: "source.result_cap".to_string(),
				message: format!("{result_cap} is outside 1..={MAX_RESULT_CAP}"),
			});
		}
		if max_pages == 0 {
			return Err(ConfigError::InvalidValue {
				key: "source.max_pages".to_string(),
				message: "must be at least 1".to_string(),
			});
		}

		Ok(SourceConfig {
			group_name: self.group_name.filter(|g| !g.trim().is_empty()),
			stream_name: self.stream_name.filter(|s| !s.trim().is_empty()),
			strategy,
			window_offset_secs,
			result_cap,
			pagination: self.pagination.unwrap_or_default(),
			max_pages,
		})
	}
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceConfig {
	/// Required for forwarding; other commands run without it.
	pub group_name: Option<String>,
	/// Restricts stream enumeration to one stream.
	pub stream_name: Option<String>,
	pub strategy: FetchStrategy,
	pub window_offset_secs: u64,
	/// Page size for the filtered query.
	pub result_cap: u32,
	pub pagination: Pagination,
	/// Upper bound on pages read per listing in exhaustive mode.
	pub max_pages: u32,
}

impl SourceConfig {
	pub fn window_offset(&self) -> Duration {
		Duration::from_secs(self.window_offset_secs)
	}

	pub fn require_group_name(&self) -> Result<&str, ConfigError> {
		self.group_name.as_deref().ok_or(ConfigError::MissingField {
			key: "source.group_name",
			env: "LOGFERRY_SOURCE_GROUP_NAME",
		})
	}
}

impl Default for SourceConfig {
	fn default() -> Self {
		SourceConfigLayer::default()
			.finalize()
			.unwrap_or_else(|_| unreachable!("built-in source defaults are valid"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_follow_stream_enumeration() {
		let config = SourceConfigLayer::default().finalize().unwrap();
		assert_eq!(config.strategy, FetchStrategy::StreamEnumeration);
		assert_eq!(config.window_offset(), Duration::from_secs(1800));
		assert_eq!(config.result_cap, 100);
		assert_eq!(config.pagination, Pagination::SinglePage);
		assert!(config.group_name.is_none());
	}

	#[test]
	fn filtered_query_defaults_to_one_hour() {
		let config = SourceConfigLayer {
			strategy: Some(FetchStrategy::FilteredQuery),
			..Default::default()
		}
		.finalize()
		.unwrap();
		assert_eq!(config.window_offset_secs, 3600);
	}

	#[test]
	fn explicit_offset_wins_over_strategy_default() {
		let config = SourceConfigLayer {
			strategy: Some(FetchStrategy::FilteredQuery),
			window_offset_secs: Some(300),
			..Default::default()
		}
		.finalize()
		.unwrap();
		assert_eq!(config.window_offset_secs, 300);
	}

	#[test]
	fn result_cap_bounds() {
		for cap in [0, MAX_RESULT_CAP + 1] {
			let err = SourceConfigLayer {
				result_cap: Some(cap),
				..Default::default()
			}
			.finalize()
			.unwrap_err();
			assert!(matches!(err, ConfigError::InvalidValue { .. }));
		}
	}

	#[test]
	fn zero_offset_and_pages_are_rejected() {
		assert!(SourceConfigLayer {
			window_offset_secs: Some(0),
			..Default::default()
		}
		.finalize()
		.is_err());
		assert!(SourceConfigLayer {
			max_pages: Some(0),
			..Default::default()
		}
		.finalize()
		.is_err());
	}

	#[test]
	fn blank_group_is_treated_as_missing() {
		let config = SourceConfigLayer {
			group_name: Some("  ".to_string()),
			..Default::default()
		}
		.finalize()
		.unwrap();
		assert!(matches!(
			config.require_group_name(),
			Err(ConfigError::MissingField { .. })
		));
	}

	#[test]
	fn merge_prefers_other() {
		let mut base = SourceConfigLayer {
			group_name: Some("/aws/lambda/a".to_string()),
			result_cap: Some(50),
			..Default::default()
		};
		base.merge(SourceConfigLayer {
			group_name: Some("/aws/transfer/s-123".to_string()),
			..Default::default()
		});
		assert_eq!(base.group_name.as_deref(), Some("/aws/transfer/s-123"));
		assert_eq!(base.result_cap, Some(50));
	}

	#[test]
	fn parses_from_toml() {
		let layer: SourceConfigLayer = toml::from_str(
			r#"
			group_name = "/aws/transfer/s-123"
			strategy = "filtered-query"
			pagination = "exhaustive"
			max_pages = 5
			"#,
		)
		.unwrap();
		assert_eq!(layer.strategy, Some(FetchStrategy::FilteredQuery));
		assert_eq!(layer.pagination, Some(Pagination::Exhaustive));
		assert_eq!(layer.max_pages, Some(5));
	}
}
