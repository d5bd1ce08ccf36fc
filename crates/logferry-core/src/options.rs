// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Behaviour switches shared by configuration, CLI and pipeline components.
//!
//! All variants use kebab-case names in TOML, environment variables and CLI
//! flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {kind} '{value}', expected one of: {expected}")]
pub struct ParseOptionError {
	pub kind: &'static str,
	pub value: String,
	pub expected: &'static str,
}

/// How records are pulled from a log group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchStrategy {
	/// List streams (most recent first) and read each one.
	#[default]
	StreamEnumeration,
	/// One filter query across the whole group, capped by `result_cap`.
	FilteredQuery,
}

/// Whether continuation tokens are followed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pagination {
	/// One call per listing; anything beyond the first page is reported as
	/// truncated and not fetched.
	#[default]
	SinglePage,
	/// Follow tokens until exhausted or the page limit is hit.
	Exhaustive,
}

/// Top-level JSON shape of a HEC batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadShape {
	/// `{"event": [...]}`
	#[default]
	EventArray,
	/// `{"channel": "<id>", "events": [...]}`
	ChannelEvents,
}

/// Mapping applied to each raw record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformProfile {
	/// Message forwarded verbatim with seconds-precision time.
	#[default]
	Passthrough,
	/// JSON transfer-workflow step events, filtered by type and flattened.
	TransferWorkflow,
}

/// Expected shape of a decoded secret payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecretSchema {
	/// JSON object, values looked up by key.
	#[default]
	KeyValue,
	/// JSON array, values looked up by position.
	Positional,
}

impl FetchStrategy {
	pub fn as_str(&self) -> &'static str {
		match self {
			FetchStrategy::StreamEnumeration => "stream-enumeration",
			FetchStrategy::FilteredQuery => "filtered-query",
		}
	}
}

impl FromStr for FetchStrategy {
	type Err = ParseOptionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"stream-enumeration" | "streams" => Ok(FetchStrategy::StreamEnumeration),
			"filtered-query" | "filter" => Ok(FetchStrategy::FilteredQuery),
			_ => Err(ParseOptionError {
				kind: "fetch strategy",
				value: s.to_string(),
				expected: "stream-enumeration, filtered-query",
			}),
		}
	}
}

impl Pagination {
	pub fn as_str(&self) -> &'static str {
		match self {
			Pagination::SinglePage => "single-page",
			Pagination::Exhaustive => "exhaustive",
		}
	}
}

impl FromStr for Pagination {
	type Err = ParseOptionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"single-page" | "single" => Ok(Pagination::SinglePage),
			"exhaustive" | "all" => Ok(Pagination::Exhaustive),
			_ => Err(ParseOptionError {
				kind: "pagination",
				value: s.to_string(),
				expected: "single-page, exhaustive",
			}),
		}
	}
}

impl PayloadShape {
	pub fn as_str(&self) -> &'static str {
		match self {
			PayloadShape::EventArray => "event-array",
			PayloadShape::ChannelEvents => "channel-events",
		}
	}
}

impl FromStr for PayloadShape {
	type Err = ParseOptionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"event-array" => Ok(PayloadShape::EventArray),
			"channel-events" => Ok(PayloadShape::ChannelEvents),
			_ => Err(ParseOptionError {
				kind: "payload shape",
				value: s.to_string(),
				expected: "event-array, channel-events",
			}),
		}
	}
}

impl TransformProfile {
	pub fn as_str(&self) -> &'static str {
		match self {
			TransformProfile::Passthrough => "passthrough",
			TransformProfile::TransferWorkflow => "transfer-workflow",
		}
	}
}

impl FromStr for TransformProfile {
	type Err = ParseOptionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"passthrough" => Ok(TransformProfile::Passthrough),
			"transfer-workflow" => Ok(TransformProfile::TransferWorkflow),
			_ => Err(ParseOptionError {
				kind: "transform profile",
				value: s.to_string(),
				expected: "passthrough, transfer-workflow",
			}),
		}
	}
}

impl SecretSchema {
	pub fn as_str(&self) -> &'static str {
		match self {
			SecretSchema::KeyValue => "key-value",
			SecretSchema::Positional => "positional",
		}
	}
}

impl FromStr for SecretSchema {
	type Err = ParseOptionError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"key-value" => Ok(SecretSchema::KeyValue),
			"positional" => Ok(SecretSchema::Positional),
			_ => Err(ParseOptionError {
				kind: "secret schema",
				value: s.to_string(),
				expected: "key-value, positional",
			}),
		}
	}
}

impl fmt::Display for FetchStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for Pagination {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for PayloadShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for TransformProfile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl fmt::Display for SecretSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
