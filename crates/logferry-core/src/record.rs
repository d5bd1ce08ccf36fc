// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Raw records as read from the log-aggregation service.

use serde::{Deserialize, Serialize};

/// One log event. Read-only from logferry's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLogRecord {
	/// Event time in epoch milliseconds.
	pub timestamp_ms: i64,
	/// Message body; frequently a JSON document.
	pub message: String,
	pub group: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stream: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub event_id: Option<String>,
}

impl RawLogRecord {
	pub fn new(group: impl Into<String>, timestamp_ms: i64, message: impl Into<String>) -> Self {
		Self {
			timestamp_ms,
			message: message.into(),
			group: group.into(),
			stream: None,
			event_id: None,
		}
	}

	pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
		self.stream = Some(stream.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn optional_identifiers_are_omitted() {
		let record = RawLogRecord::new("/aws/lambda/fn", 42, "hello");
		let json = serde_json::to_value(&record).unwrap();

		assert_eq!(json["timestamp_ms"], 42);
		assert!(json.get("stream").is_none());
		assert!(json.get("event_id").is_none());
	}

	#[test]
	fn with_stream_sets_the_stream() {
		let record = RawLogRecord::new("g", 1, "m").with_stream("2024/05/02/[$LATEST]abc");
		assert_eq!(record.stream.as_deref(), Some("2024/05/02/[$LATEST]abc"));
	}
}
