// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HEC event schema.

use serde::Serialize;
use serde_json::Value;

/// Event timestamp as the ingestion endpoint expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventTime {
	/// Epoch seconds with millisecond fraction, e.g. `1714651200.123`.
	Seconds(f64),
	/// Epoch milliseconds, passed through unchanged.
	Millis(i64),
}

impl EventTime {
	pub fn seconds_from_millis(timestamp_ms: i64) -> Self {
		EventTime::Seconds(timestamp_ms as f64 / 1000.0)
	}
}

/// One event in a HEC batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HecEvent {
	pub time: EventTime,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub host: Option<String>,
	pub source: String,
	pub sourcetype: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub index: Option<String>,
	/// Either the raw message string or a structured object.
	pub event: Value,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn seconds_keep_millisecond_fraction() {
		assert_eq!(
			EventTime::seconds_from_millis(1_714_651_200_123),
			EventTime::Seconds(1_714_651_200.123)
		);
	}

	#[test]
	fn serializes_without_absent_fields() {
		let event = HecEvent {
			time: EventTime::Millis(1_714_651_200_123),
			host: None,
			source: "aws:sftp".to_string(),
			sourcetype: "aws:sftp:transfer".to_string(),
			index: None,
			event: json!({"type": "StepStarted"}),
		};

		assert_eq!(
			serde_json::to_value(&event).unwrap(),
			json!({
				"time": 1_714_651_200_123i64,
				"source": "aws:sftp",
				"sourcetype": "aws:sftp:transfer",
				"event": {"type": "StepStarted"}
			})
		);
	}

	#[test]
	fn string_event_with_host_and_index() {
		let event = HecEvent {
			time: EventTime::Seconds(1.5),
			host: Some("/aws/lambda/fn".to_string()),
			source: "/aws/lambda/fn".to_string(),
			sourcetype: "aws:cloudwatch".to_string(),
			index: Some("main".to_string()),
			event: Value::String("START RequestId: 1".to_string()),
		};
		let json = serde_json::to_value(&event).unwrap();

		assert_eq!(json["time"], json!(1.5));
		assert_eq!(json["host"], "/aws/lambda/fn");
		assert_eq!(json["index"], "main");
		assert_eq!(json["event"], "START RequestId: 1");
	}
}
