// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Handler response contract: `{"statusCode": 200 | 500, "body": {...}}`.

use serde::{Deserialize, Serialize};

use crate::window::TimeWindow;

/// Which step of the invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
	Config,
	Fetch,
	Forward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
	pub stage: FailureStage,
	pub error: String,
	/// HTTP status returned by the ingestion endpoint, when it answered.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub upstream_status: Option<u16>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub upstream_body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationBody {
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub window: Option<TimeWindow>,
	/// Records returned by the fetcher (after the window check).
	pub fetched: usize,
	/// Events delivered to the ingestion endpoint.
	pub forwarded: usize,
	/// Records filtered out by the type discriminator.
	pub skipped: usize,
	/// Records that could not be transformed.
	pub dropped: usize,
	/// A listing had more pages than were read.
	pub truncated: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub egress_ip: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub failure: Option<Failure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
	pub status_code: u16,
	pub body: InvocationBody,
}

impl InvocationResult {
	pub const STATUS_OK: u16 = 200;
	pub const STATUS_FAILED: u16 = 500;

	pub fn success(body: InvocationBody) -> Self {
		Self {
			status_code: Self::STATUS_OK,
			body,
		}
	}

	/// Failure result; `body.failure` must describe the cause.
	pub fn failure(body: InvocationBody) -> Self {
		Self {
			status_code: Self::STATUS_FAILED,
			body,
		}
	}

	pub fn is_success(&self) -> bool {
		self.status_code == Self::STATUS_OK
	}

	pub fn failure_stage(&self) -> Option<FailureStage> {
		self.body.failure.as_ref().map(|f| f.stage)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn success_serializes_with_lambda_style_keys() {
		let result = InvocationResult::success(InvocationBody {
			message: "forwarded 2 events".to_string(),
			fetched: 2,
			forwarded: 2,
			..Default::default()
		});

		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["statusCode"], 200);
		assert_eq!(json["body"]["forwarded"], 2);
		assert!(json["body"].get("failure").is_none());
		assert!(result.is_success());
	}

	#[test]
	fn forward_failure_carries_upstream_details() {
		let result = InvocationResult::failure(InvocationBody {
			message: "forwarding failed".to_string(),
			fetched: 3,
			failure: Some(Failure {
				stage: FailureStage::Forward,
				error: "ingestion endpoint rejected batch".to_string(),
				upstream_status: Some(500),
				upstream_body: Some("{\"text\":\"Internal Error\"}".to_string()),
			}),
			..Default::default()
		});

		let json = serde_json::to_value(&result).unwrap();
		assert_eq!(json["statusCode"], 500);
		assert_eq!(
			json["body"]["failure"],
			json!({
				"stage": "forward",
				"error": "ingestion endpoint rejected batch",
				"upstream_status": 500,
				"upstream_body": "{\"text\":\"Internal Error\"}"
			})
		);
		assert_eq!(result.failure_stage(), Some(FailureStage::Forward));
		assert!(!result.is_success());
	}

	#[test]
	fn parses_back_from_json() {
		let raw = r#"{"statusCode":500,"body":{"message":"m","fetched":0,"forwarded":0,"skipped":0,"dropped":0,"truncated":false,"failure":{"stage":"fetch","error":"denied"}}}"#;
		let result: InvocationResult = serde_json::from_str(raw).unwrap();

		assert_eq!(result.failure_stage(), Some(FailureStage::Fetch));
		assert_eq!(result.body.failure.unwrap().upstream_status, None);
	}
}
