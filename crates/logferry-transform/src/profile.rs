// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Record-to-event mappings.

use logferry_core::{EventTime, HecEvent, RawLogRecord, TransformProfile};
use serde::Serialize;
use serde_json::Value;

use crate::error::TransformError;

pub const CLOUDWATCH_SOURCETYPE: &str = "aws:cloudwatch";
pub const TRANSFER_SOURCE: &str = "aws:sftp";
pub const TRANSFER_SOURCETYPE: &str = "aws:sftp:transfer";
pub const TRANSFER_INDEX: &str = "splunk_demo";

/// Maps one raw record to at most one event.
///
/// `Ok(None)` means the record was filtered out on purpose; `Err` means it
/// could not be mapped.
pub trait EventTransformer: Send + Sync {
	fn transform(&self, record: &RawLogRecord) -> Result<Option<HecEvent>, TransformError>;
}

/// Metadata that replaces a profile's built-in values when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
	pub source: Option<String>,
	pub sourcetype: Option<String>,
	pub host: Option<String>,
	pub index: Option<String>,
}

/// Everything needed to build a transformer for a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSettings {
	pub profile: TransformProfile,
	pub event_type: String,
	pub overrides: Overrides,
	/// Attached to transfer events as `lambda_nat_ip` when known.
	pub egress_ip: Option<String>,
}

impl Default for TransformSettings {
	fn default() -> Self {
		Self {
			profile: TransformProfile::default(),
			event_type: "StepStarted".to_string(),
			overrides: Overrides::default(),
			egress_ip: None,
		}
	}
}

pub fn transformer_for(settings: &TransformSettings) -> Box<dyn EventTransformer> {
	match settings.profile {
		TransformProfile::Passthrough => Box::new(Passthrough::new(settings.overrides.clone())),
		TransformProfile::TransferWorkflow => Box::new(TransferWorkflow::new(
			settings.event_type.clone(),
			settings.overrides.clone(),
			settings.egress_ip.clone(),
		)),
	}
}

/// Forwards the message verbatim, keyed by its log group.
#[derive(Debug, Clone, Default)]
pub struct Passthrough {
	overrides: Overrides,
}

impl Passthrough {
	pub fn new(overrides: Overrides) -> Self {
		Self { overrides }
	}
}

impl EventTransformer for Passthrough {
	fn transform(&self, record: &RawLogRecord) -> Result<Option<HecEvent>, TransformError> {
		let o = &self.overrides;
		Ok(Some(HecEvent {
			time: EventTime::seconds_from_millis(record.timestamp_ms),
			host: Some(o.host.clone().unwrap_or_else(|| record.group.clone())),
			source: o.source.clone().unwrap_or_else(|| record.group.clone()),
			sourcetype: o
				.sourcetype
				.clone()
				.unwrap_or_else(|| CLOUDWATCH_SOURCETYPE.to_string()),
			index: o.index.clone(),
			event: Value::String(record.message.clone()),
		}))
	}
}

/// Keeps transfer-workflow step events of one type and flattens them.
#[derive(Debug, Clone)]
pub struct TransferWorkflow {
	event_type: String,
	overrides: Overrides,
	egress_ip: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferStepEvent {
	#[serde(rename = "type")]
	kind: Value,
	step_type: Value,
	step_name: Value,
	workflow_id: Value,
	execution_id: Value,
	server_id: Value,
	username: Value,
	session_id: Value,
	file_location: FileLocation,
	#[serde(rename = "lambda_nat_ip", skip_serializing_if = "Option::is_none")]
	lambda_nat_ip: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileLocation {
	backing_store: Value,
	bucket: Value,
	key: Value,
	etag: Value,
}

fn field<'a>(message: &'a Value, pointer: &str, path: &'static str) -> Result<&'a Value, TransformError> {
	message
		.pointer(pointer)
		.ok_or(TransformError::MissingField { path })
}

impl TransferWorkflow {
	pub fn new(event_type: impl Into<String>, overrides: Overrides, egress_ip: Option<String>) -> Self {
		Self {
			event_type: event_type.into(),
			overrides,
			egress_ip,
		}
	}

	fn flatten(&self, message: &Value) -> Result<TransferStepEvent, TransformError> {
		let get = |pointer: &str, path: &'static str| field(message, pointer, path).cloned();

		Ok(TransferStepEvent {
			kind: get("/type", "type")?,
			step_type: get("/details/stepType", "details.stepType")?,
			step_name: get("/details/stepName", "details.stepName")?,
			workflow_id: get("/details/workflowId", "details.workflowId")?,
			execution_id: get("/details/executionId", "details.executionId")?,
			server_id: get(
				"/details/transferDetails/serverId",
				"details.transferDetails.serverId",
			)?,
			username: get(
				"/details/transferDetails/username",
				"details.transferDetails.username",
			)?,
			session_id: get(
				"/details/transferDetails/sessionId",
				"details.transferDetails.sessionId",
			)?,
			file_location: FileLocation {
				backing_store: get(
					"/details/input/fileLocation/backingStore",
					"details.input.fileLocation.backingStore",
				)?,
				bucket: get(
					"/details/input/fileLocation/bucket",
					"details.input.fileLocation.bucket",
				)?,
				key: get(
					"/details/input/fileLocation/key",
					"details.input.fileLocation.key",
				)?,
				etag: get(
					"/details/input/fileLocation/etag",
					"details.input.fileLocation.etag",
				)?,
			},
			lambda_nat_ip: self.egress_ip.clone(),
		})
	}
}

impl EventTransformer for TransferWorkflow {
	fn transform(&self, record: &RawLogRecord) -> Result<Option<HecEvent>, TransformError> {
		let message: Value = serde_json::from_str(&record.message)?;

		let kind = field(&message, "/type", "type")?;
		if kind.as_str() != Some(self.event_type.as_str()) {
			return Ok(None);
		}

		let flattened = self.flatten(&message)?;
		let event = serde_json::to_value(flattened)?;
		let o = &self.overrides;

		Ok(Some(HecEvent {
			time: EventTime::Millis(record.timestamp_ms),
			host: o.host.clone(),
			source: o.source.clone().unwrap_or_else(|| TRANSFER_SOURCE.to_string()),
			sourcetype: o
				.sourcetype
				.clone()
				.unwrap_or_else(|| TRANSFER_SOURCETYPE.to_string()),
			index: Some(o.index.clone().unwrap_or_else(|| TRANSFER_INDEX.to_string())),
			event,
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn step_started() -> Value {
		json!({
			"type": "StepStarted",
			"details": {
				"stepType": "COPY",
				"stepName": "copy-to-archive",
				"workflowId": "w-1234567890abcdef0",
				"executionId": "4e1a2b3c-0000-4000-8000-1234567890ab",
				"transferDetails": {
					"serverId": "s-01234567890abcdef",
					"username": "partner-upload",
					"sessionId": "aa11bb22cc33dd44"
				},
				"input": {
					"fileLocation": {
						"backingStore": "S3",
						"bucket": "inbound-files",
						"key": "partner/2024/05/02/report.csv",
						"etag": "\"9b2cf535f27731c974343645a3985328\""
					}
				}
			}
		})
	}

	fn record(message: &str) -> RawLogRecord {
		RawLogRecord::new("/aws/transfer/s-01234567890abcdef", 1_714_651_200_123, message)
	}

	#[test]
	fn passthrough_uses_group_as_host_and_source() {
		let event = Passthrough::default()
			.transform(&record("START RequestId: abc"))
			.unwrap()
			.unwrap();

		assert_eq!(event.time, EventTime::Seconds(1_714_651_200.123));
		assert_eq!(event.host.as_deref(), Some("/aws/transfer/s-01234567890abcdef"));
		assert_eq!(event.source, "/aws/transfer/s-01234567890abcdef");
		assert_eq!(event.sourcetype, "aws:cloudwatch");
		assert!(event.index.is_none());
		assert_eq!(event.event, json!("START RequestId: abc"));
	}

	#[test]
	fn passthrough_honours_overrides() {
		let transformer = Passthrough::new(Overrides {
			source: Some("lambda".to_string()),
			index: Some("main".to_string()),
			..Default::default()
		});
		let event = transformer.transform(&record("x")).unwrap().unwrap();
		assert_eq!(event.source, "lambda");
		assert_eq!(event.index.as_deref(), Some("main"));
	}

	#[test]
	fn transfer_event_is_fully_flattened() {
		let transformer =
			TransferWorkflow::new("StepStarted", Overrides::default(), Some("203.0.113.7".to_string()));
		let event = transformer
			.transform(&record(&step_started().to_string()))
			.unwrap()
			.unwrap();

		assert_eq!(event.time, EventTime::Millis(1_714_651_200_123));
		assert_eq!(event.source, "aws:sftp");
		assert_eq!(event.sourcetype, "aws:sftp:transfer");
		assert_eq!(event.index.as_deref(), Some("splunk_demo"));
		assert!(event.host.is_none());
		assert_eq!(
			event.event,
			json!({
				"type": "StepStarted",
				"stepType": "COPY",
				"stepName": "copy-to-archive",
				"workflowId": "w-1234567890abcdef0",
				"executionId": "4e1a2b3c-0000-4000-8000-1234567890ab",
				"serverId": "s-01234567890abcdef",
				"username": "partner-upload",
				"sessionId": "aa11bb22cc33dd44",
				"fileLocation": {
					"backingStore": "S3",
					"bucket": "inbound-files",
					"key": "partner/2024/05/02/report.csv",
					"etag": "\"9b2cf535f27731c974343645a3985328\""
				},
				"lambda_nat_ip": "203.0.113.7"
			})
		);
	}

	#[test]
	fn egress_ip_is_omitted_when_unknown() {
		let transformer = TransferWorkflow::new("StepStarted", Overrides::default(), None);
		let event = transformer
			.transform(&record(&step_started().to_string()))
			.unwrap()
			.unwrap();
		assert!(event.event.get("lambda_nat_ip").is_none());
	}

	#[test]
	fn other_types_are_skipped() {
		let mut message = step_started();
		message["type"] = json!("StepCompleted");
		let transformer = TransferWorkflow::new("StepStarted", Overrides::default(), None);

		assert!(transformer
			.transform(&record(&message.to_string()))
			.unwrap()
			.is_none());
	}

	#[test]
	fn invalid_json_is_an_error() {
		let transformer = TransferWorkflow::new("StepStarted", Overrides::default(), None);
		let err = transformer.transform(&record("{not json")).unwrap_err();
		assert!(matches!(err, TransformError::InvalidJson(_)));
	}

	#[test]
	fn missing_nested_field_is_named() {
		let mut message = step_started();
		message["details"]["input"]["fileLocation"]
			.as_object_mut()
			.unwrap()
			.remove("etag");
		let transformer = TransferWorkflow::new("StepStarted", Overrides::default(), None);

		let err = transformer
			.transform(&record(&message.to_string()))
			.unwrap_err();
		assert!(matches!(
			err,
			TransformError::MissingField {
				path: "details.input.fileLocation.etag"
			}
		));
	}

	#[test]
	fn missing_type_is_a_missing_field() {
		let transformer = TransferWorkflow::new("StepStarted", Overrides::default(), None);
		let err = transformer.transform(&record("{\"details\":{}}")).unwrap_err();
		assert!(matches!(err, TransformError::MissingField { path: "type" }));
	}

	#[test]
	fn settings_select_the_profile() {
		let settings = TransformSettings {
			profile: TransformProfile::TransferWorkflow,
			..Default::default()
		};
		let transformer = transformer_for(&settings);
		assert!(transformer.transform(&record("plain text")).is_err());

		let transformer = transformer_for(&TransformSettings::default());
		assert!(transformer.transform(&record("plain text")).unwrap().is_some());
	}
}
