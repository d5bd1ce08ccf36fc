// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Decoding a secret against an expected schema.

use std::fmt;

use logferry_core::SecretSchema;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::store::{RawSecret, SecretStore};

/// A decoded secret. `Debug` lists keys (or the length) but never values.
#[derive(Clone, PartialEq)]
pub enum SecretPayload {
	KeyValue(Map<String, Value>),
	Positional(Vec<Value>),
}

impl SecretPayload {
	pub fn schema(&self) -> SecretSchema {
		match self {
			SecretPayload::KeyValue(_) => SecretSchema::KeyValue,
			SecretPayload::Positional(_) => SecretSchema::Positional,
		}
	}

	/// Value under `key`; always `None` for positional payloads.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			SecretPayload::KeyValue(map) => map.get(key),
			SecretPayload::Positional(_) => None,
		}
	}

	/// Value at `index`; always `None` for key-value payloads.
	pub fn at(&self, index: usize) -> Option<&Value> {
		match self {
			SecretPayload::KeyValue(_) => None,
			SecretPayload::Positional(values) => values.get(index),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			SecretPayload::KeyValue(map) => map.len(),
			SecretPayload::Positional(values) => values.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl fmt::Debug for SecretPayload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SecretPayload::KeyValue(map) => f
				.debug_struct("KeyValue")
				.field("keys", &map.keys().collect::<Vec<_>>())
				.finish(),
			SecretPayload::Positional(values) => f
				.debug_struct("Positional")
				.field("len", &values.len())
				.finish(),
		}
	}
}

/// Why no secret was returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbsentReason {
	/// The store call failed (permissions, missing secret, network).
	Retrieval(String),
	/// The store returned neither a string nor a binary value.
	NoPayload,
	/// The value is not JSON.
	Decode(String),
	/// Valid JSON of the wrong shape for the requested schema.
	SchemaMismatch {
		expected: SecretSchema,
		found: &'static str,
	},
}

impl fmt::Display for AbsentReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AbsentReason::Retrieval(message) => write!(f, "retrieval failed: {message}"),
			AbsentReason::NoPayload => f.write_str("secret has no string or binary value"),
			AbsentReason::Decode(message) => write!(f, "secret is not valid JSON: {message}"),
			AbsentReason::SchemaMismatch { expected, found } => {
				write!(f, "expected a {expected} secret, found a JSON {found}")
			}
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum SecretLookup {
	Found(SecretPayload),
	Absent(AbsentReason),
}

impl SecretLookup {
	pub fn payload(&self) -> Option<&SecretPayload> {
		match self {
			SecretLookup::Found(payload) => Some(payload),
			SecretLookup::Absent(_) => None,
		}
	}

	pub fn is_found(&self) -> bool {
		matches!(self, SecretLookup::Found(_))
	}
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Decode `bytes` as JSON and check it against `schema`.
pub fn decode(bytes: &[u8], schema: SecretSchema) -> SecretLookup {
	let value: Value = match serde_json::from_slice(bytes) {
		Ok(value) => value,
		Err(e) => return SecretLookup::Absent(AbsentReason::Decode(e.to_string())),
	};

	match (schema, value) {
		(SecretSchema::KeyValue, Value::Object(map)) => SecretLookup::Found(SecretPayload::KeyValue(map)),
		(SecretSchema::Positional, Value::Array(values)) => {
			SecretLookup::Found(SecretPayload::Positional(values))
		}
		(expected, other) => SecretLookup::Absent(AbsentReason::SchemaMismatch {
			expected,
			found: json_kind(&other),
		}),
	}
}

/// Fetch and decode one secret. Never fails; problems come back as
/// [`SecretLookup::Absent`] and are logged.
pub async fn fetch_secret(store: &dyn SecretStore, secret_id: &str, schema: SecretSchema) -> SecretLookup {
	debug!(secret_id, schema = %schema, "fetching secret");

	let lookup = match store.get_secret_value(secret_id).await {
		Ok(RawSecret::Text(text)) => decode(text.expose().as_bytes(), schema),
		Ok(RawSecret::Binary(bytes)) => decode(bytes.expose(), schema),
		Ok(RawSecret::Empty) => SecretLookup::Absent(AbsentReason::NoPayload),
		Err(e) => {
			error!(secret_id, error = %e, "unable to retrieve secret");
			return SecretLookup::Absent(AbsentReason::Retrieval(e.to_string()));
		}
	};

	match &lookup {
		SecretLookup::Found(payload) => debug!(secret_id, entries = payload.len(), "secret decoded"),
		SecretLookup::Absent(reason) => warn!(secret_id, reason = %reason, "secret unavailable"),
	}
	lookup
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::MemorySecretStore;
	use proptest::prelude::*;
	use serde_json::json;

	const ID: &str = "ALPFR/GLOBAL/APPS/DYNATRACE/CONNECT-INFO";

	#[tokio::test]
	async fn key_value_string_secret() {
		let store = MemorySecretStore::new().with_string(
			ID,
			r#"{"APIURL":"https://example.live.dynatrace.com/api","TOKEN":"dt0c01.abc"}"#,
		);

		let lookup = fetch_secret(&store, ID, SecretSchema::KeyValue).await;
		let payload = lookup.payload().unwrap();
		assert_eq!(payload.get("TOKEN"), Some(&json!("dt0c01.abc")));
		assert_eq!(payload.get("MISSING"), None);
		assert_eq!(payload.schema(), SecretSchema::KeyValue);
	}

	#[tokio::test]
	async fn positional_binary_secret() {
		let store =
			MemorySecretStore::new().with_binary(ID, br#"["https://example/api","tok"]"#.to_vec());

		let lookup = fetch_secret(&store, ID, SecretSchema::Positional).await;
		let payload = lookup.payload().unwrap();
		assert_eq!(payload.at(1), Some(&json!("tok")));
		assert_eq!(payload.at(2), None);
		assert_eq!(payload.get("TOKEN"), None);
	}

	#[tokio::test]
	async fn no_string_and_no_binary_is_absent() {
		let store = MemorySecretStore::new().with_empty(ID);
		assert_eq!(
			fetch_secret(&store, ID, SecretSchema::KeyValue).await,
			SecretLookup::Absent(AbsentReason::NoPayload)
		);
	}

	#[tokio::test]
	async fn store_errors_are_absent_not_raised() {
		let store = MemorySecretStore::new().with_error(ID, "AccessDeniedException: not authorized");
		let lookup = fetch_secret(&store, ID, SecretSchema::KeyValue).await;

		match lookup {
			SecretLookup::Absent(AbsentReason::Retrieval(message)) => {
				assert!(message.contains("AccessDeniedException"))
			}
			other => panic!("unexpected lookup {other:?}"),
		}
	}

	#[tokio::test]
	async fn unknown_secret_is_absent() {
		let store = MemorySecretStore::new();
		let lookup = fetch_secret(&store, "nope", SecretSchema::KeyValue).await;
		assert!(!lookup.is_found());
		assert_eq!(store.calls(), 1);
	}

	#[test]
	fn schema_mismatch_is_reported_not_coerced() {
		assert_eq!(
			decode(br#"["a","b"]"#, SecretSchema::KeyValue),
			SecretLookup::Absent(AbsentReason::SchemaMismatch {
				expected: SecretSchema::KeyValue,
				found: "array"
			})
		);
		assert_eq!(
			decode(br#"{"a":1}"#, SecretSchema::Positional),
			SecretLookup::Absent(AbsentReason::SchemaMismatch {
				expected: SecretSchema::Positional,
				found: "object"
			})
		);
	}

	#[test]
	fn non_json_is_a_decode_failure() {
		assert!(matches!(
			decode(b"plain-text-token", SecretSchema::KeyValue),
			SecretLookup::Absent(AbsentReason::Decode(_))
		));
	}

	#[test]
	fn mismatch_reason_reads_well() {
		let reason = AbsentReason::SchemaMismatch {
			expected: SecretSchema::KeyValue,
			found: "array",
		};
		assert_eq!(reason.to_string(), "expected a key-value secret, found a JSON array");
	}

	proptest! {
		#[test]
		fn debug_never_shows_values(value in "[a-zA-Z0-9]{12,40}") {
			let payload = SecretPayload::KeyValue(
				[("TOKEN".to_string(), Value::String(value.clone()))].into_iter().collect(),
			);
			let debug = format!("{payload:?}");
			prop_assert!(debug.contains("TOKEN"));
			prop_assert!(!debug.contains(&value));

			let positional = SecretPayload::Positional(vec![Value::String(value.clone())]);
			let positional_debug = format!("{positional:?}");
			prop_assert!(!positional_debug.contains(&value));
		}
	}
}
