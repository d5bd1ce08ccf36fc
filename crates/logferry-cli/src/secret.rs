// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rendering for `logferry secret`.

use logferry_secrets::{SecretLookup, SecretPayload};
use serde_json::Value;

pub const DEFAULT_KEYS: [&str; 2] = ["APIURL", "TOKEN"];

fn describe(value: &Value, reveal: bool) -> String {
	if !reveal {
		return "present".to_string();
	}
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// One line per requested key (or per position), values only with `reveal`.
pub fn render(secret_id: &str, lookup: &SecretLookup, keys: &[String], reveal: bool) -> String {
	let payload = match lookup {
		SecretLookup::Found(payload) => payload,
		SecretLookup::Absent(reason) => {
			return format!("{secret_id}: absent ({reason})\n");
		}
	};

	let mut out = format!(
		"{secret_id}: found ({}, {} entries)\n",
		payload.schema(),
		payload.len()
	);

	match payload {
		SecretPayload::KeyValue(_) => {
			for key in keys {
				let state = payload
					.get(key)
					.map(|v| describe(v, reveal))
					.unwrap_or_else(|| "missing".to_string());
				out.push_str(&format!("  {key}: {state}\n"));
			}
		}
		SecretPayload::Positional(values) => {
			for (index, value) in values.iter().enumerate() {
				out.push_str(&format!("  [{index}]: {}\n", describe(value, reveal)));
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use logferry_core::SecretSchema;
	use logferry_secrets::{decode, AbsentReason};

	fn keys() -> Vec<String> {
		DEFAULT_KEYS.iter().map(|k| k.to_string()).collect()
	}

	#[test]
	fn values_stay_hidden_without_reveal() {
		let lookup = decode(br#"{"APIURL":"https://x/api","TOKEN":"dt0c01.secret"}"#, SecretSchema::KeyValue);
		let out = render("id", &lookup, &keys(), false);

		assert!(out.starts_with("id: found (key-value, 2 entries)"));
		assert!(out.contains("  TOKEN: present"));
		assert!(!out.contains("dt0c01.secret"));
	}

	#[test]
	fn every_line_is_terminated() {
		let lookup = decode(br#"{"APIURL":"https://x/api","TOKEN":"t"}"#, SecretSchema::KeyValue);
		let out = render("id", &lookup, &keys(), false);

		assert_eq!(
			out,
			"id: found (key-value, 2 entries)\n  APIURL: present\n  TOKEN: present\n"
		);
	}

	#[test]
	fn reveal_prints_values_and_missing_keys() {
		let lookup = decode(br#"{"TOKEN":"dt0c01.secret"}"#, SecretSchema::KeyValue);
		let out = render("id", &lookup, &keys(), true);

		assert!(out.contains("  APIURL: missing"));
		assert!(out.contains("  TOKEN: dt0c01.secret"));
	}

	#[test]
	fn positional_lists_every_slot() {
		let lookup = decode(br#"["https://x/api", 7]"#, SecretSchema::Positional);
		let out = render("id", &lookup, &keys(), true);

		assert!(out.contains("  [0]: https://x/api"));
		assert!(out.contains("  [1]: 7"));
	}

	#[test]
	fn absent_shows_the_reason() {
		let out = render("id", &SecretLookup::Absent(AbsentReason::NoPayload), &keys(), false);
		assert_eq!(out, "id: absent (secret has no string or binary value)\n");
	}
}
