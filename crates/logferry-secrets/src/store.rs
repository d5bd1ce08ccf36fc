// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret storage backends.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::Client;
use logferry_common_config::{Secret, SecretString};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("GetSecretValue failed for {secret_id}: {message}")]
pub struct StoreError {
	pub secret_id: String,
	pub message: String,
}

/// Undecoded secret value as held by the store.
#[derive(Debug, Clone)]
pub enum RawSecret {
	Text(SecretString),
	Binary(Secret<Vec<u8>>),
	/// Neither a string nor a binary value is present.
	Empty,
}

#[async_trait]
pub trait SecretStore: Send + Sync {
	async fn get_secret_value(&self, secret_id: &str) -> Result<RawSecret, StoreError>;
}

/// AWS Secrets Manager.
pub struct SecretsManagerStore {
	client: Client,
}

impl SecretsManagerStore {
	pub fn new(config: &SdkConfig) -> Self {
		Self {
			client: Client::new(config),
		}
	}

	pub async fn connect(region: Option<&str>) -> Self {
		let mut loader = aws_config::defaults(BehaviorVersion::latest());
		if let Some(region) = region {
			loader = loader.region(Region::new(region.to_string()));
		}
		let config = loader.load().await;
		debug!(region = ?config.region(), "secrets manager client configured");
		Self::new(&config)
	}
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
	async fn get_secret_value(&self, secret_id: &str) -> Result<RawSecret, StoreError> {
		let output = self
			.client
			.get_secret_value()
			.secret_id(secret_id)
			.send()
			.await
			.map_err(|e| StoreError {
				secret_id: secret_id.to_string(),
				message: DisplayErrorContext(&e).to_string(),
			})?;

		if let Some(text) = output.secret_string() {
			return Ok(RawSecret::Text(Secret::new(text.to_string())));
		}
		if let Some(blob) = output.secret_binary() {
			return Ok(RawSecret::Binary(Secret::new(blob.as_ref().to_vec())));
		}
		Ok(RawSecret::Empty)
	}
}

/// In-memory store for tests and local runs.
#[derive(Default)]
pub struct MemorySecretStore {
	secrets: HashMap<String, Result<RawSecret, String>>,
	calls: AtomicUsize,
}

impl MemorySecretStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_string(mut self, secret_id: impl Into<String>, value: impl Into<String>) -> Self {
		self.secrets.insert(
			secret_id.into(),
			Ok(RawSecret::Text(Secret::new(value.into()))),
		);
		self
	}

	pub fn with_binary(mut self, secret_id: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
		self.secrets.insert(
			secret_id.into(),
			Ok(RawSecret::Binary(Secret::new(value.into()))),
		);
		self
	}

	pub fn with_empty(mut self, secret_id: impl Into<String>) -> Self {
		self.secrets.insert(secret_id.into(), Ok(RawSecret::Empty));
		self
	}

	pub fn with_error(mut self, secret_id: impl Into<String>, message: impl Into<String>) -> Self {
		self.secrets.insert(secret_id.into(), Err(message.into()));
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl SecretStore for MemorySecretStore {
	async fn get_secret_value(&self, secret_id: &str) -> Result<RawSecret, StoreError> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match self.secrets.get(secret_id) {
			Some(Ok(raw)) => Ok(raw.clone()),
			Some(Err(message)) => Err(StoreError {
				secret_id: secret_id.to_string(),
				message: message.clone(),
			}),
			None => Err(StoreError {
				secret_id: secret_id.to_string(),
				message: "ResourceNotFoundException: Secrets Manager can't find the specified secret."
					.to_string(),
			}),
		}
	}
}
