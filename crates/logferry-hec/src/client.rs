// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use logferry_common_config::SecretString;
use logferry_common_http::HttpOptions;
use logferry_core::{HecEvent, PayloadShape};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::error::{HecError, Result};

pub const CHANNEL_HEADER: &str = "X-Splunk-Request-Channel";
pub const DEFAULT_AUTH_SCHEME: &str = "Splunk";

/// Delivers one batch of events per call.
#[async_trait]
pub trait BatchForwarder: Send + Sync {
	/// Returns the number of events delivered. An empty batch is a no-op.
	async fn forward(&self, events: &[HecEvent]) -> Result<usize>;
}

#[derive(Serialize)]
#[serde(untagged)]
enum Payload<'a> {
	EventArray {
		event: &'a [HecEvent],
	},
	ChannelEvents {
		channel: &'a str,
		events: &'a [HecEvent],
	},
}

pub struct HecClientBuilder {
	endpoint: Option<String>,
	token: Option<SecretString>,
	channel: Option<String>,
	auth_scheme: String,
	payload_shape: PayloadShape,
	http: HttpOptions,
}

impl HecClientBuilder {
	pub fn new() -> Self {
		Self {
			endpoint: None,
			token: None,
			channel: None,
			auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
			payload_shape: PayloadShape::default(),
			http: HttpOptions::default(),
		}
	}

	/// Full collector URL, query string included.
	pub fn endpoint(mut self, url: impl Into<String>) -> Self {
		self.endpoint = Some(url.into());
		self
	}

	pub fn token(mut self, token: SecretString) -> Self {
		self.token = Some(token);
		self
	}

	pub fn channel(mut self, channel: impl Into<String>) -> Self {
		self.channel = Some(channel.into());
		self
	}

	/// `Authorization: <scheme> <token>`.
	pub fn auth_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.auth_scheme = scheme.into();
		self
	}

	pub fn payload_shape(mut self, shape: PayloadShape) -> Self {
		self.payload_shape = shape;
		self
	}

	pub fn http_options(mut self, options: HttpOptions) -> Self {
		self.http = options;
		self
	}

	pub fn build(self) -> Result<HecClient> {
		let endpoint = self.endpoint.ok_or(HecError::MissingSetting("endpoint"))?;
		let token = self.token.ok_or(HecError::MissingSetting("token"))?;
		let channel = self.channel.ok_or(HecError::MissingSetting("channel"))?;

		let http_client = logferry_common_http::new_client(&self.http).map_err(HecError::Client)?;

		info!(
			endpoint = %endpoint,
			channel = %channel,
			payload_shape = %self.payload_shape,
			verify_tls = self.http.verify_tls,
			"HEC client initialized"
		);

		Ok(HecClient {
			endpoint,
			token,
			channel,
			auth_scheme: self.auth_scheme,
			payload_shape: self.payload_shape,
			http_client,
		})
	}
}

impl Default for HecClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// HTTP Event Collector client. No retries.
pub struct HecClient {
	endpoint: String,
	token: SecretString,
	channel: String,
	auth_scheme: String,
	payload_shape: PayloadShape,
	http_client: Client,
}

impl HecClient {
	pub fn builder() -> HecClientBuilder {
		HecClientBuilder::new()
	}

	fn encode(&self, events: &[HecEvent]) -> Result<Vec<u8>> {
		let payload = match self.payload_shape {
			PayloadShape::EventArray => Payload::EventArray { event: events },
			PayloadShape::ChannelEvents => Payload::ChannelEvents {
				channel: &self.channel,
				events,
			},
		};
		Ok(serde_json::to_vec(&payload)?)
	}
}

#[async_trait]
impl BatchForwarder for HecClient {
	async fn forward(&self, events: &[HecEvent]) -> Result<usize> {
		if events.is_empty() {
			debug!("empty batch, nothing to forward");
			return Ok(0);
		}

		let body = self.encode(events)?;
		debug!(
			endpoint = %self.endpoint,
			count = events.len(),
			bytes = body.len(),
			"sending HEC batch"
		);

		let response = self
			.http_client
			.post(&self.endpoint)
			.header(
				AUTHORIZATION,
				format!("{} {}", self.auth_scheme, self.token.expose()),
			)
			.header(CHANNEL_HEADER, &self.channel)
			.header(CONTENT_TYPE, "application/json")
			.body(body)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, count = events.len(), "HEC request failed");
				HecError::Transport(e)
			})?;

		let status = response.status();
		if !status.is_success() {
			let status = status.as_u16();
			let message = response.text().await.unwrap_or_default();
			error!(status, message = %message, count = events.len(), "HEC rejected batch");
			return Err(HecError::Rejected {
				status,
				body: message,
			});
		}

		info!(status = status.as_u16(), count = events.len(), "HEC batch delivered");
		Ok(events.len())
	}
}
