// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Public egress address discovery.

use logferry_common_http::HttpOptions;
use logferry_config::EgressConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{PipelineError, Result};

/// Reported when the lookup fails.
pub const UNKNOWN_IP: &str = "Unknown";

#[derive(Deserialize)]
struct IpResponse {
	ip: String,
}

pub struct EgressLookup {
	client: Client,
	url: String,
}

impl EgressLookup {
	pub fn new(config: &EgressConfig) -> Result<Self> {
		let client = logferry_common_http::new_client(&HttpOptions {
			timeout: config.timeout(),
			verify_tls: true,
		})
		.map_err(PipelineError::Http)?;

		Ok(Self {
			client,
			url: config.lookup_url.clone(),
		})
	}

	/// The public IP as seen by the lookup service, or [`UNKNOWN_IP`].
	pub async fn discover(&self) -> String {
		match self.lookup().await {
			Ok(ip) => {
				debug!(ip = %ip, "egress IP discovered");
				ip
			}
			Err(e) => {
				error!(url = %self.url, error = %e, "error getting egress IP");
				UNKNOWN_IP.to_string()
			}
		}
	}

	async fn lookup(&self) -> std::result::Result<String, reqwest::Error> {
		let response = self.client.get(&self.url).send().await?.error_for_status()?;
		let body: IpResponse = response.json().await?;
		Ok(body.ip)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn lookup_for(url: String) -> EgressLookup {
		EgressLookup::new(&EgressConfig {
			enabled: true,
			lookup_url: url,
			timeout_secs: 2,
		})
		.unwrap()
	}

	#[tokio::test]
	async fn returns_the_reported_ip() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ip": "203.0.113.7"})))
			.expect(1)
			.mount(&server)
			.await;

		assert_eq!(lookup_for(format!("{}/", server.uri())).discover().await, "203.0.113.7");
	}

	#[tokio::test]
	async fn error_status_is_unknown() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(503))
			.mount(&server)
			.await;

		assert_eq!(lookup_for(server.uri()).discover().await, UNKNOWN_IP);
	}

	#[tokio::test]
	async fn malformed_body_is_unknown() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_string("203.0.113.7"))
			.mount(&server)
			.await;

		assert_eq!(lookup_for(server.uri()).discover().await, UNKNOWN_IP);
	}
}
