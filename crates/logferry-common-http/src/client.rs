// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::warn;

/// Transport settings for a logferry HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
	/// Whole-request timeout.
	pub timeout: Duration,
	/// Validate the server certificate chain. Turning this off accepts any
	/// certificate, including self-signed HEC endpoints.
	pub verify_tls: bool,
}

impl Default for HttpOptions {
	fn default() -> Self {
		Self {
			timeout: Duration::from_secs(30),
			verify_tls: true,
		}
	}
}

/// Client builder carrying the logferry User-Agent.
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Build a client for the given transport options.
pub fn new_client(options: &HttpOptions) -> Result<Client, reqwest::Error> {
	let mut builder = builder().timeout(options.timeout);

	if !options.verify_tls {
		warn!("TLS certificate verification is disabled for this client");
		builder = builder.danger_accept_invalid_certs(true);
	}

	builder.build()
}

/// `logferry/{os}-{arch}/{version}`
pub fn user_agent() -> String {
	format!(
		"logferry/{}-{}/{}",
		std::env::consts::OS,
		std::env::consts::ARCH,
		env!("CARGO_PKG_VERSION")
	)
}
