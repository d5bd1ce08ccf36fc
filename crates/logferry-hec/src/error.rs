// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HecError {
	/// The endpoint answered with a non-2xx status.
	#[error("HEC endpoint rejected batch with status {status}: {body}")]
	Rejected { status: u16, body: String },

	/// No usable answer: connection failure, TLS failure or timeout.
	#[error("HEC request failed: {0}")]
	Transport(#[source] reqwest::Error),

	#[error("failed to encode HEC payload: {0}")]
	Serialize(#[from] serde_json::Error),

	#[error("failed to build HTTP client: {0}")]
	Client(#[source] reqwest::Error),

	#[error("HEC client is missing {0}")]
	MissingSetting(&'static str),
}

impl HecError {
	/// Upstream status, when the endpoint answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			HecError::Rejected { status, .. } => Some(*status),
			HecError::Transport(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	/// Upstream response body, when the endpoint answered.
	pub fn body(&self) -> Option<&str> {
		match self {
			HecError::Rejected { body, .. } => Some(body),
			_ => None,
		}
	}
}

pub type Result<T> = std::result::Result<T, HecError>;
