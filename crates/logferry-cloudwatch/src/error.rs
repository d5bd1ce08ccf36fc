// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
	/// Any failure reported by (or while talking to) the log service.
	#[error("{operation} failed: {message}")]
	Upstream {
		operation: &'static str,
		message: String,
	},
}

impl FetchError {
	pub fn upstream(operation: &'static str, message: impl Into<String>) -> Self {
		FetchError::Upstream {
			operation,
			message: message.into(),
		}
	}

	pub fn operation(&self) -> &'static str {
		match self {
			FetchError::Upstream { operation, .. } => operation,
		}
	}
}

pub type Result<T> = std::result::Result<T, FetchError>;
