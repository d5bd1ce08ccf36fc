// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Why a single record was dropped. Never fatal to a batch.
#[derive(Debug, Error)]
pub enum TransformError {
	#[error("message is not valid JSON: {0}")]
	InvalidJson(#[from] serde_json::Error),

	#[error("message has no `{path}` field")]
	MissingField { path: &'static str },
}
