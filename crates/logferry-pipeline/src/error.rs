// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use logferry_cloudwatch::FetchError;
use logferry_config::ConfigError;
use logferry_core::{Failure, FailureStage};
use logferry_hec::HecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("fetch failed: {0}")]
	Fetch(#[from] FetchError),

	#[error("forwarding failed: {0}")]
	Forward(#[from] HecError),

	#[error("failed to build HTTP client: {0}")]
	Http(#[source] reqwest::Error),
}

impl PipelineError {
	pub fn stage(&self) -> FailureStage {
		match self {
			PipelineError::Config(_) | PipelineError::Http(_) => FailureStage::Config,
			PipelineError::Fetch(_) => FailureStage::Fetch,
			PipelineError::Forward(_) => FailureStage::Forward,
		}
	}

	pub fn to_failure(&self) -> Failure {
		let (upstream_status, upstream_body) = match self {
			PipelineError::Forward(e) => (e.status(), e.body().map(str::to_string)),
			_ => (None, None),
		};
		Failure {
			stage: self.stage(),
			error: self.to_string(),
			upstream_status,
			upstream_body,
		}
	}
}

pub type Result<T> = std::result::Result<T, PipelineError>;
