// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Raw log record to HEC event mapping.

pub mod batch;
pub mod error;
pub mod profile;

pub use batch::{transform_batch, TransformOutcome};
pub use error::TransformError;
pub use profile::{
	transformer_for, EventTransformer, Overrides, Passthrough, TransferWorkflow, TransformSettings,
	CLOUDWATCH_SOURCETYPE, TRANSFER_INDEX, TRANSFER_SOURCE, TRANSFER_SOURCETYPE,
};
