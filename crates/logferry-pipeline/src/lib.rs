// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single logferry invocation.
//!
//! [`Pipeline::run`] selects the trailing time window, reads it from
//! CloudWatch Logs, reshapes the records for the HTTP Event Collector and
//! posts them as one batch. The outcome is always an [`InvocationResult`];
//! errors never escape as panics or `Err`.
//!
//! [`InvocationResult`]: logferry_core::InvocationResult

pub mod egress;
pub mod error;
pub mod pipeline;

pub use egress::{EgressLookup, UNKNOWN_IP};
pub use error::{PipelineError, Result};
pub use pipeline::{failed, invoke, Pipeline};
