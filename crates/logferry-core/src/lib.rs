// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types shared across the logferry pipeline.
//!
//! One invocation moves data through these types in order:
//! [`TimeWindow`] → [`RawLogRecord`] → [`HecEvent`] → [`InvocationResult`].

pub mod event;
pub mod options;
pub mod record;
pub mod result;
pub mod window;

pub use event::{EventTime, HecEvent};
pub use options::{
	FetchStrategy, Pagination, ParseOptionError, PayloadShape, SecretSchema, TransformProfile,
};
pub use record::RawLogRecord;
pub use result::{Failure, FailureStage, InvocationBody, InvocationResult};
pub use window::{TimeWindow, WindowError, WindowSelector};
