// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reading log records for a time window.
//!
//! [`LogSource`] is the service seam, with a CloudWatch Logs implementation
//! and an in-memory one. [`LogFetcher`] drives a source according to a
//! [`FetchPlan`] and guarantees every returned record lies inside the window.

pub mod aws;
pub mod error;
pub mod fetcher;
pub mod memory;
pub mod source;

pub use aws::CloudWatchLogSource;
pub use error::{FetchError, Result};
pub use fetcher::{FetchOutcome, FetchPlan, LogFetcher};
pub use memory::MemoryLogSource;
pub use source::{LogSource, Page, DESCRIBE_LOG_STREAMS, FILTER_LOG_EVENTS, GET_LOG_EVENTS};
