// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The log service seam.

use async_trait::async_trait;
use logferry_core::{RawLogRecord, TimeWindow};

use crate::error::Result;

pub const DESCRIBE_LOG_STREAMS: &str = "DescribeLogStreams";
pub const GET_LOG_EVENTS: &str = "GetLogEvents";
pub const FILTER_LOG_EVENTS: &str = "FilterLogEvents";

/// One page of a listing. `next_token` is `Some` while more items remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub next_token: Option<String>,
}

/// Read access to a log-aggregation service.
///
/// Implementations pass the window to the service but are not trusted to
/// honour it; [`crate::LogFetcher`] re-checks every record.
#[async_trait]
pub trait LogSource: Send + Sync {
	/// Stream names in `group`, most recent event first.
	async fn list_streams(&self, group: &str, next_token: Option<String>) -> Result<Page<String>>;

	/// Events of one stream inside `window`, oldest first.
	async fn stream_events(
		&self,
		group: &str,
		stream: &str,
		window: &TimeWindow,
		next_token: Option<String>,
	) -> Result<Page<RawLogRecord>>;

	/// Events across every stream of `group` inside `window`, at most `limit`
	/// per page.
	async fn filter_events(
		&self,
		group: &str,
		window: &TimeWindow,
		limit: u32,
		next_token: Option<String>,
	) -> Result<Page<RawLogRecord>>;
}
