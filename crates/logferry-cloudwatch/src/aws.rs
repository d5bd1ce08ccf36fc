// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! CloudWatch Logs implementation of [`LogSource`].

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_sdk_cloudwatchlogs::types::{FilteredLogEvent, OrderBy, OutputLogEvent};
use aws_sdk_cloudwatchlogs::Client;
use logferry_core::{RawLogRecord, TimeWindow};
use tracing::debug;

use crate::error::{FetchError, Result};
use crate::source::{LogSource, Page, DESCRIBE_LOG_STREAMS, FILTER_LOG_EVENTS, GET_LOG_EVENTS};

/// Largest page GetLogEvents will return.
pub const GET_LOG_EVENTS_LIMIT: i32 = 10_000;

/// GetLogEvents always hands back a forward token; the stream is exhausted
/// only when it equals the token that was sent. Short pages are not a signal,
/// responses are also capped by size.
pub fn next_stream_token(sent: Option<&str>, returned: Option<&str>) -> Option<String> {
	match returned {
		Some(token) if Some(token) != sent => Some(token.to_string()),
		_ => None,
	}
}

fn stream_record(group: &str, stream: &str, event: &OutputLogEvent) -> Option<RawLogRecord> {
	let Some(timestamp) = event.timestamp() else {
		debug!(group, stream, "event without timestamp skipped");
		return None;
	};
	Some(RawLogRecord::new(group, timestamp, event.message().unwrap_or_default()).with_stream(stream))
}

fn filtered_record(group: &str, event: &FilteredLogEvent) -> Option<RawLogRecord> {
	let timestamp = event.timestamp()?;
	let mut record = RawLogRecord::new(group, timestamp, event.message().unwrap_or_default());
	record.stream = event.log_stream_name().map(str::to_string);
	record.event_id = event.event_id().map(str::to_string);
	Some(record)
}

pub struct CloudWatchLogSource {
	client: Client,
}

impl CloudWatchLogSource {
	pub fn new(config: &SdkConfig) -> Self {
		Self {
			client: Client::new(config),
		}
	}

	/// Resolve credentials through the default provider chain. `region`
	/// overrides the chain's region when given.
	pub async fn connect(region: Option<&str>) -> Self {
		let mut loader = aws_config::defaults(BehaviorVersion::latest());
		if let Some(region) = region {
			loader = loader.region(Region::new(region.to_string()));
		}
		let config = loader.load().await;
		debug!(region = ?config.region(), "cloudwatch logs client configured");
		Self::new(&config)
	}
}

#[async_trait]
impl LogSource for CloudWatchLogSource {
	async fn list_streams(&self, group: &str, next_token: Option<String>) -> Result<Page<String>> {
		let output = self
			.client
			.describe_log_streams()
			.log_group_name(group)
			.order_by(OrderBy::LastEventTime)
			.descending(true)
			.set_next_token(next_token)
			.send()
			.await
			.map_err(|e| FetchError::upstream(DESCRIBE_LOG_STREAMS, DisplayErrorContext(&e).to_string()))?;

		let items = output
			.log_streams()
			.iter()
			.filter_map(|s| s.log_stream_name().map(str::to_string))
			.collect();

		Ok(Page {
			items,
			next_token: output.next_token().map(str::to_string),
		})
	}

	async fn stream_events(
		&self,
		group: &str,
		stream: &str,
		window: &TimeWindow,
		next_token: Option<String>,
	) -> Result<Page<RawLogRecord>> {
		let output = self
			.client
			.get_log_events()
			.log_group_name(group)
			.log_stream_name(stream)
			.start_time(window.start_ms())
			.end_time(window.end_ms())
			.start_from_head(true)
			.limit(GET_LOG_EVENTS_LIMIT)
			.set_next_token(next_token.clone())
			.send()
			.await
			.map_err(|e| FetchError::upstream(GET_LOG_EVENTS, DisplayErrorContext(&e).to_string()))?;

		let items: Vec<RawLogRecord> = output
			.events()
			.iter()
			.filter_map(|e| stream_record(group, stream, e))
			.collect();

		Ok(Page {
			items,
			next_token: next_stream_token(next_token.as_deref(), output.next_forward_token()),
		})
	}

	async fn filter_events(
		&self,
		group: &str,
		window: &TimeWindow,
		limit: u32,
		next_token: Option<String>,
	) -> Result<Page<RawLogRecord>> {
		let limit = i32::try_from(limit).unwrap_or(i32::MAX);
		let output = self
			.client
			.filter_log_events()
			.log_group_name(group)
			.start_time(window.start_ms())
			.end_time(window.end_ms())
			.limit(limit)
			.set_next_token(next_token)
			.send()
			.await
			.map_err(|e| FetchError::upstream(FILTER_LOG_EVENTS, DisplayErrorContext(&e).to_string()))?;

		let items = output
			.events()
			.iter()
			.filter_map(|e| filtered_record(group, e))
			.collect();

		Ok(Page {
			items,
			next_token: output.next_token().map(str::to_string),
		})
	}
}
