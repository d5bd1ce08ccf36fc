// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory [`LogSource`] for tests and dry runs.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use logferry_core::{RawLogRecord, TimeWindow};

use crate::error::{FetchError, Result};
use crate::source::{LogSource, Page, DESCRIBE_LOG_STREAMS, FILTER_LOG_EVENTS, GET_LOG_EVENTS};

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Records keyed by group, then stream. Records without a stream land in
/// the `"default"` stream.
pub struct MemoryLogSource {
	groups: BTreeMap<String, BTreeMap<String, Vec<RawLogRecord>>>,
	page_size: usize,
	honour_window: bool,
	failure: Option<(&'static str, String)>,
	calls: AtomicUsize,
}

impl MemoryLogSource {
	pub fn new() -> Self {
		Self {
			groups: BTreeMap::new(),
			page_size: DEFAULT_PAGE_SIZE,
			honour_window: true,
			failure: None,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn with_records(records: impl IntoIterator<Item = RawLogRecord>) -> Self {
		let mut source = Self::new();
		for record in records {
			source.push(record);
		}
		source
	}

	/// Items per page for every listing. Values below 1 are raised to 1.
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size.max(1);
		self
	}

	/// Return records regardless of the requested window.
	pub fn ignoring_window(mut self) -> Self {
		self.honour_window = false;
		self
	}

	/// Make `operation` fail with `message`.
	pub fn failing(mut self, operation: &'static str, message: impl Into<String>) -> Self {
		self.failure = Some((operation, message.into()));
		self
	}

	/// Create an empty group.
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.groups.entry(group.into()).or_default();
		self
	}

	pub fn push(&mut self, record: RawLogRecord) {
		let stream = record.stream.clone().unwrap_or_else(|| "default".to_string());
		let events = self
			.groups
			.entry(record.group.clone())
			.or_default()
			.entry(stream)
			.or_default();
		events.push(record);
		events.sort_by_key(|r| r.timestamp_ms);
	}

	/// Number of calls made against this source.
	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}

	fn begin(&self, operation: &'static str) -> Result<()> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		match &self.failure {
			Some((op, message)) if *op == operation => Err(FetchError::upstream(operation, message.clone())),
			_ => Ok(()),
		}
	}

	fn group(
		&self,
		operation: &'static str,
		group: &str,
	) -> Result<&BTreeMap<String, Vec<RawLogRecord>>> {
		self.groups.get(group).ok_or_else(|| {
			FetchError::upstream(
				operation,
				format!("ResourceNotFoundException: log group {group} does not exist"),
			)
		})
	}

	fn in_window(&self, window: &TimeWindow, record: &RawLogRecord) -> bool {
		!self.honour_window || window.contains(record.timestamp_ms)
	}

	fn page<T>(
		&self,
		operation: &'static str,
		items: Vec<T>,
		page_size: usize,
		next_token: Option<String>,
	) -> Result<Page<T>> {
		let offset = match next_token {
			Some(token) => token
				.strip_prefix("offset:")
				.and_then(|n| n.parse::<usize>().ok())
				.ok_or_else(|| {
					FetchError::upstream(operation, format!("InvalidParameterException: bad token {token}"))
				})?,
			None => 0,
		};
		let total = items.len();
		let end = offset.saturating_add(page_size).min(total);
		let items: Vec<T> = items.into_iter().skip(offset).take(end.saturating_sub(offset)).collect();
		Ok(Page {
			items,
			next_token: (end < total).then(|| format!("offset:{end}")),
		})
	}
}

impl Default for MemoryLogSource {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl LogSource for MemoryLogSource {
	async fn list_streams(&self, group: &str, next_token: Option<String>) -> Result<Page<String>> {
		self.begin(DESCRIBE_LOG_STREAMS)?;
		let streams = self.group(DESCRIBE_LOG_STREAMS, group)?;

		let mut ordered: Vec<(&String, i64)> = streams
			.iter()
			.map(|(name, events)| (name, events.last().map_or(i64::MIN, |r| r.timestamp_ms)))
			.collect();
		ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
		let names = ordered.into_iter().map(|(name, _)| name.clone()).collect();

		self.page(DESCRIBE_LOG_STREAMS, names, self.page_size, next_token)
	}

	async fn stream_events(
		&self,
		group: &str,
		stream: &str,
		window: &TimeWindow,
		next_token: Option<String>,
	) -> Result<Page<RawLogRecord>> {
		self.begin(GET_LOG_EVENTS)?;
		let streams = self.group(GET_LOG_EVENTS, group)?;
		let events = streams.get(stream).ok_or_else(|| {
			FetchError::upstream(
				GET_LOG_EVENTS,
				format!("ResourceNotFoundException: log stream {stream} does not exist"),
			)
		})?;

		let matching: Vec<RawLogRecord> = events
			.iter()
			.filter(|r| self.in_window(window, r))
			.map(|r| {
				let mut r = r.clone();
				r.stream = Some(stream.to_string());
				r
			})
			.collect();

		self.page(GET_LOG_EVENTS, matching, self.page_size, next_token)
	}

	async fn filter_events(
		&self,
		group: &str,
		window: &TimeWindow,
		limit: u32,
		next_token: Option<String>,
	) -> Result<Page<RawLogRecord>> {
		self.begin(FILTER_LOG_EVENTS)?;
		let streams = self.group(FILTER_LOG_EVENTS, group)?;

		let mut matching: Vec<RawLogRecord> = streams
			.values()
			.flatten()
			.filter(|r| self.in_window(window, r))
			.cloned()
			.collect();
		matching.sort_by_key(|r| r.timestamp_ms);

		let page_size = self.page_size.min(limit.max(1) as usize);
		self.page(FILTER_LOG_EVENTS, matching, page_size, next_token)
	}
}
