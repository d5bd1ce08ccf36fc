// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Window-bounded fetching on top of a [`LogSource`].

use std::sync::Arc;

use logferry_core::{FetchStrategy, Pagination, RawLogRecord, TimeWindow};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::source::LogSource;

/// What to read and how far to page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
	pub group_name: String,
	/// Read only this stream instead of enumerating the group.
	pub stream_name: Option<String>,
	pub strategy: FetchStrategy,
	/// Page size for the filtered query.
	pub result_cap: u32,
	pub pagination: Pagination,
	pub max_pages: u32,
}

impl FetchPlan {
	pub fn new(group_name: impl Into<String>) -> Self {
		Self {
			group_name: group_name.into(),
			stream_name: None,
			strategy: FetchStrategy::default(),
			result_cap: 100,
			pagination: Pagination::default(),
			max_pages: 100,
		}
	}

	/// Pages read per listing before giving up.
	pub fn page_limit(&self) -> u32 {
		match self.pagination {
			Pagination::SinglePage => 1,
			Pagination::Exhaustive => self.max_pages.max(1),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
	/// Every record lies inside the requested window.
	pub records: Vec<RawLogRecord>,
	/// At least one listing had pages left unread.
	pub truncated: bool,
	pub streams_read: usize,
	/// Records returned by the source but outside the window.
	pub discarded: usize,
}

pub struct LogFetcher {
	source: Arc<dyn LogSource>,
	plan: FetchPlan,
}

impl LogFetcher {
	pub fn new(source: Arc<dyn LogSource>, plan: FetchPlan) -> Self {
		Self { source, plan }
	}

	pub fn plan(&self) -> &FetchPlan {
		&self.plan
	}

	/// Any source error aborts the whole fetch.
	pub async fn fetch(&self, window: &TimeWindow) -> Result<FetchOutcome> {
		let mut outcome = FetchOutcome::default();

		match self.plan.strategy {
			FetchStrategy::StreamEnumeration => self.fetch_streams(window, &mut outcome).await?,
			FetchStrategy::FilteredQuery => self.fetch_filtered(window, &mut outcome).await?,
		}

		info!(
			group = %self.plan.group_name,
			strategy = %self.plan.strategy,
			fetched = outcome.records.len(),
			streams = outcome.streams_read,
			discarded = outcome.discarded,
			truncated = outcome.truncated,
			"fetch complete"
		);
		Ok(outcome)
	}

	async fn fetch_streams(&self, window: &TimeWindow, outcome: &mut FetchOutcome) -> Result<()> {
		let group = self.plan.group_name.as_str();
		let streams = match &self.plan.stream_name {
			Some(stream) => vec![stream.clone()],
			None => self.list_streams(group, outcome).await?,
		};
		debug!(group, count = streams.len(), "streams to read");

		for stream in &streams {
			let mut token = None;
			let mut pages = 0;
			loop {
				let page = self
					.source
					.stream_events(group, stream, window, token.take())
					.await?;
				pages += 1;
				let returned = page.items.len();
				self.accept(window, page.items, outcome);

				// An event stream keeps handing out tokens until a call comes back
				// with the token it was given. An empty page at the limit is
				// treated as the end.
				match page.next_token {
					None => break,
					Some(_) if pages >= self.plan.page_limit() => {
						if returned > 0 {
							self.mark_truncated("events", stream, pages, outcome);
						}
						break;
					}
					Some(next) => token = Some(next),
				}
			}
			outcome.streams_read += 1;
		}
		Ok(())
	}

	async fn list_streams(&self, group: &str, outcome: &mut FetchOutcome) -> Result<Vec<String>> {
		let mut streams = Vec::new();
		let mut token = None;
		let mut pages = 0;
		loop {
			let page = self.source.list_streams(group, token.take()).await?;
			pages += 1;
			streams.extend(page.items);

			match page.next_token {
				None => break,
				Some(_) if pages >= self.plan.page_limit() => {
					self.mark_truncated("streams", group, pages, outcome);
					break;
				}
				Some(next) => token = Some(next),
			}
		}
		Ok(streams)
	}

	async fn fetch_filtered(&self, window: &TimeWindow, outcome: &mut FetchOutcome) -> Result<()> {
		let group = self.plan.group_name.as_str();
		let mut token = None;
		let mut pages = 0;
		loop {
			let page = self
				.source
				.filter_events(group, window, self.plan.result_cap, token.take())
				.await?;
			pages += 1;
			self.accept(window, page.items, outcome);

			match page.next_token {
				None => break,
				Some(_) if pages >= self.plan.page_limit() => {
					self.mark_truncated("filter", group, pages, outcome);
					break;
				}
				Some(next) => token = Some(next),
			}
		}
		Ok(())
	}

	fn accept(&self, window: &TimeWindow, records: Vec<RawLogRecord>, outcome: &mut FetchOutcome) {
		for record in records {
			if window.contains(record.timestamp_ms) {
				outcome.records.push(record);
			} else {
				debug!(
					timestamp_ms = record.timestamp_ms,
					start_ms = window.start_ms(),
					end_ms = window.end_ms(),
					"record outside window discarded"
				);
				outcome.discarded += 1;
			}
		}
	}

	fn mark_truncated(&self, listing: &str, name: &str, pages: u32, outcome: &mut FetchOutcome) {
		warn!(
			listing,
			name,
			pages,
			pagination = %self.plan.pagination,
			"more results available than were read; output is truncated"
		);
		outcome.truncated = true;
	}
}
