// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Query windows.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
	#[error("window start {start_ms} is after end {end_ms}")]
	Inverted { start_ms: i64, end_ms: i64 },
}

/// Closed interval `[start_ms, end_ms]` in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
	start_ms: i64,
	end_ms: i64,
}

impl TimeWindow {
	pub fn new(start_ms: i64, end_ms: i64) -> Result<Self, WindowError> {
		if start_ms > end_ms {
			return Err(WindowError::Inverted { start_ms, end_ms });
		}
		Ok(Self { start_ms, end_ms })
	}

	pub fn start_ms(&self) -> i64 {
		self.start_ms
	}

	pub fn end_ms(&self) -> i64 {
		self.end_ms
	}

	/// Inclusive on both bounds.
	pub fn contains(&self, timestamp_ms: i64) -> bool {
		self.start_ms <= timestamp_ms && timestamp_ms <= self.end_ms
	}

	pub fn duration(&self) -> Duration {
		Duration::from_millis((self.end_ms - self.start_ms) as u64)
	}
}

/// Computes "the last `offset`" relative to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSelector {
	offset: Duration,
}

impl WindowSelector {
	pub fn new(offset: Duration) -> Self {
		Self { offset }
	}

	pub fn offset(&self) -> Duration {
		self.offset
	}

	/// Window ending at the current wall-clock time.
	pub fn select(&self) -> TimeWindow {
		self.select_at(Utc::now())
	}

	pub fn select_at(&self, now: DateTime<Utc>) -> TimeWindow {
		let end_ms = now.timestamp_millis();
		let offset_ms = i64::try_from(self.offset.as_millis()).unwrap_or(i64::MAX);
		TimeWindow {
			start_ms: end_ms.saturating_sub(offset_ms),
			end_ms,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use proptest::prelude::*;

	#[test]
	fn inverted_window_is_rejected() {
		assert_eq!(
			TimeWindow::new(10, 5),
			Err(WindowError::Inverted {
				start_ms: 10,
				end_ms: 5
			})
		);
	}

	#[test]
	fn bounds_are_inclusive() {
		let window = TimeWindow::new(1_000, 2_000).unwrap();
		assert!(window.contains(1_000));
		assert!(window.contains(2_000));
		assert!(!window.contains(999));
		assert!(!window.contains(2_001));
	}

	#[test]
	fn thirty_minute_selection() {
		let now = Utc.with_ymd_and_hms(2024, 5, 2, 12, 0, 0).unwrap();
		let window = WindowSelector::new(Duration::from_secs(30 * 60)).select_at(now);

		assert_eq!(window.end_ms(), now.timestamp_millis());
		assert_eq!(window.end_ms() - window.start_ms(), 1_800_000);
		assert_eq!(window.duration(), Duration::from_secs(1800));
	}

	#[test]
	fn select_uses_the_clock() {
		let before = Utc::now().timestamp_millis();
		let window = WindowSelector::new(Duration::from_secs(3600)).select();
		let after = Utc::now().timestamp_millis();

		assert!(window.end_ms() >= before && window.end_ms() <= after);
	}

	proptest! {
		#[test]
		fn selected_window_contains_its_own_bounds(
			now_ms in 0i64..4_000_000_000_000,
			offset_secs in 0u64..86_400,
		) {
			let now = Utc.timestamp_millis_opt(now_ms).unwrap();
			let window = WindowSelector::new(Duration::from_secs(offset_secs)).select_at(now);

			prop_assert!(window.start_ms() <= window.end_ms());
			prop_assert!(window.contains(window.start_ms()));
			prop_assert!(window.contains(now_ms));
		}
	}
}
