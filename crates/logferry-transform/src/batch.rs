// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use logferry_core::{HecEvent, RawLogRecord};
use tracing::{debug, error};

use crate::profile::EventTransformer;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutcome {
	pub events: Vec<HecEvent>,
	/// Filtered out by the type discriminator.
	pub skipped: usize,
	/// Could not be transformed.
	pub dropped: usize,
}

/// Transform every record; a bad record never affects its neighbours.
pub fn transform_batch(transformer: &dyn EventTransformer, records: &[RawLogRecord]) -> TransformOutcome {
	let mut outcome = TransformOutcome::default();

	for record in records {
		match transformer.transform(record) {
			Ok(Some(event)) => outcome.events.push(event),
			Ok(None) => outcome.skipped += 1,
			Err(e) => {
				error!(
					error = %e,
					group = %record.group,
					stream = record.stream.as_deref().unwrap_or("-"),
					timestamp_ms = record.timestamp_ms,
					message = %record.message,
					"dropping record"
				);
				outcome.dropped += 1;
			}
		}
	}

	debug!(
		events = outcome.events.len(),
		skipped = outcome.skipped,
		dropped = outcome.dropped,
		"batch transformed"
	);
	outcome
}
