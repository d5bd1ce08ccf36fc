// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Batch forwarding to an HTTP Event Collector endpoint.
//!
//! One batch is one POST:
//!
//! ```text
//! Authorization: Splunk <token>
//! X-Splunk-Request-Channel: <channel>
//! Content-Type: application/json
//!
//! {"event": [...]}                       (event-array)
//! {"channel": "<channel>", "events": [...]}  (channel-events)
//! ```

mod client;
mod error;

pub use client::{BatchForwarder, HecClient, HecClientBuilder, CHANNEL_HEADER, DEFAULT_AUTH_SCHEME};
pub use error::{HecError, Result};
