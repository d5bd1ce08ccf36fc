// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client for logferry.
//!
//! Every outbound HTTP call (HEC forwarding, egress IP lookup) goes through a
//! client built here so the User-Agent, timeouts and certificate policy are
//! applied consistently.

mod client;

pub use client::{builder, new_client, user_agent, HttpOptions};
