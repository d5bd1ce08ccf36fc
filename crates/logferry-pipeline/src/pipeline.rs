// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use chrono::{DateTime, Utc};
use logferry_cloudwatch::{CloudWatchLogSource, FetchPlan, LogFetcher, LogSource};
use logferry_common_http::HttpOptions;
use logferry_config::{HecConfig, LogferryConfig, SourceConfig, TransformConfig};
use logferry_core::{HecEvent, InvocationBody, InvocationResult, WindowSelector};
use logferry_hec::{BatchForwarder, HecClient, HecError};
use logferry_transform::{transform_batch, transformer_for, Overrides, TransformSettings};
use tracing::{error, info};

use crate::egress::EgressLookup;
use crate::error::{PipelineError, Result};

/// One scheduled run: select the window, fetch, transform, forward.
pub struct Pipeline {
	fetcher: LogFetcher,
	forwarder: Arc<dyn BatchForwarder>,
	selector: WindowSelector,
	transform: TransformSettings,
	egress: Option<EgressLookup>,
}

impl Pipeline {
	/// Build against CloudWatch Logs and the configured HEC endpoint.
	pub async fn from_config(config: &LogferryConfig) -> Result<Self> {
		let hec = config.require_hec()?;
		config.source.require_group_name()?;

		let forwarder = hec_client(hec)?;
		let source = CloudWatchLogSource::connect(config.aws.region.as_deref()).await;

		Self::with_parts(Arc::new(source), Arc::new(forwarder), config)
	}

	/// Build with caller-supplied source and forwarder. HEC settings in
	/// `config` are ignored.
	pub fn with_parts(
		source: Arc<dyn LogSource>,
		forwarder: Arc<dyn BatchForwarder>,
		config: &LogferryConfig,
	) -> Result<Self> {
		let plan = fetch_plan(&config.source)?;
		let egress = if config.egress.enabled {
			Some(EgressLookup::new(&config.egress)?)
		} else {
			None
		};

		Ok(Self {
			fetcher: LogFetcher::new(source, plan),
			forwarder,
			selector: WindowSelector::new(config.source.window_offset()),
			transform: transform_settings(&config.transform),
			egress,
		})
	}

	pub fn plan(&self) -> &FetchPlan {
		self.fetcher.plan()
	}

	pub async fn run(&self) -> InvocationResult {
		self.run_at(Utc::now()).await
	}

	/// Run with the window ending at `now`.
	pub async fn run_at(&self, now: DateTime<Utc>) -> InvocationResult {
		let window = self.selector.select_at(now);
		let mut body = InvocationBody {
			window: Some(window),
			..Default::default()
		};

		info!(
			group = %self.plan().group_name,
			strategy = %self.plan().strategy,
			start_ms = window.start_ms(),
			end_ms = window.end_ms(),
			"invocation started"
		);

		if let Some(lookup) = &self.egress {
			body.egress_ip = Some(lookup.discover().await);
		}

		let fetched = match self.fetcher.fetch(&window).await {
			Ok(outcome) => outcome,
			Err(e) => return failed_with(body, PipelineError::Fetch(e)),
		};
		body.fetched = fetched.records.len();
		body.truncated = fetched.truncated;

		let settings = TransformSettings {
			egress_ip: body.egress_ip.clone(),
			..self.transform.clone()
		};
		let transformer = transformer_for(&settings);
		let outcome = transform_batch(transformer.as_ref(), &fetched.records);
		body.skipped = outcome.skipped;
		body.dropped = outcome.dropped;

		match self.forwarder.forward(&outcome.events).await {
			Ok(forwarded) => {
				body.forwarded = forwarded;
				body.message = format!("forwarded {forwarded} events");
				info!(
					fetched = body.fetched,
					forwarded,
					skipped = body.skipped,
					dropped = body.dropped,
					truncated = body.truncated,
					"invocation complete"
				);
				InvocationResult::success(body)
			}
			Err(e) => {
				log_unsent(&outcome.events);
				failed_with(body, PipelineError::Forward(e))
			}
		}
	}
}

/// Build from config and run once. Setup errors become a config-stage
/// failure result.
pub async fn invoke(config: &LogferryConfig) -> InvocationResult {
	match Pipeline::from_config(config).await {
		Ok(pipeline) => pipeline.run().await,
		Err(e) => failed(e),
	}
}

/// Failure result for an error raised before any window was selected.
pub fn failed(error: PipelineError) -> InvocationResult {
	failed_with(InvocationBody::default(), error)
}

fn failed_with(mut body: InvocationBody, error: PipelineError) -> InvocationResult {
	let failure = error.to_failure();
	error!(
		stage = ?failure.stage,
		error = %failure.error,
		upstream_status = failure.upstream_status,
		"invocation failed"
	);
	body.message = failure.error.clone();
	body.failure = Some(failure);
	InvocationResult::failure(body)
}

/// The full batch goes out at error level; it exists nowhere else once the
/// invocation returns.
fn log_unsent(events: &[HecEvent]) {
	match serde_json::to_string(events) {
		Ok(batch) => error!(count = events.len(), batch = %batch, "batch was not delivered"),
		Err(e) => error!(
			count = events.len(),
			error = %e,
			batch = ?events,
			"batch was not delivered"
		),
	}
}

fn fetch_plan(source: &SourceConfig) -> Result<FetchPlan> {
	let group = source.require_group_name()?;
	Ok(FetchPlan {
		stream_name: source.stream_name.clone(),
		strategy: source.strategy,
		result_cap: source.result_cap,
		pagination: source.pagination,
		max_pages: source.max_pages,
		..FetchPlan::new(group)
	})
}

fn transform_settings(transform: &TransformConfig) -> TransformSettings {
	TransformSettings {
		profile: transform.profile,
		event_type: transform.event_type.clone(),
		overrides: Overrides {
			source: transform.source.clone(),
			sourcetype: transform.sourcetype.clone(),
			host: transform.host.clone(),
			index: transform.index.clone(),
		},
		egress_ip: None,
	}
}

fn hec_client(hec: &HecConfig) -> Result<HecClient> {
	HecClient::builder()
		.endpoint(hec.endpoint_url.clone())
		.token(hec.token.clone())
		.channel(hec.channel_id.clone())
		.auth_scheme(hec.auth_scheme.clone())
		.payload_shape(hec.payload_shape)
		.http_options(HttpOptions {
			timeout: hec.timeout(),
			verify_tls: hec.verify_tls,
		})
		.build()
		.map_err(|e| match e {
			HecError::Client(e) => PipelineError::Http(e),
			other => PipelineError::Forward(other),
		})
}
