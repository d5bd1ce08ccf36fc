// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

mod aws;
mod egress;
mod hec;
mod logging;
mod secrets;
mod source;
mod transform;

pub use aws::{AwsConfig, AwsConfigLayer};
pub use egress::{EgressConfig, EgressConfigLayer, DEFAULT_LOOKUP_URL};
pub use hec::{HecConfig, HecConfigLayer, DEFAULT_AUTH_SCHEME};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
pub use secrets::{SecretsConfig, SecretsConfigLayer};
pub use source::{SourceConfig, SourceConfigLayer, MAX_RESULT_CAP};
pub use transform::{TransformConfig, TransformConfigLayer, DEFAULT_EVENT_TYPE};
