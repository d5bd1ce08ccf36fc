// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration primitives shared by every logferry crate.
//!
//! - [`Secret<T>`]: keeps HEC tokens and secret-store payloads out of logs,
//!   config dumps and panics.
//! - [`load_secret_env`]: reads a secret from `VAR` or from the file named by
//!   `VAR_FILE`.

pub mod env;
pub mod secret;

pub use env::{load_secret_env, load_secret_with, SecretEnvError};
pub use secret::{Secret, SecretString, REDACTED};
