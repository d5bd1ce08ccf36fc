// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret retrieval.
//!
//! [`fetch_secret`] reads a secret from a [`SecretStore`] and decodes it as
//! JSON of an explicit [`SecretSchema`](logferry_core::SecretSchema). It never
//! returns an error: anything that goes wrong is a
//! [`SecretLookup::Absent`] with the reason attached.

pub mod fetch;
pub mod store;

pub use fetch::{decode, fetch_secret, AbsentReason, SecretLookup, SecretPayload};
pub use store::{MemorySecretStore, RawSecret, SecretStore, SecretsManagerStore, StoreError};
