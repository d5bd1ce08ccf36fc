// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret loading from the environment.
//!
//! `VAR_FILE` (a path, e.g. a mounted Kubernetes secret) wins over `VAR`.
//! A single trailing newline is stripped from file contents. Empty values are
//! treated as unset.

use std::path::PathBuf;
use std::{env, fs};

use thiserror::Error;

use crate::secret::Secret;

#[derive(Debug, Error)]
pub enum SecretEnvError {
	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },
}

/// Load `var` from the environment, honouring `{var}_FILE`.
pub fn load_secret_env(var: &str) -> Result<Option<Secret<String>>, SecretEnvError> {
	load_secret_with(var, |name| env::var(name).ok())
}

/// [`load_secret_env`] against an arbitrary variable lookup.
pub fn load_secret_with<F>(var: &str, lookup: F) -> Result<Option<Secret<String>>, SecretEnvError>
where
	F: Fn(&str) -> Option<String>,
{
	let file_var = format!("{var}_FILE");

	if let Some(path) = lookup(&file_var) {
		if path.trim().is_empty() {
			return Err(SecretEnvError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|source| SecretEnvError::Io {
			path: path.clone(),
			source,
		})?;
		let value = content.strip_suffix('\n').unwrap_or(&content);
		return Ok(Some(Secret::new(value.to_string())));
	}

	Ok(lookup(var).filter(|v| !v.is_empty()).map(Secret::new))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	// Each test owns a unique variable name; the process environment is shared.

	#[test]
	fn unset_is_none() {
		let var = "LOGFERRY_TEST_UNSET_TOKEN";
		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));

		assert!(load_secret_env(var).unwrap().is_none());
	}

	#[test]
	fn empty_direct_value_is_none() {
		let var = "LOGFERRY_TEST_EMPTY_TOKEN";
		env::set_var(var, "");

		assert!(load_secret_env(var).unwrap().is_none());
		env::remove_var(var);
	}

	#[test]
	fn direct_value() {
		let var = "LOGFERRY_TEST_DIRECT_TOKEN";
		env::set_var(var, "direct-token");
		env::remove_var(format!("{var}_FILE"));

		assert_eq!(load_secret_env(var).unwrap().unwrap().expose(), "direct-token");
		env::remove_var(var);
	}

	#[test]
	fn file_wins_and_trailing_newline_is_stripped() {
		let var = "LOGFERRY_TEST_FILE_TOKEN";
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "file-token").unwrap();

		env::set_var(var, "direct-token");
		env::set_var(format!("{var}_FILE"), file.path());

		assert_eq!(load_secret_env(var).unwrap().unwrap().expose(), "file-token");

		env::remove_var(var);
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn missing_file_is_an_error() {
		let var = "LOGFERRY_TEST_MISSING_FILE_TOKEN";
		env::set_var(format!("{var}_FILE"), "/nonexistent/logferry/token");

		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::Io { .. })
		));
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn empty_file_path_is_an_error() {
		let var = "LOGFERRY_TEST_EMPTY_PATH_TOKEN";
		env::set_var(format!("{var}_FILE"), "");

		assert!(matches!(
			load_secret_env(var),
			Err(SecretEnvError::EmptyPath { .. })
		));
		env::remove_var(format!("{var}_FILE"));
	}

	#[test]
	fn custom_lookup_sees_only_its_own_variables() {
		let vars = [("APP_TOKEN", "from-map")];
		let lookup = |name: &str| {
			vars.iter()
				.find(|(k, _)| *k == name)
				.map(|(_, v)| v.to_string())
		};

		assert_eq!(
			load_secret_with("APP_TOKEN", lookup).unwrap().unwrap().expose(),
			"from-map"
		);
		assert!(load_secret_with("OTHER_TOKEN", lookup).unwrap().is_none());
	}
}
