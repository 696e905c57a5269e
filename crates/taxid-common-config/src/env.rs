// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Environment variable helpers.
//!
//! Every helper has a `*_from` form that takes a lookup function instead of
//! reading the process environment, so configuration parsing can be tested
//! without mutating global state.

use std::path::PathBuf;

use taxid_common_secret::SecretString;

/// Errors from plain (non-secret) variable lookups.
#[derive(Debug, thiserror::Error)]
pub enum EnvVarError {
	/// A required environment variable was not set.
	#[error("missing environment variable: {0}")]
	Missing(String),

	/// A required environment variable was set to an empty string.
	#[error("environment variable {0} is empty")]
	Empty(String),
}

/// Errors from secret lookups.
#[derive(Debug, thiserror::Error)]
pub enum SecretEnvError {
	/// `<NAME>_FILE` pointed at a file that could not be read.
	#[error("failed to read {var} from {path}: {source}")]
	FileRead {
		var: String,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// Errors from secret lookups where the secret must be present.
#[derive(Debug, thiserror::Error)]
pub enum RequiredSecretError {
	/// Neither `<NAME>` nor `<NAME>_FILE` was set, or the value was empty.
	#[error("missing secret: set {0} or {0}_FILE")]
	Missing(String),

	#[error(transparent)]
	Env(#[from] SecretEnvError),
}

/// Lookup function backed by the process environment.
pub fn process_env(name: &str) -> Option<String> {
	std::env::var(name).ok()
}

/// Read a required variable. Empty values count as unset.
pub fn require_var<F>(name: &str, lookup: F) -> Result<String, EnvVarError>
where
	F: Fn(&str) -> Option<String>,
{
	match lookup(name) {
		None => Err(EnvVarError::Missing(name.to_string())),
		Some(v) if v.trim().is_empty() => Err(EnvVarError::Empty(name.to_string())),
		Some(v) => Ok(v.trim().to_string()),
	}
}

/// Read an optional variable. Empty values count as unset.
pub fn optional_var<F>(name: &str, lookup: F) -> Option<String>
where
	F: Fn(&str) -> Option<String>,
{
	lookup(name)
		.map(|v| v.trim().to_string())
		.filter(|v| !v.is_empty())
}

/// Load a secret, reading variables through `lookup`.
///
/// `<NAME>_FILE` takes precedence over `<NAME>`; when set, the secret is read
/// from that path with trailing newlines stripped. Returns `Ok(None)` when
/// neither variable is set.
pub fn load_secret_from<F>(name: &str, lookup: F) -> Result<Option<SecretString>, SecretEnvError>
where
	F: Fn(&str) -> Option<String>,
{
	let file_var = format!("{name}_FILE");
	if let Some(path) = optional_var(&file_var, &lookup) {
		let path = PathBuf::from(path);
		let contents = std::fs::read_to_string(&path).map_err(|source| SecretEnvError::FileRead {
			var: file_var,
			path,
			source,
		})?;
		let value = contents.trim_end_matches(['\r', '\n']).to_string();
		return Ok(Some(SecretString::new(value)));
	}

	Ok(lookup(name).map(SecretString::new))
}

/// Load a secret that must be present and non-empty.
pub fn require_secret_from<F>(name: &str, lookup: F) -> Result<SecretString, RequiredSecretError>
where
	F: Fn(&str) -> Option<String>,
{
	match load_secret_from(name, lookup)? {
		Some(secret) if !secret.is_empty() => Ok(secret),
		_ => Err(RequiredSecretError::Missing(name.to_string())),
	}
}
