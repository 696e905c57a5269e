// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Common configuration primitives for the taxid sign-in bridge.
//!
//! This crate provides:
//!
//! - [`Secret<T>`]: A wrapper type that prevents accidental logging of
//!   sensitive values (re-exported from [`taxid_common_secret`])
//! - [`load_secret_from`] / [`require_secret_from`]: Helpers for loading
//!   secrets from environment variables with `*_FILE` support
//! - [`require_var`] / [`optional_var`]: Plain variable lookups that treat
//!   empty values as unset

pub mod env;

pub use taxid_common_secret::{Secret, SecretString, REDACTED};

pub use env::{
	load_secret_from, optional_var, process_env, require_secret_from, require_var, EnvVarError,
	RequiredSecretError, SecretEnvError,
};
