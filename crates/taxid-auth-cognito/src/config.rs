// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration for the Cognito client.

use taxid_common_config::{
	load_secret_from, optional_var, process_env, require_secret_from, require_var, EnvVarError,
	RequiredSecretError, SecretEnvError, SecretString,
};
use taxid_identity_core::{AbsentUserPolicy, CredentialPolicy, CredentialPolicyKind};

pub const USER_POOL_ID_VAR: &str = "USER_POOL_ID";
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";
pub const CREDENTIAL_POLICY_VAR: &str = "TAXID_CREDENTIAL_POLICY";
pub const SHARED_PASSWORD_VAR: &str = "TAXID_AUTH_SHARED_PASSWORD";
pub const ABSENT_USER_CODES_VAR: &str = "TAXID_ABSENT_USER_CODES";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error(transparent)]
	Env(#[from] EnvVarError),

	#[error(transparent)]
	Secret(#[from] SecretEnvError),

	#[error(transparent)]
	RequiredSecret(#[from] RequiredSecretError),

	/// A configuration value was present but invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Settings for talking to one Cognito user pool through one app client.
///
/// `client_secret` and the shared password inside `credentials` are
/// [`SecretString`]s, so `Debug` output is safe to log.
#[derive(Debug, Clone)]
pub struct CognitoConfig {
	/// User pool id, `<region>_<id>`.
	pub user_pool_id: String,
	/// App client id.
	pub client_id: String,
	/// App client secret, when the app client has one.
	pub client_secret: Option<SecretString>,
	/// Password used for sign-up and sign-in.
	pub credentials: CredentialPolicy,
	/// Lookup errors treated as "no such account".
	pub absent_users: AbsentUserPolicy,
}

impl CognitoConfig {
	/// Load configuration from environment variables.
	///
	/// # Required Environment Variables
	///
	/// - `USER_POOL_ID`: The Cognito user pool id.
	/// - `CLIENT_ID`: The app client id.
	/// - `TAXID_AUTH_SHARED_PASSWORD` (or `_FILE`): Required unless the
	///   credential policy is `taxpayer-id`.
	///
	/// # Optional Environment Variables
	///
	/// - `CLIENT_SECRET` (or `_FILE`): App client secret.
	/// - `TAXID_CREDENTIAL_POLICY`: `shared-secret` (default) or `taxpayer-id`.
	/// - `TAXID_ABSENT_USER_CODES`: Comma-separated provider error codes that
	///   also mean "no such account".
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(process_env)
	}

	/// Like [`CognitoConfig::from_env`] but reads variables through `lookup`.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let user_pool_id = require_var(USER_POOL_ID_VAR, &lookup)?;
		let client_id = require_var(CLIENT_ID_VAR, &lookup)?;
		let client_secret =
			load_secret_from(CLIENT_SECRET_VAR, &lookup)?.filter(|secret| !secret.is_empty());

		let kind = match optional_var(CREDENTIAL_POLICY_VAR, &lookup) {
			Some(raw) => raw.parse::<CredentialPolicyKind>().map_err(ConfigError::InvalidConfig)?,
			None => CredentialPolicyKind::SharedSecret,
		};
		let credentials = match kind {
			CredentialPolicyKind::SharedSecret => {
				CredentialPolicy::SharedSecret(require_secret_from(SHARED_PASSWORD_VAR, &lookup)?)
			}
			CredentialPolicyKind::TaxpayerId => CredentialPolicy::TaxpayerId,
		};

		let absent_users = optional_var(ABSENT_USER_CODES_VAR, &lookup)
			.map(|list| AbsentUserPolicy::parse(&list))
			.unwrap_or_default();

		let config = Self {
			user_pool_id,
			client_id,
			client_secret,
			credentials,
			absent_users,
		};
		config.validate()?;
		Ok(config)
	}

	/// Validate the user pool id and client id.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if the pool id is not of the form
	/// `<region>_<id>` or the client id is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.client_id.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"client_id cannot be empty".to_string(),
			));
		}
		self.region()?;
		if let CredentialPolicy::SharedSecret(secret) = &self.credentials {
			if secret.is_empty() {
				return Err(ConfigError::InvalidConfig(
					"shared password cannot be empty".to_string(),
				));
			}
		}
		Ok(())
	}

	/// AWS region of the user pool, taken from the pool id prefix.
	pub fn region(&self) -> Result<&str, ConfigError> {
		match self.user_pool_id.split_once('_') {
			Some((region, id)) if !region.is_empty() && !id.is_empty() => Ok(region),
			_ => Err(ConfigError::InvalidConfig(format!(
				"user pool id '{}' is not of the form <region>_<id>",
				self.user_pool_id
			))),
		}
	}

	/// The app client secret, if configured.
	pub fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_ref().map(|s| s.expose().as_str())
	}
}
