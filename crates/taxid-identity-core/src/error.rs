// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for identity provider operations.

use thiserror::Error;

/// Errors that can occur when talking to the identity provider.
#[derive(Debug, Error)]
pub enum IdentityError {
	/// The provider answered and rejected the request.
	#[error("{code}: {message}")]
	Service {
		/// Provider error code, e.g. `UsernameExistsException`.
		code: String,
		/// Human readable message from the provider.
		message: String,
		/// HTTP status of the provider response, when one was received.
		status: Option<u16>,
	},

	/// The request never produced a provider response (network, timeout,
	/// request construction).
	#[error("identity provider request failed: {0}")]
	Transport(String),

	/// Authentication stopped at a challenge this bridge cannot answer
	/// (MFA, new password required, ...).
	#[error("unsupported authentication challenge: {0}")]
	UnsupportedChallenge(String),

	/// Authentication succeeded but the result lacked a token.
	#[error("authentication result is missing the {0}")]
	MissingToken(&'static str),

	/// Local SRP computation failed.
	#[error("SRP handshake failed: {0}")]
	Srp(String),

	/// The request could not be built from the given input.
	#[error("invalid request: {0}")]
	InvalidRequest(String),
}

impl IdentityError {
	/// Build a service error.
	pub fn service(code: impl Into<String>, message: impl Into<String>, status: Option<u16>) -> Self {
		IdentityError::Service {
			code: code.into(),
			message: message.into(),
			status,
		}
	}

	/// HTTP status carried by the error, if any.
	pub fn status_code(&self) -> Option<u16> {
		match self {
			IdentityError::Service { status, .. } => *status,
			_ => None,
		}
	}

	/// Provider error code, if the provider answered.
	pub fn code(&self) -> Option<&str> {
		match self {
			IdentityError::Service { code, .. } => Some(code.as_str()),
			_ => None,
		}
	}

	/// Message suitable for the caller: the provider's own message for service
	/// errors, the display form otherwise. `None` when the provider sent an
	/// empty message.
	pub fn message(&self) -> Option<String> {
		match self {
			IdentityError::Service { message, .. } if message.is_empty() => None,
			IdentityError::Service { message, .. } => Some(message.clone()),
			other => Some(other.to_string()),
		}
	}
}

/// Result type for identity provider operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn service_error_exposes_status_and_code() {
		let err = IdentityError::service("UsernameExistsException", "User already exists", Some(400));
		assert_eq!(err.status_code(), Some(400));
		assert_eq!(err.code(), Some("UsernameExistsException"));
		assert_eq!(err.message().as_deref(), Some("User already exists"));
		assert_eq!(err.to_string(), "UsernameExistsException: User already exists");
	}

	#[test]
	fn empty_service_message_is_none() {
		let err = IdentityError::service("InternalErrorException", "", Some(500));
		assert!(err.message().is_none());
	}

	#[test]
	fn local_errors_have_no_status() {
		let err = IdentityError::Transport("dispatch failure".to_string());
		assert_eq!(err.status_code(), None);
		assert_eq!(err.code(), None);
		assert_eq!(
			err.message().as_deref(),
			Some("identity provider request failed: dispatch failure")
		);

		let err = IdentityError::MissingToken("refresh token");
		assert_eq!(err.to_string(), "authentication result is missing the refresh token");
	}
}
