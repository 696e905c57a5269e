// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use taxid_identity_core::IdentityError;
use thiserror::Error;

/// Errors that end an invocation with an `{"error": ...}` response.
#[derive(Debug, Error)]
pub enum HandlerError {
	/// The identity provider call failed.
	#[error(transparent)]
	Identity(#[from] IdentityError),

	/// The body decoded as JSON but is not a sign-in request.
	#[error("invalid request payload: {0}")]
	Payload(String),
}

impl HandlerError {
	/// Upstream HTTP status, if the error carries one.
	pub fn status_code(&self) -> Option<u16> {
		match self {
			HandlerError::Identity(err) => err.status_code(),
			HandlerError::Payload(_) => None,
		}
	}

	/// Message for the response body.
	pub fn message(&self) -> Option<String> {
		match self {
			HandlerError::Identity(err) => err.message(),
			HandlerError::Payload(_) => Some(self.to_string()),
		}
	}
}
