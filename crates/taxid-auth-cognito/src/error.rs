// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Mapping from AWS SDK errors to [`IdentityError`].

use aws_sdk_cognitoidentityprovider::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use taxid_identity_core::IdentityError;

const UNKNOWN_CODE: &str = "Unknown";

/// Convert an SDK error. Service errors keep their code, message and HTTP
/// status; everything else is a transport error without a status.
pub(crate) fn from_sdk<E>(err: SdkError<E>) -> IdentityError
where
	E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
	match err {
		SdkError::ServiceError(ctx) => {
			let status = ctx.raw().status().as_u16();
			let source = ctx.err();
			service_error(source.code(), source.message(), status)
		}
		other => IdentityError::Transport(DisplayErrorContext(&other).to_string()),
	}
}

fn service_error(code: Option<&str>, message: Option<&str>, status: u16) -> IdentityError {
	IdentityError::service(
		code.unwrap_or(UNKNOWN_CODE),
		message.unwrap_or_default(),
		Some(status),
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn service_error_keeps_code_message_and_status() {
		let err = service_error(Some("UserNotFoundException"), Some("User does not exist."), 400);
		assert_eq!(err.code(), Some("UserNotFoundException"));
		assert_eq!(err.message().as_deref(), Some("User does not exist."));
		assert_eq!(err.status_code(), Some(400));
	}

	#[test]
	fn service_error_without_metadata() {
		let err = service_error(None, None, 500);
		assert_eq!(err.code(), Some(UNKNOWN_CODE));
		assert!(err.message().is_none());
		assert_eq!(err.status_code(), Some(500));
	}
}
