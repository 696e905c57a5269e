// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use taxid_identity_core::{IdentityProvider, LookupOutcome, NewUser, SessionTokens};
use tracing::{error, info, instrument, warn};

use crate::error::HandlerError;
use crate::event::{BodyError, SignInEvent, SignInRequest};
use crate::response::ApiResponse;

/// Resolves or provisions an account, then signs it in.
///
/// Holds the process-wide identity provider; cloning is cheap.
#[derive(Clone)]
pub struct SignInHandler {
	provider: Arc<dyn IdentityProvider>,
}

impl SignInHandler {
	pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
		Self { provider }
	}

	/// Handle one event. Always produces a response.
	#[instrument(skip_all, name = "SignInHandler::handle")]
	pub async fn handle(&self, event: &SignInEvent) -> ApiResponse {
		let result = match event.decode() {
			Ok(request) => self.sign_in(&request).await,
			Err(BodyError::InvalidJson(e)) => {
				warn!(error = %e, "rejecting body that is not JSON");
				return ApiResponse::invalid_json();
			}
			Err(BodyError::Payload(message)) => Err(HandlerError::Payload(message)),
		};

		let response = match result {
			Ok(tokens) => ApiResponse::tokens(&tokens),
			Err(err) => {
				error!(error = %err, status = ?err.status_code(), "sign-in failed");
				ApiResponse::from_error(&err)
			}
		};

		info!(status = response.status_code, "response");
		response
	}

	/// Look the account up, provision it if absent, then authenticate.
	#[instrument(skip_all, name = "SignInHandler::sign_in", fields(taxpayer_id = %request.taxpayer_id))]
	pub async fn sign_in(&self, request: &SignInRequest) -> Result<SessionTokens, HandlerError> {
		let username = match self.provider.get_user(&request.taxpayer_id).await? {
			LookupOutcome::Found(record) => {
				info!(status = ?record.status, enabled = record.enabled, "account exists");
				record.username
			}
			LookupOutcome::Absent => {
				info!("no account for taxpayer id, creating one");
				let user = NewUser {
					username: request.taxpayer_id.clone(),
					name: request.name.clone(),
					email: request.email.clone(),
				};
				self.provider.create_user(&user).await?;
				self.provider.confirm_user(&user.username).await?;
				user.username
			}
		};

		Ok(self.provider.authenticate_user(&username).await?)
	}
}
