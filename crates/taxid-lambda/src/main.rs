// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing::{info, warn};

use taxid_auth_cognito::{CognitoConfig, CognitoIdentityClient};
use taxid_identity_core::CredentialPolicyKind;
use taxid_lambda::{logging, ApiResponse, SignInEvent, SignInHandler};

#[tokio::main]
async fn main() -> Result<(), Error> {
	logging::init();

	let config = CognitoConfig::from_env()?;
	if config.credentials.kind() == CredentialPolicyKind::TaxpayerId {
		warn!("credential policy is taxpayer-id: every account's password is its username");
	}
	info!(
		user_pool_id = %config.user_pool_id,
		credential_policy = %config.credentials.kind(),
		absent_user_codes = ?config.absent_users.extra_codes(),
		"starting sign-in function"
	);

	let client = CognitoIdentityClient::from_config(config).await;
	let handler = SignInHandler::new(Arc::new(client));
	let handler = &handler;

	lambda_runtime::run(service_fn(move |event: LambdaEvent<SignInEvent>| async move {
		info!(request_id = %event.context.request_id, "invocation");
		Ok::<ApiResponse, Error>(handler.handle(&event.payload).await)
	}))
	.await
}
