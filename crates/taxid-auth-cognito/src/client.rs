// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use aws_cognito_srp::{AuthParameters, SrpClient, User, VerificationParameters};
use aws_config::BehaviorVersion;
use aws_sdk_cognitoidentityprovider::config::Region;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType, ChallengeNameType};
use aws_sdk_cognitoidentityprovider::Client;
use tracing::{debug, error, info, instrument};

use taxid_identity_core::{
	IdentityError, IdentityProvider, LookupOutcome, NewUser, Result, SessionTokens, UserRecord,
};

use crate::config::CognitoConfig;
use crate::error::from_sdk;
use crate::secret_hash::secret_hash;
use crate::srp::{tokens_from, PasswordVerifierChallenge};

/// Cognito user pool client.
///
/// Build it once per process and share it; the underlying SDK client pools
/// connections and caches credentials.
#[derive(Debug, Clone)]
pub struct CognitoIdentityClient {
	client: Client,
	config: CognitoConfig,
}

impl CognitoIdentityClient {
	/// Wrap an existing SDK client.
	pub fn new(client: Client, config: CognitoConfig) -> Self {
		Self { client, config }
	}

	/// Build an SDK client from the default credential chain, pinned to the
	/// user pool's region.
	#[instrument(skip_all, name = "CognitoIdentityClient::from_config", fields(user_pool_id = %config.user_pool_id))]
	pub async fn from_config(config: CognitoConfig) -> Self {
		let mut loader = aws_config::defaults(BehaviorVersion::latest());
		if let Ok(region) = config.region() {
			loader = loader.region(Region::new(region.to_string()));
		}
		let sdk_config = loader.load().await;
		Self::new(Client::new(&sdk_config), config)
	}

	fn attribute(name: &str, value: &str) -> Result<AttributeType> {
		AttributeType::builder()
			.name(name)
			.value(value)
			.build()
			.map_err(|e| IdentityError::InvalidRequest(e.to_string()))
	}

	fn srp_client(&self, username: &str) -> SrpClient<User> {
		let password = self.config.credentials.password_for(username);
		let user = User::new(&self.config.user_pool_id, username, password.expose());
		SrpClient::new(user, &self.config.client_id, self.config.client_secret())
	}
}

#[async_trait]
impl IdentityProvider for CognitoIdentityClient {
	#[instrument(skip(self), name = "CognitoIdentityClient::get_user")]
	async fn get_user(&self, username: &str) -> Result<LookupOutcome> {
		let response = self
			.client
			.admin_get_user()
			.user_pool_id(&self.config.user_pool_id)
			.username(username)
			.send()
			.await;

		match response {
			Ok(output) => Ok(LookupOutcome::Found(UserRecord {
				username: output.username().to_string(),
				status: output.user_status().map(|s| s.as_str().to_string()),
				enabled: output.enabled(),
			})),
			Err(err) => {
				let err = from_sdk(err);
				if self.config.absent_users.is_absent(&err) {
					debug!(code = ?err.code(), "user does not exist");
					Ok(LookupOutcome::Absent)
				} else {
					error!(error = %err, "error getting user by username");
					Err(err)
				}
			}
		}
	}

	#[instrument(skip(self, user), name = "CognitoIdentityClient::create_user", fields(username = %user.username))]
	async fn create_user(&self, user: &NewUser) -> Result<()> {
		let password = self.config.credentials.password_for(&user.username);

		let mut request = self
			.client
			.sign_up()
			.client_id(&self.config.client_id)
			.username(&user.username)
			.password(password.expose())
			.user_attributes(Self::attribute("name", &user.name)?)
			.user_attributes(Self::attribute("email", &user.email)?);

		if let Some(client_secret) = self.config.client_secret() {
			request = request.secret_hash(secret_hash(
				client_secret,
				&user.username,
				&self.config.client_id,
			));
		}

		request.send().await.map_err(|e| {
			let err = from_sdk(e);
			error!(error = %err, "error creating user");
			err
		})?;

		debug!("user signed up");
		Ok(())
	}

	#[instrument(skip(self), name = "CognitoIdentityClient::confirm_user")]
	async fn confirm_user(&self, username: &str) -> Result<()> {
		self
			.client
			.admin_confirm_sign_up()
			.user_pool_id(&self.config.user_pool_id)
			.username(username)
			.send()
			.await
			.map_err(|e| {
				let err = from_sdk(e);
				error!(error = %err, "error confirming user");
				err
			})?;

		info!(username, "user has been confirmed");
		Ok(())
	}

	#[instrument(skip(self), name = "CognitoIdentityClient::authenticate_user")]
	async fn authenticate_user(&self, username: &str) -> Result<SessionTokens> {
		let result = self.srp_handshake(username).await;
		if let Err(err) = &result {
			error!(error = %err, "authentication failed");
		}
		result
	}
}

impl CognitoIdentityClient {
	async fn srp_handshake(&self, username: &str) -> Result<SessionTokens> {
		let srp = self.srp_client(username);
		let AuthParameters {
			a,
			username: srp_username,
			secret_hash: auth_hash,
			..
		} = srp.get_auth_parameters();

		let mut initiate = self
			.client
			.initiate_auth()
			.auth_flow(AuthFlowType::UserSrpAuth)
			.client_id(&self.config.client_id)
			.auth_parameters("USERNAME", srp_username.unwrap_or_else(|| username.to_string()))
			.auth_parameters("SRP_A", a);
		if let Some(hash) = auth_hash {
			initiate = initiate.auth_parameters("SECRET_HASH", hash);
		}
		let initiated = initiate.send().await.map_err(from_sdk)?;

		if let Some(result) = initiated.authentication_result() {
			return tokens_from(result);
		}

		match initiated.challenge_name() {
			Some(ChallengeNameType::PasswordVerifier) => {}
			Some(other) => return Err(IdentityError::UnsupportedChallenge(other.as_str().to_string())),
			None => return Err(IdentityError::Srp("no challenge and no tokens in response".to_string())),
		}

		let params = initiated
			.challenge_parameters()
			.ok_or_else(|| IdentityError::Srp("challenge has no parameters".to_string()))?;
		let challenge = PasswordVerifierChallenge::parse(params)?;

		let VerificationParameters {
			password_claim_secret_block,
			password_claim_signature,
			secret_hash: verify_hash,
			timestamp,
		} = srp
			.verify(
				challenge.secret_block,
				challenge.user_id_for_srp,
				challenge.salt,
				challenge.srp_b,
			)
			.map_err(|e| IdentityError::Srp(e.to_string()))?;

		let mut respond = self
			.client
			.respond_to_auth_challenge()
			.client_id(&self.config.client_id)
			.challenge_name(ChallengeNameType::PasswordVerifier)
			.challenge_responses("USERNAME", challenge.user_id_for_srp)
			.challenge_responses("PASSWORD_CLAIM_SECRET_BLOCK", password_claim_secret_block)
			.challenge_responses("PASSWORD_CLAIM_SIGNATURE", password_claim_signature)
			.challenge_responses("TIMESTAMP", timestamp);
		if let Some(hash) = verify_hash {
			respond = respond.challenge_responses("SECRET_HASH", hash);
		}
		if let Some(session) = initiated.session() {
			respond = respond.session(session);
		}
		let responded = respond.send().await.map_err(from_sdk)?;

		match (responded.authentication_result(), responded.challenge_name()) {
			(Some(result), _) => tokens_from(result),
			(None, Some(next)) => Err(IdentityError::UnsupportedChallenge(next.as_str().to_string())),
			(None, None) => Err(IdentityError::Srp("challenge response carried no tokens".to_string())),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use aws_sdk_cognitoidentityprovider::error::ErrorMetadata;
	use aws_sdk_cognitoidentityprovider::operation::admin_get_user::{
		AdminGetUserError, AdminGetUserOutput,
	};
	use aws_sdk_cognitoidentityprovider::operation::initiate_auth::InitiateAuthOutput;
	use aws_sdk_cognitoidentityprovider::operation::respond_to_auth_challenge::RespondToAuthChallengeOutput;
	use aws_sdk_cognitoidentityprovider::operation::sign_up::SignUpOutput;
	use aws_sdk_cognitoidentityprovider::types::error::UserNotFoundException;
	use aws_sdk_cognitoidentityprovider::types::{AuthenticationResultType, UserStatusType};
	use aws_smithy_mocks::{mock, mock_client, RuleMode};
	use taxid_common_config::SecretString;
	use taxid_identity_core::{AbsentUserPolicy, CredentialPolicy};

	const POOL_ID: &str = "us-east-1_TestPool";
	const CLIENT_ID: &str = "client-id";

	fn config(client_secret: Option<&str>, absent_codes: &str) -> CognitoConfig {
		CognitoConfig {
			user_pool_id: POOL_ID.to_string(),
			client_id: CLIENT_ID.to_string(),
			client_secret: client_secret.map(SecretString::from),
			credentials: CredentialPolicy::SharedSecret(SecretString::from("Sh4red!pw")),
			absent_users: AbsentUserPolicy::parse(absent_codes),
		}
	}

	fn new_user() -> NewUser {
		NewUser {
			username: "123".to_string(),
			name: "Ana".to_string(),
			email: "a@x.com".to_string(),
		}
	}

	fn service_meta(code: &str, message: &str) -> ErrorMetadata {
		ErrorMetadata::builder().code(code).message(message).build()
	}

	fn issued_tokens() -> AuthenticationResultType {
		AuthenticationResultType::builder()
			.access_token("eyJ.access")
			.id_token("eyJ.id")
			.refresh_token("eyJ.refresh")
			.build()
	}

	#[tokio::test]
	async fn existing_user_is_found_with_status() {
		let rule = mock!(Client::admin_get_user)
			.match_requests(|req| {
				req.user_pool_id() == Some(POOL_ID) && req.username() == Some("123")
			})
			.then_output(|| {
				AdminGetUserOutput::builder()
					.username("123")
					.user_status(UserStatusType::Confirmed)
					.enabled(true)
					.build()
					.unwrap()
			});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, ""),
		);

		let outcome = client.get_user("123").await.unwrap();
		assert_eq!(
			outcome,
			LookupOutcome::Found(UserRecord {
				username: "123".to_string(),
				status: Some("CONFIRMED".to_string()),
				enabled: true,
			})
		);
	}

	#[tokio::test]
	async fn user_not_found_is_absent() {
		let rule = mock!(Client::admin_get_user).then_error(|| {
			AdminGetUserError::UserNotFoundException(
				UserNotFoundException::builder()
					.message("User does not exist.")
					.meta(service_meta("UserNotFoundException", "User does not exist."))
					.build(),
			)
		});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, ""),
		);

		assert_eq!(client.get_user("123").await.unwrap(), LookupOutcome::Absent);
	}

	#[tokio::test]
	async fn configured_codes_are_absent() {
		let rule = mock!(Client::admin_get_user).then_error(|| {
			AdminGetUserError::generic(service_meta("ResourceNotFoundException", "gone"))
		});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, "ResourceNotFoundException"),
		);

		assert_eq!(client.get_user("123").await.unwrap(), LookupOutcome::Absent);
	}

	#[tokio::test]
	async fn unconfigured_lookup_error_is_relayed() {
		let rule = mock!(Client::admin_get_user).then_error(|| {
			AdminGetUserError::generic(service_meta("ResourceNotFoundException", "gone"))
		});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, ""),
		);

		let err = client.get_user("123").await.unwrap_err();
		assert_eq!(err.code(), Some("ResourceNotFoundException"));
		assert_eq!(err.message().as_deref(), Some("gone"));
	}

	#[tokio::test]
	async fn sign_up_sends_attributes_and_secret_hash() {
		let expected_hash = secret_hash("client-secret", "123", CLIENT_ID);
		let rule = mock!(Client::sign_up)
			.match_requests(move |req| {
				let attributes: Vec<(&str, Option<&str>)> = req
					.user_attributes()
					.iter()
					.map(|a| (a.name(), a.value()))
					.collect();
				req.client_id() == Some(CLIENT_ID)
					&& req.username() == Some("123")
					&& req.password() == Some("Sh4red!pw")
					&& req.secret_hash() == Some(expected_hash.as_str())
					&& attributes == [("name", Some("Ana")), ("email", Some("a@x.com"))]
			})
			.then_output(|| {
				SignUpOutput::builder()
					.user_confirmed(false)
					.user_sub("sub-123")
					.build()
					.unwrap()
			});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(Some("client-secret"), ""),
		);

		client.create_user(&new_user()).await.unwrap();
	}

	#[tokio::test]
	async fn sign_up_omits_secret_hash_without_client_secret() {
		let rule = mock!(Client::sign_up)
			.match_requests(|req| req.secret_hash().is_none())
			.then_output(|| {
				SignUpOutput::builder()
					.user_confirmed(false)
					.user_sub("sub-123")
					.build()
					.unwrap()
			});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, ""),
		);

		client.create_user(&new_user()).await.unwrap();
	}

	#[tokio::test]
	async fn password_verifier_handshake_returns_tokens() {
		let initiate = mock!(Client::initiate_auth)
			.match_requests(|req| {
				let params = req.auth_parameters();
				req.auth_flow() == Some(&AuthFlowType::UserSrpAuth)
					&& params.and_then(|p| p.get("USERNAME")).map(String::as_str) == Some("123")
					&& params.is_some_and(|p| p.contains_key("SRP_A"))
			})
			.then_output(|| {
				InitiateAuthOutput::builder()
					.challenge_name(ChallengeNameType::PasswordVerifier)
					.session("session-1")
					.challenge_parameters("SALT", "a1b2")
					.challenge_parameters("SRP_B", "ff00")
					.challenge_parameters("SECRET_BLOCK", "c2VjcmV0")
					.challenge_parameters("USER_ID_FOR_SRP", "123")
					.build()
			});
		let respond = mock!(Client::respond_to_auth_challenge)
			.match_requests(|req| {
				let responses = req.challenge_responses();
				let has = |key: &str| responses.is_some_and(|r| r.contains_key(key));
				req.session() == Some("session-1")
					&& req.challenge_name() == Some(&ChallengeNameType::PasswordVerifier)
					&& responses.and_then(|r| r.get("USERNAME")).map(String::as_str) == Some("123")
					&& has("PASSWORD_CLAIM_SECRET_BLOCK")
					&& has("PASSWORD_CLAIM_SIGNATURE")
					&& has("TIMESTAMP")
			})
			.then_output(|| {
				RespondToAuthChallengeOutput::builder()
					.authentication_result(issued_tokens())
					.build()
			});
		let client = CognitoIdentityClient::new(
			mock_client!(
				aws_sdk_cognitoidentityprovider,
				RuleMode::MatchAny,
				&[&initiate, &respond]
			),
			config(None, ""),
		);

		let tokens = client.authenticate_user("123").await.unwrap();
		assert_eq!(tokens.access_token.expose(), "eyJ.access");
		assert_eq!(tokens.id_token.expose(), "eyJ.id");
		assert_eq!(tokens.refresh_token.expose(), "eyJ.refresh");
	}

	#[tokio::test]
	async fn tokens_from_initiate_auth_skip_the_challenge() {
		let rule = mock!(Client::initiate_auth).then_output(|| {
			InitiateAuthOutput::builder()
				.authentication_result(issued_tokens())
				.build()
		});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, ""),
		);

		let tokens = client.authenticate_user("123").await.unwrap();
		assert_eq!(tokens.access_token.expose(), "eyJ.access");
	}

	#[tokio::test]
	async fn other_challenges_are_unsupported() {
		let rule = mock!(Client::initiate_auth).then_output(|| {
			InitiateAuthOutput::builder()
				.challenge_name(ChallengeNameType::SmsMfa)
				.session("session-1")
				.build()
		});
		let client = CognitoIdentityClient::new(
			mock_client!(aws_sdk_cognitoidentityprovider, RuleMode::MatchAny, &[&rule]),
			config(None, ""),
		);

		let err = client.authenticate_user("123").await.unwrap_err();
		assert!(matches!(err, IdentityError::UnsupportedChallenge(ref c) if c == "SMS_MFA"));
	}
}
