// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Pieces of the `USER_SRP_AUTH` handshake that do not touch the network.
//!
//! ```text
//! client                                     Cognito
//!   │  InitiateAuth(USERNAME, SRP_A)             │
//!   │───────────────────────────────────────────>│
//!   │  PASSWORD_VERIFIER(SALT, SRP_B,            │
//!   │    SECRET_BLOCK, USER_ID_FOR_SRP)          │
//!   │<───────────────────────────────────────────│
//!   │  RespondToAuthChallenge(CLAIM_SIGNATURE)   │
//!   │───────────────────────────────────────────>│
//!   │  AuthenticationResult(tokens)              │
//!   │<───────────────────────────────────────────│
//! ```

use std::collections::HashMap;

use aws_sdk_cognitoidentityprovider::types::AuthenticationResultType;
use taxid_identity_core::{IdentityError, Result, SessionTokens};

pub(crate) const SALT: &str = "SALT";
pub(crate) const SRP_B: &str = "SRP_B";
pub(crate) const SECRET_BLOCK: &str = "SECRET_BLOCK";
pub(crate) const USER_ID_FOR_SRP: &str = "USER_ID_FOR_SRP";

/// Parameters of a `PASSWORD_VERIFIER` challenge.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PasswordVerifierChallenge<'a> {
	pub salt: &'a str,
	pub srp_b: &'a str,
	pub secret_block: &'a str,
	pub user_id_for_srp: &'a str,
}

impl<'a> PasswordVerifierChallenge<'a> {
	pub(crate) fn parse(params: &'a HashMap<String, String>) -> Result<Self> {
		Ok(Self {
			salt: param(params, SALT)?,
			srp_b: param(params, SRP_B)?,
			secret_block: param(params, SECRET_BLOCK)?,
			user_id_for_srp: param(params, USER_ID_FOR_SRP)?,
		})
	}
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
	params
		.get(key)
		.map(String::as_str)
		.filter(|v| !v.is_empty())
		.ok_or_else(|| IdentityError::Srp(format!("challenge is missing {key}")))
}

/// Take the three tokens out of a successful authentication result.
pub(crate) fn tokens_from(result: &AuthenticationResultType) -> Result<SessionTokens> {
	let access = result
		.access_token()
		.ok_or(IdentityError::MissingToken("access token"))?;
	let id = result
		.id_token()
		.ok_or(IdentityError::MissingToken("id token"))?;
	let refresh = result
		.refresh_token()
		.ok_or(IdentityError::MissingToken("refresh token"))?;
	Ok(SessionTokens::new(access, id, refresh))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn challenge_params() -> HashMap<String, String> {
		[
			(SALT, "a1b2"),
			(SRP_B, "ff00"),
			(SECRET_BLOCK, "c2VjcmV0"),
			(USER_ID_FOR_SRP, "123"),
		]
		.into_iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
	}

	#[test]
	fn parses_password_verifier_challenge() {
		let params = challenge_params();
		let challenge = PasswordVerifierChallenge::parse(&params).unwrap();
		assert_eq!(
			challenge,
			PasswordVerifierChallenge {
				salt: "a1b2",
				srp_b: "ff00",
				secret_block: "c2VjcmV0",
				user_id_for_srp: "123",
			}
		);
	}

	#[test]
	fn missing_challenge_parameter_is_an_error() {
		let mut params = challenge_params();
		params.remove(SRP_B);
		let err = PasswordVerifierChallenge::parse(&params).unwrap_err();
		assert!(err.to_string().contains(SRP_B));
	}

	#[test]
	fn empty_challenge_parameter_is_an_error() {
		let mut params = challenge_params();
		params.insert(SALT.to_string(), String::new());
		assert!(PasswordVerifierChallenge::parse(&params).is_err());
	}

	#[test]
	fn extracts_tokens_verbatim() {
		let result = AuthenticationResultType::builder()
			.access_token("eyJ.access")
			.id_token("eyJ.id")
			.refresh_token("eyJ.refresh")
			.build();
		let tokens = tokens_from(&result).unwrap();
		assert_eq!(tokens.access_token.expose(), "eyJ.access");
		assert_eq!(tokens.id_token.expose(), "eyJ.id");
		assert_eq!(tokens.refresh_token.expose(), "eyJ.refresh");
	}

	#[test]
	fn missing_refresh_token_is_reported() {
		let result = AuthenticationResultType::builder()
			.access_token("eyJ.access")
			.id_token("eyJ.id")
			.build();
		let err = tokens_from(&result).unwrap_err();
		assert!(matches!(err, IdentityError::MissingToken("refresh token")));
	}
}
