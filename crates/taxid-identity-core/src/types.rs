// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use taxid_common_secret::SecretString;

/// An account as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
	/// Canonical username as stored by the provider.
	pub username: String,
	/// Provider account status (`CONFIRMED`, `UNCONFIRMED`, ...), if reported.
	pub status: Option<String>,
	/// Whether the account is enabled.
	pub enabled: bool,
}

/// Result of looking an account up by username.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
	Found(UserRecord),
	Absent,
}

/// Attributes for a new account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
	pub username: String,
	pub name: String,
	pub email: String,
}

/// Tokens issued by a successful authentication, relayed verbatim.
///
/// Tokens are bearer credentials, so they are wrapped in [`SecretString`] and
/// never show up in logs.
#[derive(Clone, Debug)]
pub struct SessionTokens {
	pub access_token: SecretString,
	pub id_token: SecretString,
	pub refresh_token: SecretString,
}

impl SessionTokens {
	pub fn new(
		access_token: impl Into<String>,
		id_token: impl Into<String>,
		refresh_token: impl Into<String>,
	) -> Self {
		Self {
			access_token: SecretString::new(access_token.into()),
			id_token: SecretString::new(id_token.into()),
			refresh_token: SecretString::new(refresh_token.into()),
		}
	}
}
