// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Credential and lookup policies.

use std::fmt;
use std::str::FromStr;

use taxid_common_secret::SecretString;

use crate::error::IdentityError;

/// Provider error code for a lookup of a nonexistent account.
pub const USER_NOT_FOUND_CODE: &str = "UserNotFoundException";

/// Which credential policy is configured, without the secret itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialPolicyKind {
	SharedSecret,
	TaxpayerId,
}

impl CredentialPolicyKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			CredentialPolicyKind::SharedSecret => "shared-secret",
			CredentialPolicyKind::TaxpayerId => "taxpayer-id",
		}
	}
}

impl fmt::Display for CredentialPolicyKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for CredentialPolicyKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"shared-secret" | "shared_secret" => Ok(CredentialPolicyKind::SharedSecret),
			"taxpayer-id" | "taxpayer_id" => Ok(CredentialPolicyKind::TaxpayerId),
			other => Err(format!(
				"unknown credential policy '{other}', expected 'shared-secret' or 'taxpayer-id'"
			)),
		}
	}
}

/// The password used for both sign-up and authentication.
#[derive(Clone, Debug)]
pub enum CredentialPolicy {
	/// Every account uses the same configured password.
	SharedSecret(SecretString),
	/// The username is its own password. Anyone who knows a taxpayer id can
	/// sign in as that account.
	TaxpayerId,
}

impl CredentialPolicy {
	pub fn kind(&self) -> CredentialPolicyKind {
		match self {
			CredentialPolicy::SharedSecret(_) => CredentialPolicyKind::SharedSecret,
			CredentialPolicy::TaxpayerId => CredentialPolicyKind::TaxpayerId,
		}
	}

	/// Password for `username`.
	pub fn password_for(&self, username: &str) -> SecretString {
		match self {
			CredentialPolicy::SharedSecret(secret) => secret.clone(),
			CredentialPolicy::TaxpayerId => SecretString::new(username.to_string()),
		}
	}
}

/// Decides which lookup failures mean "no such account".
///
/// `UserNotFoundException` always does. Extra provider codes can be added;
/// by default none are.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsentUserPolicy {
	extra_codes: Vec<String>,
}

impl AbsentUserPolicy {
	/// Only `UserNotFoundException` counts as absent.
	pub fn strict() -> Self {
		Self::default()
	}

	/// Also treat the given provider codes as absent.
	pub fn with_extra_codes<I, S>(codes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut extra_codes: Vec<String> = codes
			.into_iter()
			.map(|c| {
				let c: String = c.into();
				c.trim().to_string()
			})
			.filter(|c| !c.is_empty() && c != USER_NOT_FOUND_CODE)
			.collect();
		extra_codes.sort();
		extra_codes.dedup();
		Self { extra_codes }
	}

	/// Parse a comma-separated list of codes.
	pub fn parse(list: &str) -> Self {
		Self::with_extra_codes(list.split(','))
	}

	pub fn extra_codes(&self) -> &[String] {
		&self.extra_codes
	}

	/// Returns true if `code` means the account does not exist.
	pub fn is_absent_code(&self, code: &str) -> bool {
		code == USER_NOT_FOUND_CODE || self.extra_codes.iter().any(|c| c == code)
	}

	/// Returns true if `err` means the account does not exist.
	pub fn is_absent(&self, err: &IdentityError) -> bool {
		err.code().is_some_and(|code| self.is_absent_code(code))
	}
}
