// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{LookupOutcome, NewUser, SessionTokens};

/// Trait abstracting the managed identity service.
///
/// Implementations are constructed once per process and shared across
/// invocations; every method is a single remote operation with no retries.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
	/// Look an account up by username. A missing account is
	/// [`LookupOutcome::Absent`], not an error.
	async fn get_user(&self, username: &str) -> Result<LookupOutcome>;

	/// Register a new, unconfirmed account.
	async fn create_user(&self, user: &NewUser) -> Result<()>;

	/// Confirm a registered account so it can authenticate.
	async fn confirm_user(&self, username: &str) -> Result<()>;

	/// Authenticate the account and return its session tokens.
	async fn authenticate_user(&self, username: &str) -> Result<SessionTokens>;
}
