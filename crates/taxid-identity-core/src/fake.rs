// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory identity provider that records every call.
//!
//! Behaves like a user pool: sign-up creates an unconfirmed account,
//! authentication requires confirmation, duplicate sign-ups are rejected.
//! Individual operations can be made to fail with a chosen provider error.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{IdentityError, Result};
use crate::policy::USER_NOT_FOUND_CODE;
use crate::provider::IdentityProvider;
use crate::types::{LookupOutcome, NewUser, SessionTokens, UserRecord};

/// A recorded provider call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderCall {
	GetUser(String),
	CreateUser(NewUser),
	ConfirmUser(String),
	AuthenticateUser(String),
}

/// Provider operation, used to inject failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	GetUser,
	CreateUser,
	ConfirmUser,
	AuthenticateUser,
}

#[derive(Clone, Debug)]
struct FakeAccount {
	name: String,
	email: String,
	confirmed: bool,
}

#[derive(Clone, Debug)]
struct InjectedFailure {
	code: String,
	message: String,
	status: Option<u16>,
}

#[derive(Default)]
struct State {
	accounts: HashMap<String, FakeAccount>,
	calls: Vec<ProviderCall>,
	failures: HashMap<Operation, InjectedFailure>,
	issued: u64,
}

/// Recording in-memory [`IdentityProvider`].
#[derive(Default)]
pub struct FakeIdentityProvider {
	state: Mutex<State>,
}

impl FakeIdentityProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed a confirmed account.
	pub fn with_user(self, username: &str, name: &str, email: &str) -> Self {
		self.insert(username, name, email, true);
		self
	}

	/// Seed an account that signed up but was never confirmed.
	pub fn with_unconfirmed_user(self, username: &str, name: &str, email: &str) -> Self {
		self.insert(username, name, email, false);
		self
	}

	/// Make `operation` fail with the given provider error.
	pub fn failing(
		self,
		operation: Operation,
		code: &str,
		message: &str,
		status: Option<u16>,
	) -> Self {
		self.lock().failures.insert(
			operation,
			InjectedFailure {
				code: code.to_string(),
				message: message.to_string(),
				status,
			},
		);
		self
	}

	/// All calls received so far, in order.
	pub fn calls(&self) -> Vec<ProviderCall> {
		self.lock().calls.clone()
	}

	/// Whether `username` exists and is confirmed.
	pub fn is_confirmed(&self, username: &str) -> Option<bool> {
		self.lock().accounts.get(username).map(|a| a.confirmed)
	}

	/// Stored `(name, email)` attributes for `username`.
	pub fn attributes(&self, username: &str) -> Option<(String, String)> {
		self
			.lock()
			.accounts
			.get(username)
			.map(|a| (a.name.clone(), a.email.clone()))
	}

	fn insert(&self, username: &str, name: &str, email: &str, confirmed: bool) {
		self.lock().accounts.insert(
			username.to_string(),
			FakeAccount {
				name: name.to_string(),
				email: email.to_string(),
				confirmed,
			},
		);
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, State> {
		self.state.lock().unwrap_or_else(|e| e.into_inner())
	}

	fn record(&self, state: &mut State, call: ProviderCall, operation: Operation) -> Result<()> {
		state.calls.push(call);
		match state.failures.get(&operation) {
			Some(f) => Err(IdentityError::service(&f.code, &f.message, f.status)),
			None => Ok(()),
		}
	}
}

fn not_found() -> IdentityError {
	IdentityError::service(USER_NOT_FOUND_CODE, "User does not exist.", Some(400))
}

#[async_trait]
impl IdentityProvider for FakeIdentityProvider {
	async fn get_user(&self, username: &str) -> Result<LookupOutcome> {
		let mut state = self.lock();
		self.record(&mut state, ProviderCall::GetUser(username.to_string()), Operation::GetUser)?;

		Ok(match state.accounts.get(username) {
			Some(account) => LookupOutcome::Found(UserRecord {
				username: username.to_string(),
				status: Some(if account.confirmed { "CONFIRMED" } else { "UNCONFIRMED" }.to_string()),
				enabled: true,
			}),
			None => LookupOutcome::Absent,
		})
	}

	async fn create_user(&self, user: &NewUser) -> Result<()> {
		let mut state = self.lock();
		self.record(&mut state, ProviderCall::CreateUser(user.clone()), Operation::CreateUser)?;

		if state.accounts.contains_key(&user.username) {
			return Err(IdentityError::service(
				"UsernameExistsException",
				"User already exists",
				Some(400),
			));
		}
		state.accounts.insert(
			user.username.clone(),
			FakeAccount {
				name: user.name.clone(),
				email: user.email.clone(),
				confirmed: false,
			},
		);
		Ok(())
	}

	async fn confirm_user(&self, username: &str) -> Result<()> {
		let mut state = self.lock();
		self.record(&mut state, ProviderCall::ConfirmUser(username.to_string()), Operation::ConfirmUser)?;

		match state.accounts.get_mut(username) {
			Some(account) => {
				account.confirmed = true;
				Ok(())
			}
			None => Err(not_found()),
		}
	}

	async fn authenticate_user(&self, username: &str) -> Result<SessionTokens> {
		let mut state = self.lock();
		self.record(
			&mut state,
			ProviderCall::AuthenticateUser(username.to_string()),
			Operation::AuthenticateUser,
		)?;

		match state.accounts.get(username) {
			None => Err(not_found()),
			Some(account) if !account.confirmed => Err(IdentityError::service(
				"UserNotConfirmedException",
				"User is not confirmed.",
				Some(400),
			)),
			Some(_) => {
				state.issued += 1;
				let n = state.issued;
				Ok(SessionTokens::new(
					format!("access-{username}-{n}"),
					format!("id-{username}-{n}"),
					format!("refresh-{username}-{n}"),
				))
			}
		}
	}
}
