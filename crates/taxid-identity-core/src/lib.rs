// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Identity provider abstraction for the taxid sign-in bridge.
//!
//! The bridge never stores accounts itself. Everything it needs from the
//! managed identity service is expressed by the [`IdentityProvider`] trait:
//!
//! 1. **Lookup**: [`IdentityProvider::get_user`] returns [`LookupOutcome::Absent`]
//!    for a missing account instead of an error.
//! 2. **Sign-up**: [`IdentityProvider::create_user`] registers an unconfirmed
//!    account with `name` and `email` attributes.
//! 3. **Confirm**: [`IdentityProvider::confirm_user`] moves the account out of
//!    the unconfirmed state so it can authenticate.
//! 4. **Authenticate**: [`IdentityProvider::authenticate_user`] runs the
//!    password handshake and yields a [`SessionTokens`] bundle.
//!
//! Which password is used, and which provider errors count as "absent", are
//! explicit policies ([`CredentialPolicy`], [`AbsentUserPolicy`]).

mod error;
mod policy;
mod provider;
mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::{IdentityError, Result};
pub use policy::{AbsentUserPolicy, CredentialPolicy, CredentialPolicyKind, USER_NOT_FOUND_CODE};
pub use provider::IdentityProvider;
pub use types::{LookupOutcome, NewUser, SessionTokens, UserRecord};
