// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! AWS Cognito user pool implementation of [`IdentityProvider`].
//!
//! # Operations
//!
//! | Trait method | Cognito API |
//! |---|---|
//! | `get_user` | `AdminGetUser` |
//! | `create_user` | `SignUp` |
//! | `confirm_user` | `AdminConfirmSignUp` |
//! | `authenticate_user` | `InitiateAuth(USER_SRP_AUTH)` + `RespondToAuthChallenge(PASSWORD_VERIFIER)` |
//!
//! # Example
//!
//! ```rust,no_run
//! use taxid_auth_cognito::{CognitoConfig, CognitoIdentityClient};
//! use taxid_identity_core::IdentityProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CognitoConfig::from_env()?;
//! let client = CognitoIdentityClient::from_config(config).await;
//!
//! let tokens = client.authenticate_user("12345678900").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - The app client secret and the sign-in password are [`SecretString`]s and
//!   never appear in logs.
//! - Tracing instrumentation skips passwords and tokens.
//!
//! [`IdentityProvider`]: taxid_identity_core::IdentityProvider
//! [`SecretString`]: taxid_common_config::SecretString

mod client;
mod config;
mod error;
mod secret_hash;
mod srp;

pub use client::CognitoIdentityClient;
pub use config::{CognitoConfig, ConfigError};
