// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Lambda function that signs a taxpayer in, creating the account on first use.
//!
//! # Flow
//!
//! 1. Decode the event body (a JSON string or an already-decoded object).
//!    A string that is not JSON is answered with `400 {"message":"Invalid JSON format"}`
//!    before the identity provider is contacted.
//! 2. Look the taxpayer id up. If there is no such account, sign it up with the
//!    given `name` and `email`, then confirm it.
//! 3. Authenticate and return `200 {"accessToken","idToken","refreshToken"}`.
//!
//! Any failure in steps 2 and 3 becomes `{"error": message}` with the
//! provider's HTTP status, or 500 when there is none. Nothing is retried and a
//! half-provisioned account is not rolled back.

pub mod error;
pub mod event;
pub mod handler;
pub mod logging;
pub mod response;

pub use error::HandlerError;
pub use event::{BodyError, SignInEvent, SignInRequest};
pub use handler::SignInHandler;
pub use response::ApiResponse;
