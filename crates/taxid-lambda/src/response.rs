// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Response envelope.
//!
//! Every path, including success, returns the same `{statusCode, headers, body}`
//! shape so the function can sit behind an API Gateway proxy integration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::json;
use taxid_identity_core::SessionTokens;

use crate::error::HandlerError;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";
pub const DEFAULT_ERROR_MESSAGE: &str = "Internal Server Error";
pub const DEFAULT_ERROR_STATUS: u16 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
	pub status_code: u16,
	pub headers: HashMap<String, String>,
	/// JSON-encoded payload.
	pub body: String,
}

impl ApiResponse {
	fn json(status_code: u16, body: serde_json::Value) -> Self {
		let mut headers = HashMap::new();
		headers.insert("Content-Type".to_string(), "application/json".to_string());
		Self {
			status_code,
			headers,
			body: body.to_string(),
		}
	}

	/// 200 with the three tokens.
	pub fn tokens(tokens: &SessionTokens) -> Self {
		Self::json(
			200,
			json!({
				"accessToken": tokens.access_token.expose(),
				"idToken": tokens.id_token.expose(),
				"refreshToken": tokens.refresh_token.expose(),
			}),
		)
	}

	/// 400 for a body that is not JSON.
	pub fn invalid_json() -> Self {
		Self::json(400, json!({ "message": INVALID_JSON_MESSAGE }))
	}

	/// Error response: upstream status or 500, `{"error": message}`.
	pub fn from_error(err: &HandlerError) -> Self {
		let status = err.status_code().unwrap_or(DEFAULT_ERROR_STATUS);
		let message = err
			.message()
			.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
		Self::json(status, json!({ "error": message }))
	}

	/// The body parsed back into JSON.
	pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
		serde_json::from_str(&self.body)
	}
}
