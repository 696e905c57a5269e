// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Inbound event and request payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The invocation event. Only `body` is read; API Gateway proxy fields such
/// as `headers` or `requestContext` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignInEvent {
	/// Either a JSON-encoded string or an already-decoded object.
	#[serde(default)]
	pub body: Option<Value>,
}

/// The sign-in request carried in the body.
///
/// Fields are not validated here. Missing or `null` fields decode as empty
/// strings and are left for the identity provider to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
	#[serde(default, deserialize_with = "null_as_empty")]
	pub taxpayer_id: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_empty")]
	pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Why the body could not be turned into a [`SignInRequest`].
#[derive(Debug, Error)]
pub enum BodyError {
	/// The body is a string that does not parse as JSON.
	#[error("invalid JSON format: {0}")]
	InvalidJson(#[source] serde_json::Error),

	/// The body is JSON but not a sign-in request object, or is missing.
	#[error("{0}")]
	Payload(String),
}

impl SignInEvent {
	/// Event whose body is a JSON-encoded string.
	pub fn from_raw_body(raw: impl Into<String>) -> Self {
		Self {
			body: Some(Value::String(raw.into())),
		}
	}

	/// Event whose body is an already-decoded JSON value.
	pub fn from_json_body(body: Value) -> Self {
		Self { body: Some(body) }
	}

	/// Decode the body into a request.
	pub fn decode(&self) -> Result<SignInRequest, BodyError> {
		let value = match &self.body {
			Some(Value::String(raw)) => {
				serde_json::from_str::<Value>(raw).map_err(BodyError::InvalidJson)?
			}
			Some(value) => value.clone(),
			None => return Err(BodyError::Payload("request body is missing".to_string())),
		};

		serde_json::from_value(value).map_err(|e| BodyError::Payload(e.to_string()))
	}
}
