// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// `SECRET_HASH` for app clients that have a client secret:
/// `base64(HMAC-SHA256(client_secret, username || client_id))`.
pub fn secret_hash(client_secret: &str, username: &str, client_id: &str) -> String {
	let mut mac =
		HmacSha256::new_from_slice(client_secret.as_bytes()).expect("HMAC can take key of any size");
	mac.update(username.as_bytes());
	mac.update(client_id.as_bytes());
	STANDARD.encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn known_vector() {
		assert_eq!(
			secret_hash("client-secret", "123", "client-id"),
			"J6Pw+UOz4Z5P3vi31DPLoBG2+zhvEWqVVgr1grlRWvI="
		);
	}

	#[test]
	fn username_changes_hash() {
		assert_ne!(
			secret_hash("client-secret", "123", "client-id"),
			secret_hash("client-secret", "124", "client-id")
		);
	}

	proptest! {
		/// The hash is always a 32-byte digest in padded base64.
		#[test]
		fn hash_is_base64_sha256(
			secret in "[a-zA-Z0-9]{0,64}",
			username in "[0-9]{1,14}",
			client_id in "[a-z0-9]{1,26}",
		) {
			let hash = secret_hash(&secret, &username, &client_id);
			prop_assert_eq!(hash.len(), 44);
			prop_assert!(hash.ends_with('='));
			prop_assert_eq!(STANDARD.decode(&hash).unwrap().len(), 32);
		}
	}
}
