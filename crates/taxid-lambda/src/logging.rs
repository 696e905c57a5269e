// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Log setup for the Lambda runtime.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install a JSON subscriber filtered by `RUST_LOG` (default `info`).
///
/// CloudWatch adds its own timestamps and does not render ANSI colours, so
/// both are turned off.
pub fn init() {
	tracing_subscriber::fmt()
		.json()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
		)
		.with_target(false)
		.with_current_span(false)
		.with_ansi(false)
		.without_time()
		.init();
}
