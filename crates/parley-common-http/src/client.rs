// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// Creates a new HTTP client builder with the standard parley User-Agent.
///
/// Use this when the caller needs further customization before building.
///
/// # Example
/// ```ignore
/// let client = parley_common_http::builder()
///     .connect_timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Builds a client, applying an overall request timeout when one is given.
///
/// Without a timeout the request runs until the server answers or the caller
/// drops the future.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
	let builder = match timeout {
		Some(timeout) => {
			debug!(timeout_ms = timeout.as_millis() as u64, "Building HTTP client with timeout");
			builder().timeout(timeout)
		}
		None => builder(),
	};
	builder.build()
}

/// Returns the standard parley User-Agent string.
///
/// Format: `parley/{version}`
pub fn user_agent() -> String {
	format!("parley/{}", env!("CARGO_PKG_VERSION"))
}
