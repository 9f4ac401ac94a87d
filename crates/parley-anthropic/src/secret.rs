// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! API key wrapper that keeps the key out of logs.

use std::fmt;
use zeroize::Zeroize;

/// Placeholder printed in place of the key.
pub const REDACTED: &str = "[REDACTED]";

/// An Anthropic API key.
///
/// `Debug` and `Display` print [`REDACTED`], so the key is safe to pass to
/// `tracing` fields. The backing memory is zeroed on drop. The raw value is
/// only reachable through [`ApiKey::expose`].
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey {
	inner: String,
}

impl ApiKey {
	pub fn new(key: impl Into<String>) -> Self {
		Self { inner: key.into() }
	}

	pub fn expose(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ApiKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<String> for ApiKey {
	fn from(key: String) -> Self {
		Self::new(key)
	}
}

impl From<&str> for ApiKey {
	fn from(key: &str) -> Self {
		Self::new(key)
	}
}
