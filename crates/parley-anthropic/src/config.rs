// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration and fixed API constants.

use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

use crate::error::{ClientError, ConfigError};
use crate::secret::ApiKey;

/// Base URL of the Messages API.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Model used when neither the client nor the request names one.
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

/// Value sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const API_KEY_HEADER: &str = "x-api-key";
pub const VERSION_HEADER: &str = "anthropic-version";

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const MODEL_ENV: &str = "ANTHROPIC_MODEL";
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
pub const TIMEOUT_ENV: &str = "ANTHROPIC_TIMEOUT_SECS";

/// Settings for an [`AnthropicClient`](crate::AnthropicClient).
///
/// Values are checked when the client is built, not here: an empty key is
/// rejected and an empty model falls back to [`DEFAULT_MODEL`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
	pub api_key: ApiKey,
	pub model: String,
	pub base_url: String,
	pub timeout: Option<Duration>,
}

impl ClientConfig {
	pub fn new(api_key: impl Into<ApiKey>) -> Self {
		Self {
			api_key: api_key.into(),
			model: DEFAULT_MODEL.to_string(),
			base_url: DEFAULT_BASE_URL.to_string(),
			timeout: None,
		}
	}

	pub fn with_model(mut self, model: impl Into<String>) -> Self {
		self.model = model.into();
		self
	}

	/// Points the client at a different host, e.g. a proxy or a test server.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into().trim_end_matches('/').to_string();
		self
	}

	/// Upper bound on a whole request, body read included.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Loads configuration from the process environment.
	///
	/// The key is read from `ANTHROPIC_API_KEY_FILE` when set (one trailing
	/// newline stripped), otherwise from `ANTHROPIC_API_KEY`. `ANTHROPIC_MODEL`,
	/// `ANTHROPIC_BASE_URL` and `ANTHROPIC_TIMEOUT_SECS` are optional.
	pub fn from_env() -> Result<Self, ClientError> {
		Self::from_lookup(|var| env::var(var).ok())
	}

	/// Same as [`ClientConfig::from_env`] with a custom variable source.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let api_key = load_api_key(&lookup)?.ok_or(ClientError::MissingApiKey)?;
		let mut config = Self::new(api_key);

		if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.is_empty()) {
			config = config.with_model(model);
		}

		if let Some(base_url) = lookup(BASE_URL_ENV).filter(|u| !u.is_empty()) {
			config = config.with_base_url(base_url);
		}

		if let Some(raw) = lookup(TIMEOUT_ENV).filter(|t| !t.is_empty()) {
			let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
				var: TIMEOUT_ENV.to_string(),
				reason: format!("{e}"),
			})?;
			config = config.with_timeout(Duration::from_secs(secs));
		}

		Ok(config)
	}
}

fn load_api_key<F>(lookup: &F) -> Result<Option<ApiKey>, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let file_var = format!("{API_KEY_ENV}_FILE");

	if let Some(path) = lookup(&file_var) {
		if path.is_empty() {
			return Err(ConfigError::EmptySecretPath { var: file_var });
		}

		let path = PathBuf::from(path);
		let content = fs::read_to_string(&path).map_err(|source| ConfigError::SecretFile {
			path: path.clone(),
			source,
		})?;

		let key = content.strip_suffix('\n').unwrap_or(&content);
		return Ok(Some(ApiKey::new(key)));
	}

	Ok(lookup(API_KEY_ENV).map(ApiKey::from))
}
