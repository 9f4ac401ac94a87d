// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Anthropic client implementation.

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::{ClientError, TransportError};
use crate::secret::ApiKey;
use crate::transport;
use crate::types::{CompletionRequest, CompletionResponse, Message, Role};

/// Client for the Anthropic Messages API.
///
/// Immutable once built. Clones share the underlying HTTP client, so one
/// instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
	config: ClientConfig,
	http_client: Client,
}

impl AnthropicClient {
	/// Creates a client for `api_key`, using [`DEFAULT_MODEL`] when `model` is
	/// empty.
	pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ClientError> {
		Self::from_config(ClientConfig::new(ApiKey::new(api_key)).with_model(model))
	}

	pub fn from_config(mut config: ClientConfig) -> Result<Self, ClientError> {
		if config.api_key.is_empty() {
			return Err(ClientError::MissingApiKey);
		}

		if config.model.is_empty() {
			config.model = DEFAULT_MODEL.to_string();
		}

		if config.base_url.is_empty() {
			config.base_url = DEFAULT_BASE_URL.to_string();
		}

		let http_client =
			parley_common_http::build_client(config.timeout).map_err(TransportError::Build)?;

		info!(
			model = %config.model,
			base_url = %config.base_url,
			"Initialized Anthropic client"
		);

		Ok(Self {
			config,
			http_client,
		})
	}

	/// Builds a client from `ANTHROPIC_*` environment variables.
	pub fn from_env() -> Result<Self, ClientError> {
		Self::from_config(ClientConfig::from_env()?)
	}

	pub fn model(&self) -> &str {
		&self.config.model
	}

	pub fn base_url(&self) -> &str {
		&self.config.base_url
	}

	pub fn create_message(&self, role: Role, content: impl Into<String>) -> Message {
		Message::new(role, content)
	}

	/// Sends a completion request and waits for the full response.
	///
	/// An empty `request.model` is replaced with the client's model. Cancelling
	/// `cancel` aborts the in-flight request; the call then fails with a
	/// cancelled transport error (see [`ClientError::is_cancelled`]).
	#[instrument(
		skip(self, cancel, request),
		fields(model = %self.config.model, message_count = request.messages.len())
	)]
	pub async fn create_chat_completion(
		&self,
		cancel: &CancellationToken,
		request: CompletionRequest,
	) -> Result<CompletionResponse, ClientError> {
		let response =
			transport::post_messages(&self.http_client, &self.config, cancel, request).await?;

		info!(
			response_id = %response.id,
			stop_reason = ?response.stop_reason,
			input_tokens = response.usage.input_tokens,
			output_tokens = response.usage.output_tokens,
			"Completion request finished"
		);

		Ok(response)
	}
}
