// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-shot `POST /messages` exchange.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use crate::config::{ClientConfig, ANTHROPIC_VERSION, API_KEY_HEADER, VERSION_HEADER};
use crate::error::{ClientError, TransportError};
use crate::types::{CompletionRequest, CompletionResponse};

pub(crate) fn messages_url(base_url: &str) -> String {
	format!("{base_url}/messages")
}

/// Sends `request` and decodes the reply.
///
/// The whole exchange, body read included, races `cancel`. Once the token
/// fires the in-flight request is dropped and `TransportError::Cancelled` is
/// returned.
pub(crate) async fn post_messages(
	http_client: &Client,
	config: &ClientConfig,
	cancel: &CancellationToken,
	mut request: CompletionRequest,
) -> Result<CompletionResponse, ClientError> {
	if request.model.is_empty() {
		request.model = config.model.clone();
	}

	let payload = serde_json::to_vec(&request).map_err(|e| {
		error!(error = %e, "Failed to serialize completion request");
		ClientError::Serialization(e)
	})?;

	let url = messages_url(&config.base_url);
	debug!(
		url = %url,
		model = %request.model,
		max_tokens = request.max_tokens,
		message_count = request.messages.len(),
		"Sending request to Anthropic API"
	);

	tokio::select! {
		biased;

		_ = cancel.cancelled() => {
			debug!("Completion request cancelled by caller");
			Err(ClientError::from(TransportError::Cancelled))
		}
		result = exchange(http_client, &url, config, payload) => result,
	}
}

async fn exchange(
	http_client: &Client,
	url: &str,
	config: &ClientConfig,
	payload: Vec<u8>,
) -> Result<CompletionResponse, ClientError> {
	let response = http_client
		.post(url)
		.header(API_KEY_HEADER, config.api_key.expose())
		.header(VERSION_HEADER, ANTHROPIC_VERSION)
		.header(CONTENT_TYPE, "application/json")
		.body(payload)
		.send()
		.await
		.map_err(|e| {
			error!(error = %e, "HTTP request failed");
			TransportError::from_send(e)
		})?;

	let status = response.status();
	debug!(status = %status, "Received response");

	let body = response.bytes().await.map_err(|e| {
		error!(error = %e, "Failed to read response body");
		TransportError::from_body(e)
	})?;

	if !status.is_success() {
		error!(
			status = %status,
			body = %String::from_utf8_lossy(&body),
			"API error response"
		);
		return Err(ClientError::Api {
			status: status.as_u16(),
			body,
		});
	}

	trace!(body = %String::from_utf8_lossy(&body), "Response body");

	match serde_json::from_slice::<CompletionResponse>(&body) {
		Ok(response) => Ok(response),
		Err(source) => {
			error!(error = %source, "Failed to parse response");
			Err(ClientError::Decode { source, body })
		}
	}
}
