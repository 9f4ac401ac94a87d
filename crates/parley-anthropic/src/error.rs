// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Messages API client.

use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{ApiErrorDetail, ApiErrorEnvelope};

/// Errors returned by [`AnthropicClient`](crate::AnthropicClient).
#[derive(Debug, Error)]
pub enum ClientError {
	/// The client was constructed without an API key.
	#[error("API key is required")]
	MissingApiKey,

	/// The request could not be encoded as JSON.
	#[error("failed to serialize completion request: {0}")]
	Serialization(#[source] serde_json::Error),

	/// The exchange failed below the HTTP status level.
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// The API answered with a non-success status. `body` is the response
	/// body exactly as received.
	#[error("API error [{status}]: {}", String::from_utf8_lossy(.body))]
	Api { status: u16, body: Bytes },

	/// The success body did not match the response schema.
	#[error("failed to decode completion response: {source}")]
	Decode {
		#[source]
		source: serde_json::Error,
		body: Bytes,
	},

	/// Client configuration could not be loaded.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl ClientError {
	/// True when the caller's cancellation token ended the request.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, ClientError::Transport(TransportError::Cancelled))
	}

	/// HTTP status of an API error.
	pub fn status(&self) -> Option<u16> {
		match self {
			ClientError::Api { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Raw response body of an API or decode error.
	pub fn body(&self) -> Option<&[u8]> {
		match self {
			ClientError::Api { body, .. } | ClientError::Decode { body, .. } => Some(&body[..]),
			_ => None,
		}
	}

	/// Response body of an API or decode error, with invalid UTF-8 replaced.
	pub fn body_text(&self) -> Option<String> {
		self
			.body()
			.map(|body| String::from_utf8_lossy(body).into_owned())
	}

	/// Structured detail of an API error, when the body used the standard
	/// error envelope.
	pub fn api_error_detail(&self) -> Option<ApiErrorDetail> {
		match self {
			ClientError::Api { body, .. } => serde_json::from_slice::<ApiErrorEnvelope>(body)
				.ok()
				.map(|envelope| envelope.error),
			_ => None,
		}
	}
}

/// Network-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("request cancelled")]
	Cancelled,

	#[error("request timed out: {0}")]
	Timeout(#[source] reqwest::Error),

	#[error("connection failed: {0}")]
	Connect(#[source] reqwest::Error),

	#[error("HTTP request failed: {0}")]
	Request(#[source] reqwest::Error),

	#[error("failed to read response body: {0}")]
	Body(#[source] reqwest::Error),

	#[error("failed to create HTTP client: {0}")]
	Build(#[source] reqwest::Error),
}

impl TransportError {
	/// Classifies a send failure.
	pub(crate) fn from_send(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			TransportError::Timeout(err)
		} else if err.is_connect() {
			TransportError::Connect(err)
		} else {
			TransportError::Request(err)
		}
	}

	/// Classifies a failure while reading the response body.
	pub(crate) fn from_body(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			TransportError::Timeout(err)
		} else {
			TransportError::Body(err)
		}
	}
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read secret file at {path}: {source}")]
	SecretFile {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("secret file path in {var} is empty")]
	EmptySecretPath { var: String },

	#[error("invalid value for {var}: {reason}")]
	InvalidValue { var: String, reason: String },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn api_error_message_includes_status_and_body() {
		let err = ClientError::Api {
			status: 400,
			body: Bytes::from_static(br#"{"error":"bad"}"#),
		};
		assert_eq!(err.to_string(), r#"API error [400]: {"error":"bad"}"#);
		assert_eq!(err.status(), Some(400));
		assert!(!err.is_cancelled());
	}

	#[test]
	fn api_error_detail_requires_envelope() {
		let plain = ClientError::Api {
			status: 400,
			body: Bytes::from_static(br#"{"error":"bad"}"#),
		};
		assert!(plain.api_error_detail().is_none());

		let enveloped = ClientError::Api {
			status: 529,
			body: Bytes::from_static(
				br#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#,
			),
		};
		let detail = enveloped.api_error_detail().unwrap();
		assert_eq!(detail.error_type, "overloaded_error");
		assert_eq!(detail.message, "Overloaded");
	}

	#[test]
	fn api_error_keeps_non_utf8_body() {
		let err = ClientError::Api {
			status: 500,
			body: Bytes::from_static(&[0x65, 0xff, 0x72]),
		};
		assert_eq!(err.body(), Some(&[0x65, 0xff, 0x72][..]));
		assert_eq!(err.body_text().as_deref(), Some("e\u{fffd}r"));
		assert_eq!(err.to_string(), "API error [500]: e\u{fffd}r");
	}

	#[test]
	fn cancelled_transport_is_detected() {
		let err = ClientError::from(TransportError::Cancelled);
		assert!(err.is_cancelled());
		assert_eq!(err.to_string(), "request cancelled");
		assert_eq!(err.status(), None);
	}

	#[test]
	fn missing_api_key_message() {
		assert_eq!(ClientError::MissingApiKey.to_string(), "API key is required");
	}
}
