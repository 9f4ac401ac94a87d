// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Minimal client for Anthropic's Messages API.
//!
//! One call builds a JSON request, posts it to `/messages` and decodes the
//! reply. There is no streaming, retrying or caching.
//!
//! ```rust,no_run
//! use parley_anthropic::{AnthropicClient, CancellationToken, CompletionRequest, Role};
//!
//! # async fn run() -> Result<(), parley_anthropic::ClientError> {
//! let client = AnthropicClient::new("sk-ant-api03-...", "claude-3-opus-20240229")?;
//!
//! let request = CompletionRequest::new(100)
//! 	.with_message(client.create_message(Role::User, "Hello!"))
//! 	.with_message(client.create_message(Role::Assistant, "Hi there! How can I help?"))
//! 	.with_message(client.create_message(Role::User, "Tell me a joke."));
//!
//! let response = client
//! 	.create_chat_completion(&CancellationToken::new(), request)
//! 	.await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
mod error;
mod secret;
mod transport;
mod types;

pub use client::AnthropicClient;
pub use config::{ClientConfig, ANTHROPIC_VERSION, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{ClientError, ConfigError, TransportError};
pub use secret::{ApiKey, REDACTED};
pub use types::*;

pub use tokio_util::sync::CancellationToken;
