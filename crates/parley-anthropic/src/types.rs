// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Messages API wire types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Delimiter placed between content blocks by [`CompletionResponse::text`].
pub const DEFAULT_TEXT_DELIMITER: &str = "\n\n";

/// Author of a conversational turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::User => "user",
			Role::Assistant => "assistant",
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A single turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	pub role: Role,
	pub content: String,
}

impl Message {
	pub fn new(role: Role, content: impl Into<String>) -> Self {
		Self {
			role,
			content: content.into(),
		}
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self::new(Role::User, content)
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self::new(Role::Assistant, content)
	}
}

/// Request body for `POST /messages`.
///
/// An empty `model` is replaced with the client's model before sending.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionRequest {
	pub messages: Vec<Message>,
	pub model: String,
	pub max_tokens: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub system: Option<String>,
}

impl CompletionRequest {
	pub fn new(max_tokens: u32) -> Self {
		Self {
			max_tokens,
			..Self::default()
		}
	}

	pub fn with_model(mut self, model: impl Into<String>) -> Self {
		self.model = model.into();
		self
	}

	pub fn with_system(mut self, system: impl Into<String>) -> Self {
		self.system = Some(system.into());
		self
	}

	pub fn with_message(mut self, message: Message) -> Self {
		self.messages.push(message);
		self
	}

	pub fn push(&mut self, message: Message) {
		self.messages.push(message);
	}
}

/// Response body from `POST /messages`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionResponse {
	pub id: String,
	#[serde(default)]
	pub content: Vec<ContentBlock>,
	pub model: String,
	#[serde(default)]
	pub stop_reason: Option<String>,
	#[serde(default)]
	pub stop_sequence: Option<String>,
	pub usage: Usage,
}

impl CompletionResponse {
	/// Joins the text of every content block with `delimiter`.
	///
	/// No delimiter is left after the last block, and a response without
	/// content yields an empty string. An empty `delimiter` falls back to
	/// [`DEFAULT_TEXT_DELIMITER`].
	pub fn join_text(&self, delimiter: &str) -> String {
		let delimiter = if delimiter.is_empty() {
			DEFAULT_TEXT_DELIMITER
		} else {
			delimiter
		};

		self
			.content
			.iter()
			.map(|block| block.text.as_str())
			.collect::<Vec<_>>()
			.join(delimiter)
	}

	pub fn text(&self) -> String {
		self.join_text(DEFAULT_TEXT_DELIMITER)
	}

	/// Content blocks that request a tool invocation.
	pub fn tool_uses(&self) -> impl Iterator<Item = &ContentBlock> {
		self.content.iter().filter(|block| block.is_tool_use())
	}
}

impl fmt::Display for CompletionResponse {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text())
	}
}

/// One unit of generated output.
///
/// Text blocks only carry `text`; tool-use blocks carry `id`, `name` and an
/// `input` whose shape is defined by the tool. Absent fields are left at
/// their defaults, and so are fields sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
	#[serde(rename = "type", default, deserialize_with = "null_as_default")]
	pub block_type: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub text: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub id: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(default)]
	pub input: serde_json::Value,
}

impl ContentBlock {
	pub fn from_text(text: impl Into<String>) -> Self {
		Self {
			block_type: "text".to_string(),
			text: text.into(),
			..Self::default()
		}
	}

	pub fn is_tool_use(&self) -> bool {
		self.block_type == "tool_use"
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Token accounting for a single completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
	pub input_tokens: u32,
	pub output_tokens: u32,
}

impl Usage {
	pub fn total(&self) -> u32 {
		self.input_tokens.saturating_add(self.output_tokens)
	}
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorEnvelope {
	#[serde(rename = "type")]
	pub envelope_type: String,
	pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiErrorDetail {
	#[serde(rename = "type")]
	pub error_type: String,
	pub message: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use serde_json::json;

	fn response_with(texts: &[&str]) -> CompletionResponse {
		CompletionResponse {
			id: "msg_01".to_string(),
			content: texts.iter().map(|t| ContentBlock::from_text(*t)).collect(),
			model: "claude-3-opus-20240229".to_string(),
			stop_reason: Some("end_turn".to_string()),
			stop_sequence: None,
			usage: Usage::default(),
		}
	}

	#[test]
	fn join_text_has_no_trailing_delimiter() {
		let response = response_with(&["Hi", "there"]);
		assert_eq!(response.join_text("\n\n"), "Hi\n\nthere");
	}

	#[test]
	fn join_text_without_content_is_empty() {
		let response = response_with(&[]);
		assert_eq!(response.join_text("\n\n"), "");
		assert_eq!(response.text(), "");
	}

	#[test]
	fn join_text_empty_delimiter_uses_default() {
		let response = response_with(&["a", "b"]);
		assert_eq!(response.join_text(""), "a\n\nb");
	}

	#[test]
	fn display_uses_default_delimiter() {
		let response = response_with(&["one", "two"]);
		assert_eq!(response.to_string(), "one\n\ntwo");
	}

	#[test]
	fn role_serializes_lowercase() {
		let message = Message::assistant("hello");
		let value = serde_json::to_value(&message).unwrap();
		assert_eq!(value, json!({"role": "assistant", "content": "hello"}));
	}

	#[test]
	fn request_omits_unset_system() {
		let request = CompletionRequest::new(100)
			.with_model("claude-3-haiku-20240307")
			.with_message(Message::user("Hello!"));
		let value = serde_json::to_value(&request).unwrap();

		assert_eq!(
			value,
			json!({
				"messages": [{"role": "user", "content": "Hello!"}],
				"model": "claude-3-haiku-20240307",
				"max_tokens": 100
			})
		);
	}

	#[test]
	fn request_includes_system_when_set() {
		let request = CompletionRequest::new(10).with_system("Be terse.");
		let value = serde_json::to_value(&request).unwrap();
		assert_eq!(value["system"], "Be terse.");
	}

	#[test]
	fn response_parses_mixed_content() {
		let body = json!({
			"id": "msg_013Zva2CMHLNnXjNJJKqJ2EF",
			"type": "message",
			"role": "assistant",
			"content": [
				{"type": "text", "text": "Let me check."},
				{
					"type": "tool_use",
					"id": "toolu_01",
					"name": "get_weather",
					"input": {"location": "Copenhagen"}
				}
			],
			"model": "claude-3-opus-20240229",
			"stop_reason": "tool_use",
			"stop_sequence": null,
			"usage": {"input_tokens": 12, "output_tokens": 30}
		});

		let response: CompletionResponse = serde_json::from_value(body).unwrap();

		assert_eq!(response.content.len(), 2);
		assert_eq!(response.content[0].text, "Let me check.");
		assert!(response.content[0].input.is_null());
		assert_eq!(response.stop_reason.as_deref(), Some("tool_use"));
		assert_eq!(response.stop_sequence, None);
		assert_eq!(response.usage.total(), 42);

		let tools: Vec<_> = response.tool_uses().collect();
		assert_eq!(tools.len(), 1);
		assert_eq!(tools[0].name, "get_weather");
		assert_eq!(tools[0].input["location"], "Copenhagen");
	}

	#[test]
	fn content_block_null_fields_become_empty() {
		let block: ContentBlock = serde_json::from_value(json!({
			"type": "text",
			"text": null,
			"id": null,
			"name": null,
			"input": null
		}))
		.unwrap();

		assert_eq!(block.block_type, "text");
		assert_eq!(block.text, "");
		assert_eq!(block.id, "");
		assert_eq!(block.name, "");
		assert!(block.input.is_null());
	}

	#[test]
	fn error_envelope_parses() {
		let body = r#"{"type":"error","error":{"type":"invalid_request_error","message":"max_tokens: field required"}}"#;
		let envelope: ApiErrorEnvelope = serde_json::from_str(body).unwrap();
		assert_eq!(envelope.error.error_type, "invalid_request_error");
		assert_eq!(envelope.error.message, "max_tokens: field required");
	}

	proptest! {
		#[test]
		fn join_text_never_ends_with_delimiter(
			texts in proptest::collection::vec("[a-z]{1,8}", 0..6),
		) {
			let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
			let joined = response_with(&refs).join_text("--");

			prop_assert!(!joined.ends_with("--"));
			prop_assert_eq!(joined.matches("--").count(), texts.len().saturating_sub(1));
		}
	}
}
