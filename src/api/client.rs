//! Chat-completion client
//!
//! Thin reqwest wrapper around an OpenAI-compatible chat endpoint. One
//! request per call, no streaming, no retries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the completion API
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// System instruction sent with every completion request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Fixed model and budget for the lightweight key-validation call
const KEY_CHECK_MODEL: &str = "gpt-3.5-turbo";
const KEY_CHECK_PROMPT: &str = "Hello, World!";
const KEY_CHECK_MAX_TOKENS: u32 = 5;

/// Errors that can occur while talking to the completion endpoint
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no choices")]
    EmptyResponse,
}

/// Client for an OpenAI-compatible chat-completion endpoint
#[derive(Debug, Clone)]
pub struct CompletionClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a non-default endpoint (local proxies, tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Runs one completion round: a fixed system instruction plus the user
    /// prompt, returning the assistant's reply trimmed of surrounding
    /// whitespace.
    pub async fn complete(&self, model: &str, prompt: &str) -> Result<String, ApiError> {
        let request = ChatRequest {
            model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                WireMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: None,
        };

        self.send(&request).await
    }

    /// Checks whether the configured API key is accepted by the endpoint.
    ///
    /// Sends a minimal request with a 5-token budget so a validation check
    /// stays cheap. Any error from the endpoint is returned as-is.
    pub async fn verify_key(&self) -> Result<(), ApiError> {
        let request = ChatRequest {
            model: KEY_CHECK_MODEL,
            messages: vec![WireMessage {
                role: "user",
                content: KEY_CHECK_PROMPT,
            }],
            max_tokens: Some(KEY_CHECK_MAX_TOKENS),
        };

        self.send(&request).await.map(|_| ())
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // The endpoint wraps failures in {"error": {"message": ...}};
            // fall back to the raw body when it doesn't parse.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(ApiError::EmptyResponse)
    }
}

/// Request body for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response structures (only the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "gpt-4",
            messages: vec![
                WireMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                WireMessage {
                    role: "user",
                    content: "Hi",
                },
            ],
            max_tokens: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Hi");
        // max_tokens must be omitted entirely when unset
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_key_check_request_has_token_budget() {
        let request = ChatRequest {
            model: KEY_CHECK_MODEL,
            messages: vec![WireMessage {
                role: "user",
                content: KEY_CHECK_PROMPT,
            }],
            max_tokens: Some(KEY_CHECK_MAX_TOKENS),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 5);
        assert_eq!(json["messages"][0]["content"], "Hello, World!");
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  Hello there.  "}}
            ]
        }"#;

        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed.choices[0].message.content.trim();
        assert_eq!(content, "Hello there.");
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        let parsed: ErrorBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "Incorrect API key provided");
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError::Api {
            status: 429,
            message: "rate limit".to_string(),
        };
        assert_eq!(error.to_string(), "API error (429): rate limit");
    }
}
