//! Completion client for the hosted model.
//!
//! The generator only sees [`CompletionClient`]; every failure comes back as
//! an [`LlmError`] value rather than a panic or a retry.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("no API key configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("request timeout after {0} seconds")]
    Timeout(u64),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("model returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

pub trait CompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [WireMessage<'a>; 1],
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Anthropic Messages API over HTTPS.
pub struct AnthropicClient {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl AnthropicClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout_secs)
        } else {
            LlmError::Http(format!("request failed: {}", e))
        }
    }
}

impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let url = format!("{}/v1/messages", self.base_url);
        let body = request_body(request);

        debug!(model = %request.model, max_tokens = request.max_tokens, "calling messages API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http(format!("HTTP {} from messages API", status)));
        }

        let raw = response.text().await.map_err(|e| self.map_transport(e))?;
        extract_text(&raw)
    }
}

fn request_body(request: &CompletionRequest) -> MessagesBody<'_> {
    MessagesBody {
        model: &request.model,
        max_tokens: request.max_tokens,
        temperature: request.temperature,
        messages: [WireMessage {
            role: "user",
            content: &request.prompt,
        }],
    }
}

fn extract_text(raw: &str) -> Result<String, LlmError> {
    let reply: MessagesReply = serde_json::from_str(raw)
        .map_err(|e| LlmError::InvalidResponse(format!("failed to parse reply: {}", e)))?;

    let text: String = reply
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect();

    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
pub(crate) mod fake {
    use std::cell::RefCell;

    use super::*;

    /// Replays scripted results in order, repeating the last one, and keeps
    /// every request it was given.
    pub struct ScriptedClient {
        responses: RefCell<Vec<Result<String, LlmError>>>,
        requests: RefCell<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn answering(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        pub fn failing(error: LlmError) -> Self {
            Self::new(vec![Err(error)])
        }

        pub fn call_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.borrow().clone()
        }
    }

    impl CompletionClient for ScriptedClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
            self.requests.borrow_mut().push(request.clone());
            let mut responses = self.responses.borrow_mut();
            match responses.len() {
                0 => Err(LlmError::EmptyResponse),
                1 => responses[0].clone(),
                _ => responses.remove(0),
            }
        }
    }
}
