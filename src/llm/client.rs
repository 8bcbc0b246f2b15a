//! Async LLM client used to ask for rule proposals
//!
//! Model-agnostic: speaks the Anthropic messages format or the
//! OpenAI-compatible chat format (DeepSeek, OpenAI, local gateways),
//! chosen from the API URL.

use crate::core::error::{EngineError, Result};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
/// Proposals are small JSON objects
const MAX_TOKENS: u32 = 1024;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// API format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Anthropic,
    OpenAI,
}

impl ApiFormat {
    fn detect(url: &str) -> Self {
        if url.contains("anthropic.com") {
            ApiFormat::Anthropic
        } else {
            ApiFormat::OpenAI
        }
    }
}

/// Connection settings for the LLM API
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmSettings {
    /// Read settings from the environment
    ///
    /// Required: LLM_API_KEY
    /// Optional: LLM_API_URL, LLM_MODEL, LLM_TIMEOUT_SECS
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, with the same keys as [`Self::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key =
            lookup("LLM_API_KEY").ok_or_else(|| EngineError::Llm("LLM_API_KEY not set".into()))?;
        let api_url = lookup("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let model = lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        let timeout_secs = lookup("LLM_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            api_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Async LLM client for making completion calls
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    settings: LlmSettings,
    format: ApiFormat,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| EngineError::Llm(e.to_string()))?;
        let format = ApiFormat::detect(&settings.api_url);
        Ok(Self {
            http,
            settings,
            format,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(LlmSettings::from_env()?)
    }

    pub fn format(&self) -> ApiFormat {
        self.format
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Send one system + user exchange and return the text reply
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let text = match self.format {
            ApiFormat::Anthropic => {
                let body = AnthropicRequest {
                    model: &self.settings.model,
                    max_tokens: MAX_TOKENS,
                    system,
                    messages: vec![Message { role: "user", content: user }],
                };
                let request = self
                    .http
                    .post(&self.settings.api_url)
                    .header("x-api-key", &self.settings.api_key)
                    .header("anthropic-version", "2023-06-01")
                    .json(&body);
                let response: AnthropicResponse = Self::send(request).await?;
                response.content.into_iter().next().map(|c| c.text)
            }
            ApiFormat::OpenAI => {
                let body = OpenAIRequest {
                    model: &self.settings.model,
                    max_tokens: MAX_TOKENS,
                    messages: vec![
                        Message { role: "system", content: system },
                        Message { role: "user", content: user },
                    ],
                };
                let request = self
                    .http
                    .post(&self.settings.api_url)
                    .bearer_auth(&self.settings.api_key)
                    .json(&body);
                let response: OpenAIResponse = Self::send(request).await?;
                response.choices.into_iter().next().map(|c| c.message.content)
            }
        };
        text.ok_or_else(|| EngineError::Llm("Empty response".into()))
    }

    async fn send<T: for<'de> Deserialize<'de>>(request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| EngineError::Llm(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::Llm(format!("API error {}: {}", status, error_text)));
        }

        response
            .json()
            .await
            .map_err(|e| EngineError::Llm(e.to_string()))
    }
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

// Anthropic API format
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

// OpenAI-compatible API format
#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}
