// ABOUTME: Generic OpenAI-compatible LLM provider for cloud and local endpoints
// ABOUTME: Covers Groq, OpenAI, Ollama, vLLM, and any chat/completions compatible API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # `OpenAI`-Compatible Provider
//!
//! One implementation for every endpoint that speaks the `OpenAI` chat
//! completions API.
//!
//! ## Supported Backends
//!
//! - **Groq**: <https://api.groq.com/openai/v1>
//! - **`OpenAI`**: <https://api.openai.com/v1>
//! - **Ollama**: <http://localhost:11434/v1>
//! - **vLLM**: <http://localhost:8000/v1>

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use super::{ChatMessage, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::AppError;

/// Connection timeout, independent of the whole-request timeout
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Longest error-body excerpt kept in messages
const ERROR_BODY_EXCERPT: usize = 200;

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl From<&ChatMessage> for OpenAiMessage {
    fn from(msg: &ChatMessage) -> Self {
        Self {
            role: msg.role.as_str().to_owned(),
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for the `OpenAI`-compatible provider
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Bearer token (optional for local servers)
    pub api_key: Option<String>,
    /// Default model to use
    pub default_model: String,
    /// Provider name for logging
    pub provider_name: &'static str,
    /// Provider display name
    pub display_name: &'static str,
    /// Capabilities of this provider
    pub capabilities: LlmCapabilities,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("provider_name", &self.provider_name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatibleConfig {
    /// Build from runtime LLM settings
    #[must_use]
    pub fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider_name, display_name) = match config.provider {
            LlmProviderType::Groq => ("groq", "Groq"),
            LlmProviderType::OpenAi => ("openai", "OpenAI"),
            LlmProviderType::Local => ("local", "Local LLM"),
        };
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            default_model: config.model.clone(),
            provider_name,
            display_name,
            capabilities: LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE,
            timeout: config.timeout(),
        }
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Generic `OpenAI`-compatible LLM provider
pub struct OpenAiCompatibleProvider {
    client: Client,
    config: OpenAiCompatibleConfig,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            "Initializing {} provider: base_url={}, model={}",
            config.display_name, config.base_url, config.default_model
        );
        Ok(Self { client, config })
    }

    /// Provider configuration
    #[must_use]
    pub const fn config(&self) -> &OpenAiCompatibleConfig {
        &self.config
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        )
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(ref api_key) = self.config.api_key {
            request.header("Authorization", format!("Bearer {api_key}"))
        } else {
            request
        }
    }

    fn transport_error(&self, e: &reqwest::Error) -> AppError {
        error!("Request to {} failed: {}", self.config.provider_name, e);
        if e.is_timeout() {
            AppError::external_unavailable(
                self.config.display_name,
                format!("Request timed out after {}s", self.config.timeout.as_secs()),
            )
        } else if e.is_connect() {
            AppError::external_unavailable(
                self.config.display_name,
                format!("Cannot connect to {}", self.config.base_url),
            )
        } else {
            AppError::external_service(self.config.display_name, format!("Request failed: {e}"))
        }
    }

    /// Map an error status and body onto the error taxonomy
    fn parse_error_response(&self, status: StatusCode, body: &str) -> AppError {
        let service = self.config.display_name;
        let detail = serde_json::from_str::<OpenAiErrorResponse>(body).map_or_else(
            |_| body.chars().take(ERROR_BODY_EXCERPT).collect::<String>(),
            |parsed| {
                let error_type = parsed.error.error_type.unwrap_or_else(|| "unknown".to_owned());
                format!("{error_type} - {}", parsed.error.message)
            },
        );

        match status.as_u16() {
            401 | 403 => AppError::external_auth(service, format!("API authentication failed: {detail}")),
            429 => AppError::external_unavailable(service, format!("Rate limit reached: {detail}")),
            502..=504 => {
                AppError::external_unavailable(service, format!("Service unavailable: {detail}"))
            }
            _ => AppError::external_service(service, format!("API error ({status}): {detail}")),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &'static str {
        self.config.provider_name
    }

    fn display_name(&self) -> &'static str {
        self.config.display_name
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.config.capabilities
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn available_models(&self) -> &'static [&'static str] {
        match self.config.provider_name {
            "groq" => &[
                "llama-3.3-70b-versatile",
                "llama-3.1-8b-instant",
                "mixtral-8x7b-32768",
            ],
            "openai" => &["gpt-4o-mini", "gpt-4o"],
            _ => &["qwen2.5:14b-instruct", "llama3.1:8b-instruct"],
        }
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let openai_request = OpenAiRequest {
            model: model.to_owned(),
            messages: request.messages.iter().map(OpenAiMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };
        debug!(
            "Sending chat completion request to {} with {} messages",
            self.config.provider_name,
            openai_request.messages.len()
        );

        let http_request = self
            .client
            .post(self.api_url("chat/completions"))
            .header("Content-Type", "application/json")
            .json(&openai_request);

        let response = self
            .add_auth_header(http_request)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            warn!(%status, "{} returned an error status", self.config.provider_name);
            return Err(self.parse_error_response(status, &body));
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse API response: {}", e);
            AppError::external_service(
                self.config.display_name,
                format!("Failed to parse response: {e}"),
            )
        })?;

        let choice = openai_response.choices.into_iter().next().ok_or_else(|| {
            AppError::external_service(self.config.display_name, "API returned no choices")
        })?;
        let content = choice.message.content.unwrap_or_default();

        debug!(
            "Received response from {}: {} chars, finish_reason: {:?}",
            self.config.provider_name,
            content.len(),
            choice.finish_reason
        );

        Ok(ChatResponse {
            content,
            model: openai_response.model.unwrap_or_else(|| model.to_owned()),
            usage: openai_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        debug!(
            "Performing {} health check at {}",
            self.config.provider_name, self.config.base_url
        );

        let response = self
            .add_auth_header(self.client.get(self.api_url("models")))
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let healthy = response.status().is_success();
        if healthy {
            debug!("{} health check passed", self.config.provider_name);
        } else {
            warn!(
                "{} health check failed with status: {}",
                self.config.provider_name,
                response.status()
            );
        }
        Ok(healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn provider() -> OpenAiCompatibleProvider {
        let config = OpenAiCompatibleConfig::from_llm_config(&LlmConfig::for_provider(
            LlmProviderType::Groq,
        ));
        OpenAiCompatibleProvider::new(config).unwrap()
    }

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let mut config = OpenAiCompatibleConfig::from_llm_config(&LlmConfig::for_provider(
            LlmProviderType::Local,
        ));
        config.base_url = "http://localhost:11434/v1/".to_owned();
        let provider = OpenAiCompatibleProvider::new(config).unwrap();
        assert_eq!(
            provider.api_url("chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let provider = provider();
        let body = r#"{"error":{"message":"bad key","type":"invalid_request_error"}}"#;
        let auth = provider.parse_error_response(StatusCode::UNAUTHORIZED, body);
        assert_eq!(auth.code, ErrorCode::ExternalAuthFailed);
        assert!(auth.message.contains("bad key"));

        let busy = provider.parse_error_response(StatusCode::SERVICE_UNAVAILABLE, "down");
        assert_eq!(busy.code, ErrorCode::ExternalServiceUnavailable);

        let other = provider.parse_error_response(StatusCode::BAD_REQUEST, "<html>");
        assert_eq!(other.code, ErrorCode::ExternalServiceError);
    }
}
