// ABOUTME: Unified LLM provider selector for runtime provider switching
// ABOUTME: Picks Groq, OpenAI, or a local endpoint from environment configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Selector
//!
//! Set `EVALFIT_LLM_PROVIDER`:
//! - `groq` (default): requires `GROQ_API_KEY`
//! - `openai`: requires `OPENAI_API_KEY`
//! - `local` / `ollama` / `vllm`: any `OpenAI`-compatible server, key optional
//!
//! ## Example
//!
//! ```rust,no_run
//! use evalfit::llm::{ChatMessage, ChatProvider, ChatRequest, LlmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), evalfit::errors::AppError> {
//!     let provider = ChatProvider::from_env()?;
//!     let request = ChatRequest::new(vec![ChatMessage::user("Hello!")]);
//!     let response = provider.complete(&request).await?;
//!     println!("{}", response.content);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use tracing::{debug, info};

use super::{
    ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, OpenAiCompatibleConfig,
    OpenAiCompatibleProvider,
};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::AppError;

/// Chat provider chosen at runtime
pub enum ChatProvider {
    /// Groq hosted models
    Groq(OpenAiCompatibleProvider),
    /// `OpenAI` hosted models
    OpenAi(OpenAiCompatibleProvider),
    /// Local `OpenAI`-compatible server (Ollama, vLLM, `LocalAI`)
    Local(OpenAiCompatibleProvider),
}

impl ChatProvider {
    /// Create a provider from environment configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is malformed or a cloud
    /// provider's API key is missing
    pub fn from_env() -> Result<Self, AppError> {
        let config = LlmConfig::from_env()?;
        info!(
            "Initializing LLM provider: {} (set {} to change)",
            config.provider,
            LlmProviderType::ENV_VAR
        );
        Self::from_config(&config)
    }

    /// Create a provider from explicit settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a cloud provider's API key is missing,
    /// or an internal error if the HTTP client cannot be built
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        if config.provider.requires_api_key() && config.api_key.is_none() {
            return Err(AppError::config(format!(
                "{} environment variable is required for the {} provider",
                config.provider.api_key_env_var(),
                config.provider
            )));
        }

        let inner = OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from_llm_config(config))?;
        let provider = match config.provider {
            LlmProviderType::Groq => Self::Groq(inner),
            LlmProviderType::OpenAi => Self::OpenAi(inner),
            LlmProviderType::Local => Self::Local(inner),
        };
        debug!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(provider)
    }

    const fn inner(&self) -> &OpenAiCompatibleProvider {
        match self {
            Self::Groq(p) | Self::OpenAi(p) | Self::Local(p) => p,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &'static str {
        self.inner().display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.inner().capabilities()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    fn available_models(&self) -> &'static [&'static str] {
        self.inner().available_models()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.inner().complete(request).await
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        self.inner().health_check().await
    }
}
