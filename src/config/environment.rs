// ABOUTME: Environment configuration management for runtime settings
// ABOUTME: Parses LLM provider, timeout, logging, and sample-data settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `EVALFIT_ENV` | `development` |
//! | `EVALFIT_LOG_LEVEL` | `info` |
//! | `EVALFIT_LLM_PROVIDER` | `groq` |
//! | `EVALFIT_LLM_BASE_URL` | provider default |
//! | `EVALFIT_LLM_MODEL` | provider default |
//! | `EVALFIT_LLM_TEMPERATURE` | `0.4` |
//! | `EVALFIT_LLM_MAX_TOKENS` | `2048` |
//! | `EVALFIT_LLM_TIMEOUT_SECS` | `60` |
//! | `GROQ_API_KEY` / `OPENAI_API_KEY` / `LOCAL_LLM_API_KEY` | none |
//! | `EVALFIT_SAMPLE_DATA` | `data/sample_evaluations.json` |

use serde::Serialize;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use super::types::{Environment, LlmProviderType, LogLevel};
use crate::errors::{AppError, AppResult};

/// Default sampling temperature for insight prompts
pub const DEFAULT_TEMPERATURE: f32 = 0.4;
/// Default completion budget
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
/// Default HTTP timeout for LLM calls
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
/// Default location of the bundled sample data
pub const DEFAULT_SAMPLE_DATA_PATH: &str = "data/sample_evaluations.json";

/// LLM endpoint configuration
#[derive(Clone, Serialize)]
pub struct LlmConfig {
    /// Which provider family
    pub provider: LlmProviderType,
    /// API base URL
    pub base_url: String,
    /// Bearer token, if any
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Whole-request HTTP timeout
    pub timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    /// Defaults for `provider` without an API key
    #[must_use]
    pub fn for_provider(provider: LlmProviderType) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_owned(),
            api_key: None,
            model: provider.default_model().to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// HTTP timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a numeric variable does not parse or is out of range
    pub fn from_env() -> AppResult<Self> {
        let provider = LlmProviderType::from_env();
        let defaults = Self::for_provider(provider);

        let config = Self {
            provider,
            base_url: env::var("EVALFIT_LLM_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_url),
            api_key: env::var(provider.api_key_env_var())
                .ok()
                .filter(|k| !k.is_empty()),
            model: env::var("EVALFIT_LLM_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.model),
            temperature: parse_env_or("EVALFIT_LLM_TEMPERATURE", defaults.temperature)?,
            max_tokens: parse_env_or("EVALFIT_LLM_MAX_TOKENS", defaults.max_tokens)?,
            timeout_secs: parse_env_or("EVALFIT_LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check numeric settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending setting
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AppError::config(
                "EVALFIT_LLM_TEMPERATURE must be between 0.0 and 2.0",
            ));
        }
        if self.max_tokens == 0 {
            return Err(AppError::config("EVALFIT_LLM_MAX_TOKENS must be positive"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config("EVALFIT_LLM_TIMEOUT_SECS must be positive"));
        }
        Ok(())
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize)]
pub struct EvalfitConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Application log level
    pub log_level: LogLevel,
    /// LLM settings
    pub llm: LlmConfig,
    /// JSON file used to seed the store
    pub sample_data_path: PathBuf,
}

impl EvalfitConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any variable is malformed
    pub fn from_env() -> AppResult<Self> {
        let config = Self {
            environment: Environment::from_str_or_default(
                &env::var("EVALFIT_ENV").unwrap_or_default(),
            ),
            log_level: LogLevel::from_str_or_default(
                &env::var("EVALFIT_LOG_LEVEL").unwrap_or_default(),
            ),
            llm: LlmConfig::from_env()?,
            sample_data_path: PathBuf::from(
                env::var("EVALFIT_SAMPLE_DATA")
                    .unwrap_or_else(|_| DEFAULT_SAMPLE_DATA_PATH.to_owned()),
            ),
        };

        info!(
            environment = %config.environment,
            llm.provider = %config.llm.provider,
            llm.model = %config.llm.model,
            "Configuration loaded from environment"
        );
        Ok(config)
    }
}

fn parse_env_or<T: FromStr>(key: &str, default: T) -> AppResult<T> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("Invalid {key} value: {raw}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = LlmConfig::for_provider(LlmProviderType::Groq);
        config.api_key = Some("gsk_secret".to_owned());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("gsk_secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = LlmConfig::for_provider(LlmProviderType::Local);
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
