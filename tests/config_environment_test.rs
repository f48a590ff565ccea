// ABOUTME: Unit tests for environment-driven configuration
// ABOUTME: Validates provider selection, numeric overrides, and malformed values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use evalfit::config::environment::DEFAULT_SAMPLE_DATA_PATH;
use evalfit::config::{EvalfitConfig, Environment, LlmConfig, LlmProviderType, LogLevel};
use evalfit::errors::ErrorCode;
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "EVALFIT_ENV",
    "EVALFIT_LOG_LEVEL",
    "EVALFIT_LLM_PROVIDER",
    "EVALFIT_LLM_BASE_URL",
    "EVALFIT_LLM_MODEL",
    "EVALFIT_LLM_TEMPERATURE",
    "EVALFIT_LLM_MAX_TOKENS",
    "EVALFIT_LLM_TIMEOUT_SECS",
    "EVALFIT_SAMPLE_DATA",
    "GROQ_API_KEY",
    "OPENAI_API_KEY",
    "LOCAL_LLM_API_KEY",
];

fn clear_env() {
    for var in MANAGED_VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_log_level_parsing() {
    assert_eq!(LogLevel::from_str_or_default("error"), LogLevel::Error);
    assert_eq!(LogLevel::from_str_or_default("WARN"), LogLevel::Warn);
    assert_eq!(LogLevel::from_str_or_default("Debug"), LogLevel::Debug);
    assert_eq!(LogLevel::from_str_or_default("invalid"), LogLevel::Info);
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(
        Environment::from_str_or_default("test"),
        Environment::Testing
    );
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
}

#[test]
fn test_provider_parsing() {
    assert_eq!(
        LlmProviderType::from_str_or_default("OpenAI"),
        LlmProviderType::OpenAi
    );
    assert_eq!(
        LlmProviderType::from_str_or_default("ollama"),
        LlmProviderType::Local
    );
    assert_eq!(
        LlmProviderType::from_str_or_default("unknown"),
        LlmProviderType::Groq
    );
    assert!(!LlmProviderType::Local.requires_api_key());
    assert!(LlmProviderType::Groq.requires_api_key());
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();

    let config = EvalfitConfig::from_env().unwrap();

    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.llm.provider, LlmProviderType::Groq);
    assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
    assert!(config.llm.api_key.is_none());
    assert_eq!(config.llm.timeout(), Duration::from_secs(60));
    assert_eq!(
        config.sample_data_path,
        PathBuf::from(DEFAULT_SAMPLE_DATA_PATH)
    );
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("EVALFIT_LLM_PROVIDER", "local");
    env::set_var("EVALFIT_LLM_BASE_URL", "http://127.0.0.1:8000/v1");
    env::set_var("EVALFIT_LLM_MODEL", "mistral:7b");
    env::set_var("EVALFIT_LLM_TEMPERATURE", "0.9");
    env::set_var("EVALFIT_LLM_MAX_TOKENS", "512");
    env::set_var("EVALFIT_LLM_TIMEOUT_SECS", "15");
    env::set_var("EVALFIT_SAMPLE_DATA", "/tmp/evaluations.json");

    let config = EvalfitConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.llm.provider, LlmProviderType::Local);
    assert_eq!(config.llm.base_url, "http://127.0.0.1:8000/v1");
    assert_eq!(config.llm.model, "mistral:7b");
    assert!((config.llm.temperature - 0.9).abs() < f32::EPSILON);
    assert_eq!(config.llm.max_tokens, 512);
    assert_eq!(config.llm.timeout_secs, 15);
    assert_eq!(
        config.sample_data_path,
        PathBuf::from("/tmp/evaluations.json")
    );
}

#[test]
#[serial]
fn test_api_key_is_read_for_selected_provider() {
    clear_env();
    env::set_var("EVALFIT_LLM_PROVIDER", "openai");
    env::set_var("OPENAI_API_KEY", "sk-test");
    env::set_var("GROQ_API_KEY", "gsk-ignored");

    let config = LlmConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.provider, LlmProviderType::OpenAi);
    assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.model, "gpt-4o-mini");
}

#[test]
#[serial]
fn test_malformed_number_is_config_error() {
    clear_env();
    env::set_var("EVALFIT_LLM_MAX_TOKENS", "lots");

    let error = LlmConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("EVALFIT_LLM_MAX_TOKENS"));
}

#[test]
#[serial]
fn test_out_of_range_temperature_is_config_error() {
    clear_env();
    env::set_var("EVALFIT_LLM_TEMPERATURE", "3.5");

    let error = LlmConfig::from_env().unwrap_err();
    clear_env();

    assert_eq!(error.code, ErrorCode::ConfigError);
}
