// ABOUTME: Tests for LLM provider selection and OpenAI-compatible configuration
// ABOUTME: Validates API key requirements, provider naming, and request building without network access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use evalfit::config::{LlmConfig, LlmProviderType};
use evalfit::errors::ErrorCode;
use evalfit::llm::{
    ChatMessage, ChatProvider, ChatRequest, LlmCapabilities, LlmProvider, MessageRole,
    OpenAiCompatibleConfig, OpenAiCompatibleProvider,
};
use serial_test::serial;

#[test]
fn test_cloud_provider_without_key_is_rejected() {
    let config = LlmConfig::for_provider(LlmProviderType::Groq);

    let Err(error) = ChatProvider::from_config(&config) else {
        panic!("Groq without an API key must be rejected");
    };

    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("GROQ_API_KEY"));
}

#[test]
fn test_local_provider_needs_no_key() {
    let config = LlmConfig::for_provider(LlmProviderType::Local);

    let provider = ChatProvider::from_config(&config).unwrap();

    assert_eq!(provider.name(), "local");
    assert_eq!(provider.display_name(), "Local LLM");
    assert_eq!(provider.default_model(), "qwen2.5:14b-instruct");
    assert!(provider
        .available_models()
        .contains(&"llama3.1:8b-instruct"));
}

#[test]
fn test_openai_provider_with_key() {
    let mut config = LlmConfig::for_provider(LlmProviderType::OpenAi);
    config.api_key = Some("sk-test".to_owned());

    let provider = ChatProvider::from_config(&config).unwrap();

    assert_eq!(provider.name(), "openai");
    assert_eq!(provider.display_name(), "OpenAI");
    assert!(provider.capabilities().supports_json_mode());
    assert!(!provider.capabilities().supports_streaming());
}

#[test]
fn test_compatible_config_maps_settings() {
    let mut config = LlmConfig::for_provider(LlmProviderType::Local);
    config.base_url = "http://gpu-box:8000/v1".to_owned();
    config.model = "mistral:7b".to_owned();
    config.timeout_secs = 20;

    let compatible = OpenAiCompatibleConfig::from_llm_config(&config);

    assert_eq!(compatible.base_url, "http://gpu-box:8000/v1");
    assert_eq!(compatible.default_model, "mistral:7b");
    assert_eq!(compatible.timeout, Duration::from_secs(20));
    assert!(compatible.api_key.is_none());
    assert_eq!(
        compatible.capabilities,
        LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE
    );

    let provider = OpenAiCompatibleProvider::new(compatible).unwrap();
    assert_eq!(provider.default_model(), "mistral:7b");
    assert_eq!(provider.config().provider_name, "local");
}

#[test]
fn test_request_builder_sets_options() {
    let request = ChatRequest::new(vec![
        ChatMessage::system("You are a coach."),
        ChatMessage::user("Summarize."),
    ])
    .with_model("gpt-4o-mini")
    .with_temperature(0.2)
    .with_max_tokens(300);

    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.model.as_deref(), Some("gpt-4o-mini"));
    assert!((request.temperature.unwrap() - 0.2).abs() < f32::EPSILON);
    assert_eq!(request.max_tokens, Some(300));
}

#[test]
#[serial]
fn test_from_env_reports_missing_key_variable() {
    env::set_var("EVALFIT_LLM_PROVIDER", "openai");
    env::remove_var("OPENAI_API_KEY");

    let result = ChatProvider::from_env();
    env::remove_var("EVALFIT_LLM_PROVIDER");

    let Err(error) = result else {
        panic!("OpenAI without an API key must be rejected");
    };
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(error.message.contains("OPENAI_API_KEY"));
}
