// ABOUTME: Configuration management module for environment-only settings
// ABOUTME: LLM provider, HTTP timeouts, environment, and logging options
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for Evalfit
//!
//! Configuration is read from environment variables only; there is no
//! configuration file. Calculator constants live in
//! `evalfit_intelligence::config` and are re-exported here.

/// Environment-driven application configuration
pub mod environment;
/// Shared configuration enums
pub mod types;

pub use environment::{EvalfitConfig, LlmConfig};
pub use evalfit_intelligence::config::BodyCompositionConfig;
pub use types::{Environment, LlmProviderType, LogLevel};
