// ABOUTME: Configuration module for evalfit-intelligence crate
// ABOUTME: Re-exports calculator configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Body composition formula constants with environment overrides
pub mod body_composition;
/// Configuration validation errors
pub mod error;

pub use body_composition::{BodyCompositionConfig, SexConstants, VonDobelnConfig};
pub use error::ConfigError;
