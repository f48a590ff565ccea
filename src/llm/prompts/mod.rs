// ABOUTME: Prompt templates for insight generation loaded at compile time
// ABOUTME: Trainer system prompt plus report, comparison, and postural instructions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prompts
//!
//! Prompts live in markdown files next to this module so they can be edited
//! without touching code. Their wording is not part of any contract.

/// System prompt shared by every insight request
pub const TRAINER_SYSTEM_PROMPT: &str = include_str!("trainer_system.md");

/// Instructions for a single-evaluation report
pub const EVALUATION_REPORT_PROMPT: &str = include_str!("evaluation_report.md");

/// Instructions for a two-evaluation comparison
pub const COMPARISON_ANALYSIS_PROMPT: &str = include_str!("comparison_analysis.md");

/// Instructions for a postural analysis
pub const POSTURAL_ANALYSIS_PROMPT: &str = include_str!("postural_analysis.md");

/// Append a pretty-printed JSON payload to `instructions`
#[must_use]
pub fn with_payload(instructions: &str, payload_json: &str) -> String {
    format!("{}\n\n```json\n{payload_json}\n```\n", instructions.trim_end())
}
