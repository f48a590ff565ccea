// ABOUTME: Body composition algorithms and evaluation comparison engine for Evalfit
// ABOUTME: Pure calculation crate with no I/O, shared by the store, CLI, and insight service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Evalfit Intelligence
//!
//! Deterministic calculations over evaluation records:
//!
//! - **`body_composition`**: fat / lean / muscle / bone / residual decomposition
//! - **skinfolds**: Jackson-Pollock body-fat estimators
//! - **`field_registry`**: comparable fields with improvement direction
//! - **comparison**: capped selection and adjacent-selected deltas
//! - **postural**: deviation progression across evaluations
//! - **config**: calculator constants with environment overrides

/// Four-compartment body composition calculator
pub mod body_composition;
/// Evaluation selection and comparison tables
pub mod comparison;
/// Calculator configuration
pub mod config;
/// Declared comparable fields
pub mod field_registry;
/// Postural deviation summary
pub mod postural;
/// Skinfold body-fat estimators
pub mod skinfolds;

pub use body_composition::{calculate, BodyComposition, CompositionInput};
pub use comparison::{
    build_comparison_table, ComparisonState, ComparisonTable, ComparisonView,
    EvaluationSelection, SelectionOutcome, SelectionWarning,
};
pub use config::BodyCompositionConfig;
pub use field_registry::{FieldKey, FieldSpec, ImprovementDirection, Trend};
pub use postural::{summarize_postural, PosturalSummary};
pub use skinfolds::{estimate_body_fat_from_skinfolds, SkinfoldEstimate, SkinfoldProtocol};
