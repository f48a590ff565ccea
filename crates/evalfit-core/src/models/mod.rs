// ABOUTME: Core data models for the Evalfit evaluation platform
// ABOUTME: Re-exports Client, Evaluation, Bioimpedance, postural types, and validation helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the data structures shared by the store, the
//! calculators, and the insight service.
//!
//! ## Core Models
//!
//! - `Client`: Identity and demographics of a trainee
//! - `Evaluation`: A dated snapshot of body measurements
//! - `Bioimpedance`: Device-specific scale readings tagged by `scaleType`
//! - `PosturalAssessment`: Photos and categorical deviations per body view
//!
//! Wire names are camelCase so evaluation JSON matches what the dashboard sends.

mod bioimpedance;
mod client;
mod evaluation;
mod postural;
mod validation;

pub use bioimpedance::{Bioimpedance, InBodyReading, OmronReading, ScaleType, SegmentalAnalysis};
pub use client::{BiologicalSex, Client, ClientId};
pub use evaluation::{
    validate_skinfolds, BodyMeasurements, BoneDiameters, Evaluation, EvaluationId, SkinfoldSite,
};
pub use postural::{PosturalAssessment, PosturalDeviation, PosturalPhoto, PosturalView};
pub use validation::{FieldError, ValidationErrors};
