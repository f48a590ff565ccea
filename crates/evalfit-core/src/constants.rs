// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Formula coefficients, comparison selection caps, and input validation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Body composition formula constants
///
/// References:
/// - Von Döbeln, W. (1964). Determination of body constituents.
///   In: Occurrences, causes and prevention of overnutrition. Almqvist & Wiksell.
/// - Würch, A. (1974). La femme et le sport. Médecine Sportive Française (residual mass factors).
pub mod body_composition {
    /// Residual mass as a fraction of body weight for female-coded clients
    pub const RESIDUAL_FACTOR_FEMALE: f64 = 0.21;
    /// Residual mass as a fraction of body weight for all other clients
    pub const RESIDUAL_FACTOR_MALE: f64 = 0.24;
    /// Target lean-mass share of ideal body weight for female-coded clients
    pub const IDEAL_LEAN_FRACTION_FEMALE: f64 = 0.75;
    /// Target lean-mass share of ideal body weight for all other clients
    pub const IDEAL_LEAN_FRACTION_MALE: f64 = 0.85;
    /// Von Döbeln multiplier
    pub const VON_DOBELN_COEFFICIENT: f64 = 3.02;
    /// Von Döbeln scale applied to `height² x wrist x femur`
    pub const VON_DOBELN_SCALE: f64 = 400.0;
    /// Von Döbeln exponent
    pub const VON_DOBELN_EXPONENT: f64 = 0.712;
}

/// Skinfold body-density equations
///
/// References:
/// - Jackson, A.S. & Pollock, M.L. (1978). Generalized equations for predicting body density of men.
///   *British Journal of Nutrition*, 40(3), 497-504.
/// - Jackson, A.S., Pollock, M.L. & Ward, A. (1980). Generalized equations for predicting body
///   density of women. *Medicine & Science in Sports & Exercise*, 12(3), 175-181.
/// - Siri, W.E. (1961). Body composition from fluid spaces and density.
pub mod skinfolds {
    /// Siri numerator
    pub const SIRI_NUMERATOR: f64 = 495.0;
    /// Siri offset
    pub const SIRI_OFFSET: f64 = 450.0;
}

/// Comparison view selection caps
pub mod selection {
    /// Maximum evaluations selectable in the bioimpedance comparison view
    pub const BIOIMPEDANCE_MAX_SELECTION: usize = 5;
    /// Maximum evaluations selectable in the postural summary view
    pub const POSTURAL_MAX_SELECTION: usize = 4;
}

/// Accepted input ranges for evaluation forms
pub mod validation {
    /// Maximum body weight (kg)
    pub const MAX_WEIGHT_KG: f64 = 400.0;
    /// Minimum body height (cm)
    pub const MIN_HEIGHT_CM: f64 = 50.0;
    /// Maximum body height (cm)
    pub const MAX_HEIGHT_CM: f64 = 260.0;
    /// Minimum waist/hip circumference (cm)
    pub const MIN_CIRCUMFERENCE_CM: f64 = 20.0;
    /// Maximum waist/hip circumference (cm)
    pub const MAX_CIRCUMFERENCE_CM: f64 = 300.0;
    /// Maximum plausible body fat percentage
    pub const MAX_BODY_FAT_PERCENT: f64 = 75.0;
    /// Maximum caliper reading (mm)
    pub const MAX_SKINFOLD_MM: f64 = 80.0;
    /// Maximum bone diameter (cm)
    pub const MAX_BONE_DIAMETER_CM: f64 = 20.0;
    /// Maximum client age (years)
    pub const MAX_AGE_YEARS: u32 = 120;
}
