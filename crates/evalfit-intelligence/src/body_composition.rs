// ABOUTME: Body composition decomposition into fat, lean, muscle, bone, and residual mass
// ABOUTME: Von Döbeln bone estimate, sex-specific residual factors, ideal weight, BMI, waist-hip ratio
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Four-compartment body composition
//!
//! Weight is split into fat, bone, residual, and muscle mass:
//!
//! - `fat = weight x body_fat% / 100`
//! - `lean = weight - fat`
//! - `bone = 3.02 x (height_m² x wrist_m x femur_m x 400)^0.712` (Von Döbeln)
//! - `residual = weight x residual_factor`
//! - `muscle = weight - fat - bone - residual`
//! - `ideal_weight = lean / ideal_lean_fraction`

use evalfit_core::models::{BiologicalSex, Client, Evaluation};
use serde::{Deserialize, Serialize};

use crate::config::BodyCompositionConfig;

/// Centimetres per metre
const CM_PER_M: f64 = 100.0;

/// Inputs of the decomposition, detached from the stored evaluation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompositionInput {
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Body fat (%)
    pub body_fat_percentage: Option<f64>,
    /// Standing height (cm)
    pub height_cm: Option<f64>,
    /// Wrist diameter (cm)
    pub wrist_cm: Option<f64>,
    /// Femur diameter (cm)
    pub femur_cm: Option<f64>,
    /// Waist circumference (cm)
    pub waist_cm: Option<f64>,
    /// Hip circumference (cm)
    pub hip_cm: Option<f64>,
    /// Sex coding used to pick constants
    pub sex: BiologicalSex,
}

impl CompositionInput {
    /// Gather inputs from an evaluation, falling back to the client's height
    #[must_use]
    pub fn from_evaluation(evaluation: &Evaluation, client: &Client) -> Self {
        let height_cm = evaluation
            .measurements
            .height_cm
            .filter(|h| positive(*h))
            .or(Some(client.height_cm));
        Self {
            weight_kg: evaluation.measurements.weight_kg,
            body_fat_percentage: evaluation.body_fat_percentage,
            height_cm,
            wrist_cm: evaluation.bone_diameters.wrist_cm,
            femur_cm: evaluation.bone_diameters.femur_cm,
            waist_cm: evaluation.measurements.waist_cm,
            hip_cm: evaluation.measurements.hip_cm,
            sex: client.sex,
        }
    }
}

/// Result of the decomposition (masses in kg, shares in %)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyComposition {
    /// Body weight used for the decomposition
    pub weight_kg: f64,
    /// Fat mass
    pub fat_mass_kg: f64,
    /// Fat-free mass
    pub lean_mass_kg: f64,
    /// Muscle mass (by subtraction)
    pub muscle_mass_kg: f64,
    /// Bone mass (Von Döbeln)
    pub bone_mass_kg: f64,
    /// Residual mass (organs, fluids)
    pub residual_mass_kg: f64,
    /// Fat share, passed through from the input
    pub fat_percentage: f64,
    /// Lean share
    pub lean_percentage: f64,
    /// Muscle share
    pub muscle_percentage: f64,
    /// Bone share
    pub bone_percentage: f64,
    /// Residual share
    pub residual_percentage: f64,
    /// Weight at which lean mass would be the ideal fraction
    pub ideal_weight_kg: f64,
    /// `weight - ideal_weight`; negative when below ideal
    pub fat_loss_needed_kg: f64,
    /// Body mass index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// Waist to hip circumference ratio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_hip_ratio: Option<f64>,
}

impl BodyComposition {
    /// Mass components sum (fat + bone + residual + muscle)
    #[must_use]
    pub fn component_sum_kg(&self) -> f64 {
        self.fat_mass_kg + self.bone_mass_kg + self.residual_mass_kg + self.muscle_mass_kg
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Von Döbeln bone mass estimate (kg)
///
/// Formula: `c x (height_m² x wrist_m x femur_m x scale)^exponent`
///
/// Returns 0 unless height, wrist, and femur are all present and positive.
#[must_use]
pub fn von_dobeln_bone_mass(
    height_cm: Option<f64>,
    wrist_cm: Option<f64>,
    femur_cm: Option<f64>,
    config: &BodyCompositionConfig,
) -> f64 {
    let (Some(height), Some(wrist), Some(femur)) = (
        height_cm.filter(|v| positive(*v)),
        wrist_cm.filter(|v| positive(*v)),
        femur_cm.filter(|v| positive(*v)),
    ) else {
        return 0.0;
    };

    let height_m = height / CM_PER_M;
    let wrist_m = wrist / CM_PER_M;
    let femur_m = femur / CM_PER_M;
    let coefficients = &config.von_dobeln;
    coefficients.coefficient
        * (height_m * height_m * wrist_m * femur_m * coefficients.scale).powf(coefficients.exponent)
}

/// Body mass index (`kg / m²`), `None` without positive weight and height
#[must_use]
pub fn body_mass_index(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|v| positive(*v))?;
    let height_m = height_cm.filter(|v| positive(*v))? / CM_PER_M;
    Some(weight / (height_m * height_m))
}

/// Waist to hip ratio, `None` without positive circumferences
#[must_use]
pub fn waist_hip_ratio(waist_cm: Option<f64>, hip_cm: Option<f64>) -> Option<f64> {
    let waist = waist_cm.filter(|v| positive(*v))?;
    let hip = hip_cm.filter(|v| positive(*v))?;
    Some(waist / hip)
}

/// Decompose `input` into body compartments
///
/// Absent, zero, negative, or non-finite weight yields an all-zero result.
/// Absent body fat is treated as 0 %. Every mass component is floored at 0.
#[must_use]
pub fn compute(input: &CompositionInput, config: &BodyCompositionConfig) -> BodyComposition {
    let Some(weight) = input.weight_kg.filter(|w| positive(*w)) else {
        return BodyComposition::default();
    };

    let constants = config.for_sex(input.sex);
    let fat_percentage = input
        .body_fat_percentage
        .filter(|p| p.is_finite())
        .unwrap_or(0.0);

    let fat = weight * fat_percentage / 100.0;
    let lean = weight - fat;
    let bone = von_dobeln_bone_mass(input.height_cm, input.wrist_cm, input.femur_cm, config);
    let residual = weight * constants.residual_factor;
    let muscle = weight - fat - bone - residual;

    let fat = fat.max(0.0);
    let lean = lean.max(0.0);
    let bone = bone.max(0.0);
    let residual = residual.max(0.0);
    let muscle = muscle.max(0.0);

    let share = |mass: f64| mass / weight * 100.0;
    let ideal_weight = lean / constants.ideal_lean_fraction;

    BodyComposition {
        weight_kg: weight,
        fat_mass_kg: fat,
        lean_mass_kg: lean,
        muscle_mass_kg: muscle,
        bone_mass_kg: bone,
        residual_mass_kg: residual,
        fat_percentage,
        lean_percentage: share(lean),
        muscle_percentage: share(muscle),
        bone_percentage: share(bone),
        residual_percentage: share(residual),
        ideal_weight_kg: ideal_weight,
        fat_loss_needed_kg: weight - ideal_weight,
        bmi: body_mass_index(Some(weight), input.height_cm),
        waist_hip_ratio: waist_hip_ratio(input.waist_cm, input.hip_cm),
    }
}

/// Decompose a stored evaluation for its client
#[must_use]
pub fn calculate(
    evaluation: &Evaluation,
    client: &Client,
    config: &BodyCompositionConfig,
) -> BodyComposition {
    compute(&CompositionInput::from_evaluation(evaluation, client), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn male_example() -> CompositionInput {
        CompositionInput {
            weight_kg: Some(85.0),
            body_fat_percentage: Some(22.0),
            height_cm: Some(180.0),
            wrist_cm: Some(6.0),
            femur_cm: Some(9.4),
            sex: BiologicalSex::Male,
            ..CompositionInput::default()
        }
    }

    #[test]
    fn test_zero_weight_is_all_zero() {
        let input = CompositionInput {
            weight_kg: Some(0.0),
            ..male_example()
        };
        assert_eq!(
            compute(&input, &BodyCompositionConfig::default()),
            BodyComposition::default()
        );
    }

    #[test]
    fn test_nan_weight_is_all_zero() {
        let input = CompositionInput {
            weight_kg: Some(f64::NAN),
            ..male_example()
        };
        let result = compute(&input, &BodyCompositionConfig::default());
        assert!(result.fat_mass_kg.abs() < EPS && result.ideal_weight_kg.abs() < EPS);
    }

    #[test]
    fn test_components_sum_to_weight() {
        let result = compute(&male_example(), &BodyCompositionConfig::default());
        assert!((result.fat_mass_kg + result.lean_mass_kg - 85.0).abs() < EPS);
        assert!((result.component_sum_kg() - 85.0).abs() < EPS);
    }

    #[test]
    fn test_bone_requires_both_diameters() {
        let config = BodyCompositionConfig::default();
        assert!(von_dobeln_bone_mass(Some(180.0), Some(6.0), None, &config).abs() < EPS);
        assert!(von_dobeln_bone_mass(Some(180.0), Some(0.0), Some(9.4), &config).abs() < EPS);
        assert!(von_dobeln_bone_mass(None, Some(6.0), Some(9.4), &config).abs() < EPS);
    }

    #[test]
    fn test_muscle_is_floored_at_zero() {
        let input = CompositionInput {
            body_fat_percentage: Some(70.0),
            ..male_example()
        };
        let result = compute(&input, &BodyCompositionConfig::default());
        assert!(result.muscle_mass_kg.abs() < EPS);
    }

    #[test]
    fn test_derived_indices() {
        let bmi = body_mass_index(Some(81.0), Some(180.0)).unwrap();
        assert!((bmi - 25.0).abs() < EPS);
        assert_eq!(body_mass_index(Some(81.0), None), None);
        assert_eq!(waist_hip_ratio(Some(80.0), Some(100.0)), Some(0.8));
        assert_eq!(waist_hip_ratio(Some(80.0), Some(0.0)), None);
    }
}
