// ABOUTME: Bioimpedance scale readings modelled as a sum type keyed by scaleType
// ABOUTME: Omron simple-scale fields and InBody full segmental analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation::ValidationErrors;
use crate::constants::validation::MAX_BODY_FAT_PERCENT;

/// Which device produced a bioimpedance reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    /// Omron home scale
    Omron,
    /// `InBody` clinical analyser
    #[serde(rename = "inbody")]
    InBody,
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Omron => write!(f, "omron"),
            Self::InBody => write!(f, "inbody"),
        }
    }
}

/// Bioimpedance reading tagged by device
///
/// Serialized with a `scaleType` discriminator so only one device schema can
/// ever be populated for an evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scaleType")]
pub enum Bioimpedance {
    /// Omron simple scale fields
    #[serde(rename = "omron")]
    Omron(OmronReading),
    /// `InBody` full segmental fields
    #[serde(rename = "inbody")]
    InBody(InBodyReading),
}

impl Bioimpedance {
    /// Device tag of this reading
    #[must_use]
    pub const fn scale_type(&self) -> ScaleType {
        match self {
            Self::Omron(_) => ScaleType::Omron,
            Self::InBody(_) => ScaleType::InBody,
        }
    }

    /// Omron fields, if this is an Omron reading
    #[must_use]
    pub const fn as_omron(&self) -> Option<&OmronReading> {
        match self {
            Self::Omron(reading) => Some(reading),
            Self::InBody(_) => None,
        }
    }

    /// `InBody` fields, if this is an `InBody` reading
    #[must_use]
    pub const fn as_inbody(&self) -> Option<&InBodyReading> {
        match self {
            Self::InBody(reading) => Some(reading),
            Self::Omron(_) => None,
        }
    }

    /// Validate device fields
    ///
    /// # Errors
    ///
    /// Returns field-level messages for negative or implausible values
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Omron(reading) => reading.validate(),
            Self::InBody(reading) => reading.validate(),
        }
    }
}

/// Omron home-scale reading
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OmronReading {
    /// Body fat (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    /// Skeletal muscle (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeletal_muscle_percent: Option<f64>,
    /// Visceral fat level (device scale 1-30)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visceral_fat_level: Option<f64>,
    /// Resting metabolism (kcal/day)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_metabolism_kcal: Option<f64>,
    /// Device-estimated body age (years)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_age_years: Option<f64>,
    /// Device-reported BMI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
}

impl OmronReading {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check_range("bodyFatPercent", self.body_fat_percent, 0.0, MAX_BODY_FAT_PERCENT);
        errors.check_range("skeletalMusclePercent", self.skeletal_muscle_percent, 0.0, 100.0);
        errors.check_non_negative("visceralFatLevel", self.visceral_fat_level);
        errors.check_non_negative("restingMetabolismKcal", self.resting_metabolism_kcal);
        errors.check_non_negative("bodyAgeYears", self.body_age_years);
        errors.check_non_negative("bmi", self.bmi);
        errors.into_result()
    }
}

/// Per-segment values (kg) from an `InBody` segmental analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentalAnalysis {
    /// Right arm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_arm_kg: Option<f64>,
    /// Left arm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_arm_kg: Option<f64>,
    /// Trunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trunk_kg: Option<f64>,
    /// Right leg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_leg_kg: Option<f64>,
    /// Left leg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_leg_kg: Option<f64>,
}

impl SegmentalAnalysis {
    fn validate(&self, prefix: &str, errors: &mut ValidationErrors) {
        errors.check_non_negative(&format!("{prefix}.rightArmKg"), self.right_arm_kg);
        errors.check_non_negative(&format!("{prefix}.leftArmKg"), self.left_arm_kg);
        errors.check_non_negative(&format!("{prefix}.trunkKg"), self.trunk_kg);
        errors.check_non_negative(&format!("{prefix}.rightLegKg"), self.right_leg_kg);
        errors.check_non_negative(&format!("{prefix}.leftLegKg"), self.left_leg_kg);
    }
}

/// `InBody` full body-composition analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InBodyReading {
    /// Total body water (L)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_body_water_l: Option<f64>,
    /// Protein (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_kg: Option<f64>,
    /// Minerals (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minerals_kg: Option<f64>,
    /// Body fat mass (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_mass_kg: Option<f64>,
    /// Skeletal muscle mass (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeletal_muscle_mass_kg: Option<f64>,
    /// Percent body fat
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
    /// Visceral fat level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visceral_fat_level: Option<f64>,
    /// Basal metabolic rate (kcal/day)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basal_metabolic_rate_kcal: Option<f64>,
    /// Device `InBody` score (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inbody_score: Option<f64>,
    /// Segmental lean mass
    #[serde(default)]
    pub segmental_lean: SegmentalAnalysis,
    /// Segmental fat mass
    #[serde(default)]
    pub segmental_fat: SegmentalAnalysis,
}

impl InBodyReading {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check_non_negative("totalBodyWaterL", self.total_body_water_l);
        errors.check_non_negative("proteinKg", self.protein_kg);
        errors.check_non_negative("mineralsKg", self.minerals_kg);
        errors.check_non_negative("bodyFatMassKg", self.body_fat_mass_kg);
        errors.check_non_negative("skeletalMuscleMassKg", self.skeletal_muscle_mass_kg);
        errors.check_range("bodyFatPercent", self.body_fat_percent, 0.0, MAX_BODY_FAT_PERCENT);
        errors.check_non_negative("visceralFatLevel", self.visceral_fat_level);
        errors.check_non_negative("basalMetabolicRateKcal", self.basal_metabolic_rate_kcal);
        errors.check_range("inbodyScore", self.inbody_score, 0.0, 100.0);
        self.segmental_lean.validate("segmentalLean", &mut errors);
        self.segmental_fat.validate("segmentalFat", &mut errors);
        errors.into_result()
    }
}
