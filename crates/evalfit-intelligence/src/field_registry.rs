// ABOUTME: Declared registry of comparable evaluation fields with units and improvement direction
// ABOUTME: General anthropometric fields plus the Omron and InBody device field sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Comparable field registry
//!
//! Every numeric field that can appear in a comparison table is declared here
//! once with its label, unit, and the direction in which a change counts as an
//! improvement. Fat-related fields improve when they decrease, muscle-related
//! fields improve when they increase, and everything else is neutral.

use evalfit_core::models::{Evaluation, InBodyReading, OmronReading, ScaleType};
use serde::{Serialize, Serializer};

/// Changes below this magnitude count as no change
const UNCHANGED_EPSILON: f64 = 1e-9;

/// Which direction of change is desirable for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementDirection {
    /// Lower is better
    Decrease,
    /// Higher is better
    Increase,
    /// No judgement
    Neutral,
}

/// Classification of one delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Moved in the desirable direction
    Improved,
    /// Moved in the undesirable direction
    Worsened,
    /// Did not move
    Unchanged,
    /// Moved, but the field has no desirable direction
    Neutral,
}

impl Trend {
    /// Arrow used in text tables
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Improved => "▲",
            Self::Worsened => "▼",
            Self::Unchanged => "=",
            Self::Neutral => "·",
        }
    }
}

impl ImprovementDirection {
    /// Classify `delta` (current - previous)
    #[must_use]
    pub fn classify(self, delta: f64) -> Trend {
        if delta.abs() < UNCHANGED_EPSILON {
            return Trend::Unchanged;
        }
        match self {
            Self::Neutral => Trend::Neutral,
            Self::Decrease if delta < 0.0 => Trend::Improved,
            Self::Increase if delta > 0.0 => Trend::Improved,
            Self::Decrease | Self::Increase => Trend::Worsened,
        }
    }
}

/// Identifier of a comparable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Body weight
    WeightKg,
    /// Standing height
    HeightCm,
    /// Waist circumference
    WaistCm,
    /// Hip circumference
    HipCm,
    /// Measured body fat
    BodyFatPercentage,
    /// Sum of recorded skinfolds
    SkinfoldSum,
    /// Omron body fat
    OmronBodyFatPercent,
    /// Omron skeletal muscle
    OmronSkeletalMusclePercent,
    /// Omron visceral fat
    OmronVisceralFatLevel,
    /// Omron resting metabolism
    OmronRestingMetabolism,
    /// Omron body age
    OmronBodyAge,
    /// Omron BMI
    OmronBmi,
    /// `InBody` total body water
    InBodyTotalBodyWater,
    /// `InBody` protein
    InBodyProtein,
    /// `InBody` minerals
    InBodyMinerals,
    /// `InBody` body fat mass
    InBodyBodyFatMass,
    /// `InBody` skeletal muscle mass
    InBodySkeletalMuscleMass,
    /// `InBody` body fat
    InBodyBodyFatPercent,
    /// `InBody` visceral fat
    InBodyVisceralFatLevel,
    /// `InBody` basal metabolic rate
    InBodyBasalMetabolicRate,
    /// `InBody` score
    InBodyScore,
}

impl FieldKey {
    /// Dotted wire key (device fields are prefixed with the scale type)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightKg => "weightKg",
            Self::HeightCm => "heightCm",
            Self::WaistCm => "waistCm",
            Self::HipCm => "hipCm",
            Self::BodyFatPercentage => "bodyFatPercentage",
            Self::SkinfoldSum => "skinfoldSum",
            Self::OmronBodyFatPercent => "omron.bodyFatPercent",
            Self::OmronSkeletalMusclePercent => "omron.skeletalMusclePercent",
            Self::OmronVisceralFatLevel => "omron.visceralFatLevel",
            Self::OmronRestingMetabolism => "omron.restingMetabolismKcal",
            Self::OmronBodyAge => "omron.bodyAgeYears",
            Self::OmronBmi => "omron.bmi",
            Self::InBodyTotalBodyWater => "inbody.totalBodyWaterL",
            Self::InBodyProtein => "inbody.proteinKg",
            Self::InBodyMinerals => "inbody.mineralsKg",
            Self::InBodyBodyFatMass => "inbody.bodyFatMassKg",
            Self::InBodySkeletalMuscleMass => "inbody.skeletalMuscleMassKg",
            Self::InBodyBodyFatPercent => "inbody.bodyFatPercent",
            Self::InBodyVisceralFatLevel => "inbody.visceralFatLevel",
            Self::InBodyBasalMetabolicRate => "inbody.basalMetabolicRateKcal",
            Self::InBodyScore => "inbody.inbodyScore",
        }
    }

    /// Read this field from an evaluation
    #[must_use]
    pub fn value(self, evaluation: &Evaluation) -> Option<f64> {
        let omron = || evaluation.bioimpedance.as_ref().and_then(|b| b.as_omron());
        let inbody = || evaluation.bioimpedance.as_ref().and_then(|b| b.as_inbody());
        let omron_field = |f: fn(&OmronReading) -> Option<f64>| omron().and_then(f);
        let inbody_field = |f: fn(&InBodyReading) -> Option<f64>| inbody().and_then(f);

        match self {
            Self::WeightKg => evaluation.measurements.weight_kg,
            Self::HeightCm => evaluation.measurements.height_cm,
            Self::WaistCm => evaluation.measurements.waist_cm,
            Self::HipCm => evaluation.measurements.hip_cm,
            Self::BodyFatPercentage => evaluation.body_fat_percentage,
            Self::SkinfoldSum => evaluation.skinfold_sum(),
            Self::OmronBodyFatPercent => omron_field(|r| r.body_fat_percent),
            Self::OmronSkeletalMusclePercent => omron_field(|r| r.skeletal_muscle_percent),
            Self::OmronVisceralFatLevel => omron_field(|r| r.visceral_fat_level),
            Self::OmronRestingMetabolism => omron_field(|r| r.resting_metabolism_kcal),
            Self::OmronBodyAge => omron_field(|r| r.body_age_years),
            Self::OmronBmi => omron_field(|r| r.bmi),
            Self::InBodyTotalBodyWater => inbody_field(|r| r.total_body_water_l),
            Self::InBodyProtein => inbody_field(|r| r.protein_kg),
            Self::InBodyMinerals => inbody_field(|r| r.minerals_kg),
            Self::InBodyBodyFatMass => inbody_field(|r| r.body_fat_mass_kg),
            Self::InBodySkeletalMuscleMass => inbody_field(|r| r.skeletal_muscle_mass_kg),
            Self::InBodyBodyFatPercent => inbody_field(|r| r.body_fat_percent),
            Self::InBodyVisceralFatLevel => inbody_field(|r| r.visceral_fat_level),
            Self::InBodyBasalMetabolicRate => inbody_field(|r| r.basal_metabolic_rate_kcal),
            Self::InBodyScore => inbody_field(|r| r.inbody_score),
        }
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Declaration of one comparable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    /// Field identifier
    pub key: FieldKey,
    /// Display label
    pub label: &'static str,
    /// Display unit
    pub unit: &'static str,
    /// Desirable direction of change
    pub improvement_direction: ImprovementDirection,
}

const fn spec(
    key: FieldKey,
    label: &'static str,
    unit: &'static str,
    improvement_direction: ImprovementDirection,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        unit,
        improvement_direction,
    }
}

use ImprovementDirection::{Decrease, Increase, Neutral};

/// Anthropometric fields shown in every comparison
pub const GENERAL_FIELDS: &[FieldSpec] = &[
    spec(FieldKey::WeightKg, "Weight", "kg", Neutral),
    spec(FieldKey::HeightCm, "Height", "cm", Neutral),
    spec(FieldKey::WaistCm, "Waist", "cm", Neutral),
    spec(FieldKey::HipCm, "Hip", "cm", Neutral),
    spec(FieldKey::BodyFatPercentage, "Body fat", "%", Decrease),
    spec(FieldKey::SkinfoldSum, "Skinfold sum", "mm", Neutral),
];

/// Omron home-scale fields
pub const OMRON_FIELDS: &[FieldSpec] = &[
    spec(FieldKey::OmronBodyFatPercent, "Body fat", "%", Decrease),
    spec(
        FieldKey::OmronSkeletalMusclePercent,
        "Skeletal muscle",
        "%",
        Increase,
    ),
    spec(FieldKey::OmronVisceralFatLevel, "Visceral fat", "level", Decrease),
    spec(FieldKey::OmronRestingMetabolism, "Resting metabolism", "kcal", Neutral),
    spec(FieldKey::OmronBodyAge, "Body age", "years", Neutral),
    spec(FieldKey::OmronBmi, "BMI", "kg/m²", Neutral),
];

/// `InBody` analyser fields
pub const INBODY_FIELDS: &[FieldSpec] = &[
    spec(FieldKey::InBodyTotalBodyWater, "Total body water", "L", Neutral),
    spec(FieldKey::InBodyProtein, "Protein", "kg", Neutral),
    spec(FieldKey::InBodyMinerals, "Minerals", "kg", Neutral),
    spec(FieldKey::InBodyBodyFatMass, "Body fat mass", "kg", Decrease),
    spec(
        FieldKey::InBodySkeletalMuscleMass,
        "Skeletal muscle mass",
        "kg",
        Increase,
    ),
    spec(FieldKey::InBodyBodyFatPercent, "Body fat", "%", Decrease),
    spec(FieldKey::InBodyVisceralFatLevel, "Visceral fat", "level", Decrease),
    spec(
        FieldKey::InBodyBasalMetabolicRate,
        "Basal metabolic rate",
        "kcal",
        Neutral,
    ),
    spec(FieldKey::InBodyScore, "InBody score", "pts", Neutral),
];

/// Device-specific field set
#[must_use]
pub const fn device_fields(scale: ScaleType) -> &'static [FieldSpec] {
    match scale {
        ScaleType::Omron => OMRON_FIELDS,
        ScaleType::InBody => INBODY_FIELDS,
    }
}

/// General fields followed by the device set for `scale`, if any
#[must_use]
pub fn fields_for_scale(scale: Option<ScaleType>) -> Vec<FieldSpec> {
    let mut fields = GENERAL_FIELDS.to_vec();
    if let Some(scale) = scale {
        fields.extend_from_slice(device_fields(scale));
    }
    fields
}

/// Find the declaration for `key`
#[must_use]
pub fn lookup(key: &str) -> Option<&'static FieldSpec> {
    GENERAL_FIELDS
        .iter()
        .chain(OMRON_FIELDS)
        .chain(INBODY_FIELDS)
        .find(|spec| spec.key.as_str() == key)
}
