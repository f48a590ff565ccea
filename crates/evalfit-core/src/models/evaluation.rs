// ABOUTME: Evaluation record model with body measurements, skinfolds, and bone diameters
// ABOUTME: A dated snapshot of one client's physical measurements and device readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::bioimpedance::Bioimpedance;
use super::client::ClientId;
use super::postural::PosturalAssessment;
use super::validation::ValidationErrors;
use crate::constants::validation::{
    MAX_BODY_FAT_PERCENT, MAX_BONE_DIAMETER_CM, MAX_CIRCUMFERENCE_CM, MAX_HEIGHT_CM,
    MAX_SKINFOLD_MM, MAX_WEIGHT_KG, MIN_CIRCUMFERENCE_CM, MIN_HEIGHT_CM,
};

/// Unique evaluation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(Uuid);

impl EvaluationId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EvaluationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Basic anthropometric measurements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurements {
    /// Body weight (kg)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Standing height (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Waist circumference (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<f64>,
    /// Hip circumference (cm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hip_cm: Option<f64>,
}

impl BodyMeasurements {
    /// Validate measurement ranges
    ///
    /// # Errors
    ///
    /// Returns the field-level messages for every out-of-range measurement
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check_range("weightKg", self.weight_kg, 0.0, MAX_WEIGHT_KG);
        errors.check_range("heightCm", self.height_cm, MIN_HEIGHT_CM, MAX_HEIGHT_CM);
        errors.check_range(
            "waistCm",
            self.waist_cm,
            MIN_CIRCUMFERENCE_CM,
            MAX_CIRCUMFERENCE_CM,
        );
        errors.check_range(
            "hipCm",
            self.hip_cm,
            MIN_CIRCUMFERENCE_CM,
            MAX_CIRCUMFERENCE_CM,
        );
        errors.into_result()
    }
}

/// Anatomical sites for caliper skinfold measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkinfoldSite {
    /// Pectoral (diagonal fold)
    Chest,
    /// Midaxillary line (vertical fold)
    Midaxillary,
    /// Posterior upper arm (vertical fold)
    Triceps,
    /// Below the inferior angle of the scapula (diagonal fold)
    Subscapular,
    /// Beside the umbilicus (vertical fold)
    Abdominal,
    /// Above the iliac crest (diagonal fold)
    Suprailiac,
    /// Anterior midline of the thigh (vertical fold)
    Thigh,
}

impl SkinfoldSite {
    /// Every site, in protocol order
    pub const ALL: [Self; 7] = [
        Self::Chest,
        Self::Midaxillary,
        Self::Triceps,
        Self::Subscapular,
        Self::Abdominal,
        Self::Suprailiac,
        Self::Thigh,
    ];

    /// Wire key used in JSON and field registries
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Midaxillary => "midaxillary",
            Self::Triceps => "triceps",
            Self::Subscapular => "subscapular",
            Self::Abdominal => "abdominal",
            Self::Suprailiac => "suprailiac",
            Self::Thigh => "thigh",
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Midaxillary => "Midaxillary",
            Self::Triceps => "Triceps",
            Self::Subscapular => "Subscapular",
            Self::Abdominal => "Abdominal",
            Self::Suprailiac => "Suprailiac",
            Self::Thigh => "Thigh",
        }
    }
}

/// Bone breadths used by the Von Döbeln bone-mass estimator (cm)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoneDiameters {
    /// Bistyloid (wrist) diameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrist_cm: Option<f64>,
    /// Bicondylar femur diameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub femur_cm: Option<f64>,
    /// Bicondylar humerus diameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humerus_cm: Option<f64>,
}

impl BoneDiameters {
    /// Validate diameter ranges
    ///
    /// # Errors
    ///
    /// Returns the field-level messages for every out-of-range diameter
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check_range("wristCm", self.wrist_cm, 0.0, MAX_BONE_DIAMETER_CM);
        errors.check_range("femurCm", self.femur_cm, 0.0, MAX_BONE_DIAMETER_CM);
        errors.check_range("humerusCm", self.humerus_cm, 0.0, MAX_BONE_DIAMETER_CM);
        errors.into_result()
    }
}

/// A dated snapshot of a client's physical measurements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Unique identifier
    pub id: EvaluationId,
    /// Owning client
    pub client_id: ClientId,
    /// Calendar day of the evaluation (at most one per client per day)
    pub date: NaiveDate,
    /// Anthropometric measurements
    #[serde(default)]
    pub measurements: BodyMeasurements,
    /// Directly measured body-fat percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    /// Caliper readings (mm) keyed by site
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skinfolds: BTreeMap<SkinfoldSite, f64>,
    /// Bone diameters (cm)
    #[serde(default)]
    pub bone_diameters: BoneDiameters,
    /// Device reading, tagged by `scaleType`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioimpedance: Option<Bioimpedance>,
    /// Postural photos and deviation selections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postural: Option<PosturalAssessment>,
    /// Trainer notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last in-place edit
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Build an empty evaluation for `client_id` on `date`
    #[must_use]
    pub fn blank(client_id: ClientId, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: EvaluationId::new(),
            client_id,
            date,
            measurements: BodyMeasurements::default(),
            body_fat_percentage: None,
            skinfolds: BTreeMap::new(),
            bone_diameters: BoneDiameters::default(),
            bioimpedance: None,
            postural: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Body weight if recorded
    #[must_use]
    pub const fn weight_kg(&self) -> Option<f64> {
        self.measurements.weight_kg
    }

    /// Caliper reading for `site` if recorded
    #[must_use]
    pub fn skinfold(&self, site: SkinfoldSite) -> Option<f64> {
        self.skinfolds.get(&site).copied()
    }

    /// Sum of every recorded skinfold (mm), `None` when none were taken
    #[must_use]
    pub fn skinfold_sum(&self) -> Option<f64> {
        if self.skinfolds.is_empty() {
            None
        } else {
            Some(self.skinfolds.values().sum())
        }
    }

    /// Mark the record as edited now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate every populated section
    ///
    /// # Errors
    ///
    /// Returns field-level messages (dotted by section) for every invalid value
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Err(e) = self.measurements.validate() {
            errors.extend_prefixed("measurements", e);
        }
        errors.check_range(
            "bodyFatPercentage",
            self.body_fat_percentage,
            0.0,
            MAX_BODY_FAT_PERCENT,
        );
        if let Err(e) = validate_skinfolds(&self.skinfolds) {
            errors.extend_prefixed("skinfolds", e);
        }
        if let Err(e) = self.bone_diameters.validate() {
            errors.extend_prefixed("boneDiameters", e);
        }
        if let Some(bioimpedance) = &self.bioimpedance {
            if let Err(e) = bioimpedance.validate() {
                errors.extend_prefixed("bioimpedance", e);
            }
        }
        errors.into_result()
    }
}

/// Validate caliper readings
///
/// # Errors
///
/// Returns one message per out-of-range site
pub fn validate_skinfolds(skinfolds: &BTreeMap<SkinfoldSite, f64>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    for (site, value) in skinfolds {
        errors.check_range(site.key(), Some(*value), 0.0, MAX_SKINFOLD_MM);
    }
    errors.into_result()
}
