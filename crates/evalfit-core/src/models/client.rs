// ABOUTME: Client identity and demographic models
// ABOUTME: ClientId newtype, BiologicalSex coding, and the Client record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::validation::ValidationErrors;
use crate::constants::validation::{MAX_AGE_YEARS, MAX_HEIGHT_CM, MIN_HEIGHT_CM};

/// Unique client identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ClientId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Biological sex category used to pick sex-specific formula constants
///
/// Only `Female` selects the female constants; every other value falls back
/// to the male constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    /// Female-coded client
    #[serde(alias = "F", alias = "f")]
    Female,
    /// Male-coded client
    #[serde(alias = "M", alias = "m")]
    Male,
    /// Not recorded
    #[default]
    Unspecified,
}

impl BiologicalSex {
    /// Whether the female formula constants apply
    #[must_use]
    pub const fn is_female_coded(self) -> bool {
        matches!(self, Self::Female)
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Female => write!(f, "female"),
            Self::Male => write!(f, "male"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

/// A trainee whose evaluations are tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier
    pub id: ClientId,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Biological sex coding
    pub sex: BiologicalSex,
    /// Standing height (cm)
    pub height_cm: f64,
}

impl Client {
    /// Create a client with a fresh identifier
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32, sex: BiologicalSex, height_cm: f64) -> Self {
        Self {
            id: ClientId::new(),
            name: name.into(),
            age,
            sex,
            height_cm,
        }
    }

    /// Validate demographic fields
    ///
    /// # Errors
    ///
    /// Returns the field-level messages for every invalid attribute
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }
        if self.age > MAX_AGE_YEARS {
            errors.push("age", format!("Age must be at most {MAX_AGE_YEARS} years"));
        }
        errors.check_range("heightCm", Some(self.height_cm), MIN_HEIGHT_CM, MAX_HEIGHT_CM);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_female_is_female_coded() {
        assert!(BiologicalSex::Female.is_female_coded());
        assert!(!BiologicalSex::Male.is_female_coded());
        assert!(!BiologicalSex::Unspecified.is_female_coded());
    }

    #[test]
    fn test_sex_accepts_short_codes() {
        let sex: BiologicalSex = serde_json::from_str("\"F\"").unwrap();
        assert_eq!(sex, BiologicalSex::Female);
        let sex: BiologicalSex = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(sex, BiologicalSex::Male);
    }

    #[test]
    fn test_client_validation_reports_each_field() {
        let client = Client::new("  ", 150, BiologicalSex::Male, 20.0);
        let errors = client.validate().unwrap_err();
        let fields: Vec<&str> = errors.fields().collect();
        assert_eq!(fields, vec!["name", "age", "heightCm"]);
    }
}
