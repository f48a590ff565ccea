// ABOUTME: Field-level validation messages collected from evaluation forms
// ABOUTME: ValidationErrors accumulates per-field messages and converts into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::AppError;

/// A single rejected field with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field (camelCase, dotted for nested fields)
    pub field: String,
    /// Message shown next to the field
    pub message: String,
}

/// Collection of field-level validation failures
///
/// Validation never stops at the first failure so that a form can highlight
/// every invalid field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Record a failure for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Record a failure when `value` is present but outside `[min, max]`
    pub fn check_range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(value) = value {
            if !value.is_finite() || value < min || value > max {
                self.push(field, format!("Must be between {min} and {max}"));
            }
        }
    }

    /// Record a failure when `value` is present but negative or not finite
    pub fn check_non_negative(&mut self, field: &str, value: Option<f64>) {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                self.push(field, "Must be a non-negative number");
            }
        }
    }

    /// Merge another set of failures, prefixing their field names
    pub fn extend_prefixed(&mut self, prefix: &str, other: Self) {
        for error in other.errors {
            self.errors.push(FieldError {
                field: format!("{prefix}.{}", error.field),
                message: error.message,
            });
        }
    }

    /// Whether no failures were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failures
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate rejected field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    /// All recorded failures
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one failure was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::json!({ "fields": errors.errors });
        Self::invalid_input(format!("Validation failed: {errors}")).with_details(details)
    }
}
