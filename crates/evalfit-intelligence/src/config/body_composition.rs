// ABOUTME: Body composition formula constants with environment variable overrides
// ABOUTME: Sex-specific residual and ideal-weight fractions plus Von Döbeln coefficients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use evalfit_core::constants::body_composition::{
    IDEAL_LEAN_FRACTION_FEMALE, IDEAL_LEAN_FRACTION_MALE, RESIDUAL_FACTOR_FEMALE,
    RESIDUAL_FACTOR_MALE, VON_DOBELN_COEFFICIENT, VON_DOBELN_EXPONENT, VON_DOBELN_SCALE,
};
use evalfit_core::models::BiologicalSex;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

use super::error::ConfigError;

/// Global configuration singleton
static BODY_COMPOSITION_CONFIG: OnceLock<BodyCompositionConfig> = OnceLock::new();

/// Constants that depend on the client's sex coding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SexConstants {
    /// Fraction of body weight attributed to residual mass (organs, fluids)
    pub residual_factor: f64,
    /// Lean fraction of body weight considered ideal
    pub ideal_lean_fraction: f64,
}

/// Coefficients of `c * (h² * wrist * femur * scale)^exponent` (metres)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VonDobelnConfig {
    /// Leading coefficient
    pub coefficient: f64,
    /// Scale applied inside the power
    pub scale: f64,
    /// Power exponent
    pub exponent: f64,
}

/// Calculator configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyCompositionConfig {
    /// Constants for female-coded clients
    pub female: SexConstants,
    /// Constants for every other client
    pub male: SexConstants,
    /// Bone mass estimator
    pub von_dobeln: VonDobelnConfig,
}

impl Default for BodyCompositionConfig {
    fn default() -> Self {
        Self {
            female: SexConstants {
                residual_factor: RESIDUAL_FACTOR_FEMALE,
                ideal_lean_fraction: IDEAL_LEAN_FRACTION_FEMALE,
            },
            male: SexConstants {
                residual_factor: RESIDUAL_FACTOR_MALE,
                ideal_lean_fraction: IDEAL_LEAN_FRACTION_MALE,
            },
            von_dobeln: VonDobelnConfig {
                coefficient: VON_DOBELN_COEFFICIENT,
                scale: VON_DOBELN_SCALE,
                exponent: VON_DOBELN_EXPONENT,
            },
        }
    }
}

impl BodyCompositionConfig {
    /// Get the global configuration instance
    #[must_use]
    pub fn global() -> &'static Self {
        BODY_COMPOSITION_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load body composition config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load defaults, apply environment overrides, and validate
    ///
    /// # Errors
    ///
    /// Returns an error if an override does not parse or the result is out of range
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Constants for `sex`; only female-coded clients use the female set
    #[must_use]
    pub const fn for_sex(&self, sex: BiologicalSex) -> &SexConstants {
        if sex.is_female_coded() {
            &self.female
        } else {
            &self.male
        }
    }

    /// Check every constant is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` naming the first offending constant
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (constants, residual, ideal) in [
            (
                &self.female,
                "female residual_factor must be within (0, 1)",
                "female ideal_lean_fraction must be within (0, 1]",
            ),
            (
                &self.male,
                "male residual_factor must be within (0, 1)",
                "male ideal_lean_fraction must be within (0, 1]",
            ),
        ] {
            if !(constants.residual_factor > 0.0 && constants.residual_factor < 1.0) {
                return Err(ConfigError::InvalidRange(residual));
            }
            if !(constants.ideal_lean_fraction > 0.0 && constants.ideal_lean_fraction <= 1.0) {
                return Err(ConfigError::InvalidRange(ideal));
            }
        }

        let von_dobeln = &self.von_dobeln;
        if !(von_dobeln.coefficient > 0.0 && von_dobeln.scale > 0.0 && von_dobeln.exponent > 0.0)
        {
            return Err(ConfigError::InvalidRange(
                "Von Döbeln coefficients must be positive",
            ));
        }
        Ok(())
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "EVALFIT_RESIDUAL_FACTOR_FEMALE",
            &mut self.female.residual_factor,
        )?;
        Self::apply_env_var("EVALFIT_RESIDUAL_FACTOR_MALE", &mut self.male.residual_factor)?;
        Self::apply_env_var(
            "EVALFIT_IDEAL_LEAN_FRACTION_FEMALE",
            &mut self.female.ideal_lean_fraction,
        )?;
        Self::apply_env_var(
            "EVALFIT_IDEAL_LEAN_FRACTION_MALE",
            &mut self.male.ideal_lean_fraction,
        )?;
        Self::apply_env_var(
            "EVALFIT_VON_DOBELN_COEFFICIENT",
            &mut self.von_dobeln.coefficient,
        )?;
        Self::apply_env_var("EVALFIT_VON_DOBELN_SCALE", &mut self.von_dobeln.scale)?;
        Self::apply_env_var("EVALFIT_VON_DOBELN_EXPONENT", &mut self.von_dobeln.exponent)?;
        Ok(self)
    }
}
