// ABOUTME: Skinfold body-fat estimation with Jackson-Pollock density equations
// ABOUTME: 3-site and 7-site protocols with the Siri density to body-fat conversion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use evalfit_core::constants::skinfolds::{SIRI_NUMERATOR, SIRI_OFFSET};
use evalfit_core::errors::{AppError, AppResult};
use evalfit_core::models::{BiologicalSex, SkinfoldSite};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caliper protocol used to estimate body density
///
/// - `JacksonPollock3`: chest, abdominal, thigh (men); triceps, suprailiac, thigh (women)
/// - `JacksonPollock7`: all seven sites for both sexes
///
/// Body density equations (S = sum of sites in mm, A = age in years):
///
/// | Protocol | Sex | Density |
/// |----------|-----|---------|
/// | 3-site | male | `1.10938 - 0.0008267 S + 0.0000016 S² - 0.0002574 A` |
/// | 3-site | female | `1.0994921 - 0.0009929 S + 0.0000023 S² - 0.0001392 A` |
/// | 7-site | male | `1.112 - 0.00043499 S + 0.00000055 S² - 0.00028826 A` |
/// | 7-site | female | `1.097 - 0.00046971 S + 0.00000056 S² - 0.00012828 A` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinfoldProtocol {
    /// Jackson-Pollock three-site
    JacksonPollock3,
    /// Jackson-Pollock seven-site
    JacksonPollock7,
}

const MALE_3_SITES: [SkinfoldSite; 3] = [
    SkinfoldSite::Chest,
    SkinfoldSite::Abdominal,
    SkinfoldSite::Thigh,
];
const FEMALE_3_SITES: [SkinfoldSite; 3] = [
    SkinfoldSite::Triceps,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Thigh,
];

/// (intercept, linear, quadratic, age) coefficients
type DensityCoefficients = (f64, f64, f64, f64);

impl SkinfoldProtocol {
    /// Sites this protocol needs for `sex`
    #[must_use]
    pub fn required_sites(self, sex: BiologicalSex) -> &'static [SkinfoldSite] {
        match (self, sex.is_female_coded()) {
            (Self::JacksonPollock3, true) => &FEMALE_3_SITES,
            (Self::JacksonPollock3, false) => &MALE_3_SITES,
            (Self::JacksonPollock7, _) => &SkinfoldSite::ALL,
        }
    }

    const fn coefficients(self, sex: BiologicalSex) -> DensityCoefficients {
        match (self, sex.is_female_coded()) {
            (Self::JacksonPollock3, false) => (1.109_38, 0.000_826_7, 0.000_001_6, 0.000_257_4),
            (Self::JacksonPollock3, true) => (1.099_492_1, 0.000_992_9, 0.000_002_3, 0.000_139_2),
            (Self::JacksonPollock7, false) => (1.112, 0.000_434_99, 0.000_000_55, 0.000_288_26),
            (Self::JacksonPollock7, true) => (1.097, 0.000_469_71, 0.000_000_56, 0.000_128_28),
        }
    }

    /// Most complete protocol the recorded sites allow, if any
    #[must_use]
    pub fn best_available(
        skinfolds: &BTreeMap<SkinfoldSite, f64>,
        sex: BiologicalSex,
    ) -> Option<Self> {
        [Self::JacksonPollock7, Self::JacksonPollock3]
            .into_iter()
            .find(|protocol| {
                protocol
                    .required_sites(sex)
                    .iter()
                    .all(|site| skinfolds.contains_key(site))
            })
    }
}

/// Estimated body fat from a skinfold protocol
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinfoldEstimate {
    /// Protocol used
    pub protocol: SkinfoldProtocol,
    /// Sum of the protocol's sites (mm)
    pub sum_mm: f64,
    /// Body density (g/cm³)
    pub body_density: f64,
    /// Siri body fat (%), floored at 0
    pub body_fat_percentage: f64,
}

/// Siri conversion from body density to body-fat percentage
#[must_use]
pub fn siri_body_fat(body_density: f64) -> f64 {
    SIRI_NUMERATOR / body_density - SIRI_OFFSET
}

/// Estimate body fat from caliper readings
///
/// # Errors
///
/// Returns `MissingRequiredField` naming the first absent site, or
/// `InvalidInput` when the resulting density is not positive
pub fn estimate_body_fat_from_skinfolds(
    skinfolds: &BTreeMap<SkinfoldSite, f64>,
    sex: BiologicalSex,
    age_years: u32,
    protocol: SkinfoldProtocol,
) -> AppResult<SkinfoldEstimate> {
    let mut sum_mm = 0.0;
    for site in protocol.required_sites(sex) {
        let value = skinfolds
            .get(site)
            .ok_or_else(|| AppError::missing_field(format!("skinfolds.{}", site.key())))?;
        sum_mm += value;
    }

    let (intercept, linear, quadratic, age_coefficient) = protocol.coefficients(sex);
    let body_density = intercept - linear * sum_mm + quadratic * sum_mm * sum_mm
        - age_coefficient * f64::from(age_years);
    if !(body_density.is_finite() && body_density > 0.0) {
        return Err(AppError::invalid_input(format!(
            "Skinfold sum {sum_mm} mm yields a non-physical body density"
        )));
    }

    Ok(SkinfoldEstimate {
        protocol,
        sum_mm,
        body_density,
        body_fat_percentage: siri_body_fat(body_density).max(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalfit_core::errors::ErrorCode;

    fn sites(values: &[(SkinfoldSite, f64)]) -> BTreeMap<SkinfoldSite, f64> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_male_three_site() {
        let folds = sites(&[
            (SkinfoldSite::Chest, 10.0),
            (SkinfoldSite::Abdominal, 20.0),
            (SkinfoldSite::Thigh, 15.0),
        ]);
        let estimate = estimate_body_fat_from_skinfolds(
            &folds,
            BiologicalSex::Male,
            30,
            SkinfoldProtocol::JacksonPollock3,
        )
        .unwrap();
        // 1.10938 - 0.0008267*45 + 0.0000016*2025 - 0.0002574*30
        let expected_density = 1.10938 - 0.037_201_5 + 0.003_24 - 0.007_722;
        assert!((estimate.body_density - expected_density).abs() < 1e-9);
        assert!((estimate.body_fat_percentage - (495.0 / expected_density - 450.0)).abs() < 1e-6);
    }

    #[test]
    fn test_missing_site_is_named() {
        let folds = sites(&[(SkinfoldSite::Triceps, 12.0)]);
        let error = estimate_body_fat_from_skinfolds(
            &folds,
            BiologicalSex::Female,
            25,
            SkinfoldProtocol::JacksonPollock3,
        )
        .unwrap_err();
        assert_eq!(error.code, ErrorCode::MissingRequiredField);
        assert!(error.message.contains("skinfolds.suprailiac"));
    }

    #[test]
    fn test_best_available_prefers_seven_sites() {
        let all: BTreeMap<_, _> = SkinfoldSite::ALL.iter().map(|s| (*s, 10.0)).collect();
        assert_eq!(
            SkinfoldProtocol::best_available(&all, BiologicalSex::Male),
            Some(SkinfoldProtocol::JacksonPollock7)
        );
        let female_three = sites(&[
            (SkinfoldSite::Triceps, 10.0),
            (SkinfoldSite::Suprailiac, 10.0),
            (SkinfoldSite::Thigh, 10.0),
        ]);
        assert_eq!(
            SkinfoldProtocol::best_available(&female_three, BiologicalSex::Female),
            Some(SkinfoldProtocol::JacksonPollock3)
        );
        assert_eq!(
            SkinfoldProtocol::best_available(&female_three, BiologicalSex::Male),
            None
        );
    }
}
