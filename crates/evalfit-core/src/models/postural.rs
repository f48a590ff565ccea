// ABOUTME: Postural assessment models with per-view photos and categorical deviations
// ABOUTME: PosturalView, PosturalDeviation catalogue, and the PosturalAssessment record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Body view a photo or deviation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PosturalView {
    /// Front view
    Anterior,
    /// Back view
    Posterior,
    /// Left side view
    LeftLateral,
    /// Right side view
    RightLateral,
}

impl PosturalView {
    /// Every view in capture order
    pub const ALL: [Self; 4] = [
        Self::Anterior,
        Self::Posterior,
        Self::LeftLateral,
        Self::RightLateral,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Anterior => "Anterior",
            Self::Posterior => "Posterior",
            Self::LeftLateral => "Left lateral",
            Self::RightLateral => "Right lateral",
        }
    }
}

/// Categorical postural deviation observed during a visual assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PosturalDeviation {
    /// Head projected forward of the shoulders
    ForwardHead,
    /// Head tilted to one side
    HeadTilt,
    /// Left shoulder higher than right
    LeftShoulderElevated,
    /// Right shoulder higher than left
    RightShoulderElevated,
    /// Rounded (protracted) shoulders
    ProtractedShoulders,
    /// Scapular winging
    WingedScapula,
    /// Increased thoracic curvature
    ThoracicHyperkyphosis,
    /// Increased lumbar curvature
    LumbarHyperlordosis,
    /// Flattened lumbar curvature
    LumbarRectification,
    /// Lateral spinal deviation
    Scoliosis,
    /// Anterior pelvic tilt
    PelvicAnteversion,
    /// Posterior pelvic tilt
    PelvicRetroversion,
    /// One iliac crest higher than the other
    PelvicObliquity,
    /// Knees collapsing inward
    GenuValgum,
    /// Knees bowing outward
    GenuVarum,
    /// Knees hyperextended
    GenuRecurvatum,
    /// Collapsed medial arch
    FlatFoot,
    /// Exaggerated medial arch
    CavusFoot,
}

impl PosturalDeviation {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ForwardHead => "Forward head",
            Self::HeadTilt => "Head tilt",
            Self::LeftShoulderElevated => "Left shoulder elevated",
            Self::RightShoulderElevated => "Right shoulder elevated",
            Self::ProtractedShoulders => "Protracted shoulders",
            Self::WingedScapula => "Winged scapula",
            Self::ThoracicHyperkyphosis => "Thoracic hyperkyphosis",
            Self::LumbarHyperlordosis => "Lumbar hyperlordosis",
            Self::LumbarRectification => "Lumbar rectification",
            Self::Scoliosis => "Scoliosis",
            Self::PelvicAnteversion => "Pelvic anteversion",
            Self::PelvicRetroversion => "Pelvic retroversion",
            Self::PelvicObliquity => "Pelvic obliquity",
            Self::GenuValgum => "Genu valgum",
            Self::GenuVarum => "Genu varum",
            Self::GenuRecurvatum => "Genu recurvatum",
            Self::FlatFoot => "Flat foot",
            Self::CavusFoot => "Cavus foot",
        }
    }
}

/// Reference to a captured postural photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosturalPhoto {
    /// Where the image lives (data URI, object key, or path)
    pub uri: String,
    /// When the photo was taken
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

/// Visual posture assessment attached to an evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosturalAssessment {
    /// Photo per view
    #[serde(default)]
    pub photos: BTreeMap<PosturalView, PosturalPhoto>,
    /// Selected deviations per view
    #[serde(default)]
    pub deviations: BTreeMap<PosturalView, BTreeSet<PosturalDeviation>>,
    /// Trainer observations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

impl PosturalAssessment {
    /// Add a deviation under `view`; returns false when already present
    pub fn mark(&mut self, view: PosturalView, deviation: PosturalDeviation) -> bool {
        self.deviations.entry(view).or_default().insert(deviation)
    }

    /// Remove a deviation under `view`; returns false when it was not present
    pub fn unmark(&mut self, view: PosturalView, deviation: PosturalDeviation) -> bool {
        let Some(set) = self.deviations.get_mut(&view) else {
            return false;
        };
        let removed = set.remove(&deviation);
        if set.is_empty() {
            self.deviations.remove(&view);
        }
        removed
    }

    /// Deviations selected for `view`
    pub fn deviations_for(&self, view: PosturalView) -> impl Iterator<Item = PosturalDeviation> + '_ {
        self.deviations
            .get(&view)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Every (view, deviation) pair
    #[must_use]
    pub fn all_deviations(&self) -> BTreeSet<(PosturalView, PosturalDeviation)> {
        self.deviations
            .iter()
            .flat_map(|(view, set)| set.iter().map(move |d| (*view, *d)))
            .collect()
    }

    /// Number of selected deviations across all views
    #[must_use]
    pub fn total_deviations(&self) -> usize {
        self.deviations.values().map(BTreeSet::len).sum()
    }

    /// Views that have a photo
    pub fn captured_views(&self) -> impl Iterator<Item = PosturalView> + '_ {
        self.photos.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_unmark() {
        let mut assessment = PosturalAssessment::default();
        assert!(assessment.mark(PosturalView::Anterior, PosturalDeviation::HeadTilt));
        assert!(!assessment.mark(PosturalView::Anterior, PosturalDeviation::HeadTilt));
        assert!(assessment.mark(PosturalView::LeftLateral, PosturalDeviation::ForwardHead));
        assert_eq!(assessment.total_deviations(), 2);

        assert!(assessment.unmark(PosturalView::Anterior, PosturalDeviation::HeadTilt));
        assert!(!assessment.unmark(PosturalView::Anterior, PosturalDeviation::HeadTilt));
        assert!(!assessment.deviations.contains_key(&PosturalView::Anterior));
        assert_eq!(
            assessment
                .deviations_for(PosturalView::LeftLateral)
                .collect::<Vec<_>>(),
            vec![PosturalDeviation::ForwardHead]
        );
    }

    #[test]
    fn test_views_serialize_as_map_keys() {
        let mut assessment = PosturalAssessment::default();
        assessment.mark(PosturalView::RightLateral, PosturalDeviation::GenuRecurvatum);
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["deviations"]["rightLateral"][0], "genuRecurvatum");
    }
}
