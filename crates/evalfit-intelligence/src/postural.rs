// ABOUTME: Postural summary across selected evaluations
// ABOUTME: Per-view deviation counts plus resolved, new, and persisting deviations between evaluations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use evalfit_core::models::{Evaluation, EvaluationId, PosturalDeviation, PosturalView};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A deviation tagged with the view it was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDeviation {
    /// View
    pub view: PosturalView,
    /// Deviation
    pub deviation: PosturalDeviation,
}

impl ViewDeviation {
    /// "View: deviation" label
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.view.label(), self.deviation.label())
    }
}

/// Deviation counts for one evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosturalSnapshot {
    /// Evaluation
    pub evaluation_id: EvaluationId,
    /// Its date
    pub date: NaiveDate,
    /// Whether a postural assessment was recorded at all
    pub assessed: bool,
    /// Deviation count per view (every view listed, zero included)
    pub counts_by_view: BTreeMap<PosturalView, usize>,
    /// Total deviations
    pub total: usize,
}

/// What changed between two adjacent selected evaluations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosturalChange {
    /// Earlier evaluation
    pub from: EvaluationId,
    /// Later evaluation
    pub to: EvaluationId,
    /// Date of the earlier evaluation
    pub from_date: NaiveDate,
    /// Date of the later evaluation
    pub to_date: NaiveDate,
    /// Present before, gone now
    pub resolved: Vec<ViewDeviation>,
    /// Absent before, present now
    pub new: Vec<ViewDeviation>,
    /// Present in both
    pub persisting: Vec<ViewDeviation>,
}

/// Postural progression across the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosturalSummary {
    /// One per evaluation, oldest first
    pub snapshots: Vec<PosturalSnapshot>,
    /// One per adjacent pair where both sides were assessed
    pub changes: Vec<PosturalChange>,
}

fn deviation_set(evaluation: &Evaluation) -> Option<BTreeSet<ViewDeviation>> {
    evaluation.postural.as_ref().map(|p| {
        p.all_deviations()
            .into_iter()
            .map(|(view, deviation)| ViewDeviation { view, deviation })
            .collect()
    })
}

/// Summarise evaluations already ordered oldest first
#[must_use]
pub fn summarize_postural(ascending: &[&Evaluation]) -> PosturalSummary {
    let snapshots = ascending
        .iter()
        .map(|evaluation| {
            let counts_by_view: BTreeMap<PosturalView, usize> = PosturalView::ALL
                .iter()
                .map(|view| {
                    let count = evaluation
                        .postural
                        .as_ref()
                        .map_or(0, |p| p.deviations_for(*view).count());
                    (*view, count)
                })
                .collect();
            PosturalSnapshot {
                evaluation_id: evaluation.id,
                date: evaluation.date,
                assessed: evaluation.postural.is_some(),
                total: counts_by_view.values().sum(),
                counts_by_view,
            }
        })
        .collect();

    // A pair with an unassessed side has nothing to compare
    let sets: Vec<Option<BTreeSet<ViewDeviation>>> =
        ascending.iter().map(|e| deviation_set(e)).collect();
    let changes = ascending
        .windows(2)
        .zip(sets.windows(2))
        .filter_map(|(pair, set_pair)| {
            let (before, after) = (set_pair[0].as_ref()?, set_pair[1].as_ref()?);
            Some(PosturalChange {
                from: pair[0].id,
                to: pair[1].id,
                from_date: pair[0].date,
                to_date: pair[1].date,
                resolved: before.difference(after).copied().collect(),
                new: after.difference(before).copied().collect(),
                persisting: before.intersection(after).copied().collect(),
            })
        })
        .collect();

    PosturalSummary { snapshots, changes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evalfit_core::models::{ClientId, PosturalAssessment};

    fn assessed(day: u32, marks: &[(PosturalView, PosturalDeviation)]) -> Evaluation {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let mut evaluation = Evaluation::blank(ClientId::new(), date);
        let mut assessment = PosturalAssessment::default();
        for (view, deviation) in marks {
            assessment.mark(*view, *deviation);
        }
        evaluation.postural = Some(assessment);
        evaluation
    }

    #[test]
    fn test_changes_between_adjacent_evaluations() {
        let first = assessed(
            1,
            &[
                (PosturalView::LeftLateral, PosturalDeviation::ForwardHead),
                (PosturalView::Anterior, PosturalDeviation::GenuValgum),
            ],
        );
        let second = assessed(
            20,
            &[
                (PosturalView::LeftLateral, PosturalDeviation::ForwardHead),
                (PosturalView::Posterior, PosturalDeviation::Scoliosis),
            ],
        );
        let summary = summarize_postural(&[&first, &second]);

        assert_eq!(summary.snapshots[0].total, 2);
        assert_eq!(summary.snapshots[1].counts_by_view[&PosturalView::Posterior], 1);
        let change = &summary.changes[0];
        assert_eq!(change.resolved[0].deviation, PosturalDeviation::GenuValgum);
        assert_eq!(change.new[0].deviation, PosturalDeviation::Scoliosis);
        assert_eq!(change.persisting[0].deviation, PosturalDeviation::ForwardHead);
    }

    #[test]
    fn test_unassessed_evaluation_counts_zero() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let evaluation = Evaluation::blank(ClientId::new(), date);
        let summary = summarize_postural(&[&evaluation]);
        assert!(!summary.snapshots[0].assessed);
        assert_eq!(summary.snapshots[0].total, 0);
        assert!(summary.changes.is_empty());
    }

    #[test]
    fn test_unassessed_side_yields_no_change() {
        let first = assessed(
            1,
            &[
                (PosturalView::LeftLateral, PosturalDeviation::ForwardHead),
                (PosturalView::Anterior, PosturalDeviation::GenuValgum),
            ],
        );
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let skipped = Evaluation::blank(ClientId::new(), date);
        let third = assessed(
            30,
            &[(PosturalView::LeftLateral, PosturalDeviation::ForwardHead)],
        );

        let summary = summarize_postural(&[&first, &skipped]);
        assert!(!summary.snapshots[1].assessed);
        assert!(summary.changes.is_empty());

        let summary = summarize_postural(&[&first, &skipped, &third]);
        assert_eq!(summary.snapshots.len(), 3);
        assert!(summary.changes.is_empty());
    }
}
