// ABOUTME: Integration tests for evaluation selection and comparison tables
// ABOUTME: Covers selection caps, ascending ordering, adjacent deltas, and trend classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use evalfit::errors::ErrorCode;
use evalfit::intelligence::{
    ComparisonState, ComparisonView, SelectionOutcome, SelectionWarning, Trend,
};
use evalfit::models::{BiologicalSex, ScaleType};
use evalfit::session::ComparisonSession;

use common::{
    client_id, sample_evaluation_id, seeded_store, store_with_client, weighed_evaluation, ANA,
    BRUNO,
};

const DELTA_TOLERANCE: f64 = 1e-9;

#[test]
fn test_sixth_bioimpedance_selection_is_rejected() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(BRUNO)).unwrap();

    for n in 5..=9 {
        assert_eq!(
            session.toggle(sample_evaluation_id(n)).unwrap(),
            SelectionOutcome::Added
        );
    }
    let outcome = session.toggle(sample_evaluation_id(10)).unwrap();

    assert_eq!(
        outcome.warning(),
        Some(&SelectionWarning::LimitReached {
            view: ComparisonView::Bioimpedance,
            limit: 5,
        })
    );
    assert_eq!(session.selection().len(), 5);
    assert!(!session.selection().contains(&sample_evaluation_id(10)));
}

#[test]
fn test_deselect_frees_a_slot() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(BRUNO)).unwrap();
    for n in 5..=9 {
        session.toggle(sample_evaluation_id(n)).unwrap();
    }

    assert_eq!(
        session.toggle(sample_evaluation_id(7)).unwrap(),
        SelectionOutcome::Removed
    );
    assert_eq!(
        session.toggle(sample_evaluation_id(10)).unwrap(),
        SelectionOutcome::Added
    );
    assert_eq!(session.selection().len(), 5);
}

#[test]
fn test_selection_is_ordered_by_date() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(BRUNO)).unwrap();
    for n in [10, 6, 8] {
        session.toggle(sample_evaluation_id(n)).unwrap();
    }

    let dates: Vec<_> = session.selected().iter().map(|e| e.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    let table = session.comparison_table();
    let column_ids: Vec<_> = table.columns.iter().map(|c| c.evaluation_id).collect();
    assert_eq!(
        column_ids,
        vec![
            sample_evaluation_id(6),
            sample_evaluation_id(8),
            sample_evaluation_id(10)
        ]
    );
}

#[test]
fn test_deltas_compare_adjacent_selected_evaluations() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(BRUNO)).unwrap();
    for n in [5, 7, 9] {
        session.toggle(sample_evaluation_id(n)).unwrap();
    }

    let table = session.comparison_table();
    assert_eq!(table.scale_type, Some(ScaleType::InBody));

    let weight = table.row("weightKg").unwrap();
    assert_eq!(weight.cells[0].delta, None);
    assert!((weight.cells[1].delta.unwrap() - (88.3 - 91.2)).abs() < DELTA_TOLERANCE);
    assert!((weight.cells[2].delta.unwrap() - (85.0 - 88.3)).abs() < DELTA_TOLERANCE);
    assert_eq!(weight.cells[1].trend, Some(Trend::Neutral));

    let body_fat = table.row("bodyFatPercentage").unwrap();
    assert!((body_fat.cells[2].delta.unwrap() - (22.0 - 23.5)).abs() < DELTA_TOLERANCE);
    assert_eq!(body_fat.cells[2].trend, Some(Trend::Improved));
    assert!(table.row("inbody.skeletalMuscleMassKg").is_some());
    assert!(table.row("omron.bodyAgeYears").is_none());
}

#[test]
fn test_missing_value_breaks_the_delta_chain() {
    let (store, client) = store_with_client(BiologicalSex::Male);
    let first = store
        .import_evaluation(weighed_evaluation(client.id, "2024-01-01", 80.0))
        .unwrap();
    let mut gap = weighed_evaluation(client.id, "2024-02-01", 0.0);
    gap.measurements.weight_kg = None;
    let gap = store.import_evaluation(gap).unwrap();
    let last = store
        .import_evaluation(weighed_evaluation(client.id, "2024-03-01", 78.0))
        .unwrap();

    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client.id).unwrap();
    for id in [first.id, gap.id, last.id] {
        session.toggle(id).unwrap();
    }

    let table = session.comparison_table();
    let deltas: Vec<_> = table
        .row("weightKg")
        .unwrap()
        .cells
        .iter()
        .map(|c| c.delta)
        .collect();
    assert_eq!(deltas, vec![None, None, None]);
    assert_eq!(table.scale_type, None);
    assert!(!table.row("heightCm").unwrap().has_values());
}

#[test]
fn test_unchanged_value_is_classified_unchanged() {
    let (store, client) = store_with_client(BiologicalSex::Female);
    let mut ids = Vec::new();
    for day in ["2024-01-01", "2024-02-01"] {
        let mut evaluation = weighed_evaluation(client.id, day, 60.0);
        evaluation.body_fat_percentage = Some(25.0);
        ids.push(store.import_evaluation(evaluation).unwrap().id);
    }

    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client.id).unwrap();
    for id in ids {
        session.toggle(id).unwrap();
    }

    let table = session.comparison_table();
    let cell = table.row("bodyFatPercentage").unwrap().cells[1];
    assert_eq!(cell.delta, Some(0.0));
    assert_eq!(cell.trend, Some(Trend::Unchanged));
}

#[test]
fn test_postural_view_preselects_latest_and_caps_at_four() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Postural);

    let state = session.select_client(client_id(BRUNO)).unwrap();
    assert_eq!(state, ComparisonState::Comparing);
    assert!(session.selection().contains(&sample_evaluation_id(10)));

    for n in [5, 6, 7] {
        assert_eq!(
            session.toggle(sample_evaluation_id(n)).unwrap(),
            SelectionOutcome::Added
        );
    }
    let outcome = session.toggle(sample_evaluation_id(8)).unwrap();
    assert!(matches!(
        outcome.warning(),
        Some(SelectionWarning::LimitReached { limit: 4, .. })
    ));
}

#[test]
fn test_switching_client_clears_selection() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(BRUNO)).unwrap();
    session.toggle(sample_evaluation_id(5)).unwrap();

    let state = session.select_client(client_id(ANA)).unwrap();
    assert_eq!(state, ComparisonState::ClientSelected);
    assert!(session.selected().is_empty());
}

#[test]
fn test_toggle_without_client_is_rejected() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    assert_eq!(session.state(), ComparisonState::Idle);

    let outcome = session.toggle(sample_evaluation_id(1)).unwrap();
    assert_eq!(outcome.warning(), Some(&SelectionWarning::NoClientSelected));
    assert_eq!(session.state(), ComparisonState::Idle);
}

#[test]
fn test_foreign_evaluation_cannot_be_selected() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(ANA)).unwrap();

    let error = session.toggle(sample_evaluation_id(5)).unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert!(session.selection().is_empty());
}

#[test]
fn test_compositions_follow_selection() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Bioimpedance);
    session.select_client(client_id(BRUNO)).unwrap();
    session.toggle(sample_evaluation_id(9)).unwrap();
    session.toggle(sample_evaluation_id(5)).unwrap();

    let compositions = session.compositions().unwrap();
    assert_eq!(compositions.len(), 2);
    assert_eq!(compositions[0].evaluation_id, sample_evaluation_id(5));
    assert!((compositions[1].composition.fat_mass_kg - 18.7).abs() < 1e-6);
}

#[test]
fn test_postural_changes_skip_unassessed_evaluations() {
    let store = seeded_store();
    let mut session = ComparisonSession::new(store, ComparisonView::Postural);
    session.select_client(client_id(ANA)).unwrap();
    for n in [2, 3] {
        session.toggle(sample_evaluation_id(n)).unwrap();
    }

    let summary = session.postural_summary();

    assert_eq!(summary.snapshots.len(), 3);
    assert!(!summary.snapshots[0].assessed);
    assert_eq!(summary.changes.len(), 1);
    assert_eq!(summary.changes[0].from, sample_evaluation_id(3));
    assert_eq!(summary.changes[0].to, sample_evaluation_id(4));
}
