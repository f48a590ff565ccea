// ABOUTME: Evaluation comparison engine with capped selection and adjacent-selected deltas
// ABOUTME: Selection state per view, chronological materialisation, and comparison tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Evaluation comparison
//!
//! A selection is a set of evaluation ids scoped to one client. Each view caps
//! how many evaluations can be selected at once; attempts beyond the cap are
//! rejected with a [`SelectionWarning`] and leave the selection untouched.
//!
//! Selected evaluations are always materialised oldest first, whatever order
//! they were clicked in. Deltas are computed between each selected evaluation
//! and the one immediately before it *within the selection*, never against
//! unselected evaluations that happen to fall in between.

use chrono::NaiveDate;
use evalfit_core::constants::selection::{BIOIMPEDANCE_MAX_SELECTION, POSTURAL_MAX_SELECTION};
use evalfit_core::models::{ClientId, Evaluation, EvaluationId, ScaleType};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

use crate::field_registry::{fields_for_scale, FieldSpec, Trend};

/// Dashboard view a selection belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonView {
    /// Bioimpedance and anthropometric comparison table
    Bioimpedance,
    /// Postural deviation summary
    Postural,
}

impl ComparisonView {
    /// Maximum evaluations selectable at once
    #[must_use]
    pub const fn max_selection(self) -> usize {
        match self {
            Self::Bioimpedance => BIOIMPEDANCE_MAX_SELECTION,
            Self::Postural => POSTURAL_MAX_SELECTION,
        }
    }

    /// Whether choosing a client pre-selects its most recent evaluation
    #[must_use]
    pub const fn auto_selects_latest(self) -> bool {
        matches!(self, Self::Postural)
    }
}

impl fmt::Display for ComparisonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bioimpedance => write!(f, "bioimpedance"),
            Self::Postural => write!(f, "postural"),
        }
    }
}

/// Where a selection is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonState {
    /// No client chosen
    Idle,
    /// Client chosen, nothing selected
    ClientSelected,
    /// At least one evaluation selected
    Comparing,
}

/// User-facing reason a selection change was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionWarning {
    /// The view's cap is already reached
    LimitReached {
        /// View whose cap was hit
        view: ComparisonView,
        /// The cap
        limit: usize,
    },
    /// Toggled before choosing a client
    NoClientSelected,
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitReached { limit, .. } => write!(
                f,
                "You can compare at most {limit} evaluations at a time. Deselect one to add another."
            ),
            Self::NoClientSelected => write!(f, "Select a client before choosing evaluations."),
        }
    }
}

/// Result of a toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectionOutcome {
    /// The evaluation was added
    Added,
    /// The evaluation was removed
    Removed,
    /// Nothing changed
    Rejected {
        /// Why
        warning: SelectionWarning,
    },
}

impl SelectionOutcome {
    /// Warning carried by a rejection
    #[must_use]
    pub const fn warning(&self) -> Option<&SelectionWarning> {
        match self {
            Self::Rejected { warning } => Some(warning),
            Self::Added | Self::Removed => None,
        }
    }
}

/// Bounded set of selected evaluations for one client and view
#[derive(Debug, Clone)]
pub struct EvaluationSelection {
    view: ComparisonView,
    client_id: Option<ClientId>,
    selected: BTreeSet<EvaluationId>,
}

impl EvaluationSelection {
    /// Empty selection for `view`
    #[must_use]
    pub const fn new(view: ComparisonView) -> Self {
        Self {
            view,
            client_id: None,
            selected: BTreeSet::new(),
        }
    }

    /// View this selection belongs to
    #[must_use]
    pub const fn view(&self) -> ComparisonView {
        self.view
    }

    /// Active client
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    /// Switch to `client_id`, clearing the previous selection
    ///
    /// `evaluations` is the client's list; views that auto-select pick the most
    /// recent entry.
    pub fn select_client(&mut self, client_id: ClientId, evaluations: &[Evaluation]) {
        self.client_id = Some(client_id);
        self.selected.clear();
        if self.view.auto_selects_latest() {
            if let Some(latest) = evaluations
                .iter()
                .filter(|e| e.client_id == client_id)
                .max_by_key(|e| (e.date, e.created_at))
            {
                self.selected.insert(latest.id);
            }
        }
        debug!(view = %self.view, client_id = %client_id, selected = self.selected.len(), "Client selected");
    }

    /// Forget the client and the selection
    pub fn reset(&mut self) {
        self.client_id = None;
        self.selected.clear();
    }

    /// Add `id` if absent, remove it if present
    ///
    /// Adding past the view's cap is refused and the selection is left as is.
    pub fn toggle(&mut self, id: EvaluationId) -> SelectionOutcome {
        if self.client_id.is_none() {
            warn!(view = %self.view, evaluation_id = %id, "Selection rejected: no client selected");
            return SelectionOutcome::Rejected {
                warning: SelectionWarning::NoClientSelected,
            };
        }
        if self.selected.remove(&id) {
            return SelectionOutcome::Removed;
        }
        let limit = self.view.max_selection();
        if self.selected.len() >= limit {
            warn!(view = %self.view, limit, evaluation_id = %id, "Selection rejected: limit reached");
            return SelectionOutcome::Rejected {
                warning: SelectionWarning::LimitReached {
                    view: self.view,
                    limit,
                },
            };
        }
        self.selected.insert(id);
        SelectionOutcome::Added
    }

    /// Whether `id` is selected
    #[must_use]
    pub fn contains(&self, id: &EvaluationId) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected evaluations
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Lifecycle state
    #[must_use]
    pub fn state(&self) -> ComparisonState {
        match (self.client_id, self.selected.is_empty()) {
            (None, _) => ComparisonState::Idle,
            (Some(_), true) => ComparisonState::ClientSelected,
            (Some(_), false) => ComparisonState::Comparing,
        }
    }

    /// Selected evaluations from `evaluations`, oldest first
    ///
    /// Ids that are not in `evaluations` or belong to another client are skipped.
    #[must_use]
    pub fn materialize<'a>(&self, evaluations: &'a [Evaluation]) -> Vec<&'a Evaluation> {
        let mut chosen: Vec<&Evaluation> = evaluations
            .iter()
            .filter(|e| Some(e.client_id) == self.client_id && self.selected.contains(&e.id))
            .collect();
        chosen.sort_by_key(|e| (e.date, e.created_at));
        chosen
    }
}

/// Adjacent differences: `None` first, then `current - previous` when both exist
#[must_use]
pub fn adjacent_deltas(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut deltas = Vec::with_capacity(values.len());
    let mut previous: Option<Option<f64>> = None;
    for value in values {
        let delta = match (previous, value) {
            (Some(Some(prev)), Some(current)) => Some(current - prev),
            _ => None,
        };
        deltas.push(delta);
        previous = Some(*value);
    }
    deltas
}

/// Column header of a comparison table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonColumn {
    /// Evaluation shown in the column
    pub evaluation_id: EvaluationId,
    /// Its date
    pub date: NaiveDate,
}

/// One value with its change from the previous selected evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCell {
    /// Recorded value
    pub value: Option<f64>,
    /// `current - previous`
    pub delta: Option<f64>,
    /// Classification of `delta`
    pub trend: Option<Trend>,
}

/// One field across the selected evaluations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    /// Field declaration
    pub field: FieldSpec,
    /// One cell per column
    pub cells: Vec<ComparisonCell>,
}

impl ComparisonRow {
    /// Whether any column recorded the field
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.cells.iter().any(|c| c.value.is_some())
    }
}

/// Field-by-evaluation comparison grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    /// Device field set in use
    pub scale_type: Option<ScaleType>,
    /// Columns, oldest first
    pub columns: Vec<ComparisonColumn>,
    /// Rows in registry order
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    /// Row for the field with wire key `key`
    #[must_use]
    pub fn row(&self, key: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.field.key.as_str() == key)
    }
}

/// Device of the most recent evaluation that carries a bioimpedance reading
#[must_use]
pub fn latest_scale_type(ascending: &[&Evaluation]) -> Option<ScaleType> {
    ascending
        .iter()
        .rev()
        .find_map(|e| e.bioimpedance.as_ref().map(|b| b.scale_type()))
}

/// Build the comparison grid for evaluations already ordered oldest first
#[must_use]
pub fn build_comparison_table(ascending: &[&Evaluation]) -> ComparisonTable {
    let scale_type = latest_scale_type(ascending);
    let columns = ascending
        .iter()
        .map(|e| ComparisonColumn {
            evaluation_id: e.id,
            date: e.date,
        })
        .collect();

    let rows = fields_for_scale(scale_type)
        .into_iter()
        .map(|field| {
            let values: Vec<Option<f64>> =
                ascending.iter().map(|e| field.key.value(e)).collect();
            let cells = values
                .iter()
                .zip(adjacent_deltas(&values))
                .map(|(value, delta)| ComparisonCell {
                    value: *value,
                    delta,
                    trend: delta.map(|d| field.improvement_direction.classify(d)),
                })
                .collect();
            ComparisonRow { field, cells }
        })
        .collect();

    ComparisonTable {
        scale_type,
        columns,
        rows,
    }
}
