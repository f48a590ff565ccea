// ABOUTME: Comparison session binding the evaluation store to a capped selection
// ABOUTME: Produces comparison tables, postural summaries, and per-evaluation compositions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::intelligence::{
    build_comparison_table, calculate, summarize_postural, BodyComposition, BodyCompositionConfig,
    ComparisonState, ComparisonTable, ComparisonView, EvaluationSelection, PosturalSummary,
    SelectionOutcome,
};
use crate::models::{Client, ClientId, Evaluation, EvaluationId};
use crate::store::EvaluationStore;

/// Composition of one selected evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedComposition {
    /// Evaluation
    pub evaluation_id: EvaluationId,
    /// Its date
    pub date: NaiveDate,
    /// Calculator output
    pub composition: BodyComposition,
}

/// One comparison view over the shared store
#[derive(Debug)]
pub struct ComparisonSession {
    store: Arc<EvaluationStore>,
    selection: EvaluationSelection,
    config: BodyCompositionConfig,
}

impl ComparisonSession {
    /// Session for `view` using the global calculator configuration
    #[must_use]
    pub fn new(store: Arc<EvaluationStore>, view: ComparisonView) -> Self {
        Self::with_config(store, view, *BodyCompositionConfig::global())
    }

    /// Session with explicit calculator constants
    #[must_use]
    pub const fn with_config(
        store: Arc<EvaluationStore>,
        view: ComparisonView,
        config: BodyCompositionConfig,
    ) -> Self {
        Self {
            store,
            selection: EvaluationSelection::new(view),
            config,
        }
    }

    /// Current lifecycle state
    #[must_use]
    pub fn state(&self) -> ComparisonState {
        self.selection.state()
    }

    /// Underlying selection
    #[must_use]
    pub const fn selection(&self) -> &EvaluationSelection {
        &self.selection
    }

    /// Make `client_id` active, clearing any previous selection
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the client is unknown
    pub fn select_client(&mut self, client_id: ClientId) -> AppResult<ComparisonState> {
        if self.store.client(client_id).is_none() {
            return Err(AppError::not_found(format!("Client {client_id}")));
        }
        let evaluations = self.store.evaluations_for(client_id);
        self.selection.select_client(client_id, &evaluations);
        Ok(self.selection.state())
    }

    /// Toggle an evaluation of the active client
    ///
    /// A refused selection is reported through [`SelectionOutcome::Rejected`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the evaluation does not exist or belongs to another client
    pub fn toggle(&mut self, id: EvaluationId) -> AppResult<SelectionOutcome> {
        if let Some(client_id) = self.selection.client_id() {
            let owned = self
                .store
                .evaluation(id)
                .is_some_and(|e| e.client_id == client_id);
            if !owned {
                return Err(AppError::not_found(format!("Evaluation {id}")));
            }
        }
        let outcome = self.selection.toggle(id);
        debug!(evaluation_id = %id, ?outcome, selected = self.selection.len(), "Selection toggled");
        Ok(outcome)
    }

    /// Selected evaluations, oldest first
    #[must_use]
    pub fn selected(&self) -> Vec<Evaluation> {
        let Some(client_id) = self.selection.client_id() else {
            return Vec::new();
        };
        let evaluations = self.store.evaluations_for(client_id);
        self.selection
            .materialize(&evaluations)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Field-by-evaluation grid with deltas between adjacent selected evaluations
    #[must_use]
    pub fn comparison_table(&self) -> ComparisonTable {
        let selected = self.selected();
        let refs: Vec<&Evaluation> = selected.iter().collect();
        build_comparison_table(&refs)
    }

    /// Deviation counts and changes across the selection
    #[must_use]
    pub fn postural_summary(&self) -> PosturalSummary {
        let selected = self.selected();
        let refs: Vec<&Evaluation> = selected.iter().collect();
        summarize_postural(&refs)
    }

    /// Run the calculator for every selected evaluation
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no client is active or it has disappeared
    pub fn compositions(&self) -> AppResult<Vec<SelectedComposition>> {
        let client = self.active_client()?;
        Ok(self
            .selected()
            .iter()
            .map(|evaluation| SelectedComposition {
                evaluation_id: evaluation.id,
                date: evaluation.date,
                composition: calculate(evaluation, &client, &self.config),
            })
            .collect())
    }

    fn active_client(&self) -> AppResult<Client> {
        let client_id = self
            .selection
            .client_id()
            .ok_or_else(|| AppError::not_found("Active client"))?;
        self.store
            .client(client_id)
            .ok_or_else(|| AppError::not_found(format!("Client {client_id}")))
    }
}
