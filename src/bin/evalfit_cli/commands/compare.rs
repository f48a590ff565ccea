// ABOUTME: Evaluation comparison command for evalfit-cli
// ABOUTME: Drives a comparison session and prints the bioimpedance table or postural summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use tracing::debug;

use evalfit::intelligence::{ComparisonView, SelectionWarning};
use evalfit::models::{Client, EvaluationId};
use evalfit::session::ComparisonSession;
use evalfit::store::EvaluationStore;

use crate::helpers::display::{
    display_comparison_table, display_postural_summary, display_warning, print_json,
};
use crate::helpers::lookup::parse_evaluation_id;

/// Select evaluations for `client` and print the chosen view
///
/// Explicit ids are toggled in the order given. Without ids the `latest`
/// most recent evaluations are used, newest first, so any that exceed the
/// view's limit are the oldest ones and are reported as warnings.
pub fn run(
    store: &Arc<EvaluationStore>,
    client: &Client,
    view: ComparisonView,
    ids: &[String],
    latest: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut session = ComparisonSession::new(Arc::clone(store), view);
    session.select_client(client.id)?;

    let targets: Vec<EvaluationId> = if ids.is_empty() {
        let count = latest.unwrap_or_else(|| view.max_selection());
        store
            .evaluations_for(client.id)
            .iter()
            .rev()
            .take(count)
            .map(|evaluation| evaluation.id)
            .collect()
    } else {
        ids.iter()
            .map(String::as_str)
            .map(parse_evaluation_id)
            .collect::<Result<_>>()?
    };

    let mut warnings: Vec<SelectionWarning> = Vec::new();
    for id in targets {
        // Toggling an auto-selected evaluation would deselect it
        if session.selection().contains(&id) {
            continue;
        }
        let outcome = session.toggle(id)?;
        debug!(evaluation_id = %id, ?outcome, "Toggled evaluation");
        if let Some(warning) = outcome.warning() {
            warnings.push(warning.clone());
        }
    }

    match view {
        ComparisonView::Bioimpedance => {
            let table = session.comparison_table();
            if json {
                return print_json(&json!({
                    "state": session.state(),
                    "table": table,
                    "compositions": session.compositions()?,
                    "warnings": warnings,
                }));
            }
            warnings.iter().for_each(display_warning);
            display_comparison_table(&table);
        }
        ComparisonView::Postural => {
            let summary = session.postural_summary();
            if json {
                return print_json(&json!({
                    "state": session.state(),
                    "summary": summary,
                    "warnings": warnings,
                }));
            }
            warnings.iter().for_each(display_warning);
            display_postural_summary(&summary);
        }
    }
    Ok(())
}
