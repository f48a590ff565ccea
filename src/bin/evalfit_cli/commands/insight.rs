// ABOUTME: AI insight commands for evalfit-cli
// ABOUTME: Requests evaluation reports, comparison analyses, and postural analyses from the configured LLM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use evalfit::config::EvalfitConfig;
use evalfit::insights::{Insight, InsightOptions, InsightService};
use evalfit::llm::{ChatProvider, LlmProvider};
use evalfit::models::Client;
use evalfit::store::EvaluationStore;

use crate::helpers::display::{display_insight, print_json};
use crate::helpers::lookup::resolve_evaluation;

/// Build the provider selected by `EVALFIT_LLM_PROVIDER`
pub fn provider(config: &EvalfitConfig) -> Result<Arc<dyn LlmProvider>> {
    let provider = ChatProvider::from_config(&config.llm)?;
    Ok(Arc::new(provider))
}

/// Insight service using the configured model and sampling settings
pub fn service(provider: &Arc<dyn LlmProvider>, config: &EvalfitConfig) -> InsightService {
    InsightService::with_options(Arc::clone(provider), InsightOptions::from(&config.llm))
}

fn show(insight: &Insight, json: bool) -> Result<()> {
    if json {
        return print_json(insight);
    }
    display_insight(insight);
    Ok(())
}

/// Narrative report for one evaluation (the latest by default)
pub async fn report(
    service: &InsightService,
    store: &EvaluationStore,
    client: &Client,
    evaluation_id: Option<&str>,
    json: bool,
) -> Result<()> {
    let evaluation = resolve_evaluation(store, client, evaluation_id)?;
    info!(evaluation_id = %evaluation.id, "Requesting evaluation report");
    let insight = service.evaluation_report(client, &evaluation).await?;
    show(&insight, json)
}

/// Analysis of two evaluations
///
/// `current` defaults to the latest evaluation and `previous` to the one dated
/// just before `current`.
pub async fn compare(
    service: &InsightService,
    store: &EvaluationStore,
    client: &Client,
    previous_id: Option<&str>,
    current_id: Option<&str>,
    json: bool,
) -> Result<()> {
    let current = resolve_evaluation(store, client, current_id)?;
    let previous = match previous_id {
        Some(raw) => resolve_evaluation(store, client, Some(raw))?,
        None => store
            .evaluations_for(client.id)
            .into_iter()
            .rev()
            .find(|evaluation| evaluation.date < current.date)
            .with_context(|| {
                format!("{} has no evaluation before {}", client.name, current.date)
            })?,
    };
    info!(
        previous = %previous.id,
        current = %current.id,
        "Requesting comparison analysis"
    );
    let insight = service
        .comparison_analysis(client, &previous, &current)
        .await?;
    show(&insight, json)
}

/// Analysis of postural deviations (the latest assessed evaluation by default)
pub async fn postural(
    service: &InsightService,
    store: &EvaluationStore,
    client: &Client,
    evaluation_id: Option<&str>,
    json: bool,
) -> Result<()> {
    let evaluation = match evaluation_id {
        Some(raw) => resolve_evaluation(store, client, Some(raw))?,
        None => store
            .evaluations_for(client.id)
            .into_iter()
            .rev()
            .find(|evaluation| evaluation.postural.is_some())
            .with_context(|| format!("{} has no postural assessment", client.name))?,
    };
    info!(evaluation_id = %evaluation.id, "Requesting postural analysis");
    let insight = service.postural_analysis(client, &evaluation).await?;
    show(&insight, json)
}

/// Report whether the provider's endpoint answers
pub async fn health(provider: &dyn LlmProvider) -> Result<()> {
    let healthy = provider.health_check().await?;
    println!(
        "{} ({}): {}",
        provider.display_name(),
        provider.default_model(),
        if healthy { "reachable" } else { "unreachable" }
    );
    Ok(())
}
