// ABOUTME: Body composition and skinfold commands for evalfit-cli
// ABOUTME: Runs the Von Dobeln decomposition and Jackson-Pollock estimates for one evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use serde_json::json;

use evalfit::intelligence::{
    calculate as calculate_composition, estimate_body_fat_from_skinfolds, BodyCompositionConfig,
    SkinfoldProtocol,
};
use evalfit::models::Client;
use evalfit::store::EvaluationStore;

use crate::helpers::display::{display_composition, display_skinfold_estimate, print_json};
use crate::helpers::lookup::resolve_evaluation;

/// Body composition of one evaluation (the latest by default)
pub fn calculate(
    store: &EvaluationStore,
    client: &Client,
    evaluation_id: Option<&str>,
    json: bool,
) -> Result<()> {
    let evaluation = resolve_evaluation(store, client, evaluation_id)?;
    let composition = calculate_composition(&evaluation, client, BodyCompositionConfig::global());

    if json {
        return print_json(&json!({
            "evaluationId": evaluation.id,
            "date": evaluation.date,
            "composition": composition,
        }));
    }
    display_composition(client, &evaluation, &composition);
    Ok(())
}

/// Body-fat estimate from skinfolds; `protocol` of `None` picks the most complete one recorded
pub fn skinfolds(
    store: &EvaluationStore,
    client: &Client,
    evaluation_id: Option<&str>,
    protocol: Option<SkinfoldProtocol>,
    json: bool,
) -> Result<()> {
    let evaluation = resolve_evaluation(store, client, evaluation_id)?;
    let protocol = match protocol {
        Some(protocol) => protocol,
        None => SkinfoldProtocol::best_available(&evaluation.skinfolds, client.sex)
            .with_context(|| {
                format!(
                    "Evaluation {} has no complete set of skinfold sites",
                    evaluation.id
                )
            })?,
    };
    let estimate =
        estimate_body_fat_from_skinfolds(&evaluation.skinfolds, client.sex, client.age, protocol)?;

    if json {
        return print_json(&json!({
            "evaluationId": evaluation.id,
            "date": evaluation.date,
            "estimate": estimate,
        }));
    }
    display_skinfold_estimate(client, &evaluation, &estimate);
    Ok(())
}
