// ABOUTME: Client and evaluation listing commands for evalfit-cli
// ABOUTME: Lists clients, lists a client's evaluations, and creates a day's evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use evalfit::models::Client;
use evalfit::store::EvaluationStore;

use crate::helpers::display::{
    display_clients, display_evaluations, display_new_evaluation, print_json,
};

/// List every client with their evaluation count
pub fn list(store: &EvaluationStore, json: bool) -> Result<()> {
    let clients: Vec<(Client, usize)> = store
        .clients()
        .into_iter()
        .map(|client| {
            let count = store.evaluations_for(client.id).len();
            (client, count)
        })
        .collect();

    if json {
        let rows: Vec<_> = clients
            .iter()
            .map(|(client, count)| json!({ "client": client, "evaluationCount": count }))
            .collect();
        return print_json(&rows);
    }
    display_clients(&clients);
    Ok(())
}

/// List one client's evaluations, oldest first
pub fn evaluations(store: &EvaluationStore, client: &Client, json: bool) -> Result<()> {
    let evaluations = store.evaluations_for(client.id);
    if json {
        return print_json(&evaluations);
    }
    display_evaluations(client, &evaluations);
    Ok(())
}

/// Create the evaluation for `date` (today by default), or return the existing one
///
/// The store lives only for this invocation, so this shows what the record
/// would look like: weight and height carried over from earlier evaluations.
pub fn new_evaluation(
    store: &EvaluationStore,
    client: &Client,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let before = store.evaluations_for(client.id).len();
    let evaluation = match date {
        Some(date) => store.create_evaluation_on(client.id, date)?,
        None => store.create_evaluation(client.id)?,
    };
    let reopened = store.evaluations_for(client.id).len() == before;
    info!(evaluation_id = %evaluation.id, reopened, "Evaluation ready");

    if json {
        return print_json(&evaluation);
    }
    display_new_evaluation(&evaluation, reopened);
    Ok(())
}
