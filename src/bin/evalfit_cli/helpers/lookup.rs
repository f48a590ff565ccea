// ABOUTME: Resolves clients and evaluations from command-line arguments
// ABOUTME: Accepts ids or case-insensitive name fragments and defaults to the latest evaluation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{bail, Context, Result};

use evalfit::models::{Client, ClientId, Evaluation, EvaluationId};
use evalfit::store::EvaluationStore;

/// Find a client by id, or by a name fragment matching exactly one client
pub fn resolve_client(store: &EvaluationStore, query: &str) -> Result<Client> {
    if let Ok(id) = query.parse::<ClientId>() {
        return store
            .client(id)
            .with_context(|| format!("No client with id {id}"));
    }

    let needle = query.trim().to_lowercase();
    let matches: Vec<Client> = store
        .clients()
        .into_iter()
        .filter(|client| client.name.to_lowercase().contains(&needle))
        .collect();

    match matches.as_slice() {
        [] => bail!("No client matches '{query}'"),
        [client] => Ok(client.clone()),
        several => {
            let names: Vec<&str> = several.iter().map(|c| c.name.as_str()).collect();
            bail!("'{query}' matches several clients: {}", names.join(", "))
        }
    }
}

/// Parse an evaluation id argument
pub fn parse_evaluation_id(raw: &str) -> Result<EvaluationId> {
    raw.trim()
        .parse()
        .with_context(|| format!("'{raw}' is not an evaluation id"))
}

/// The evaluation `id` of `client`, or their latest when `id` is absent
pub fn resolve_evaluation(
    store: &EvaluationStore,
    client: &Client,
    id: Option<&str>,
) -> Result<Evaluation> {
    let Some(raw) = id else {
        return store
            .latest_for(client.id)
            .with_context(|| format!("{} has no evaluations", client.name));
    };

    let id = parse_evaluation_id(raw)?;
    match store.evaluation(id) {
        Some(evaluation) if evaluation.client_id == client.id => Ok(evaluation),
        Some(_) => bail!("Evaluation {id} belongs to another client"),
        None => bail!("No evaluation with id {id}"),
    }
}
