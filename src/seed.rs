// ABOUTME: Sample clients and evaluations for demos, the CLI, and integration tests
// ABOUTME: Loads a JSON dataset from disk or the copy bundled into the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::{Client, Evaluation};
use crate::store::EvaluationStore;

/// Dataset compiled into the crate
pub const BUNDLED_SAMPLE_DATA: &str = include_str!("../data/sample_evaluations.json");

/// Clients and their evaluations as stored on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleData {
    /// Clients, registered first
    pub clients: Vec<Client>,
    /// Evaluations referencing the clients above
    #[serde(default)]
    pub evaluations: Vec<Evaluation>,
}

/// Counts of what was loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Registered clients
    pub clients: usize,
    /// Imported evaluations
    pub evaluations: usize,
}

impl SampleData {
    /// Parse the bundled dataset
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the bundled JSON is malformed
    pub fn bundled() -> AppResult<Self> {
        Self::from_json(BUNDLED_SAMPLE_DATA)
    }

    /// Parse a dataset from JSON text
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON does not match the schema
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a dataset from `path`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, or a
    /// serialization error if it does not parse
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read sample data {}", path.display())).with_source(e)
        })?;
        Self::from_json(&json)
    }

    /// Read `path` if it exists, otherwise fall back to the bundled dataset
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen dataset cannot be read or parsed
    pub fn from_path_or_bundled(path: &Path) -> AppResult<Self> {
        if path.exists() {
            Self::from_path(path)
        } else {
            Self::bundled()
        }
    }

    /// Register every client and import every evaluation into `store`
    ///
    /// # Errors
    ///
    /// Returns the first validation or lookup failure; records loaded before it stay in the store
    pub fn load_into(&self, store: &EvaluationStore) -> AppResult<SeedSummary> {
        for client in &self.clients {
            store.register_client(client.clone())?;
        }
        for evaluation in &self.evaluations {
            store.import_evaluation(evaluation.clone())?;
        }
        let summary = SeedSummary {
            clients: self.clients.len(),
            evaluations: self.evaluations.len(),
        };
        info!(
            clients = summary.clients,
            evaluations = summary.evaluations,
            "Sample data loaded"
        );
        Ok(summary)
    }
}
