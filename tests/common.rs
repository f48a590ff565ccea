// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, seeded stores, sample ids, and evaluation builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `evalfit`

use std::env;
use std::sync::{Arc, Once};

use chrono::NaiveDate;
use evalfit::models::{BiologicalSex, Client, ClientId, Evaluation, EvaluationId};
use evalfit::seed::SampleData;
use evalfit::store::EvaluationStore;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Bundled sample client: female, 34, 165 cm, four Omron evaluations
pub const ANA: &str = "6f1c2a34-5b7e-4c1d-9a2b-3e4f5a6b7c01";
/// Bundled sample client: male, 41, 180 cm, six `InBody` evaluations
pub const BRUNO: &str = "6f1c2a34-5b7e-4c1d-9a2b-3e4f5a6b7c02";
/// Bundled sample client: female, 27, 170 cm, two skinfold-only evaluations
pub const CARLA: &str = "6f1c2a34-5b7e-4c1d-9a2b-3e4f5a6b7c03";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Parse a sample client id
pub fn client_id(raw: &str) -> ClientId {
    raw.parse().expect("valid client id")
}

/// Parse a sample evaluation id
pub fn evaluation_id(raw: &str) -> EvaluationId {
    raw.parse().expect("valid evaluation id")
}

/// Sample evaluation id by its position in the bundled dataset (1-based)
pub fn sample_evaluation_id(n: u32) -> EvaluationId {
    evaluation_id(&format!("a0e1b2c3-d4e5-4f60-8a7b-{n:012}"))
}

/// `YYYY-MM-DD` to a date
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid date")
}

/// Store loaded with the bundled sample data
pub fn seeded_store() -> Arc<EvaluationStore> {
    init_test_logging();
    let store = EvaluationStore::new();
    SampleData::bundled()
        .expect("bundled data parses")
        .load_into(&store)
        .expect("bundled data loads");
    Arc::new(store)
}

/// Empty store with one registered client
pub fn store_with_client(sex: BiologicalSex) -> (Arc<EvaluationStore>, Client) {
    init_test_logging();
    let store = EvaluationStore::new();
    let client = store
        .register_client(Client::new("Test Client", 30, sex, 175.0))
        .expect("valid client");
    (Arc::new(store), client)
}

/// Evaluation for `client_id` on `day` with only a weight recorded
pub fn weighed_evaluation(client_id: ClientId, day: &str, weight_kg: f64) -> Evaluation {
    let mut evaluation = Evaluation::blank(client_id, date(day));
    evaluation.measurements.weight_kg = Some(weight_kg);
    evaluation
}
