// ABOUTME: Integration tests for LLM-backed insight generation
// ABOUTME: Covers payload contents, the duplicate in-flight guard, and provider failure handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use evalfit::errors::{AppError, ErrorCode};
use evalfit::insights::{InsightKind, InsightOptions, InsightService};
use evalfit::llm::MessageRole;
use evalfit::models::{Client, Evaluation};
use evalfit::store::EvaluationStore;

use common::{client_id, sample_evaluation_id, seeded_store, ANA, BRUNO, CARLA};
use helpers::scripted_llm::ScriptedProvider;

fn client_and_evaluation(store: &EvaluationStore, client: &str, n: u32) -> (Client, Evaluation) {
    (
        store.client(client_id(client)).unwrap(),
        store.evaluation(sample_evaluation_id(n)).unwrap(),
    )
}

#[tokio::test]
async fn test_evaluation_report_sends_payload() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, BRUNO, 9);
    let provider = Arc::new(ScriptedProvider::answering("  Solid progress.  \n", 1));
    let service = InsightService::new(provider.clone());

    let insight = service.evaluation_report(&client, &evaluation).await.unwrap();

    assert_eq!(insight.kind, InsightKind::EvaluationReport);
    assert_eq!(insight.content, "Solid progress.");
    assert_eq!(insight.evaluation_ids, vec![evaluation.id]);
    assert_eq!(insight.usage.unwrap().total_tokens, 160);

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let messages = &requests[0].messages;
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[1].role, MessageRole::User);
    assert!(messages[1].content.contains("Bruno Lima"));
    assert!(messages[1].content.contains("\"bodyComposition\""));
    assert!(messages[1].content.contains("\"fatMassKg\""));
}

#[tokio::test]
async fn test_duplicate_request_is_locked_while_pending() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, ANA, 4);
    let provider = Arc::new(ScriptedProvider::holding_first(vec![
        Ok("First report".to_owned()),
        Ok("Second report".to_owned()),
    ]));
    let service = InsightService::new(provider.clone());

    let first = service.evaluation_report(&client, &evaluation);
    let second = async {
        provider.started.notified().await;
        assert_eq!(service.pending(), 1);
        let result = service.evaluation_report(&client, &evaluation).await;
        provider.release.notify_one();
        result
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap().content, "First report");
    assert_eq!(second.unwrap_err().code, ErrorCode::ResourceLocked);
    assert_eq!(provider.calls(), 1);
    assert_eq!(service.pending(), 0);

    let again = service.evaluation_report(&client, &evaluation).await.unwrap();
    assert_eq!(again.content, "Second report");
}

#[tokio::test]
async fn test_different_kinds_do_not_block_each_other() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, ANA, 4);
    let provider = Arc::new(ScriptedProvider::holding_first(vec![
        Ok("Report".to_owned()),
        Ok("Posture".to_owned()),
    ]));
    let service = InsightService::new(provider.clone());

    let report = service.evaluation_report(&client, &evaluation);
    let postural = async {
        provider.started.notified().await;
        let result = service.postural_analysis(&client, &evaluation).await;
        provider.release.notify_one();
        result
    };
    let (report, postural) = tokio::join!(report, postural);

    assert_eq!(report.unwrap().content, "Report");
    let postural = postural.unwrap();
    assert_eq!(postural.kind, InsightKind::PosturalAnalysis);
    assert_eq!(postural.content, "Posture");
}

#[tokio::test]
async fn test_empty_reply_is_an_error_and_releases_key() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, BRUNO, 10);
    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok("   \n".to_owned()),
        Ok("Recovered".to_owned()),
    ]));
    let service = InsightService::new(provider.clone());

    let error = service
        .evaluation_report(&client, &evaluation)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceError);
    assert_eq!(service.pending(), 0);

    let insight = service.evaluation_report(&client, &evaluation).await.unwrap();
    assert_eq!(insight.content, "Recovered");
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, BRUNO, 10);
    let provider = Arc::new(ScriptedProvider::new(vec![Err(
        AppError::external_unavailable("Scripted", "connection refused"),
    )]));
    let service = InsightService::new(provider.clone());

    let error = service
        .postural_analysis(&client, &evaluation)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ExternalServiceUnavailable);
    assert_eq!(service.pending(), 0);
}

#[tokio::test]
async fn test_comparison_orders_evaluations_by_date() {
    let store = seeded_store();
    let client = store.client(client_id(BRUNO)).unwrap();
    let older = store.evaluation(sample_evaluation_id(6)).unwrap();
    let newer = store.evaluation(sample_evaluation_id(9)).unwrap();
    let provider = Arc::new(ScriptedProvider::answering("Down 4.6 kg.", 1));
    let service = InsightService::new(provider.clone());

    let insight = service
        .comparison_analysis(&client, &newer, &older)
        .await
        .unwrap();

    assert_eq!(insight.kind, InsightKind::ComparisonAnalysis);
    assert_eq!(insight.evaluation_ids, vec![older.id, newer.id]);
    let prompt = &provider.requests()[0].messages[1].content;
    assert!(prompt.contains("\"deltas\""));
    assert!(prompt.contains("\"scaleType\": \"inbody\""));
}

#[tokio::test]
async fn test_comparison_rejects_same_evaluation() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, BRUNO, 9);
    let provider = Arc::new(ScriptedProvider::answering("unused", 1));
    let service = InsightService::new(provider.clone());

    let error = service
        .comparison_analysis(&client, &evaluation, &evaluation)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_postural_requires_assessment() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, CARLA, 11);
    let provider = Arc::new(ScriptedProvider::answering("unused", 1));
    let service = InsightService::new(provider.clone());

    let error = service
        .postural_analysis(&client, &evaluation)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_foreign_evaluation_is_rejected() {
    let store = seeded_store();
    let client = store.client(client_id(ANA)).unwrap();
    let evaluation = store.evaluation(sample_evaluation_id(9)).unwrap();
    let provider = Arc::new(ScriptedProvider::answering("unused", 1));
    let service = InsightService::new(provider.clone());

    let error = service
        .evaluation_report(&client, &evaluation)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_options_reach_the_request() {
    let store = seeded_store();
    let (client, evaluation) = client_and_evaluation(&store, ANA, 1);
    let provider = Arc::new(ScriptedProvider::answering("ok", 1));
    let options = InsightOptions {
        model: Some("llama-3.3-70b-versatile".to_owned()),
        temperature: 0.1,
        max_tokens: 256,
    };
    let service = InsightService::with_options(provider.clone(), options);

    let insight = service.evaluation_report(&client, &evaluation).await.unwrap();

    let request = &provider.requests()[0];
    assert_eq!(request.model.as_deref(), Some("llama-3.3-70b-versatile"));
    assert_eq!(request.max_tokens, Some(256));
    assert_eq!(insight.model, "llama-3.3-70b-versatile");
}
