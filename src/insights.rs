// ABOUTME: LLM-backed narrative insights for evaluations, comparisons, and postural assessments
// ABOUTME: Serializes typed payloads to JSON and guards against duplicate in-flight requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Insight Service
//!
//! Three thin prompt wrappers. Each builds a typed payload, serializes it to
//! JSON, sends it with the matching prompt, and returns the model's text.
//!
//! While a request for a given kind and set of evaluations is pending, a
//! second identical request fails with `ResourceLocked`. The key is released
//! when the first request finishes, whether it succeeded or not.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashSet;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::environment::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::config::LlmConfig;
use crate::errors::{AppError, AppResult};
use crate::intelligence::comparison::latest_scale_type;
use crate::intelligence::{
    build_comparison_table, calculate, BodyComposition, BodyCompositionConfig,
    ImprovementDirection, Trend,
};
use crate::llm::prompts::{
    with_payload, COMPARISON_ANALYSIS_PROMPT, EVALUATION_REPORT_PROMPT, POSTURAL_ANALYSIS_PROMPT,
    TRAINER_SYSTEM_PROMPT,
};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider, TokenUsage};
use crate::logging::AppLogger;
use crate::models::{
    BiologicalSex, Client, Evaluation, EvaluationId, PosturalDeviation, PosturalView, ScaleType,
};

/// Which analysis was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Narrative report for one evaluation
    EvaluationReport,
    /// Analysis of two evaluations
    ComparisonAnalysis,
    /// Analysis of postural deviations
    PosturalAnalysis,
}

impl InsightKind {
    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EvaluationReport => "evaluation_report",
            Self::ComparisonAnalysis => "comparison_analysis",
            Self::PosturalAnalysis => "postural_analysis",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated text with provenance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Analysis type
    pub kind: InsightKind,
    /// Evaluations the text is about, oldest first
    pub evaluation_ids: Vec<EvaluationId>,
    /// Model output
    pub content: String,
    /// Model that answered
    pub model: String,
    /// Token accounting, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// When the answer arrived
    pub generated_at: DateTime<Utc>,
}

// ============================================================================
// Payloads
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientProfile<'a> {
    name: &'a str,
    age: u32,
    sex: BiologicalSex,
    height_cm: f64,
}

impl<'a> From<&'a Client> for ClientProfile<'a> {
    fn from(client: &'a Client) -> Self {
        Self {
            name: &client.name,
            age: client.age,
            sex: client.sex,
            height_cm: client.height_cm,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationReportPayload<'a> {
    client: ClientProfile<'a>,
    evaluation: &'a Evaluation,
    body_composition: BodyComposition,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldDelta {
    field: &'static str,
    label: &'static str,
    unit: &'static str,
    improvement_direction: ImprovementDirection,
    previous: Option<f64>,
    current: Option<f64>,
    delta: Option<f64>,
    trend: Option<Trend>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonPayload<'a> {
    client: ClientProfile<'a>,
    scale_type: Option<ScaleType>,
    previous: &'a Evaluation,
    current: &'a Evaluation,
    previous_composition: BodyComposition,
    current_composition: BodyComposition,
    deltas: Vec<FieldDelta>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PosturalPayload<'a> {
    client: ClientProfile<'a>,
    date: NaiveDate,
    photographed_views: Vec<PosturalView>,
    deviations: BTreeMap<PosturalView, Vec<&'static str>>,
    total_deviations: usize,
    observations: Option<&'a str>,
}

// ============================================================================
// In-flight registry
// ============================================================================

type InFlightKey = (InsightKind, Vec<EvaluationId>);

struct InFlightGuard<'a> {
    registry: &'a DashSet<InFlightKey>,
    key: InFlightKey,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(registry: &'a DashSet<InFlightKey>, key: InFlightKey) -> AppResult<Self> {
        if !registry.insert(key.clone()) {
            warn!(kind = %key.0, evaluations = ?key.1, "Duplicate insight request rejected");
            return Err(AppError::resource_locked(format!(
                "A {} request for these evaluations is already in progress",
                key.0
            )));
        }
        Ok(Self { registry, key })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry.remove(&self.key);
    }
}

// ============================================================================
// Service
// ============================================================================

/// Sampling settings applied to every insight request
#[derive(Debug, Clone, PartialEq)]
pub struct InsightOptions {
    /// Model override; the provider default when `None`
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion budget
    pub max_tokens: u32,
}

impl From<&LlmConfig> for InsightOptions {
    fn from(config: &LlmConfig) -> Self {
        Self {
            model: Some(config.model.clone()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl Default for InsightOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// LLM-backed analysis of evaluations
pub struct InsightService {
    provider: Arc<dyn LlmProvider>,
    options: InsightOptions,
    composition: BodyCompositionConfig,
    in_flight: DashSet<InFlightKey>,
}

impl InsightService {
    /// Service with default sampling settings
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_options(provider, InsightOptions::default())
    }

    /// Service with explicit sampling settings
    #[must_use]
    pub fn with_options(provider: Arc<dyn LlmProvider>, options: InsightOptions) -> Self {
        Self {
            provider,
            options,
            composition: *BodyCompositionConfig::global(),
            in_flight: DashSet::new(),
        }
    }

    /// Number of requests currently pending
    #[must_use]
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Narrative report for one evaluation
    ///
    /// # Errors
    ///
    /// Returns `ResourceLocked` if the same report is already pending, or an
    /// external-service error if the provider fails or answers with no text
    pub async fn evaluation_report(
        &self,
        client: &Client,
        evaluation: &Evaluation,
    ) -> AppResult<Insight> {
        ensure_owner(client, evaluation)?;
        let payload = EvaluationReportPayload {
            client: client.into(),
            evaluation,
            body_composition: calculate(evaluation, client, &self.composition),
        };
        self.generate(
            InsightKind::EvaluationReport,
            vec![evaluation.id],
            EVALUATION_REPORT_PROMPT,
            &payload,
        )
        .await
    }

    /// Analysis of how `current` differs from `previous`
    ///
    /// Arguments given newest first are reordered by date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for two identical or foreign evaluations,
    /// `ResourceLocked` if the same comparison is pending, or an external-service error
    pub async fn comparison_analysis(
        &self,
        client: &Client,
        previous: &Evaluation,
        current: &Evaluation,
    ) -> AppResult<Insight> {
        ensure_owner(client, previous)?;
        ensure_owner(client, current)?;
        if previous.id == current.id {
            return Err(AppError::invalid_input(
                "Comparison requires two different evaluations",
            ));
        }
        let (previous, current) = if (current.date, current.created_at)
            < (previous.date, previous.created_at)
        {
            debug!("Comparison arguments reordered by date");
            (current, previous)
        } else {
            (previous, current)
        };

        let ascending = [previous, current];
        let table = build_comparison_table(&ascending);
        let deltas = table
            .rows
            .iter()
            .filter(|row| row.has_values())
            .map(|row| FieldDelta {
                field: row.field.key.as_str(),
                label: row.field.label,
                unit: row.field.unit,
                improvement_direction: row.field.improvement_direction,
                previous: row.cells[0].value,
                current: row.cells[1].value,
                delta: row.cells[1].delta,
                trend: row.cells[1].trend,
            })
            .collect();

        let payload = ComparisonPayload {
            client: client.into(),
            scale_type: latest_scale_type(&ascending),
            previous,
            current,
            previous_composition: calculate(previous, client, &self.composition),
            current_composition: calculate(current, client, &self.composition),
            deltas,
        };
        self.generate(
            InsightKind::ComparisonAnalysis,
            vec![previous.id, current.id],
            COMPARISON_ANALYSIS_PROMPT,
            &payload,
        )
        .await
    }

    /// Analysis of the postural deviations recorded in `evaluation`
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when no postural assessment was recorded,
    /// `ResourceLocked` if the same analysis is pending, or an external-service error
    pub async fn postural_analysis(
        &self,
        client: &Client,
        evaluation: &Evaluation,
    ) -> AppResult<Insight> {
        ensure_owner(client, evaluation)?;
        let assessment = evaluation
            .postural
            .as_ref()
            .ok_or_else(|| AppError::missing_field("postural"))?;

        let deviations = PosturalView::ALL
            .iter()
            .map(|view| {
                let labels = assessment.deviations_for(*view).map(PosturalDeviation::label).collect();
                (*view, labels)
            })
            .collect();

        let payload = PosturalPayload {
            client: client.into(),
            date: evaluation.date,
            photographed_views: assessment.captured_views().collect(),
            deviations,
            total_deviations: assessment.total_deviations(),
            observations: assessment.observations.as_deref(),
        };
        self.generate(
            InsightKind::PosturalAnalysis,
            vec![evaluation.id],
            POSTURAL_ANALYSIS_PROMPT,
            &payload,
        )
        .await
    }

    async fn generate<T: Serialize + Sync>(
        &self,
        kind: InsightKind,
        evaluation_ids: Vec<EvaluationId>,
        instructions: &str,
        payload: &T,
    ) -> AppResult<Insight> {
        let _guard = InFlightGuard::acquire(&self.in_flight, (kind, evaluation_ids.clone()))?;

        let payload_json = serde_json::to_string_pretty(payload)?;
        let mut request = ChatRequest::new(vec![
            ChatMessage::system(TRAINER_SYSTEM_PROMPT),
            ChatMessage::user(with_payload(instructions, &payload_json)),
        ])
        .with_temperature(self.options.temperature)
        .with_max_tokens(self.options.max_tokens);
        if let Some(model) = &self.options.model {
            request = request.with_model(model.clone());
        }

        debug!(
            %kind,
            provider = self.provider.name(),
            payload_bytes = payload_json.len(),
            "Requesting insight"
        );
        let started = Instant::now();
        let result = self.provider.complete(&request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let model_label = self
            .options
            .model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
            .to_owned();
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                AppLogger::log_llm_call(kind.as_str(), &model_label, false, elapsed_ms);
                return Err(e);
            }
        };

        let content = response.content.trim();
        if content.is_empty() {
            AppLogger::log_llm_call(kind.as_str(), &response.model, false, elapsed_ms);
            return Err(AppError::external_service(
                self.provider.display_name(),
                "Model returned an empty response",
            ));
        }
        AppLogger::log_llm_call(kind.as_str(), &response.model, true, elapsed_ms);

        Ok(Insight {
            kind,
            evaluation_ids,
            content: content.to_owned(),
            model: response.model,
            usage: response.usage,
            generated_at: Utc::now(),
        })
    }
}

fn ensure_owner(client: &Client, evaluation: &Evaluation) -> AppResult<()> {
    if evaluation.client_id == client.id {
        Ok(())
    } else {
        Err(AppError::invalid_input(format!(
            "Evaluation {} does not belong to client {}",
            evaluation.id, client.id
        )))
    }
}

