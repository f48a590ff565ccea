// ABOUTME: In-memory evaluation store keyed by client with date-ordered evaluation lists
// ABOUTME: Idempotent per-day creation, prepopulated blanks, and validated in-place edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Evaluation Store
//!
//! Holds clients and their evaluations for the lifetime of the process.
//! Each client's list is kept sorted by date and every write happens while
//! holding that client's map entry, so a write is all-or-nothing with respect
//! to other callers.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use dashmap::DashMap;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    validate_skinfolds, Bioimpedance, BodyMeasurements, BoneDiameters, Client, ClientId,
    Evaluation, EvaluationId, PosturalAssessment, SkinfoldSite, ValidationErrors,
};
use evalfit_core::constants::validation::MAX_BODY_FAT_PERCENT;

/// Process-lifetime store of clients and evaluations
#[derive(Debug, Default)]
pub struct EvaluationStore {
    clients: DashMap<ClientId, Client>,
    evaluations: DashMap<ClientId, Vec<Evaluation>>,
    owners: DashMap<EvaluationId, ClientId>,
}

impl EvaluationStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a client
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with field details if the client fails validation
    pub fn register_client(&self, client: Client) -> AppResult<Client> {
        if let Err(errors) = client.validate() {
            log_rejection("register_client", &errors);
            return Err(errors.into());
        }
        info!(client_id = %client.id, name = %client.name, "Client registered");
        self.evaluations.entry(client.id).or_default();
        self.clients.insert(client.id, client.clone());
        Ok(client)
    }

    /// Client by id
    #[must_use]
    pub fn client(&self, client_id: ClientId) -> Option<Client> {
        self.clients.get(&client_id).map(|c| c.clone())
    }

    /// All clients sorted by name
    #[must_use]
    pub fn clients(&self) -> Vec<Client> {
        let mut clients: Vec<Client> = self.clients.iter().map(|c| c.clone()).collect();
        clients.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        clients
    }

    fn require_client(&self, client_id: ClientId) -> AppResult<Client> {
        self.client(client_id)
            .ok_or_else(|| AppError::not_found(format!("Client {client_id}")))
    }

    /// Today's evaluation for `client_id`, created if absent
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the client is unknown
    pub fn create_evaluation(&self, client_id: ClientId) -> AppResult<Evaluation> {
        self.create_evaluation_on(client_id, Local::now().date_naive())
    }

    /// Evaluation for `client_id` on `date`, created if absent
    ///
    /// A new evaluation starts with the client's last known weight and height.
    /// Calling this again for the same day returns the existing record.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the client is unknown
    pub fn create_evaluation_on(&self, client_id: ClientId, date: NaiveDate) -> AppResult<Evaluation> {
        let client = self.require_client(client_id)?;
        let mut list = self.evaluations.entry(client_id).or_default();

        if let Some(existing) = list.iter().find(|e| e.date == date) {
            debug!(client_id = %client_id, evaluation_id = %existing.id, %date, "Evaluation already exists for date");
            return Ok(existing.clone());
        }

        let position = list.partition_point(|e| e.date < date);
        let earlier = &list[..position];

        let mut evaluation = Evaluation::blank(client_id, date);
        evaluation.measurements.weight_kg = last_positive(earlier, |e| e.measurements.weight_kg);
        evaluation.measurements.height_cm = last_positive(earlier, |e| e.measurements.height_cm)
            .or_else(|| (client.height_cm > 0.0).then_some(client.height_cm));

        list.insert(position, evaluation.clone());
        self.owners.insert(evaluation.id, client_id);

        AppLogger::log_evaluation_event(
            &client_id.to_string(),
            &evaluation.id.to_string(),
            "created",
        );
        Ok(evaluation)
    }

    /// Insert a fully populated evaluation (used when seeding)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown client, `InvalidInput` when the
    /// record fails validation or the client already has an evaluation that day
    pub fn import_evaluation(&self, evaluation: Evaluation) -> AppResult<Evaluation> {
        self.require_client(evaluation.client_id)?;
        if let Err(errors) = evaluation.validate() {
            log_rejection("import_evaluation", &errors);
            return Err(errors.into());
        }
        let mut list = self.evaluations.entry(evaluation.client_id).or_default();
        if list.iter().any(|e| e.date == evaluation.date || e.id == evaluation.id) {
            return Err(AppError::invalid_input(format!(
                "Client {} already has an evaluation on {}",
                evaluation.client_id, evaluation.date
            )));
        }
        let position = list.partition_point(|e| e.date < evaluation.date);
        list.insert(position, evaluation.clone());
        self.owners.insert(evaluation.id, evaluation.client_id);
        Ok(evaluation)
    }

    /// Evaluation by id
    #[must_use]
    pub fn evaluation(&self, id: EvaluationId) -> Option<Evaluation> {
        let client_id = *self.owners.get(&id)?;
        self.evaluations
            .get(&client_id)?
            .iter()
            .find(|e| e.id == id)
            .cloned()
    }

    /// A client's evaluations, oldest first
    #[must_use]
    pub fn evaluations_for(&self, client_id: ClientId) -> Vec<Evaluation> {
        self.evaluations
            .get(&client_id)
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    /// A client's most recent evaluation
    #[must_use]
    pub fn latest_for(&self, client_id: ClientId) -> Option<Evaluation> {
        self.evaluations
            .get(&client_id)
            .and_then(|list| list.last().cloned())
    }

    /// Total number of stored evaluations
    #[must_use]
    pub fn evaluation_count(&self) -> usize {
        self.owners.len()
    }

    /// Replace the anthropometric measurements
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for out-of-range values
    pub fn update_measurements(
        &self,
        id: EvaluationId,
        measurements: BodyMeasurements,
    ) -> AppResult<Evaluation> {
        measurements
            .validate()
            .map_err(|e| rejected("update_measurements", e))?;
        self.modify(id, "measurements", |evaluation| {
            evaluation.measurements = measurements;
        })
    }

    /// Set or clear the measured body-fat percentage
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for out-of-range values
    pub fn update_body_fat(&self, id: EvaluationId, percentage: Option<f64>) -> AppResult<Evaluation> {
        let mut errors = ValidationErrors::default();
        errors.check_range("bodyFatPercentage", percentage, 0.0, MAX_BODY_FAT_PERCENT);
        errors
            .into_result()
            .map_err(|e| rejected("update_body_fat", e))?;
        self.modify(id, "body_fat", |evaluation| {
            evaluation.body_fat_percentage = percentage;
        })
    }

    /// Replace the caliper readings
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for out-of-range values
    pub fn update_skinfolds(
        &self,
        id: EvaluationId,
        skinfolds: BTreeMap<SkinfoldSite, f64>,
    ) -> AppResult<Evaluation> {
        validate_skinfolds(&skinfolds).map_err(|e| rejected("update_skinfolds", e))?;
        self.modify(id, "skinfolds", |evaluation| {
            evaluation.skinfolds = skinfolds;
        })
    }

    /// Replace the bone diameters
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for out-of-range values
    pub fn update_bone_diameters(
        &self,
        id: EvaluationId,
        diameters: BoneDiameters,
    ) -> AppResult<Evaluation> {
        diameters
            .validate()
            .map_err(|e| rejected("update_bone_diameters", e))?;
        self.modify(id, "bone_diameters", |evaluation| {
            evaluation.bone_diameters = diameters;
        })
    }

    /// Set or clear the device reading
    ///
    /// Switching device replaces the whole payload.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for invalid device fields
    pub fn update_bioimpedance(
        &self,
        id: EvaluationId,
        bioimpedance: Option<Bioimpedance>,
    ) -> AppResult<Evaluation> {
        if let Some(reading) = &bioimpedance {
            reading
                .validate()
                .map_err(|e| rejected("update_bioimpedance", e))?;
        }
        self.modify(id, "bioimpedance", |evaluation| {
            evaluation.bioimpedance = bioimpedance;
        })
    }

    /// Set or clear the postural assessment
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id or `InvalidInput` for a blank photo reference
    pub fn update_postural(
        &self,
        id: EvaluationId,
        postural: Option<PosturalAssessment>,
    ) -> AppResult<Evaluation> {
        if let Some(assessment) = &postural {
            let mut errors = ValidationErrors::default();
            for (view, photo) in &assessment.photos {
                if photo.uri.trim().is_empty() {
                    errors.push(
                        format!("photos.{}", view.label()),
                        "Photo reference must not be empty",
                    );
                }
            }
            errors
                .into_result()
                .map_err(|e| rejected("update_postural", e))?;
        }
        self.modify(id, "postural", |evaluation| {
            evaluation.postural = postural;
        })
    }

    /// Set or clear trainer notes
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown id
    pub fn update_notes(&self, id: EvaluationId, notes: Option<String>) -> AppResult<Evaluation> {
        let notes = notes.filter(|n| !n.trim().is_empty());
        self.modify(id, "notes", |evaluation| {
            evaluation.notes = notes;
        })
    }

    fn modify<F>(&self, id: EvaluationId, section: &str, apply: F) -> AppResult<Evaluation>
    where
        F: FnOnce(&mut Evaluation),
    {
        let not_found = || AppError::not_found(format!("Evaluation {id}"));
        let client_id = *self.owners.get(&id).ok_or_else(not_found)?;
        let mut list = self.evaluations.get_mut(&client_id).ok_or_else(not_found)?;
        let evaluation = list.iter_mut().find(|e| e.id == id).ok_or_else(not_found)?;

        apply(evaluation);
        evaluation.touch();

        AppLogger::log_evaluation_event(
            &client_id.to_string(),
            &id.to_string(),
            &format!("updated {section}"),
        );
        Ok(evaluation.clone())
    }
}

fn last_positive<F>(list: &[Evaluation], read: F) -> Option<f64>
where
    F: Fn(&Evaluation) -> Option<f64>,
{
    list.iter()
        .rev()
        .filter_map(read)
        .find(|v| v.is_finite() && *v > 0.0)
}

fn log_rejection(operation: &str, errors: &ValidationErrors) {
    let fields: Vec<&str> = errors.fields().collect();
    AppLogger::log_validation_failure(operation, &fields);
}

fn rejected(operation: &str, errors: ValidationErrors) -> AppError {
    log_rejection(operation, &errors);
    warn!(operation, "Write rejected, evaluation left unchanged");
    errors.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BiologicalSex;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_creation_keeps_dates_sorted() {
        let store = EvaluationStore::new();
        let client = store
            .register_client(Client::new("Bruno", 41, BiologicalSex::Male, 178.0))
            .unwrap();
        store.create_evaluation_on(client.id, day(20)).unwrap();
        store.create_evaluation_on(client.id, day(3)).unwrap();
        store.create_evaluation_on(client.id, day(11)).unwrap();

        let dates: Vec<NaiveDate> = store
            .evaluations_for(client.id)
            .iter()
            .map(|e| e.date)
            .collect();
        assert_eq!(dates, vec![day(3), day(11), day(20)]);
        assert_eq!(store.latest_for(client.id).unwrap().date, day(20));
    }

    #[test]
    fn test_update_notes_trims_blank_to_none() {
        let store = EvaluationStore::new();
        let client = store
            .register_client(Client::new("Carla", 29, BiologicalSex::Female, 160.0))
            .unwrap();
        let evaluation = store.create_evaluation_on(client.id, day(1)).unwrap();
        let updated = store.update_notes(evaluation.id, Some("   ".into())).unwrap();
        assert_eq!(updated.notes, None);
    }
}
