// ABOUTME: Main library entry point for the Evalfit evaluation platform
// ABOUTME: Provides the evaluation store, comparison sessions, LLM insights, and runtime configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Evalfit
//!
//! Computational core of a fitness-evaluation dashboard. Trainers register
//! body-measurement evaluations for their clients, compare them over time, and
//! request AI-generated narrative reports.
//!
//! ## Architecture
//!
//! - **store**: in-memory, per-client, date-ordered evaluation collection
//! - **session**: a store bound to a capped comparison selection
//! - **llm**: OpenAI-compatible chat completion providers
//! - **insights**: report / comparison / postural prompts with an in-flight guard
//! - **config**: environment-only runtime configuration
//! - **seed**: bundled sample clients and evaluations
//!
//! Calculations live in [`intelligence`], shared types in [`models`] and [`errors`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use evalfit::seed::SampleData;
//! use evalfit::store::EvaluationStore;
//!
//! let store = EvaluationStore::new();
//! let data = SampleData::bundled().unwrap();
//! data.load_into(&store).unwrap();
//! for client in store.clients() {
//!     println!("{} has {} evaluations", client.name, store.evaluations_for(client.id).len());
//! }
//! ```

pub use evalfit_core::{constants, errors, models};
pub use evalfit_intelligence as intelligence;

/// Environment configuration
pub mod config;

/// LLM-backed narrative insights
pub mod insights;

/// LLM provider abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Bundled sample data
pub mod seed;

/// Comparison session over the store
pub mod session;

/// In-memory evaluation store
pub mod store;
