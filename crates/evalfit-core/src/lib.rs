// ABOUTME: Core types and constants for the Evalfit fitness evaluation platform
// ABOUTME: Foundation crate with error handling, evaluation models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Evalfit Core
//!
//! Foundation crate providing shared types and constants for the Evalfit
//! evaluation platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Formula constants, selection caps, and validation limits
//! - **models**: Clients, evaluations, bioimpedance payloads, postural assessments

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (Client, Evaluation, Bioimpedance, postural types)
pub mod models;
