// ABOUTME: Re-exports command modules for evalfit-cli
// ABOUTME: Provides client listing, composition, comparison, and insight commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod clients;
pub mod compare;
pub mod composition;
pub mod insight;
