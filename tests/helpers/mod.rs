// ABOUTME: Shared test helpers for integration tests that talk to an LLM
// ABOUTME: Exports a scripted provider that replays canned replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod scripted_llm;
