// ABOUTME: Scripted LLM provider for insight tests without network access
// ABOUTME: Replays queued replies, records requests, and can hold the first call open
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use evalfit::errors::{AppError, AppResult};
use evalfit::llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, TokenUsage};
use tokio::sync::Notify;

/// Provider that answers from a queue of canned replies
///
/// Each call claims the next reply as soon as it arrives. When built with
/// [`ScriptedProvider::holding_first`], the first call then signals `started`
/// and waits for `release` before answering, which lets a test issue a second
/// request while the first one is still in flight.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<AppResult<String>>>,
    requests: Mutex<Vec<ChatRequest>>,
    calls: AtomicUsize,
    hold_first: bool,
    /// Notified when a held call has started
    pub started: Notify,
    /// Notify to let a held call answer
    pub release: Notify,
}

impl ScriptedProvider {
    /// Provider answering with `replies` in order
    pub fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            hold_first: false,
            started: Notify::new(),
            release: Notify::new(),
        }
    }

    /// Provider that always answers with `content`
    pub fn answering(content: &str, times: usize) -> Self {
        Self::new((0..times).map(|_| Ok(content.to_owned())).collect())
    }

    /// Same as [`Self::new`], but the first call blocks until released
    pub fn holding_first(replies: Vec<AppResult<String>>) -> Self {
        Self {
            hold_first: true,
            ..Self::new(replies)
        }
    }

    /// Number of completed or pending calls
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::text_only()
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        // Claimed on arrival so replies follow call order, not completion order
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::internal("No scripted reply left")));

        if self.hold_first && call == 0 {
            self.started.notify_one();
            self.release.notified().await;
        }

        reply.map(|content| ChatResponse {
            content,
            model: request
                .model
                .clone()
                .unwrap_or_else(|| "scripted-model".to_owned()),
            usage: Some(TokenUsage {
                prompt_tokens: 120,
                completion_tokens: 40,
                total_tokens: 160,
            }),
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}
