// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the complete assistant stack with a mock
//! completion provider and in-memory stores, and exposes `send()` to drive
//! whole turns through the orchestrator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use domo_agents::{
    AgentRegistry, BudgetAgent, CannedTravelDesk, LoggingCalendar, MemoryLedger, TripAgent,
};
use domo_core::{ParamMap, TurnRequest, TurnResponse, UserId};
use domo_ingest::ExtractionCache;
use domo_orchestrator::Orchestrator;

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    failure: Option<String>,
    ambient: ParamMap,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            failure: None,
            ambient: ParamMap::new(),
        }
    }

    /// Pre-load the mock provider's response queue.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Make every provider call fail, for driving error-path turns.
    pub fn with_failing_provider(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Add one ambient key/value pair handed to every agent call.
    pub fn with_ambient(mut self, key: &str, value: serde_json::Value) -> Self {
        self.ambient.insert(key.to_string(), value);
        self
    }

    /// Build the harness, wiring the real agents to in-memory stores.
    pub fn build(self) -> TestHarness {
        let provider = Arc::new(match self.failure {
            Some(message) => MockProvider::failing(message),
            None if self.responses.is_empty() => MockProvider::new(),
            None => MockProvider::with_responses(self.responses),
        });
        let ledger = MemoryLedger::shared();
        let cache = Arc::new(ExtractionCache::new());
        let calendar = LoggingCalendar::shared();

        let mut registry = AgentRegistry::new("budget");
        registry.register(Arc::new(BudgetAgent::new(
            provider.clone(),
            ledger.clone(),
            cache.clone(),
        )));
        registry.register(Arc::new(TripAgent::new(
            Arc::new(CannedTravelDesk::new()),
            calendar.clone(),
        )));

        let orchestrator =
            Orchestrator::new(provider.clone(), registry).with_ambient(self.ambient);

        TestHarness {
            provider,
            ledger,
            cache,
            calendar,
            orchestrator,
        }
    }
}

/// A complete assistant stack over mock collaborators.
///
/// All stores are exposed so tests can seed state (an aged cache entry, a
/// pre-recorded transaction) and assert on it afterwards.
pub struct TestHarness {
    /// The mock completion provider behind both resolution and extraction.
    pub provider: Arc<MockProvider>,
    /// The budget agent's transaction store.
    pub ledger: Arc<MemoryLedger>,
    /// The statement extraction cache.
    pub cache: Arc<ExtractionCache>,
    /// The trip agent's calendar sink.
    pub calendar: Arc<LoggingCalendar>,
    /// The orchestrator under test.
    pub orchestrator: Orchestrator,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Drive one full turn for `user`.
    pub async fn send(&self, user: &str, message: &str) -> TurnResponse {
        self.orchestrator
            .handle_user_request(&UserId::new(user), TurnRequest::text(message))
            .await
    }

    /// Drive one full turn at a simulated instant.
    pub async fn send_at(&self, user: &str, message: &str, now: DateTime<Utc>) -> TurnResponse {
        self.orchestrator
            .handle_user_request_at(&UserId::new(user), TurnRequest::text(message), now)
            .await
    }

    /// Queue a raw provider response.
    pub async fn enqueue_response(&self, text: impl Into<String>) {
        self.provider.enqueue(text).await;
    }

    /// Queue a well-formed resolver reply, saving tests the JSON assembly.
    pub async fn enqueue_intent(
        &self,
        agent: &str,
        action: &str,
        confidence: f64,
        params: serde_json::Value,
    ) {
        let reply = json!({
            "agent": agent,
            "action": action,
            "confidence": confidence,
            "params": params,
        });
        self.provider.enqueue(reply.to_string()).await;
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
