// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! responses, so resolver and agent behavior can be tested without external
//! API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use domo_core::{CompletionProvider, DomoError, Result};

/// A mock completion provider that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a
/// default "mock response" text is returned. A provider built with
/// [`MockProvider::failing`] errors on every call instead.
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    failure: Option<String>,
}

impl MockProvider {
    /// Create a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            failure: None,
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            failure: None,
        }
    }

    /// Create a provider whose every completion fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            failure: Some(message.into()),
        }
    }

    /// Add a response to the end of the queue.
    pub async fn enqueue(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Number of responses still queued.
    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        if let Some(message) = &self.failure {
            return Err(DomoError::provider(message.clone()));
        }
        Ok(self.next_response().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let provider = MockProvider::new();
        assert_eq!(provider.complete("hi").await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn queued_responses_returned_in_order() {
        let provider = MockProvider::with_responses(vec![
            "first".to_string(),
            "second".to_string(),
        ]);
        assert_eq!(provider.complete("a").await.unwrap(), "first");
        assert_eq!(provider.complete("b").await.unwrap(), "second");
        // Queue exhausted, falls back to default
        assert_eq!(provider.complete("c").await.unwrap(), "mock response");
    }

    #[tokio::test]
    async fn enqueue_after_construction() {
        let provider = MockProvider::new();
        provider.enqueue("dynamic").await;
        assert_eq!(provider.remaining().await, 1);
        assert_eq!(provider.complete("x").await.unwrap(), "dynamic");
    }

    #[tokio::test]
    async fn failing_provider_always_errors() {
        let provider = MockProvider::failing("simulated outage");
        let err = provider.complete("x").await.unwrap_err();
        assert!(err.to_string().contains("simulated outage"));
        assert!(provider.complete("y").await.is_err());
    }
}
