// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! [`AnthropicProvider`] implements the assistant's `CompletionProvider`
//! seam: one prompt in, the response text out, with a single retry on
//! transient errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

use domo_config::AnthropicConfig;
use domo_core::{CompletionProvider, DomoError, Result};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// Completion provider backed by the Anthropic Messages API.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503, 529).
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    model: String,
    max_tokens: u32,
    max_retries: u32,
    base_url: String,
}

impl AnthropicProvider {
    /// Creates a provider from configuration. Fails when the API key is
    /// missing or a header value cannot be constructed.
    pub fn new(config: &AnthropicConfig) -> Result<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            DomoError::Config(
                "anthropic.api_key is not set (DOMO_ANTHROPIC_API_KEY or domo.toml)".to_string(),
            )
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                DomoError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_str(&config.api_version).map_err(|e| {
                DomoError::Config(format!("invalid API version header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| DomoError::provider_with("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            model: config.default_model.clone(),
            max_tokens: config.max_tokens,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Returns the model this provider sends requests to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one request, retrying once after a short delay on transient
    /// errors.
    async fn send(&self, request: &MessageRequest) -> Result<MessageResponse> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&self.base_url)
                .json(request)
                .send()
                .await
                .map_err(|e| DomoError::provider_with("HTTP request failed", e))?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response
                    .text()
                    .await
                    .map_err(|e| DomoError::provider_with("failed to read response body", e))?;
                let parsed: MessageResponse = serde_json::from_str(&body)
                    .map_err(|e| DomoError::provider_with("failed to parse API response", e))?;
                return Ok(parsed);
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(DomoError::provider(format!("API returned {status}: {body}")));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(DomoError::provider(message));
        }

        Err(last_error
            .unwrap_or_else(|| DomoError::provider("completion request failed after retries")))
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = MessageRequest::single_turn(&self.model, prompt, self.max_tokens);
        let response = self.send(&request).await?;
        debug!(
            model = %response.model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = response.stop_reason.as_deref().unwrap_or("none"),
            "completion finished"
        );
        Ok(response.text())
    }
}

/// True for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503 | 529)
}
