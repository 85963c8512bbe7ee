// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for LLM backends.

use async_trait::async_trait;

use crate::error::DomoError;

/// Single-shot text completion against a language model.
///
/// The resolver and the extraction pipeline both talk to the model
/// through this trait, so tests can swap in a scripted fake.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends one prompt and returns the model's text response.
    async fn complete(&self, prompt: &str) -> Result<String, DomoError>;
}
