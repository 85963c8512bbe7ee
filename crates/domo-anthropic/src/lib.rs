// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Messages API integration for the Domo assistant.
//!
//! Provides [`AnthropicProvider`], the production `CompletionProvider`
//! used for intent resolution, statement extraction, and general queries.

pub mod client;
pub mod types;

pub use client::AnthropicProvider;
pub use types::{ApiMessage, MessageRequest, MessageResponse};
