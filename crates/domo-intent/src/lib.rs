// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent resolution for the Domo assistant.
//!
//! Turns free-form chat messages into structured [`domo_core::Intent`]
//! values using a single LLM completion per message, with a deterministic
//! fallback when the model's reply cannot be used.

pub mod prompt;
pub mod resolver;

pub use prompt::build_resolver_prompt;
pub use resolver::{
    fallback_intent, parse_intent_response, IntentResolver, FALLBACK_ACTION, FALLBACK_AGENT,
    FALLBACK_CONFIDENCE,
};
