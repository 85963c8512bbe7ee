// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-backed intent resolution.
//!
//! One completion call per message. The model's JSON reply is parsed
//! into an [`Intent`]; anything that cannot be parsed degrades to the
//! fallback intent so a malformed completion never takes a turn down.

use std::sync::Arc;

use domo_core::traits::CompletionProvider;
use domo_core::types::{AgentProfile, ConversationContext, Intent, ParamMap};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::prompt::build_resolver_prompt;

/// Agent the fallback intent routes to.
pub const FALLBACK_AGENT: &str = "budget";

/// Action the fallback intent carries.
pub const FALLBACK_ACTION: &str = "general_query";

/// Confidence assigned to fallback intents, low enough that the switch
/// guard never treats them as a confident redirect.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Wire shape of the model's routing reply. `agent`, `action`, and
/// `confidence` are required; their absence is a parse failure.
#[derive(Debug, Deserialize)]
struct RawIntent {
    agent: String,
    action: String,
    confidence: f64,
    #[serde(default)]
    params: ParamMap,
}

/// Resolves user messages into structured intents via one LLM call.
pub struct IntentResolver {
    provider: Arc<dyn CompletionProvider>,
    profiles: Vec<AgentProfile>,
}

impl IntentResolver {
    /// Creates a resolver over the given provider and agent catalog.
    pub fn new(provider: Arc<dyn CompletionProvider>, profiles: Vec<AgentProfile>) -> Self {
        Self { provider, profiles }
    }

    /// Resolve one user message into an intent.
    ///
    /// Never fails: provider errors and unparseable completions both
    /// yield [`fallback_intent`]. `prior` biases the prompt toward the
    /// agent the user was just talking to; callers pass it only while
    /// it is still fresh.
    pub async fn resolve(&self, message: &str, prior: Option<&ConversationContext>) -> Intent {
        let prompt = build_resolver_prompt(&self.profiles, message, prior);

        let response = match self.provider.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Intent resolution call failed: {e}");
                return fallback_intent(message);
            }
        };

        match parse_intent_response(&response) {
            Some(intent) => {
                debug!(
                    agent = %intent.agent,
                    action = %intent.action,
                    confidence = intent.confidence,
                    "Resolved intent"
                );
                intent
            }
            None => fallback_intent(message),
        }
    }
}

/// Parse the model's routing reply into an [`Intent`].
///
/// Handles JSON objects, markdown code block wrapping, and surrounding
/// prose. Returns `None` when the reply has no parseable object or the
/// object is missing a required field. Confidence is clamped to [0, 1].
pub fn parse_intent_response(response: &str) -> Option<Intent> {
    let trimmed = response.trim();

    // Slice out the outermost JSON object, tolerating code fences and
    // prose around it.
    let start = trimmed.find('{').unwrap_or(0);
    let end = trimmed.rfind('}').map(|i| i + 1).unwrap_or(trimmed.len());
    let json_str = &trimmed[start..end.max(start)];

    match serde_json::from_str::<RawIntent>(json_str) {
        Ok(raw) => Some(Intent {
            agent: raw.agent,
            action: raw.action,
            confidence: raw.confidence.clamp(0.0, 1.0),
            params: raw.params,
        }),
        Err(e) => {
            warn!("Failed to parse intent response: {e}");
            debug!("Raw response: {response}");
            None
        }
    }
}

/// The intent a turn degrades to when resolution cannot produce one.
///
/// Routes to the budget agent's general query with the raw message in
/// params, so the user always gets an answer instead of an error.
pub fn fallback_intent(message: &str) -> Intent {
    let mut params = ParamMap::new();
    params.insert(
        "message".to_string(),
        serde_json::Value::String(message.to_string()),
    );
    Intent {
        agent: FALLBACK_AGENT.to_string(),
        action: FALLBACK_ACTION.to_string(),
        confidence: FALLBACK_CONFIDENCE,
        params,
    }
}
