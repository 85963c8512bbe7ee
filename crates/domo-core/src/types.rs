// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across Domo crates.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Parameter bag attached to intents and agent requests.
pub type ParamMap = serde_json::Map<String, serde_json::Value>;

/// How long a conversation context counts as fresh, in minutes.
pub const CONTEXT_FRESH_MINUTES: i64 = 5;

/// Opaque identifier for a chat user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monetary amount in major currency units. Sign encodes direction:
/// negative for outflows, positive for inflows.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub f64);

impl Amount {
    pub fn abs(self) -> f64 {
        self.0.abs()
    }

    /// Reads an amount out of a parameter bag. Tolerates both JSON
    /// numbers and numeric strings, with or without a currency symbol,
    /// since extraction output is not guaranteed to normalize either way.
    pub fn from_params(params: &ParamMap, key: &str) -> Option<Amount> {
        let value = params.get(key)?;
        if let Some(n) = value.as_f64() {
            return Some(Amount(n));
        }
        let text = value.as_str()?.trim();
        let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '$').collect();
        cleaned.parse::<f64>().ok().map(Amount)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Structured interpretation of one user message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Agent the message should be routed to.
    pub agent: String,
    /// Action the agent should perform.
    pub action: String,
    /// Resolver confidence in [0.0, 1.0].
    pub confidence: f64,
    /// Action parameters pulled out of the message.
    #[serde(default)]
    pub params: ParamMap,
}

/// What the user was last doing, kept per user for follow-up turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    pub agent: String,
    pub action: String,
    pub params: ParamMap,
    pub timestamp: DateTime<Utc>,
}

impl ConversationContext {
    pub fn from_intent(intent: &Intent, now: DateTime<Utc>) -> Self {
        Self {
            agent: intent.agent.clone(),
            action: intent.action.clone(),
            params: intent.params.clone(),
            timestamp: now,
        }
    }

    /// Fresh means strictly younger than [`CONTEXT_FRESH_MINUTES`].
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.timestamp) < Duration::minutes(CONTEXT_FRESH_MINUTES)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

/// An intent withheld behind a clarification question, waiting for the
/// user's next message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub intent: Intent,
    pub question: String,
    pub created_at: DateTime<Utc>,
}

/// Work order handed to an agent after routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub action: String,
    pub params: ParamMap,
    /// The raw user message, for handlers that need the original phrasing.
    pub message: String,
}

/// Per-turn execution state visible to agent handlers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub user_id: UserId,
    /// When set, handlers must withhold side effects and describe the
    /// action instead of performing it.
    pub approval_required: bool,
    /// Ambient key/value state carried across the turn.
    #[serde(default)]
    pub ambient: ParamMap,
}

impl ExecutionContext {
    pub fn new(user_id: UserId, approval_required: bool) -> Self {
        Self {
            user_id,
            approval_required,
            ambient: ParamMap::new(),
        }
    }

    pub fn with_ambient(mut self, ambient: ParamMap) -> Self {
        self.ambient = ambient;
        self
    }
}

/// What an agent handler produced for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl AgentReply {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// One inbound chat turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    pub message: String,
    /// Channel metadata the caller wants carried into the turn.
    #[serde(default)]
    pub extra: ParamMap,
}

impl TurnRequest {
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extra: ParamMap::new(),
        }
    }
}

/// The reply for one chat turn. Never an error: failures are folded
/// into `message` so the channel always has something to say.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub message: String,
    /// Name of the agent the turn was routed to.
    pub agent: String,
    /// True when the underlying action was withheld pending approval.
    pub requires_approval: bool,
    /// True only when a domain agent handler ran to completion.
    pub handled: bool,
}

/// One action an agent can perform, with a short description used when
/// building resolver prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub action: &'static str,
    pub description: &'static str,
}

/// Prompt-facing summary of a registered agent.
#[derive(Debug, Clone)]
pub struct AgentProfile {
    pub name: String,
    pub capabilities: Vec<Capability>,
}
