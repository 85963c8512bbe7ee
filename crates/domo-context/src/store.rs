// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user conversation context storage.
//!
//! Keeps one [`ConversationContext`] per user with last-write-wins
//! semantics, plus an optional pinned agent that forces routing until
//! the user unpins.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use domo_core::types::{ConversationContext, Intent, UserId};
use tracing::debug;

/// In-memory context store, keyed by user.
///
/// Every turn overwrites the user's slot unconditionally, so the store
/// always reflects the most recent routing decision even when the
/// handler behind it failed.
#[derive(Debug, Default)]
pub struct ContextStore {
    contexts: DashMap<UserId, ConversationContext>,
    pinned: DashMap<UserId, String>,
}

impl ContextStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record what the user is doing now. Replaces any prior context.
    pub fn record_at(&self, user: &UserId, intent: &Intent, now: DateTime<Utc>) {
        let ctx = ConversationContext::from_intent(intent, now);
        debug!(user = %user, agent = %ctx.agent, action = %ctx.action, "recording context");
        self.contexts.insert(user.clone(), ctx);
    }

    /// Record with the current wall clock.
    pub fn record(&self, user: &UserId, intent: &Intent) {
        self.record_at(user, intent, Utc::now());
    }

    /// The user's most recent context, if any.
    pub fn get(&self, user: &UserId) -> Option<ConversationContext> {
        self.contexts.get(user).map(|entry| entry.clone())
    }

    /// Pin all routing for this user to one agent.
    pub fn pin_agent(&self, user: &UserId, agent: impl Into<String>) {
        let agent = agent.into();
        debug!(user = %user, agent = %agent, "pinning agent");
        self.pinned.insert(user.clone(), agent);
    }

    /// Remove the user's pin, returning to automatic routing.
    pub fn unpin(&self, user: &UserId) {
        self.pinned.remove(user);
    }

    /// The agent this user is pinned to, if any.
    pub fn pinned_agent(&self, user: &UserId) -> Option<String> {
        self.pinned.get(user).map(|entry| entry.clone())
    }
}
