// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pending confirmation storage.
//!
//! When the switch guard withholds an intent behind a question, the
//! intent parks here until the user's next message consumes it.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use domo_core::types::{PendingConfirmation, UserId};

/// How long a parked confirmation stays answerable, in minutes.
pub const PENDING_TTL_MINUTES: i64 = 2;

/// One parked confirmation per user. A new question replaces any
/// unanswered one.
#[derive(Debug, Default)]
pub struct PendingStore {
    entries: DashMap<UserId, PendingConfirmation>,
}

impl PendingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a confirmation for this user.
    pub fn put(&self, user: &UserId, pending: PendingConfirmation) {
        self.entries.insert(user.clone(), pending);
    }

    /// Remove and return the user's parked confirmation if it is still
    /// within its TTL. Expired entries are dropped and `None` is
    /// returned, so a stale question can never capture an unrelated
    /// later message.
    pub fn take_live_at(&self, user: &UserId, now: DateTime<Utc>) -> Option<PendingConfirmation> {
        let (_, pending) = self.entries.remove(user)?;
        let age = now.signed_duration_since(pending.created_at);
        if age < Duration::minutes(PENDING_TTL_MINUTES) {
            Some(pending)
        } else {
            None
        }
    }

    /// Remove and return with the current wall clock.
    pub fn take_live(&self, user: &UserId) -> Option<PendingConfirmation> {
        self.take_live_at(user, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domo_core::types::{Intent, ParamMap};

    fn pending_at(created_at: DateTime<Utc>) -> PendingConfirmation {
        PendingConfirmation {
            intent: Intent {
                agent: "trip".to_string(),
                action: "search_flights".to_string(),
                confidence: 0.7,
                params: ParamMap::new(),
            },
            question: "Switch to trip?".to_string(),
            created_at,
        }
    }

    #[test]
    fn take_returns_live_entry_once() {
        let store = PendingStore::new();
        let user = UserId::from("mia");
        let now = Utc::now();

        store.put(&user, pending_at(now));

        let taken = store.take_live_at(&user, now + Duration::seconds(30)).unwrap();
        assert_eq!(taken.intent.agent, "trip");

        // Consumed on first take.
        assert!(store
            .take_live_at(&user, now + Duration::seconds(31))
            .is_none());
    }

    #[test]
    fn expired_entry_is_dropped() {
        let store = PendingStore::new();
        let user = UserId::from("mia");
        let now = Utc::now();

        store.put(&user, pending_at(now));

        assert!(store
            .take_live_at(&user, now + Duration::minutes(PENDING_TTL_MINUTES))
            .is_none());
        // The expired entry was removed, not left behind.
        assert!(store.take_live_at(&user, now).is_none());
    }

    #[test]
    fn newer_question_replaces_older() {
        let store = PendingStore::new();
        let user = UserId::from("mia");
        let now = Utc::now();

        let mut first = pending_at(now);
        first.question = "first?".to_string();
        store.put(&user, first);

        let mut second = pending_at(now);
        second.question = "second?".to_string();
        store.put(&user, second);

        let taken = store.take_live_at(&user, now).unwrap();
        assert_eq!(taken.question, "second?");
    }
}
