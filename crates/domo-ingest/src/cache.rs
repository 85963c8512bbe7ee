// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-user extraction cache.
//!
//! Bridges the extract turn and the commit turn: candidate records
//! wait here, under a TTL, until the user confirms or the batch goes
//! stale. At most one live batch per user; a new extraction replaces
//! the old batch outright.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use domo_core::types::UserId;
use tracing::debug;

use crate::types::{CachedExtraction, ExtractedRecord};

/// How long a cached batch stays committable, in minutes.
pub const EXTRACTION_TTL_MINUTES: i64 = 30;

/// In-memory cache of extracted record batches, keyed by user.
#[derive(Debug, Default)]
pub struct ExtractionCache {
    entries: DashMap<UserId, CachedExtraction>,
}

impl ExtractionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache a batch for this user, stamping it with `now`. Replaces
    /// any existing batch, it never merges.
    pub fn put_at(&self, user: &UserId, records: Vec<ExtractedRecord>, now: DateTime<Utc>) {
        debug!(user = %user, count = records.len(), "caching extracted batch");
        self.entries.insert(
            user.clone(),
            CachedExtraction {
                records,
                created_at: now,
            },
        );
    }

    /// Cache with the current wall clock.
    pub fn put(&self, user: &UserId, records: Vec<ExtractedRecord>) {
        self.put_at(user, records, Utc::now());
    }

    /// The user's cached batch, if present and younger than the TTL.
    ///
    /// Reading does not consume the batch. An expired batch reads as
    /// absent and is dropped so it can never be committed later.
    pub fn get_at(&self, user: &UserId, now: DateTime<Utc>) -> Option<Vec<ExtractedRecord>> {
        let age = {
            let entry = self.entries.get(user)?;
            now.signed_duration_since(entry.created_at)
        };

        if age < Duration::minutes(EXTRACTION_TTL_MINUTES) {
            self.entries.get(user).map(|entry| entry.records.clone())
        } else {
            debug!(user = %user, "dropping expired extraction batch");
            self.entries.remove(user);
            None
        }
    }

    /// Read with the current wall clock.
    pub fn get(&self, user: &UserId) -> Option<Vec<ExtractedRecord>> {
        self.get_at(user, Utc::now())
    }

    /// Drop the user's batch. Called once a commit has been attempted,
    /// whatever the outcome, so a batch is committed at most once.
    pub fn remove(&self, user: &UserId) {
        self.entries.remove(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domo_core::types::Amount;

    fn record(counterparty: &str, amount: f64) -> ExtractedRecord {
        ExtractedRecord {
            date: "2026-08-01".to_string(),
            counterparty: counterparty.to_string(),
            amount: Amount(amount),
            category: None,
        }
    }

    #[test]
    fn put_then_get_returns_same_records() {
        let cache = ExtractionCache::new();
        let user = UserId::from("mia");
        let records = vec![record("Starbucks", -6.5), record("Payroll", 2400.0)];

        cache.put(&user, records.clone());
        assert_eq!(cache.get(&user), Some(records));
    }

    #[test]
    fn get_is_not_consuming() {
        let cache = ExtractionCache::new();
        let user = UserId::from("mia");

        cache.put(&user, vec![record("Starbucks", -6.5)]);
        assert!(cache.get(&user).is_some());
        assert!(cache.get(&user).is_some());
    }

    #[test]
    fn expired_batch_reads_as_absent() {
        let cache = ExtractionCache::new();
        let user = UserId::from("mia");
        let now = Utc::now();

        cache.put_at(&user, vec![record("Starbucks", -6.5)], now);

        assert!(cache
            .get_at(&user, now + Duration::minutes(31))
            .is_none());
        // And the entry is gone, not merely hidden.
        assert!(cache.get_at(&user, now).is_none());
    }

    #[test]
    fn ttl_boundary_is_exclusive() {
        let cache = ExtractionCache::new();
        let user = UserId::from("mia");
        let now = Utc::now();

        cache.put_at(&user, vec![record("Starbucks", -6.5)], now);
        assert!(cache
            .get_at(&user, now + Duration::minutes(EXTRACTION_TTL_MINUTES) - Duration::seconds(1))
            .is_some());

        cache.put_at(&user, vec![record("Starbucks", -6.5)], now);
        assert!(cache
            .get_at(&user, now + Duration::minutes(EXTRACTION_TTL_MINUTES))
            .is_none());
    }

    #[test]
    fn new_batch_replaces_old() {
        let cache = ExtractionCache::new();
        let user = UserId::from("mia");

        cache.put(&user, vec![record("Starbucks", -6.5)]);
        cache.put(&user, vec![record("Delta", -412.0)]);

        let records = cache.get(&user).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].counterparty, "Delta");
    }

    #[test]
    fn remove_drops_batch() {
        let cache = ExtractionCache::new();
        let user = UserId::from("mia");

        cache.put(&user, vec![record("Starbucks", -6.5)]);
        cache.remove(&user);
        assert!(cache.get(&user).is_none());
    }

    #[test]
    fn users_are_isolated() {
        let cache = ExtractionCache::new();
        let mia = UserId::from("mia");
        let noah = UserId::from("noah");

        cache.put(&mia, vec![record("Starbucks", -6.5)]);
        assert!(cache.get(&noah).is_none());
        cache.remove(&noah);
        assert!(cache.get(&mia).is_some());
    }
}
