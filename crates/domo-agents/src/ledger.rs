// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transaction storage behind the budget agent.
//!
//! The [`Ledger`] trait is the seam between the agent and whatever holds the
//! books. [`MemoryLedger`] is the in-process implementation used by the shell
//! and by tests; a persistent backend would implement the same trait.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use domo_core::{Amount, DomoError, Result, UserId};
use serde::{Deserialize, Serialize};

use domo_ingest::ExtractedRecord;

/// A committed ledger entry. Negative amounts are spending, positive are
/// income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub counterparty: String,
    pub amount: Amount,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<ExtractedRecord> for Transaction {
    fn from(record: ExtractedRecord) -> Self {
        Self {
            date: record.date,
            counterparty: record.counterparty,
            amount: record.amount,
            category: record.category,
        }
    }
}

/// Storage seam for the budget agent.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Appends a transaction to the user's ledger.
    async fn record(&self, user: &UserId, tx: Transaction) -> Result<()>;

    /// Sum of all recorded amounts for the user.
    async fn balance(&self, user: &UserId) -> Result<Amount>;

    /// Most recent transactions, newest first, capped at `limit`.
    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<Transaction>>;

    /// Tags every transaction whose counterparty contains `pattern`
    /// (case-insensitive) with `category`. Returns how many matched.
    async fn set_category(&self, user: &UserId, pattern: &str, category: &str) -> Result<usize>;
}

/// In-memory ledger keyed by user. Entries live for the lifetime of the
/// process.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    books: DashMap<UserId, Vec<Transaction>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn record(&self, user: &UserId, tx: Transaction) -> Result<()> {
        self.books.entry(user.clone()).or_default().push(tx);
        Ok(())
    }

    async fn balance(&self, user: &UserId) -> Result<Amount> {
        let total = self
            .books
            .get(user)
            .map(|txs| txs.iter().map(|tx| tx.amount.0).sum())
            .unwrap_or(0.0);
        Ok(Amount(total))
    }

    async fn recent(&self, user: &UserId, limit: usize) -> Result<Vec<Transaction>> {
        let mut txs = self
            .books
            .get(user)
            .map(|txs| txs.clone())
            .unwrap_or_default();
        txs.reverse();
        txs.truncate(limit);
        Ok(txs)
    }

    async fn set_category(&self, user: &UserId, pattern: &str, category: &str) -> Result<usize> {
        let needle = pattern.to_lowercase();
        if needle.is_empty() {
            return Err(DomoError::agent("cannot categorize with an empty pattern"));
        }
        let mut tagged = 0;
        if let Some(mut txs) = self.books.get_mut(user) {
            for tx in txs.iter_mut() {
                if tx.counterparty.to_lowercase().contains(&needle) {
                    tx.category = Some(category.to_string());
                    tagged += 1;
                }
            }
        }
        Ok(tagged)
    }
}
