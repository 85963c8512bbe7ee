// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types for the extraction pipeline.

use chrono::{DateTime, Utc};
use domo_core::types::Amount;
use serde::{Deserialize, Serialize};

/// One candidate transaction pulled out of a statement document.
///
/// Dates stay as the strings the model produced; normalization is the
/// ledger collaborator's problem, not the extraction pipeline's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Transaction date as written in the statement.
    pub date: String,
    /// Merchant or counterparty name.
    pub counterparty: String,
    /// Signed amount: negative for outflows, positive for inflows.
    pub amount: Amount,
    /// Category guess, when the statement gives enough to go on.
    #[serde(default)]
    pub category: Option<String>,
}

/// A batch of extracted records parked between the extract turn and
/// the commit turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedExtraction {
    pub records: Vec<ExtractedRecord>,
    pub created_at: DateTime<Utc>,
}
