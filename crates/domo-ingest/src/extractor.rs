// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-based transaction extraction from statement text.
//!
//! One completion call turns a pasted bank statement into candidate
//! records. Malformed model output yields an empty batch rather than
//! an error; the calling handler tells the user nothing was found.

use std::sync::Arc;

use domo_core::error::DomoError;
use domo_core::traits::CompletionProvider;
use tracing::{debug, warn};

use crate::types::ExtractedRecord;

/// System prompt for statement extraction.
const STATEMENT_PROMPT: &str = r#"Extract every transaction from this bank statement text. Output as JSON array.

For each transaction:
- "date": The transaction date as written in the statement
- "counterparty": The merchant or payer name
- "amount": Signed number, negative for money out, positive for money in
- "category": A short spending category if obvious, otherwise null

Do not invent transactions. If the text contains none, return an empty array: []

Statement:
{statement}

Output JSON array only, no explanation:"#;

/// Extracts candidate transaction records from statement text.
pub struct StatementExtractor {
    provider: Arc<dyn CompletionProvider>,
}

impl StatementExtractor {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Run one extraction pass over the supplied statement text.
    ///
    /// Provider failures propagate; unparseable model output degrades
    /// to an empty batch.
    pub async fn extract(&self, statement: &str) -> Result<Vec<ExtractedRecord>, DomoError> {
        let prompt = STATEMENT_PROMPT.replace("{statement}", statement);
        let response = self.provider.complete(&prompt).await?;
        Ok(parse_records_response(&response))
    }
}

/// Parse the model's extraction reply into records.
///
/// Handles JSON arrays, markdown code block wrapping, and surrounding
/// prose. Returns an empty Vec on parse failure so one bad completion
/// never takes the import turn down.
pub fn parse_records_response(response: &str) -> Vec<ExtractedRecord> {
    let trimmed = response.trim();

    let start = trimmed.find('[').unwrap_or(0);
    let end = trimmed.rfind(']').map(|i| i + 1).unwrap_or(trimmed.len());
    let json_str = &trimmed[start..end.max(start)];

    match serde_json::from_str::<Vec<ExtractedRecord>>(json_str) {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to parse extraction response: {e}");
            debug!("Raw response: {response}");
            Vec::new()
        }
    }
}
