// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The budget agent: balances, transactions, spending analysis, and the
//! statement import pipeline.
//!
//! This is also the assistant's fallback agent. Unresolvable requests arrive
//! here as `general_query` and are answered conversationally.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use domo_core::{
    Agent, AgentReply, AgentRequest, Amount, Capability, CompletionProvider, ExecutionContext,
    Result,
};
use domo_ingest::{ExtractionCache, StatementExtractor};

use crate::ledger::{Ledger, Transaction};

const CAPABILITIES: &[Capability] = &[
    Capability {
        action: "view_balance",
        description: "Show the current ledger balance",
    },
    Capability {
        action: "view_transactions",
        description: "List recent transactions",
    },
    Capability {
        action: "analyze_spending",
        description: "Summarize spending grouped by category",
    },
    Capability {
        action: "categorize_transactions",
        description: "Tag transactions matching a counterparty with a category",
    },
    Capability {
        action: "create_transaction",
        description: "Record a single expense or income entry",
    },
    Capability {
        action: "import_statement",
        description: "Extract transactions from pasted statement text",
    },
    Capability {
        action: "commit_import",
        description: "Write the most recently extracted batch to the ledger",
    },
    Capability {
        action: "general_query",
        description: "Answer a general money question conversationally",
    },
];

/// Ordered keyword table for pinned-mode action guessing. First hit wins, so
/// the more specific words come first.
const KEYWORD_RULES: &[(&str, &str)] = &[
    ("balance", "view_balance"),
    ("transactions", "view_transactions"),
    ("spending", "analyze_spending"),
    ("categor", "categorize_transactions"),
    ("statement", "import_statement"),
    ("import", "import_statement"),
    ("commit", "commit_import"),
    ("spent", "create_transaction"),
    ("expense", "create_transaction"),
    ("record", "create_transaction"),
];

const GENERAL_QUERY_PROMPT: &str = r#"You are the budgeting side of a personal assistant.
Answer the user's question briefly and practically. If it is not about money,
answer it anyway in one or two sentences.

Question: {message}"#;

/// How many entries `view_transactions` shows.
const RECENT_LIMIT: usize = 10;

pub struct BudgetAgent {
    ledger: Arc<dyn Ledger>,
    cache: Arc<ExtractionCache>,
    extractor: StatementExtractor,
    provider: Arc<dyn CompletionProvider>,
}

impl BudgetAgent {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        ledger: Arc<dyn Ledger>,
        cache: Arc<ExtractionCache>,
    ) -> Self {
        Self {
            ledger,
            cache,
            extractor: StatementExtractor::new(provider.clone()),
            provider,
        }
    }

    async fn view_balance(&self, ctx: &ExecutionContext) -> Result<AgentReply> {
        let balance = self.ledger.balance(&ctx.user_id).await?;
        Ok(
            AgentReply::text(format!("Your balance is {}.", fmt_amount(balance)))
                .with_data(json!({ "balance": balance.0 })),
        )
    }

    async fn view_transactions(&self, ctx: &ExecutionContext) -> Result<AgentReply> {
        let txs = self.ledger.recent(&ctx.user_id, RECENT_LIMIT).await?;
        if txs.is_empty() {
            return Ok(AgentReply::text(
                "No transactions on file yet. Paste a statement or record one to get started.",
            ));
        }
        let mut lines = vec![format!("Your last {} transactions:", txs.len())];
        for tx in &txs {
            lines.push(format!(
                "  {}  {}  {}{}",
                tx.date,
                fmt_amount(tx.amount),
                tx.counterparty,
                tx.category
                    .as_deref()
                    .map(|c| format!(" ({c})"))
                    .unwrap_or_default(),
            ));
        }
        Ok(AgentReply::text(lines.join("\n")))
    }

    async fn analyze_spending(&self, ctx: &ExecutionContext) -> Result<AgentReply> {
        let txs = self.ledger.recent(&ctx.user_id, usize::MAX).await?;
        let mut by_category: Vec<(String, f64)> = Vec::new();
        for tx in txs.iter().filter(|tx| tx.amount.0 < 0.0) {
            let key = tx.category.clone().unwrap_or_else(|| "uncategorized".to_string());
            match by_category.iter_mut().find(|(name, _)| *name == key) {
                Some((_, total)) => *total += tx.amount.0.abs(),
                None => by_category.push((key, tx.amount.0.abs())),
            }
        }
        if by_category.is_empty() {
            return Ok(AgentReply::text("No spending recorded yet, so nothing to analyze."));
        }
        by_category.sort_by(|a, b| b.1.total_cmp(&a.1));
        let total: f64 = by_category.iter().map(|(_, v)| v).sum();
        let mut lines = vec![format!("You spent {} in total:", fmt_amount(Amount(total)))];
        for (category, spent) in &by_category {
            lines.push(format!("  {category}: {}", fmt_amount(Amount(*spent))));
        }
        Ok(AgentReply::text(lines.join("\n")))
    }

    async fn categorize(&self, request: &AgentRequest, ctx: &ExecutionContext) -> Result<AgentReply> {
        let Some(pattern) = str_param(&request.params, "counterparty") else {
            return Ok(AgentReply::text(
                "Which transactions should I tag? Tell me the counterparty and the category.",
            ));
        };
        let Some(category) = str_param(&request.params, "category") else {
            return Ok(AgentReply::text(format!(
                "What category should \"{pattern}\" transactions get?"
            )));
        };
        let tagged = self.ledger.set_category(&ctx.user_id, pattern, category).await?;
        if tagged == 0 {
            return Ok(AgentReply::text(format!(
                "I didn't find any transactions matching \"{pattern}\"."
            )));
        }
        Ok(AgentReply::text(format!(
            "Tagged {tagged} transaction{} matching \"{pattern}\" as {category}.",
            plural(tagged)
        )))
    }

    async fn create_transaction(
        &self,
        request: &AgentRequest,
        ctx: &ExecutionContext,
    ) -> Result<AgentReply> {
        let Some(amount) = Amount::from_params(&request.params, "amount") else {
            return Ok(AgentReply::text(
                "How much was it? Give me an amount and I'll record it.",
            ));
        };
        let counterparty = str_param(&request.params, "counterparty")
            .unwrap_or("unspecified")
            .to_string();
        if ctx.approval_required {
            return Ok(AgentReply::text(format!(
                "Recording {} at {counterparty} needs your approval first. Approve it and I'll add it to the ledger.",
                fmt_amount(amount)
            )));
        }
        let date = str_param(&request.params, "date")
            .map(str::to_string)
            .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string());
        let tx = Transaction {
            date,
            counterparty: counterparty.clone(),
            amount,
            category: str_param(&request.params, "category").map(str::to_string),
        };
        self.ledger.record(&ctx.user_id, tx).await?;
        Ok(AgentReply::text(format!(
            "Recorded {} at {counterparty}.",
            fmt_amount(amount)
        )))
    }

    async fn import_statement(
        &self,
        request: &AgentRequest,
        ctx: &ExecutionContext,
    ) -> Result<AgentReply> {
        let document = str_param(&request.params, "document").unwrap_or(&request.message);
        let records = self.extractor.extract(document).await?;
        if records.is_empty() {
            return Ok(AgentReply::text(
                "I couldn't find any transactions in that text. Paste the statement lines themselves and I'll try again.",
            ));
        }
        let mut lines = vec![format!("I extracted {} transaction{}:", records.len(), plural(records.len()))];
        for record in &records {
            lines.push(format!(
                "  {}  {}  {}",
                record.date,
                fmt_amount(record.amount),
                record.counterparty
            ));
        }
        lines.push("Should I add these to your ledger? Say \"commit the import\" within 30 minutes to confirm.".to_string());
        let count = records.len();
        self.cache.put(&ctx.user_id, records);
        debug!(user = %ctx.user_id, count, "cached extracted batch");
        Ok(AgentReply::text(lines.join("\n")))
    }

    async fn commit_import(&self, ctx: &ExecutionContext) -> Result<AgentReply> {
        let Some(records) = self.cache.get(&ctx.user_id) else {
            return Ok(AgentReply::text(
                "There's no extraction on file from the last 30 minutes. Paste the statement again and I'll re-extract it.",
            ));
        };
        let mut committed = 0usize;
        let mut failed = 0usize;
        for record in records {
            match self.ledger.record(&ctx.user_id, record.into()).await {
                Ok(()) => committed += 1,
                Err(err) => {
                    debug!(user = %ctx.user_id, error = %err, "ledger rejected imported row");
                    failed += 1;
                }
            }
        }
        // One shot per batch: the cache entry is spent whether rows stuck or not.
        self.cache.remove(&ctx.user_id);
        let message = if failed == 0 {
            format!("Committed {committed} transaction{} to your ledger.", plural(committed))
        } else {
            format!(
                "Committed {committed} transaction{}; {failed} row{} could not be written.",
                plural(committed),
                plural(failed)
            )
        };
        Ok(AgentReply::text(message).with_data(json!({ "committed": committed, "failed": failed })))
    }

    async fn general_query(&self, request: &AgentRequest) -> Result<AgentReply> {
        let question = str_param(&request.params, "message").unwrap_or(&request.message);
        let prompt = GENERAL_QUERY_PROMPT.replace("{message}", question);
        let answer = self.provider.complete(&prompt).await?;
        Ok(AgentReply::text(answer.trim().to_string()))
    }
}

#[async_trait]
impl Agent for BudgetAgent {
    fn name(&self) -> &str {
        "budget"
    }

    fn capabilities(&self) -> &'static [Capability] {
        CAPABILITIES
    }

    fn keyword_rules(&self) -> &'static [(&'static str, &'static str)] {
        KEYWORD_RULES
    }

    fn default_action(&self) -> &'static str {
        "general_query"
    }

    async fn handle(&self, request: AgentRequest, ctx: &ExecutionContext) -> Result<AgentReply> {
        match request.action.as_str() {
            "view_balance" => self.view_balance(ctx).await,
            "view_transactions" => self.view_transactions(ctx).await,
            "analyze_spending" => self.analyze_spending(ctx).await,
            "categorize_transactions" => self.categorize(&request, ctx).await,
            "create_transaction" => self.create_transaction(&request, ctx).await,
            "import_statement" => self.import_statement(&request, ctx).await,
            "commit_import" => self.commit_import(ctx).await,
            "general_query" => self.general_query(&request).await,
            _ => Ok(self.capability_summary()),
        }
    }
}

fn str_param<'p>(params: &'p domo_core::ParamMap, key: &str) -> Option<&'p str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn fmt_amount(amount: Amount) -> String {
    if amount.0 < 0.0 {
        format!("-${:.2}", amount.0.abs())
    } else {
        format!("${:.2}", amount.0)
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
