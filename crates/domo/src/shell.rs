// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `domo shell` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history,
//! driving the orchestrator as a single local user. The budget agent runs
//! over an in-memory ledger seeded empty; the trip agent answers from its
//! canned travel desk.

use std::sync::Arc;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;

use domo_agents::{
    AgentRegistry, BudgetAgent, CannedTravelDesk, LoggingCalendar, MemoryLedger, TripAgent,
};
use domo_anthropic::AnthropicProvider;
use domo_config::DomoConfig;
use domo_core::{DomoError, ParamMap, TurnRequest, UserId};
use domo_ingest::ExtractionCache;
use domo_orchestrator::Orchestrator;

/// Runs the `domo shell` interactive REPL.
///
/// Wires the orchestrator to the Anthropic provider and local demo
/// collaborators, then loops on readline until `/quit`, Ctrl+C, or Ctrl+D.
pub async fn run_shell(config: DomoConfig) -> Result<(), DomoError> {
    let provider = Arc::new(AnthropicProvider::new(&config.anthropic).inspect_err(|_| {
        eprintln!(
            "error: Anthropic API key required. Set anthropic.api_key in domo.toml or the DOMO_ANTHROPIC_API_KEY env var."
        );
    })?);

    let ledger = MemoryLedger::shared();
    let cache = Arc::new(ExtractionCache::new());

    let mut registry = AgentRegistry::new("budget");
    registry.register(Arc::new(BudgetAgent::new(
        provider.clone(),
        ledger,
        cache,
    )));
    registry.register(Arc::new(TripAgent::new(
        Arc::new(CannedTravelDesk::new()),
        LoggingCalendar::shared(),
    )));

    let mut ambient = ParamMap::new();
    if let Some(location) = &config.agent.shared_location {
        ambient.insert(
            "shared_location".to_string(),
            serde_json::Value::String(location.clone()),
        );
    }

    info!(model = %provider.model(), "assistant stack ready");
    let orchestrator = Orchestrator::new(provider, registry).with_ambient(ambient);

    // The shell is a single-user channel.
    let user = UserId::new("local");

    let mut rl = DefaultEditor::new()
        .map_err(|e| DomoError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("{} shell", config.agent.name).bold().green());
    println!("Type {} to exit.\n", "/quit".yellow());

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let response = orchestrator
                    .handle_user_request(&user, TurnRequest::text(trimmed))
                    .await;
                if response.requires_approval {
                    println!(
                        "{}",
                        "(approval required: the action was staged, not executed)".yellow()
                    );
                }
                println!("{}\n", response.message);
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}
