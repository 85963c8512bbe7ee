// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pinned-mode helpers: mode-switch command parsing and deterministic
//! action guessing.
//!
//! While a user has pinned an agent, messages skip the language model
//! entirely. The pinned agent's keyword table picks the action, and a miss
//! lands on the agent's declared default.

use domo_core::{Agent, Intent, ParamMap};

/// A recognized mode-switch command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeCommand {
    /// Pin every following message to the named agent.
    Pin(String),
    /// Return to model-driven routing.
    Auto,
}

/// Parses `/auto` and `/<agent>` commands. Anything else, including slash
/// text with trailing words, is a normal message.
pub fn parse_mode_command(text: &str) -> Option<ModeCommand> {
    let trimmed = text.trim();
    let rest = trimmed.strip_prefix('/')?;
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return None;
    }
    if rest.eq_ignore_ascii_case("auto") {
        return Some(ModeCommand::Auto);
    }
    Some(ModeCommand::Pin(rest.to_lowercase()))
}

/// Builds an intent for a pinned agent without consulting the model. The
/// first keyword hit wins; confidence is always 1.0 because the user chose
/// the agent explicitly.
pub fn guess_pinned_intent(agent: &dyn Agent, message: &str) -> Intent {
    let lowered = message.to_lowercase();
    let action = agent
        .keyword_rules()
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, action)| *action)
        .unwrap_or_else(|| agent.default_action());
    let mut params = ParamMap::new();
    params.insert("message".to_string(), message.into());
    Intent {
        agent: agent.name().to_string(),
        action: action.to_string(),
        confidence: 1.0,
        params,
    }
}
