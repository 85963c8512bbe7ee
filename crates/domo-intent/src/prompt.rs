// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolver prompt construction.

use domo_core::types::{AgentProfile, ConversationContext};

/// System prompt for intent resolution.
const RESOLVER_PROMPT: &str = r#"You route messages for a personal assistant. Decide which agent should handle the user's message and which of its actions applies. Output as a JSON object.

Available agents and their actions:
{agents}

Fields:
- "agent": Name of the chosen agent
- "action": One of the chosen agent's actions
- "confidence": Your confidence in this routing, 0.0 to 1.0
- "params": Object of parameters pulled from the message (amounts, dates, names, places). Use an empty object if none apply.

{context}User message:
{message}

Output the JSON object only, no explanation:"#;

/// Build the resolver prompt from the agent catalog and the user message.
///
/// `prior` is included as a routing hint. Callers pass it only when the
/// stored context is still fresh, so a stale afternoon-old context never
/// biases resolution.
pub fn build_resolver_prompt(
    profiles: &[AgentProfile],
    message: &str,
    prior: Option<&ConversationContext>,
) -> String {
    let mut catalog = String::new();
    for profile in profiles {
        catalog.push_str(&format!("- {}:\n", profile.name));
        for cap in &profile.capabilities {
            catalog.push_str(&format!("    {}: {}\n", cap.action, cap.description));
        }
    }

    let context_hint = match prior {
        Some(ctx) => {
            let params = serde_json::Value::Object(ctx.params.clone());
            format!(
                "The user was just working with the {} agent on {} with parameters {}. \
                 For follow-up phrasing like \"show me\" or \"what about X instead\", \
                 reuse those parameters except the ones the new message changes. \
                 Only pick an agent or action different from that prior turn when \
                 your confidence is above 0.9.\n\n",
                ctx.agent, ctx.action, params
            )
        }
        None => String::new(),
    };

    RESOLVER_PROMPT
        .replace("{agents}", catalog.trim_end())
        .replace("{context}", &context_hint)
        .replace("{message}", message)
}
