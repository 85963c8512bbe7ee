// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context switch guarding.
//!
//! A user deep in one task should not be yanked to another agent by a
//! shaky routing decision. The guard asks first when the switch is
//! both abrupt and uncertain.

use chrono::{DateTime, Utc};
use domo_core::types::{ConversationContext, Intent};

/// Confidence at or above which a switch proceeds without asking.
pub const CONFIDENT_SWITCH_THRESHOLD: f64 = 0.9;

/// Decide whether an intent needs a confirmation question before it
/// may switch the user away from their current agent.
///
/// Confirmation is required only when all of these hold:
/// - a prior context exists,
/// - the resolved agent differs from the prior agent,
/// - the prior context is still fresh,
/// - the resolver's confidence is below [`CONFIDENT_SWITCH_THRESHOLD`].
pub fn needs_confirmation_at(
    prior: Option<&ConversationContext>,
    intent: &Intent,
    now: DateTime<Utc>,
) -> bool {
    let Some(prior) = prior else {
        return false;
    };
    prior.agent != intent.agent
        && prior.is_fresh_at(now)
        && intent.confidence < CONFIDENT_SWITCH_THRESHOLD
}

/// Decide with the current wall clock.
pub fn needs_confirmation(prior: Option<&ConversationContext>, intent: &Intent) -> bool {
    needs_confirmation_at(prior, intent, Utc::now())
}

/// The question shown to the user when a switch is withheld.
pub fn switch_question(prior: &ConversationContext, intent: &Intent) -> String {
    format!(
        "You were just working on {} with {}. Switch to {} for {}? (yes/no)",
        humanize_action(&prior.action),
        prior.agent,
        intent.agent,
        humanize_action(&intent.action),
    )
}

/// Turn `search_flights` into `search flights` for question text.
fn humanize_action(action: &str) -> String {
    action.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domo_core::types::ParamMap;

    fn prior_at(agent: &str, age_minutes: i64, now: DateTime<Utc>) -> ConversationContext {
        ConversationContext {
            agent: agent.to_string(),
            action: "view_balance".to_string(),
            params: ParamMap::new(),
            timestamp: now - Duration::minutes(age_minutes),
        }
    }

    fn intent_for(agent: &str, confidence: f64) -> Intent {
        Intent {
            agent: agent.to_string(),
            action: "search_flights".to_string(),
            confidence,
            params: ParamMap::new(),
        }
    }

    #[test]
    fn no_prior_never_confirms() {
        let now = Utc::now();
        assert!(!needs_confirmation_at(None, &intent_for("trip", 0.5), now));
    }

    #[test]
    fn same_agent_never_confirms() {
        let now = Utc::now();
        let prior = prior_at("trip", 1, now);
        assert!(!needs_confirmation_at(
            Some(&prior),
            &intent_for("trip", 0.5),
            now
        ));
    }

    #[test]
    fn stale_prior_never_confirms() {
        let now = Utc::now();
        let prior = prior_at("budget", 10, now);
        assert!(!needs_confirmation_at(
            Some(&prior),
            &intent_for("trip", 0.5),
            now
        ));
    }

    #[test]
    fn confident_switch_skips_confirmation() {
        let now = Utc::now();
        let prior = prior_at("budget", 1, now);
        assert!(!needs_confirmation_at(
            Some(&prior),
            &intent_for("trip", 0.95),
            now
        ));
    }

    #[test]
    fn threshold_confidence_is_exempt() {
        let now = Utc::now();
        let prior = prior_at("budget", 1, now);
        assert!(!needs_confirmation_at(
            Some(&prior),
            &intent_for("trip", CONFIDENT_SWITCH_THRESHOLD),
            now
        ));
    }

    #[test]
    fn abrupt_uncertain_switch_confirms() {
        let now = Utc::now();
        let prior = prior_at("budget", 1, now);
        assert!(needs_confirmation_at(
            Some(&prior),
            &intent_for("trip", 0.7),
            now
        ));
    }

    #[test]
    fn freshness_boundary_is_exclusive() {
        let now = Utc::now();
        let prior = prior_at("budget", 5, now);
        assert!(!needs_confirmation_at(
            Some(&prior),
            &intent_for("trip", 0.7),
            now
        ));
    }

    #[test]
    fn question_names_both_agents() {
        let now = Utc::now();
        let prior = prior_at("budget", 1, now);
        let q = switch_question(&prior, &intent_for("trip", 0.7));
        assert!(q.contains("budget"));
        assert!(q.contains("trip"));
        assert!(q.contains("search flights"));
    }
}
