// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Approval gating decision table.
//!
//! Decides whether an action may run autonomously or must be confirmed
//! by the user first. Pure rules over (action, params), no side effects,
//! no external calls.

use domo_core::types::{Amount, ParamMap};
use strum::Display;

/// Absolute amount at or above which a transaction needs approval.
pub const APPROVAL_THRESHOLD: f64 = 150.0;

/// Actions that only read state and never need approval.
const READ_ONLY_ACTIONS: &[&str] = &["view_balance", "view_transactions", "analyze_spending"];

/// Which rule of the decision table fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ApprovalRule {
    /// The action is in the read-only set.
    ReadOnly,
    /// Categorization rewrites labels, not money.
    Categorization,
    /// Transaction amount measured against the threshold.
    AmountThreshold,
    /// Bookings commit external reservations.
    Booking,
    /// Calendar events that invite other people.
    CalendarInvitees,
    /// No rule matched.
    DefaultAllow,
}

/// The outcome of gating one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalDecision {
    /// Whether the action must be confirmed before execution.
    pub required: bool,
    /// The rule that produced this decision.
    pub rule: ApprovalRule,
}

/// Evaluate the decision table for an action. First matching rule wins.
///
/// Rule order:
/// 1. Read-only actions pass.
/// 2. `categorize_transactions` passes.
/// 3. `create_transaction` needs approval iff `abs(amount) >= 150`
///    (absent amount counts as 0; the boundary is inclusive).
/// 4. `trip_*` and `book_*` actions always need approval.
/// 5. `calendar_*` actions need approval when invitees are present.
/// 6. Everything else passes.
pub fn decide(action: &str, params: &ParamMap) -> ApprovalDecision {
    // Rule 1: read-only actions.
    if READ_ONLY_ACTIONS.contains(&action) {
        return ApprovalDecision {
            required: false,
            rule: ApprovalRule::ReadOnly,
        };
    }

    // Rule 2: categorization only relabels existing records.
    if action == "categorize_transactions" {
        return ApprovalDecision {
            required: false,
            rule: ApprovalRule::Categorization,
        };
    }

    // Rule 3: transaction creation gated by absolute amount. Sign is
    // direction (expense vs. income), not size.
    if action == "create_transaction" {
        let amount = Amount::from_params(params, "amount").unwrap_or(Amount(0.0));
        return ApprovalDecision {
            required: amount.abs() >= APPROVAL_THRESHOLD,
            rule: ApprovalRule::AmountThreshold,
        };
    }

    // Rule 4: bookings always need a human.
    if action.starts_with("trip_") || action.starts_with("book_") {
        return ApprovalDecision {
            required: true,
            rule: ApprovalRule::Booking,
        };
    }

    // Rule 5: calendar events with invitees touch other people's time.
    if action.starts_with("calendar_") && has_invitees(params) {
        return ApprovalDecision {
            required: true,
            rule: ApprovalRule::CalendarInvitees,
        };
    }

    // Rule 6: default.
    ApprovalDecision {
        required: false,
        rule: ApprovalRule::DefaultAllow,
    }
}

/// Whether an action needs approval. Shorthand over [`decide`].
pub fn needs_approval(action: &str, params: &ParamMap) -> bool {
    decide(action, params).required
}

/// An `invitees` param counts when it is a non-empty array, a non-empty
/// string, or any other non-null value.
fn has_invitees(params: &ParamMap) -> bool {
    match params.get("invitees") {
        None => false,
        Some(value) => match value {
            serde_json::Value::Null => false,
            serde_json::Value::Array(items) => !items.is_empty(),
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params_with(key: &str, value: serde_json::Value) -> ParamMap {
        let mut map = ParamMap::new();
        map.insert(key.to_string(), value);
        map
    }

    #[test]
    fn read_only_actions_pass() {
        let empty = ParamMap::new();
        for action in ["view_balance", "view_transactions", "analyze_spending"] {
            let decision = decide(action, &empty);
            assert!(!decision.required, "{action} should not need approval");
            assert_eq!(decision.rule, ApprovalRule::ReadOnly);
        }
    }

    #[test]
    fn read_only_wins_over_amount() {
        // Rule order matters: a large amount on a read-only action is
        // still read-only.
        let params = params_with("amount", json!(5000.0));
        assert!(!needs_approval("view_balance", &params));
    }

    #[test]
    fn categorization_passes_regardless_of_params() {
        let params = params_with("amount", json!(9999.0));
        let decision = decide("categorize_transactions", &params);
        assert!(!decision.required);
        assert_eq!(decision.rule, ApprovalRule::Categorization);
    }

    #[test]
    fn amount_threshold_is_inclusive() {
        assert!(!needs_approval(
            "create_transaction",
            &params_with("amount", json!(-149.99))
        ));
        assert!(!needs_approval(
            "create_transaction",
            &params_with("amount", json!(149.99))
        ));
        assert!(needs_approval(
            "create_transaction",
            &params_with("amount", json!(150.0))
        ));
        assert!(needs_approval(
            "create_transaction",
            &params_with("amount", json!(-150.0))
        ));
    }

    #[test]
    fn missing_amount_defaults_to_zero() {
        let decision = decide("create_transaction", &ParamMap::new());
        assert!(!decision.required);
        assert_eq!(decision.rule, ApprovalRule::AmountThreshold);
    }

    #[test]
    fn string_amount_is_tolerated() {
        assert!(needs_approval(
            "create_transaction",
            &params_with("amount", json!("$200"))
        ));
    }

    #[test]
    fn bookings_always_require_approval() {
        let empty = ParamMap::new();
        assert!(needs_approval("book_flight", &empty));
        assert!(needs_approval("book_hotel", &empty));
        assert!(needs_approval("trip_reschedule", &empty));
    }

    #[test]
    fn calendar_with_invitees_requires_approval() {
        let params = params_with("invitees", json!(["noah@example.com"]));
        let decision = decide("calendar_add_event", &params);
        assert!(decision.required);
        assert_eq!(decision.rule, ApprovalRule::CalendarInvitees);
    }

    #[test]
    fn calendar_without_invitees_passes() {
        assert!(!needs_approval("calendar_add_event", &ParamMap::new()));
        assert!(!needs_approval(
            "calendar_add_event",
            &params_with("invitees", json!([]))
        ));
        assert!(!needs_approval(
            "calendar_add_event",
            &params_with("invitees", json!(""))
        ));
        assert!(!needs_approval(
            "calendar_add_event",
            &params_with("invitees", json!(null))
        ));
    }

    #[test]
    fn unknown_actions_default_to_allowed() {
        let decision = decide("general_query", &ParamMap::new());
        assert!(!decision.required);
        assert_eq!(decision.rule, ApprovalRule::DefaultAllow);
    }

    #[test]
    fn rule_names_render_snake_case() {
        assert_eq!(ApprovalRule::ReadOnly.to_string(), "read_only");
        assert_eq!(
            ApprovalRule::AmountThreshold.to_string(),
            "amount_threshold"
        );
    }
}
