// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Approval gating for the Domo assistant.
//!
//! One decision table answers "may this action run without asking?".
//! Ordered rules over the action name and its params; first match wins.

pub mod gate;

pub use gate::{decide, needs_approval, ApprovalDecision, ApprovalRule, APPROVAL_THRESHOLD};
