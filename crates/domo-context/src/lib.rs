// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation context tracking for the Domo assistant.
//!
//! Three small pieces: the per-user [`ContextStore`], the
//! [`PendingStore`] for parked confirmations, and the switch guard that
//! decides when an agent change needs the user's say-so.

pub mod guard;
pub mod pending;
pub mod store;

pub use guard::{
    needs_confirmation, needs_confirmation_at, switch_question, CONFIDENT_SWITCH_THRESHOLD,
};
pub use pending::{PendingStore, PENDING_TTL_MINUTES};
pub use store::ContextStore;
