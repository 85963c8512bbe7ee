// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Domo assistant.
//!
//! This crate provides the trait definitions, error types, and common
//! types used throughout the Domo workspace. Everything above it (the
//! resolver, the router, the orchestrator) builds on these seams.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{DomoError, Result};
pub use types::{
    AgentProfile, AgentReply, AgentRequest, Amount, Capability, ConversationContext,
    ExecutionContext, Intent, ParamMap, PendingConfirmation, TurnRequest, TurnResponse, UserId,
};

// Re-export the traits at crate root.
pub use traits::{Agent, CompletionProvider};
