// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn orchestration for the Domo assistant.
//!
//! [`Orchestrator`] is the single entry point a channel transport calls:
//! one inbound message in, exactly one reply out, regardless of what
//! happened in between.

pub mod confirm;
pub mod orchestrator;

pub use confirm::{classify_reply, ReplySense};
pub use orchestrator::Orchestrator;
