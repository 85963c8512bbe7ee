// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for Domo's pluggable seams.
//!
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod agent;
pub mod provider;

// Re-export all traits at the traits module level for convenience.
pub use agent::Agent;
pub use provider::CompletionProvider;
