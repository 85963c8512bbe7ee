// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared test doubles and harness for the Domo workspace.
//!
//! Provides [`MockProvider`] for deterministic completions,
//! [`ScriptedAgent`] for call-capturing agent doubles, and [`TestHarness`]
//! for whole-stack turns without any network access.

pub mod harness;
pub mod mock_provider;
pub mod scripted;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
pub use scripted::ScriptedAgent;
