// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Name-keyed agent registry with fallback routing.
//!
//! Agents register under the name they report. Selection never leaves the
//! caller without a handler: an unknown name logs a warning and routes to
//! the registry's fallback agent instead.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use domo_core::{Agent, AgentProfile, DomoError, Result};

pub struct AgentRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
    fallback: String,
}

impl AgentRegistry {
    /// Creates an empty registry. `fallback` names the agent that absorbs
    /// requests for unknown agents; it must be registered before the first
    /// `select` call.
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            agents: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        self.agents.insert(agent.name().to_string(), agent);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(name).cloned()
    }

    /// Resolves a name to a handler, falling back when the name is unknown.
    /// Fails only when the fallback agent itself was never registered.
    pub fn select(&self, name: &str) -> Result<Arc<dyn Agent>> {
        if let Some(agent) = self.agents.get(name) {
            return Ok(agent.clone());
        }
        warn!(requested = name, fallback = %self.fallback, "unknown agent, using fallback");
        self.agents.get(&self.fallback).cloned().ok_or_else(|| {
            DomoError::Internal(format!(
                "fallback agent {} is not registered",
                self.fallback
            ))
        })
    }

    pub fn fallback_name(&self) -> &str {
        &self.fallback
    }

    /// Profiles of every registered agent, sorted by name so prompt text is
    /// stable across runs.
    pub fn profiles(&self) -> Vec<AgentProfile> {
        let mut profiles: Vec<AgentProfile> = self
            .agents
            .values()
            .map(|agent| AgentProfile {
                name: agent.name().to_string(),
                capabilities: agent.capabilities().to_vec(),
            })
            .collect();
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        profiles
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use domo_core::{AgentReply, AgentRequest, Capability, ExecutionContext};

    struct NamedAgent(&'static str);

    #[async_trait]
    impl Agent for NamedAgent {
        fn name(&self) -> &str {
            self.0
        }

        fn capabilities(&self) -> &'static [Capability] {
            &[Capability {
                action: "noop",
                description: "does nothing",
            }]
        }

        fn default_action(&self) -> &'static str {
            "noop"
        }

        async fn handle(
            &self,
            _request: AgentRequest,
            _ctx: &ExecutionContext,
        ) -> domo_core::Result<AgentReply> {
            Ok(AgentReply::text(self.0))
        }
    }

    fn registry() -> AgentRegistry {
        let mut registry = AgentRegistry::new("budget");
        registry.register(Arc::new(NamedAgent("budget")));
        registry.register(Arc::new(NamedAgent("trip")));
        registry
    }

    #[test]
    fn select_finds_registered_agents() {
        let registry = registry();
        assert_eq!(registry.select("trip").unwrap().name(), "trip");
    }

    #[test]
    fn unknown_name_falls_back() {
        let registry = registry();
        assert_eq!(registry.select("weather").unwrap().name(), "budget");
    }

    #[test]
    fn missing_fallback_is_an_error() {
        let mut registry = AgentRegistry::new("budget");
        registry.register(Arc::new(NamedAgent("trip")));
        assert!(registry.select("weather").is_err());
    }

    #[test]
    fn profiles_are_sorted_by_name() {
        let registry = registry();
        let names: Vec<_> = registry.profiles().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["budget", "trip"]);
    }
}
