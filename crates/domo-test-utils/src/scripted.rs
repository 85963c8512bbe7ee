// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A scriptable agent that records every call it receives.
//!
//! Useful for asserting what the orchestrator actually sent an agent: the
//! action, the params, and whether the approval flag was set.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use domo_core::{
    Agent, AgentReply, AgentRequest, Capability, DomoError, ExecutionContext, Result,
};

const CAPABILITIES: &[Capability] = &[Capability {
    action: "scripted_action",
    description: "Replays a canned reply",
}];

/// Agent double with a fixed reply and a call log.
pub struct ScriptedAgent {
    name: &'static str,
    reply: String,
    fail_with: Option<String>,
    calls: Arc<Mutex<Vec<(AgentRequest, ExecutionContext)>>>,
}

impl ScriptedAgent {
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            reply: format!("{name} reporting in"),
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Agent whose handler fails every call with `message`.
    pub fn failing(name: &'static str, message: impl Into<String>) -> Self {
        let mut agent = Self::named(name);
        agent.fail_with = Some(message.into());
        agent
    }

    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = reply.into();
        self
    }

    /// Every request received so far, oldest first.
    pub async fn calls(&self) -> Vec<(AgentRequest, ExecutionContext)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        self.name
    }

    fn capabilities(&self) -> &'static [Capability] {
        CAPABILITIES
    }

    fn default_action(&self) -> &'static str {
        "scripted_action"
    }

    async fn handle(&self, request: AgentRequest, ctx: &ExecutionContext) -> Result<AgentReply> {
        self.calls.lock().await.push((request, ctx.clone()));
        if let Some(message) = &self.fail_with {
            return Err(DomoError::agent(message.clone()));
        }
        Ok(AgentReply::text(self.reply.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domo_core::{ParamMap, UserId};

    fn request(action: &str) -> AgentRequest {
        AgentRequest {
            action: action.to_string(),
            params: ParamMap::new(),
            message: "hi".to_string(),
        }
    }

    #[tokio::test]
    async fn records_every_call() {
        let agent = ScriptedAgent::named("probe");
        let ctx = ExecutionContext::new(UserId::new("u1"), true);

        agent.handle(request("first"), &ctx).await.unwrap();
        agent.handle(request("second"), &ctx).await.unwrap();

        let calls = agent.calls().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0.action, "first");
        assert!(calls[1].1.approval_required);
    }

    #[tokio::test]
    async fn failing_agent_still_logs_the_call() {
        let agent = ScriptedAgent::failing("probe", "backend down");
        let ctx = ExecutionContext::new(UserId::new("u1"), false);

        let err = agent.handle(request("boom"), &ctx).await.unwrap_err();
        assert!(err.to_string().contains("backend down"));
        assert_eq!(agent.call_count().await, 1);
    }
}
