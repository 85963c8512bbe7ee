// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain agent trait.

use async_trait::async_trait;

use crate::error::DomoError;
use crate::types::{AgentReply, AgentRequest, Capability, ExecutionContext};

/// A domain agent: one named specialist the router can dispatch to.
///
/// Agents own their action vocabulary and report it through
/// [`capabilities`](Agent::capabilities) so the resolver prompt can
/// enumerate what each agent understands.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable routing name, lowercase.
    fn name(&self) -> &str;

    /// Actions this agent understands.
    fn capabilities(&self) -> &'static [Capability];

    /// Ordered (keyword, action) rules used for deterministic action
    /// guessing when routing is pinned to this agent. First matching
    /// keyword wins.
    fn keyword_rules(&self) -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// Action used when no keyword rule matches a pinned-mode message.
    fn default_action(&self) -> &'static str;

    /// A reply listing this agent's vocabulary, for requests that name
    /// an action the agent does not understand.
    fn capability_summary(&self) -> AgentReply {
        let mut lines = vec![format!("Here's what the {} agent can do:", self.name())];
        for capability in self.capabilities() {
            lines.push(format!("  {}: {}", capability.action, capability.description));
        }
        AgentReply::text(lines.join("\n"))
    }

    /// Handles one routed request.
    ///
    /// When `ctx.approval_required` is set the handler must not perform
    /// side effects and should describe the withheld action instead.
    async fn handle(
        &self,
        request: AgentRequest,
        ctx: &ExecutionContext,
    ) -> Result<AgentReply, DomoError>;
}
