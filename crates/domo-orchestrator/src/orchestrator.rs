// SPDX-FileCopyrightText: 2026 Domo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-turn state machine tying resolution, guarding, gating, and
//! routing together.
//!
//! Each turn moves through the same stages:
//! 1. Mode commands (`/budget`, `/auto`) toggle pinning and end the turn.
//! 2. A live parked confirmation consumes clear yes/no replies.
//! 3. Pinned users get a keyword-guessed intent; everyone else goes
//!    through the model-backed resolver with their prior context.
//! 4. The switch guard may park the intent behind a question instead of
//!    executing it.
//! 5. Otherwise the intent is routed, gated, and handled, and the user's
//!    context is rewritten whether or not the handler succeeded.
//!
//! [`Orchestrator::handle_user_request`] never fails: anything that
//! escapes the stages above is converted into a plain chat reply at the
//! top. Turns for the same user are serialized so two racing messages
//! cannot interleave their context and cache writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, warn};

use domo_agents::{guess_pinned_intent, parse_mode_command, AgentRegistry, ModeCommand};
use domo_approval::decide;
use domo_context::{needs_confirmation_at, switch_question, ContextStore, PendingStore};
use domo_core::{
    CompletionProvider, Intent, ParamMap, PendingConfirmation, Result, TurnRequest, TurnResponse,
    UserId,
};
use domo_intent::IntentResolver;

use crate::confirm::{classify_reply, ReplySense};

/// Speaker name for turns no domain agent produced: mode acks,
/// confirmation questions, and error replies.
const ASSISTANT_VOICE: &str = "domo";

pub struct Orchestrator {
    resolver: IntentResolver,
    registry: AgentRegistry,
    contexts: ContextStore,
    pending: PendingStore,
    /// Ambient data handed to every agent call, e.g. a shared location.
    ambient: ParamMap,
    /// One lock per user so turns from the same user run one at a time.
    turn_locks: DashMap<UserId, Arc<tokio::sync::Mutex<()>>>,
}

impl Orchestrator {
    /// Assembles an orchestrator over a provider and a ready registry.
    /// The resolver's agent catalog is snapshotted here, so register all
    /// agents before construction.
    pub fn new(provider: Arc<dyn CompletionProvider>, registry: AgentRegistry) -> Self {
        let resolver = IntentResolver::new(provider, registry.profiles());
        Self {
            resolver,
            registry,
            contexts: ContextStore::new(),
            pending: PendingStore::new(),
            ambient: ParamMap::new(),
            turn_locks: DashMap::new(),
        }
    }

    pub fn with_ambient(mut self, ambient: ParamMap) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn contexts(&self) -> &ContextStore {
        &self.contexts
    }

    pub fn pending(&self) -> &PendingStore {
        &self.pending
    }

    /// Handle one chat turn. Never fails and never panics: every outcome,
    /// including internal errors, is folded into the returned reply.
    pub async fn handle_user_request(&self, user: &UserId, request: TurnRequest) -> TurnResponse {
        self.handle_user_request_at(user, request, Utc::now()).await
    }

    /// Handle one chat turn at a simulated instant. All freshness and TTL
    /// checks inside the turn share this clock.
    pub async fn handle_user_request_at(
        &self,
        user: &UserId,
        request: TurnRequest,
        now: DateTime<Utc>,
    ) -> TurnResponse {
        let lock = Arc::clone(self.turn_locks.entry(user.clone()).or_default().value());
        let _turn = lock.lock().await;

        match self.run_turn(user, &request, now).await {
            Ok(response) => response,
            Err(e) => {
                warn!(user = %user, error = %e, "turn failed");
                TurnResponse {
                    message: format!("Sorry, something went wrong handling that: {e}"),
                    agent: ASSISTANT_VOICE.to_string(),
                    requires_approval: false,
                    handled: false,
                }
            }
        }
    }

    async fn run_turn(
        &self,
        user: &UserId,
        request: &TurnRequest,
        now: DateTime<Utc>,
    ) -> Result<TurnResponse> {
        let message = request.message.trim();

        if let Some(command) = parse_mode_command(message) {
            return Ok(self.apply_mode_command(user, command));
        }

        if let Some(parked) = self.pending.take_live_at(user, now) {
            match classify_reply(message) {
                ReplySense::Affirmative => {
                    debug!(user = %user, agent = %parked.intent.agent, "confirmation accepted");
                    return self.execute(user, parked.intent, message, &request.extra, now).await;
                }
                ReplySense::Negative => {
                    debug!(user = %user, "confirmation declined");
                    return Ok(assistant_reply("Okay, I'll leave things as they are."));
                }
                ReplySense::Other => {
                    // Not an answer; the question is dropped and the
                    // message goes through normal routing below.
                    debug!(user = %user, "parked confirmation superseded");
                }
            }
        }

        let prior = self.contexts.get(user);

        let intent = match self.pinned_intent(user, message) {
            Some(intent) => intent,
            None => {
                let hint = prior.as_ref().filter(|ctx| ctx.is_fresh_at(now));
                self.resolver.resolve(message, hint).await
            }
        };

        if needs_confirmation_at(prior.as_ref(), &intent, now) {
            if let Some(prior) = prior.as_ref() {
                let question = switch_question(prior, &intent);
                debug!(
                    user = %user,
                    from = %prior.agent,
                    to = %intent.agent,
                    confidence = intent.confidence,
                    "holding agent switch for confirmation"
                );
                self.pending.put(
                    user,
                    PendingConfirmation {
                        intent,
                        question: question.clone(),
                        created_at: now,
                    },
                );
                // Terminal for this turn: nothing executed, no context
                // written, no approval computed.
                return Ok(assistant_reply(question));
            }
        }

        self.execute(user, intent, message, &request.extra, now).await
    }

    /// Route, gate, and run one intent, then rewrite the user's context.
    ///
    /// The context write is unconditional: a failed handler still changes
    /// what the user was last trying to do, and follow-up phrasing should
    /// resolve against that attempt.
    async fn execute(
        &self,
        user: &UserId,
        intent: Intent,
        message: &str,
        extra: &ParamMap,
        now: DateTime<Utc>,
    ) -> Result<TurnResponse> {
        let agent = self.registry.select(&intent.agent)?;
        let decision = decide(&intent.action, &intent.params);
        if decision.required {
            debug!(
                user = %user,
                action = %intent.action,
                rule = %decision.rule,
                "action gated behind approval"
            );
        }

        let agent_request = domo_core::AgentRequest {
            action: intent.action.clone(),
            params: intent.params.clone(),
            message: message.to_string(),
        };
        let mut ambient = self.ambient.clone();
        ambient.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        let ctx = domo_core::ExecutionContext::new(user.clone(), decision.required)
            .with_ambient(ambient);

        let outcome = agent.handle(agent_request, &ctx).await;

        self.contexts.record_at(user, &intent, now);

        let reply = outcome?;
        Ok(TurnResponse {
            message: reply.message,
            agent: agent.name().to_string(),
            requires_approval: decision.required,
            handled: true,
        })
    }

    /// Keyword-guessed intent for pinned users. A pin naming an agent
    /// that is no longer registered is dropped rather than honored.
    fn pinned_intent(&self, user: &UserId, message: &str) -> Option<Intent> {
        let name = self.contexts.pinned_agent(user)?;
        match self.registry.get(&name) {
            Some(agent) => {
                debug!(user = %user, agent = %name, "pinned, guessing action from keywords");
                Some(guess_pinned_intent(agent.as_ref(), message))
            }
            None => {
                warn!(user = %user, agent = %name, "pinned agent not registered, unpinning");
                self.contexts.unpin(user);
                None
            }
        }
    }

    fn apply_mode_command(&self, user: &UserId, command: ModeCommand) -> TurnResponse {
        let message = match command {
            ModeCommand::Pin(name) => match self.registry.get(&name) {
                Some(agent) => {
                    self.contexts.pin_agent(user, agent.name());
                    format!(
                        "Pinned to the {} agent. Say /auto to return to automatic routing.",
                        agent.name()
                    )
                }
                None => {
                    let known: Vec<String> = self
                        .registry
                        .profiles()
                        .into_iter()
                        .map(|profile| format!("/{}", profile.name))
                        .collect();
                    format!(
                        "I don't have an agent called \"{name}\". Try {} or /auto.",
                        known.join(", ")
                    )
                }
            },
            ModeCommand::Auto => {
                self.contexts.unpin(user);
                "Back to automatic routing.".to_string()
            }
        };
        assistant_reply(message)
    }
}

fn assistant_reply(message: impl Into<String>) -> TurnResponse {
    TurnResponse {
        message: message.into(),
        agent: ASSISTANT_VOICE.to_string(),
        requires_approval: false,
        handled: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domo_agents::{CannedTravelDesk, LoggingCalendar, TripAgent};
    use domo_test_utils::{MockProvider, ScriptedAgent};
    use serde_json::json;

    fn intent_json(agent: &str, action: &str, confidence: f64) -> String {
        json!({ "agent": agent, "action": action, "confidence": confidence, "params": {} })
            .to_string()
    }

    fn user() -> UserId {
        UserId::new("mia")
    }

    /// Stack with two scripted agents; "budget" doubles as the fallback.
    fn scripted_stack(
        responses: Vec<String>,
    ) -> (Orchestrator, Arc<ScriptedAgent>, Arc<ScriptedAgent>) {
        let budget = Arc::new(ScriptedAgent::named("budget"));
        let trip = Arc::new(ScriptedAgent::named("trip"));
        let mut registry = AgentRegistry::new("budget");
        registry.register(budget.clone());
        registry.register(trip.clone());
        let provider = Arc::new(MockProvider::with_responses(responses));
        (Orchestrator::new(provider, registry), budget, trip)
    }

    #[tokio::test]
    async fn resolved_intent_reaches_the_named_agent() {
        let (orchestrator, budget, trip) =
            scripted_stack(vec![intent_json("trip", "scripted_action", 0.95)]);

        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("flights to Berlin"))
            .await;

        assert_eq!(response.agent, "trip");
        assert!(response.handled);
        assert_eq!(trip.call_count().await, 1);
        assert_eq!(budget.call_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_agent_name_falls_back() {
        let (orchestrator, budget, _trip) =
            scripted_stack(vec![intent_json("weather", "scripted_action", 0.95)]);

        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("will it rain?"))
            .await;

        assert_eq!(response.agent, "budget");
        assert_eq!(budget.call_count().await, 1);
    }

    #[tokio::test]
    async fn approval_flag_reaches_handler_and_response() {
        let (orchestrator, _budget, trip) =
            scripted_stack(vec![intent_json("trip", "book_flight", 0.95)]);

        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("book it"))
            .await;

        assert!(response.requires_approval);
        let calls = trip.calls().await;
        assert!(calls[0].1.approval_required);
    }

    #[tokio::test]
    async fn context_is_written_even_when_the_handler_fails() {
        let failing = Arc::new(ScriptedAgent::failing("budget", "bank offline"));
        let mut registry = AgentRegistry::new("budget");
        registry.register(failing.clone());
        let provider = Arc::new(MockProvider::with_responses(vec![intent_json(
            "budget",
            "view_balance",
            0.95,
        )]));
        let orchestrator = Orchestrator::new(provider, registry);

        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("balance please"))
            .await;

        assert!(!response.handled);
        assert!(response.message.contains("bank offline"));
        let ctx = orchestrator.contexts().get(&user()).unwrap();
        assert_eq!(ctx.agent, "budget");
        assert_eq!(ctx.action, "view_balance");
    }

    #[tokio::test]
    async fn ambiguous_switch_is_parked_behind_a_question() {
        let (orchestrator, budget, trip) = scripted_stack(vec![
            intent_json("budget", "view_balance", 0.95),
            intent_json("trip", "search_flights", 0.5),
        ]);

        orchestrator
            .handle_user_request(&user(), TurnRequest::text("my balance"))
            .await;
        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("anything to Berlin?"))
            .await;

        assert!(response.message.contains("(yes/no)"));
        assert!(!response.handled);
        // Held: the trip agent never ran and the context still points at budget.
        assert_eq!(trip.call_count().await, 0);
        assert_eq!(budget.call_count().await, 1);
        assert_eq!(orchestrator.contexts().get(&user()).unwrap().agent, "budget");
    }

    #[tokio::test]
    async fn affirmative_reply_runs_the_parked_intent() {
        let (orchestrator, _budget, trip) = scripted_stack(vec![
            intent_json("budget", "view_balance", 0.95),
            intent_json("trip", "search_flights", 0.5),
        ]);

        orchestrator
            .handle_user_request(&user(), TurnRequest::text("my balance"))
            .await;
        orchestrator
            .handle_user_request(&user(), TurnRequest::text("anything to Berlin?"))
            .await;
        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("yes"))
            .await;

        assert!(response.handled);
        assert_eq!(response.agent, "trip");
        assert_eq!(trip.call_count().await, 1);
        assert_eq!(orchestrator.contexts().get(&user()).unwrap().agent, "trip");
    }

    #[tokio::test]
    async fn negative_reply_discards_the_parked_intent() {
        let (orchestrator, _budget, trip) = scripted_stack(vec![
            intent_json("budget", "view_balance", 0.95),
            intent_json("trip", "search_flights", 0.5),
        ]);

        orchestrator
            .handle_user_request(&user(), TurnRequest::text("my balance"))
            .await;
        orchestrator
            .handle_user_request(&user(), TurnRequest::text("anything to Berlin?"))
            .await;
        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("no"))
            .await;

        assert!(!response.handled);
        assert_eq!(trip.call_count().await, 0);
        // The decline leaves the budget context in place.
        assert_eq!(orchestrator.contexts().get(&user()).unwrap().agent, "budget");
    }

    #[tokio::test]
    async fn unrelated_reply_supersedes_the_parked_question() {
        let (orchestrator, budget, trip) = scripted_stack(vec![
            intent_json("budget", "view_balance", 0.95),
            intent_json("trip", "search_flights", 0.5),
            intent_json("budget", "view_transactions", 0.95),
        ]);

        orchestrator
            .handle_user_request(&user(), TurnRequest::text("my balance"))
            .await;
        orchestrator
            .handle_user_request(&user(), TurnRequest::text("anything to Berlin?"))
            .await;
        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("show my transactions"))
            .await;

        assert!(response.handled);
        assert_eq!(budget.call_count().await, 2);
        assert_eq!(trip.call_count().await, 0);
        let calls = budget.calls().await;
        assert_eq!(calls[1].0.action, "view_transactions");
    }

    #[tokio::test]
    async fn mode_commands_pin_and_unpin() {
        let (orchestrator, _budget, _trip) = scripted_stack(vec![]);

        let ack = orchestrator
            .handle_user_request(&user(), TurnRequest::text("/trip"))
            .await;
        assert!(ack.message.contains("trip"));
        assert_eq!(
            orchestrator.contexts().pinned_agent(&user()).as_deref(),
            Some("trip")
        );

        orchestrator
            .handle_user_request(&user(), TurnRequest::text("/auto"))
            .await;
        assert!(orchestrator.contexts().pinned_agent(&user()).is_none());
    }

    #[tokio::test]
    async fn pinning_an_unknown_agent_lists_the_real_ones() {
        let (orchestrator, _budget, _trip) = scripted_stack(vec![]);

        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("/weather"))
            .await;

        assert!(response.message.contains("/budget"));
        assert!(response.message.contains("/trip"));
        assert!(orchestrator.contexts().pinned_agent(&user()).is_none());
    }

    #[tokio::test]
    async fn pinned_turns_use_keywords_not_the_model() {
        let budget = Arc::new(ScriptedAgent::named("budget"));
        let mut registry = AgentRegistry::new("budget");
        registry.register(budget.clone());
        registry.register(Arc::new(TripAgent::new(
            Arc::new(CannedTravelDesk::new()),
            LoggingCalendar::shared(),
        )));
        // The only queued reply is garbage: if the resolver ran, parsing
        // would fail and the turn would land on the fallback agent.
        let provider = Arc::new(MockProvider::with_responses(vec!["not json".to_string()]));
        let orchestrator = Orchestrator::new(provider.clone(), registry);

        orchestrator
            .handle_user_request(&user(), TurnRequest::text("/trip"))
            .await;
        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("find me a flight to Lisbon"))
            .await;

        assert_eq!(response.agent, "trip");
        assert!(response.message.contains("Flights"));
        assert_eq!(provider.remaining().await, 1);
        assert_eq!(budget.call_count().await, 0);
    }

    #[tokio::test]
    async fn ambient_and_extra_context_reach_the_handler() {
        let probe = Arc::new(ScriptedAgent::named("budget"));
        let mut registry = AgentRegistry::new("budget");
        registry.register(probe.clone());
        let provider = Arc::new(MockProvider::with_responses(vec![intent_json(
            "budget",
            "scripted_action",
            0.95,
        )]));
        let mut ambient = ParamMap::new();
        ambient.insert("shared_location".to_string(), json!("Berlin"));
        let orchestrator = Orchestrator::new(provider, registry).with_ambient(ambient);

        let mut request = TurnRequest::text("hello");
        request.extra.insert("channel".to_string(), json!("cli"));
        orchestrator.handle_user_request(&user(), request).await;

        let calls = probe.calls().await;
        let ambient = &calls[0].1.ambient;
        assert_eq!(ambient.get("shared_location"), Some(&json!("Berlin")));
        assert_eq!(ambient.get("channel"), Some(&json!("cli")));
    }

    #[tokio::test]
    async fn resolver_fallback_lands_on_the_default_agent() {
        let (orchestrator, budget, _trip) =
            scripted_stack(vec!["complete nonsense".to_string()]);

        let response = orchestrator
            .handle_user_request(&user(), TurnRequest::text("???"))
            .await;

        assert!(response.handled);
        assert_eq!(response.agent, "budget");
        let calls = budget.calls().await;
        assert_eq!(calls[0].0.action, "general_query");
    }
}
