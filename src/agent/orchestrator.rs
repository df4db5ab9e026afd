// src/agent/orchestrator.rs

use std::sync::Arc;

use tracing::{info, warn};

use super::prompt::{compose, enhance_prompt, system_message};
use super::providers::{GenerativeProvider, ToolCallingProvider};
use super::types::{ChatMessage, OrchestrationResult, ToolInvocation};
use crate::error::AgentError;
use crate::tools::ToolDispatcher;

/// Upper bound on fallback provider calls per request.
pub const MAX_TOOL_STEPS: usize = 10;

/// Turns a user prompt into a response: primary provider first, then the
/// tool-calling fallback.
pub struct Orchestrator {
    primary: Arc<dyn GenerativeProvider>,
    fallback: Arc<dyn ToolCallingProvider>,
    dispatcher: Arc<ToolDispatcher>,
    system: String,
}

impl Orchestrator {
    pub fn new(
        primary: Arc<dyn GenerativeProvider>,
        fallback: Arc<dyn ToolCallingProvider>,
        dispatcher: Arc<ToolDispatcher>,
    ) -> Self {
        let system = system_message(dispatcher.chain_name());
        Self {
            primary,
            fallback,
            dispatcher,
            system,
        }
    }

    pub async fn handle(
        &self,
        prompt: &str,
        is_rootstock: bool,
    ) -> Result<OrchestrationResult, AgentError> {
        let prompt = enhance_prompt(prompt, is_rootstock);

        match self.primary.generate(&compose(&self.system, &prompt)).await {
            Ok(response) => {
                info!("{} answered without tools", self.primary.name());
                return Ok(OrchestrationResult {
                    response,
                    tool_results: Vec::new(),
                });
            }
            Err(e) => warn!(
                "{} failed, falling back to {}: {}",
                self.primary.name(),
                self.fallback.name(),
                e
            ),
        }

        self.run_tool_loop(prompt).await
    }

    async fn run_tool_loop(&self, prompt: String) -> Result<OrchestrationResult, AgentError> {
        let mut messages = vec![ChatMessage::System(self.system.clone()), ChatMessage::User(prompt)];
        let mut tool_results = Vec::new();
        let mut response = String::new();

        for step in 1..=MAX_TOOL_STEPS {
            let turn = self.fallback.complete(&messages, self.dispatcher.schemas()).await?;
            response = turn.text.clone();

            if turn.tool_calls.is_empty() {
                tool_results.push(Vec::new());
                info!("Step {}: final answer", step);
                break;
            }

            let mut step_results = Vec::with_capacity(turn.tool_calls.len());
            let mut replies = Vec::with_capacity(turn.tool_calls.len());
            for requested in &turn.tool_calls {
                let result = self.dispatcher.dispatch(requested.call.clone()).await;
                info!(
                    "Step {}: {} -> {}",
                    step,
                    requested.call.name,
                    if result.is_ok() { "ok" } else { "err" }
                );
                replies.push(ChatMessage::Tool {
                    call_id: requested.id.clone(),
                    name: requested.call.name.clone(),
                    result: result.to_value(),
                });
                step_results.push(ToolInvocation {
                    tool_call_id: requested.id.clone(),
                    tool_name: requested.call.name.clone(),
                    args: requested.call.arguments.clone(),
                    result,
                });
            }
            tool_results.push(step_results);

            messages.push(ChatMessage::Assistant {
                text: turn.text,
                tool_calls: turn.tool_calls,
            });
            messages.extend(replies);
        }

        if tool_results.len() == MAX_TOOL_STEPS
            && tool_results.last().is_some_and(|step| !step.is_empty())
        {
            warn!("Tool loop stopped after {} steps", MAX_TOOL_STEPS);
        }

        Ok(OrchestrationResult {
            response,
            tool_results,
        })
    }
}
