//! The bounded agent loop.
//!
//! One turn: append the user message, then cycle model call / action parse /
//! tool dispatch until the model answers with `action:"final"` or the step
//! budget runs out. The loop is strictly sequential: one model call and at
//! most one tool dispatch in flight at any time.

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

use crate::llm::{ChatMessage, LlmClient};

use super::action::{parse_action, ActionKind};
use super::client::ToolTransport;
use super::prompt::build_system_prompt;
use super::router::{ToolRouter, Verb};

/// Cycles allowed within one turn before giving up.
pub const DEFAULT_MAX_STEPS: usize = 12;

/// Fixed reply when the budget runs out. Deliberately not an error.
pub const MAX_STEPS_MESSAGE: &str = "Max steps reached without finishing.";

/// Terminal failures of one run. The bridge and host are unaffected; the
/// next run starts clean.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model did not return valid JSON: {source}")]
    ModelOutputParse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model call failed: {0}")]
    Model(#[source] anyhow::Error),
}

/// Sequential tool-calling loop over a model and a listener transport.
pub struct AgentLoop {
    llm: Arc<dyn LlmClient>,
    transport: Arc<dyn ToolTransport>,
    router: ToolRouter,
    max_steps: usize,
}

impl AgentLoop {
    pub fn new(llm: Arc<dyn LlmClient>, transport: Arc<dyn ToolTransport>) -> Self {
        Self {
            llm,
            transport,
            router: ToolRouter::with_workbench_tools(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Fresh conversation seeded with the system prompt.
    pub fn new_conversation(&self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(build_system_prompt(&self.router))]
    }

    /// Run one user turn to completion and return the final answer.
    ///
    /// Every tool step appends exactly two entries to the conversation: the
    /// model's structured action and the tool result. A `final` action
    /// appends one entry and terminates the turn.
    pub async fn run_turn(
        &self,
        user_text: &str,
        conversation: &mut Vec<ChatMessage>,
    ) -> Result<String, AgentError> {
        conversation.push(ChatMessage::user(user_text));

        for step in 0..self.max_steps {
            let raw = self
                .llm
                .complete(conversation)
                .await
                .map_err(AgentError::Model)?;

            let action = match parse_action(&raw) {
                Ok(action) => action,
                Err(source) => {
                    // Keep the offending text in the transcript for the report.
                    conversation.push(ChatMessage::assistant(raw.clone()));
                    return Err(AgentError::ModelOutputParse { raw, source });
                }
            };

            let canonical =
                serde_json::to_string(&action).unwrap_or_else(|_| raw.clone());
            conversation.push(ChatMessage::assistant(canonical));

            match action.action {
                ActionKind::Final => {
                    tracing::debug!(step, "agent reached final answer");
                    return Ok(action.message);
                }
                ActionKind::Tool => {
                    let tool_name = action.tool_name.as_deref().unwrap_or("");
                    let args = action
                        .args
                        .clone()
                        .unwrap_or_else(|| Value::Object(Default::default()));

                    tracing::debug!(step, tool = tool_name, "dispatching tool action");
                    let result = self.dispatch(tool_name, &args).await;

                    let entry = json!({
                        "tool_result": {
                            "tool_name": tool_name,
                            "args": args,
                            "result": result,
                        }
                    });
                    conversation.push(ChatMessage::user(
                        serde_json::to_string_pretty(&entry)
                            .unwrap_or_else(|_| entry.to_string()),
                    ));
                }
            }
        }

        tracing::warn!(max_steps = self.max_steps, "step budget exhausted");
        Ok(MAX_STEPS_MESSAGE.to_string())
    }

    /// Route one tool action. Unknown names never touch the network, and
    /// transport failures come back as data so the model can recover.
    async fn dispatch(&self, tool_name: &str, args: &Value) -> Value {
        let Some(route) = self.router.lookup(tool_name) else {
            tracing::warn!(tool = tool_name, "model requested a tool outside the router");
            return json!({"ok": false, "error": "tool not allowed"});
        };

        let sent = match route.verb {
            Verb::Get => self.transport.get(route.remote).await,
            Verb::Post => self.transport.post_tool(route.remote, args).await,
        };

        match sent {
            Ok(result) => result,
            Err(err) => json!({"ok": false, "error": err.to_string()}),
        }
    }
}
