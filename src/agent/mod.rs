//! Agent module - model-driven control of the bridge.
//!
//! Each cycle the model emits one JSON action: either a tool call, routed
//! through the public tool table and dispatched over HTTP to the request
//! listener, or a final answer that ends the turn. Tool results are appended
//! to the conversation so the model can react, bounded by a hard step budget.

mod action;
mod agent_loop;
mod client;
mod prompt;
mod router;

pub use action::{parse_action, Action, ActionKind};
pub use agent_loop::{AgentError, AgentLoop, DEFAULT_MAX_STEPS, MAX_STEPS_MESSAGE};
pub use client::{HttpBridgeClient, ToolTransport};
pub use prompt::build_system_prompt;
pub use router::{ToolRoute, ToolRouter, Verb};
