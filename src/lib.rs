//! # hostbridge
//!
//! A loopback HTTP bridge for single-threaded host applications, plus an
//! LLM agent loop that drives the bridge through a strict tool protocol.
//!
//! This library provides:
//! - A task bridge that accepts submissions from any thread and executes
//!   every handler on one designated host thread
//! - An HTTP API (shared-secret header auth) for submitting tool calls
//! - A JSON action protocol and bounded agent loop for model-driven control
//!
//! ## Architecture
//!
//! Control flows in one direction:
//! 1. The agent loop asks the model for a structured action
//! 2. Tool actions are dispatched over HTTP to the request listener
//! 3. The listener resolves the tool in the registry and submits it to the
//!    task bridge
//! 4. The host executor drains queued tasks on the host thread and replies
//!    with an outcome, which travels back up the same chain
//!
//! ## Example
//!
//! ```rust,ignore
//! use hostbridge::{bridge::Bridge, host::Workbench, tools};
//!
//! let registry = tools::workbench_registry();
//! let bridge = Bridge::start(Workbench::new("Untitled"));
//! let handler = registry.lookup("get_state")?;
//! let outcome = bridge.handle().submit("get_state", handler, serde_json::json!({})).await;
//! ```

pub mod agent;
pub mod api;
pub mod bridge;
pub mod config;
pub mod host;
pub mod llm;
pub mod tools;

pub use config::Config;
