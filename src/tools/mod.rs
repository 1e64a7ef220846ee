//! Tool registry: the fixed table mapping tool names to host handlers.
//!
//! The table is built once at process start and never mutated afterwards.
//! Lookup is an exact, case-sensitive match; a miss returns a typed error
//! carrying every registered name so callers can report what *is* available.

mod workbench_ops;

pub use workbench_ops::workbench_registry;

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::bridge::Handler;

/// Lookup miss, including the full valid-name list for diagnostics.
#[derive(Debug, Clone, Error)]
#[error("unknown tool '{requested}'")]
pub struct UnknownTool {
    pub requested: String,
    pub available: Vec<String>,
}

/// Immutable name-to-handler table for one host type.
pub struct Registry<H> {
    handlers: BTreeMap<String, Handler<H>>,
}

impl<H> Registry<H> {
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a handler under an exact name. Intended to be called only
    /// while building the table at startup.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut H, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), std::sync::Arc::new(handler));
    }

    /// Resolve a tool name to its handler.
    pub fn lookup(&self, name: &str) -> Result<Handler<H>, UnknownTool> {
        self.handlers.get(name).cloned().ok_or_else(|| UnknownTool {
            requested: name.to_string(),
            available: self.names(),
        })
    }

    /// Every registered name, sorted.
    pub fn names(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_miss_lists_every_registered_name() {
        let mut registry: Registry<()> = Registry::new();
        registry.register("ping", |_, _| Ok(json!("pong")));
        registry.register("get_state", |_, _| Ok(json!({})));

        let err = registry
            .lookup("nonexistent")
            .err()
            .expect("lookup should miss");
        assert_eq!(err.requested, "nonexistent");
        assert_eq!(err.available, vec!["get_state", "ping"]);
        assert!(err.to_string().contains("unknown tool"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut registry: Registry<()> = Registry::new();
        registry.register("ping", |_, _| Ok(json!("pong")));

        assert!(registry.lookup("ping").is_ok());
        assert!(registry.lookup("Ping").is_err());
    }
}
