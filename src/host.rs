//! The demo host application state.
//!
//! Handlers are opaque to the bridge, so any `Send + 'static` type can play
//! the host role (tests use throwaway structs). The shipped host is a
//! [`Workbench`]: a named document carrying a parameter table and an
//! append-only journal of applied operations. All of it is touched only from
//! the host executor thread.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One named parameter of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub expression: String,
    pub value: f64,
    pub unit: String,
}

/// One applied operation, in application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub index: usize,
    pub op: String,
    pub detail: String,
    pub at: String,
}

/// In-memory document state owned by the host thread.
#[derive(Debug, Clone, Default)]
pub struct Workbench {
    name: String,
    parameters: BTreeMap<String, Parameter>,
    journal: Vec<JournalEntry>,
}

impl Workbench {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: BTreeMap::new(),
            journal: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in name order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Create or update a parameter. Returns `true` when it did not exist.
    pub fn set_parameter(&mut self, name: &str, value: f64, unit: &str) -> bool {
        let created = !self.parameters.contains_key(name);
        self.parameters.insert(
            name.to_string(),
            Parameter {
                name: name.to_string(),
                expression: format!("{} {}", value, unit),
                value,
                unit: unit.to_string(),
            },
        );
        created
    }

    /// Returns `true` when a parameter was actually removed.
    pub fn delete_parameter(&mut self, name: &str) -> bool {
        self.parameters.remove(name).is_some()
    }

    /// Remove every parameter, returning how many were dropped.
    pub fn clear_parameters(&mut self) -> usize {
        let dropped = self.parameters.len();
        self.parameters.clear();
        dropped
    }

    /// Append an operation to the journal.
    pub fn record(&mut self, op: &str, detail: impl Into<String>) {
        let index = self.journal.len();
        self.journal.push(JournalEntry {
            index,
            op: op.to_string(),
            detail: detail.into(),
            at: Utc::now().to_rfc3339(),
        });
    }

    /// Full state snapshot, as served by `GET /state`.
    pub fn snapshot(&self) -> Value {
        serde_json::json!({
            "documentName": self.name,
            "parameters": self.parameters.values().collect::<Vec<_>>(),
            "journal": self.journal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_parameter_reports_creation_and_updates_in_place() {
        let mut wb = Workbench::new("Test Doc");
        assert!(wb.set_parameter("width", 40.0, "mm"));
        assert!(!wb.set_parameter("width", 55.0, "mm"));

        let param = wb.parameter("width").expect("width exists");
        assert_eq!(param.value, 55.0);
        assert_eq!(param.expression, "55 mm");
    }

    #[test]
    fn snapshot_carries_name_parameters_and_journal() {
        let mut wb = Workbench::new("Test Doc");
        wb.set_parameter("height", 30.0, "mm");
        wb.record("set_param", "height = 30 mm");

        let snapshot = wb.snapshot();
        assert_eq!(snapshot["documentName"], "Test Doc");
        assert_eq!(snapshot["parameters"][0]["name"], "height");
        assert_eq!(snapshot["journal"][0]["op"], "set_param");
        assert_eq!(snapshot["journal"][0]["index"], 0);
    }
}
