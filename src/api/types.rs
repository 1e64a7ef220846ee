//! API request types.

use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /tool`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    /// Internal tool name, matched exactly against the registry
    pub tool: String,

    /// Handler payload; defaults to an empty object
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}
