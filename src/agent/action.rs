//! The structured action protocol between the model and the loop.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the model asked for this cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub action: ActionKind,
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub args: Option<Value>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Tool,
    Final,
}

/// Parse the model's text as one JSON action.
///
/// The text must be a single JSON object. One recovery pass is allowed when
/// the model wraps it in prose: reparse the substring between the first `{`
/// and the last `}`. Anything beyond that is a terminal parse failure for
/// the run.
pub fn parse_action(raw: &str) -> Result<Action, serde_json::Error> {
    let text = raw.trim();
    match serde_json::from_str(text) {
        Ok(action) => Ok(action),
        Err(first_err) => match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if end > start => serde_json::from_str(&text[start..=end]),
            _ => Err(first_err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_pure_json_action() {
        let action = parse_action(r#"{"action":"final","message":"done"}"#)
            .expect("pure JSON parses");
        assert_eq!(action.action, ActionKind::Final);
        assert_eq!(action.message, "done");
        assert_eq!(action.tool_name, None);
    }

    #[test]
    fn recovers_an_object_wrapped_in_prose() {
        let action = parse_action("Sure! {\"action\":\"final\",\"message\":\"ok\"} thanks")
            .expect("embedded JSON recovers");
        assert_eq!(action.action, ActionKind::Final);
        assert_eq!(action.message, "ok");
    }

    #[test]
    fn tool_action_keeps_name_and_args() {
        let action = parse_action(
            r#"{"action":"tool","tool_name":"host_set_param","args":{"name":"width","value":40},"message":"setting width"}"#,
        )
        .expect("tool action parses");
        assert_eq!(action.action, ActionKind::Tool);
        assert_eq!(action.tool_name.as_deref(), Some("host_set_param"));
        assert_eq!(action.args, Some(json!({"name": "width", "value": 40})));
    }

    #[test]
    fn irrecoverable_text_stays_an_error() {
        assert!(parse_action("no json here").is_err());
        assert!(parse_action("{not valid json}").is_err());
        assert!(parse_action(r#"{"action":"think"}"#).is_err());
    }
}
