//! Built-in tools over the [`Workbench`] host.
//!
//! Every handler runs on the host executor thread with exclusive access to
//! the workbench. Argument extraction fails with a plain message; the bridge
//! turns those failures into `ok:false` outcomes for the caller.

use anyhow::anyhow;
use serde_json::{json, Value};

use super::Registry;
use crate::host::Workbench;

/// The fixed tool table for the workbench host.
pub fn workbench_registry() -> Registry<Workbench> {
    let mut registry = Registry::new();

    registry.register("ping", |_wb: &mut Workbench, _args| {
        Ok(json!({"message": "pong"}))
    });
    registry.register("get_state", |wb: &mut Workbench, _args| Ok(wb.snapshot()));
    registry.register("list_params", list_params);
    registry.register("set_param", set_param);
    registry.register("delete_param", delete_param);
    registry.register("reset_workbench", reset_workbench);

    registry
}

fn list_params(wb: &mut Workbench, _args: Value) -> anyhow::Result<Value> {
    let params = wb.parameters().cloned().collect::<Vec<_>>();
    Ok(json!({"parameters": params}))
}

fn set_param(wb: &mut Workbench, args: Value) -> anyhow::Result<Value> {
    let name = args["name"]
        .as_str()
        .ok_or_else(|| anyhow!("Missing 'name' argument"))?;
    let value = args["value"]
        .as_f64()
        .ok_or_else(|| anyhow!("Missing 'value' argument"))?;
    let unit = args["unit"].as_str().unwrap_or("mm");

    let created = wb.set_parameter(name, value, unit);
    wb.record("set_param", format!("{} = {} {}", name, value, unit));

    Ok(json!({"name": name, "value": value, "unit": unit, "created": created}))
}

fn delete_param(wb: &mut Workbench, args: Value) -> anyhow::Result<Value> {
    let name = args["name"]
        .as_str()
        .ok_or_else(|| anyhow!("Missing 'name' argument"))?;

    if !wb.delete_parameter(name) {
        return Err(anyhow!("No parameter named '{}'.", name));
    }
    wb.record("delete_param", name.to_string());

    Ok(json!({"deleted": name}))
}

fn reset_workbench(wb: &mut Workbench, _args: Value) -> anyhow::Result<Value> {
    let dropped = wb.clear_parameters();
    wb.record("reset_workbench", format!("dropped {} parameters", dropped));

    Ok(json!({"deletedParameters": dropped, "remainingParameters": 0}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_the_full_fixed_table() {
        let registry = workbench_registry();
        assert_eq!(
            registry.names(),
            vec![
                "delete_param",
                "get_state",
                "list_params",
                "ping",
                "reset_workbench",
                "set_param",
            ]
        );
    }

    #[test]
    fn set_param_mutates_state_and_journals_the_operation() {
        let mut wb = Workbench::new("Test Doc");
        let result = set_param(&mut wb, json!({"name": "width", "value": 40.0}))
            .expect("set_param succeeds");

        assert_eq!(result["created"], true);
        assert_eq!(result["unit"], "mm");
        assert_eq!(wb.parameter("width").expect("width exists").value, 40.0);
        assert_eq!(wb.journal().len(), 1);
        assert_eq!(wb.journal()[0].op, "set_param");
    }

    #[test]
    fn set_param_requires_name_and_value() {
        let mut wb = Workbench::new("Test Doc");
        let err = set_param(&mut wb, json!({"value": 40.0})).expect_err("missing name");
        assert!(err.to_string().contains("'name'"));

        let err = set_param(&mut wb, json!({"name": "width"})).expect_err("missing value");
        assert!(err.to_string().contains("'value'"));
        assert!(wb.journal().is_empty(), "failed calls must not journal");
    }

    #[test]
    fn delete_param_fails_on_unknown_name() {
        let mut wb = Workbench::new("Test Doc");
        let err = delete_param(&mut wb, json!({"name": "ghost"})).expect_err("nothing to delete");
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn reset_drops_all_parameters_but_keeps_the_journal() {
        let mut wb = Workbench::new("Test Doc");
        set_param(&mut wb, json!({"name": "a", "value": 1.0})).expect("set a");
        set_param(&mut wb, json!({"name": "b", "value": 2.0})).expect("set b");

        let result = reset_workbench(&mut wb, json!({})).expect("reset succeeds");
        assert_eq!(result["deletedParameters"], 2);
        assert_eq!(wb.parameters().count(), 0);
        assert_eq!(wb.journal().len(), 3);
    }
}
