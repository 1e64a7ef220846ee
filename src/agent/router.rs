//! Public tool vocabulary and its mapping onto the listener.
//!
//! The model speaks `host_*` names; each maps one-to-one onto a transport
//! verb plus either a listener path (GET) or an internal tool name (POST).
//! The table is fixed for the process lifetime.

use std::collections::BTreeMap;

/// Transport verb for one public tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
}

/// Where a public tool name lands on the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolRoute {
    pub verb: Verb,
    /// A path for GET routes, an internal tool name for POST routes.
    pub remote: &'static str,
}

/// Immutable public-name routing table.
pub struct ToolRouter {
    routes: BTreeMap<&'static str, ToolRoute>,
}

impl ToolRouter {
    /// The routing table for the workbench tool set.
    pub fn with_workbench_tools() -> Self {
        let mut routes = BTreeMap::new();

        routes.insert(
            "host_ping",
            ToolRoute {
                verb: Verb::Get,
                remote: "/ping",
            },
        );
        routes.insert(
            "host_get_state",
            ToolRoute {
                verb: Verb::Get,
                remote: "/state",
            },
        );
        routes.insert(
            "host_list_params",
            ToolRoute {
                verb: Verb::Post,
                remote: "list_params",
            },
        );
        routes.insert(
            "host_set_param",
            ToolRoute {
                verb: Verb::Post,
                remote: "set_param",
            },
        );
        routes.insert(
            "host_delete_param",
            ToolRoute {
                verb: Verb::Post,
                remote: "delete_param",
            },
        );
        routes.insert(
            "host_reset_workbench",
            ToolRoute {
                verb: Verb::Post,
                remote: "reset_workbench",
            },
        );

        Self { routes }
    }

    pub fn lookup(&self, name: &str) -> Option<ToolRoute> {
        self.routes.get(name).copied()
    }

    /// Every public name, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.routes.keys().copied().collect()
    }
}
