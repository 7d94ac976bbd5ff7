// Worker lifecycle states and activation planning
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Lifecycle state of the cache worker.
///
/// A generation moves Installing → Installed → Activating → Active.
/// With `skip_waiting` disabled it parks at Installed until a
/// skip-waiting control message arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    Installing,
    Installed,
    Activating,
    Active,
}

impl std::fmt::Display for WorkerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Active => "active",
        };
        f.write_str(s)
    }
}

/// Compute which store names activation must delete.
///
/// Takes the current store inventory and returns every name that does
/// not match the current versioned store name. Pure so the pruning rule
/// is testable without a registry.
pub fn activation_plan(inventory: &[String], current: &str) -> Vec<String> {
    inventory
        .iter()
        .filter(|name| name.as_str() != current)
        .cloned()
        .collect()
}
