//! Typed messages exchanged between the popup and the page companion.

use serde::{Deserialize, Serialize};

use flame_core::{Solution, TargetVector};

use crate::page::PageSnapshot;

/// A request from the popup, tagged by its `action` field.
///
/// ```json
/// { "action": "flameSolver", "data": { "STR": 12, "ATT": 3 } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    /// Read every page entry.
    GetLocalStorage,
    /// Replace the whole page state.
    SetLocalStorage {
        #[serde(default)]
        data: PageSnapshot,
    },
    /// Expand or collapse the flames table.
    ToggleFlamesHeight { enable: bool },
    /// Solve for a target and apply the first solution.
    FlameSolver { data: TargetVector },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Response {
    LocalStorage {
        #[serde(rename = "localStorageData")]
        data: PageSnapshot,
    },
    Ok,
    NoSolution,
    Solved { solution: Solution },
    Failed { message: String },
}
