//! The fleet planner's observability record.
//!
//! Once per tick the planner writes a [`PlanRecord`] into the persistent
//! store so external tooling can see which roles are live and what is about
//! to be spawned. The record never feeds back into control flow.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Role;

/// Snapshot of the population and the spawn queue for one tick.
///
/// Serialized shape:
///
/// ```json
/// { "knownAgentRoles": ["harvest", "upgrade"], "plannedSpawns": ["harvest@250"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlanRecord {
    /// Current role of every live agent, in iteration order.
    pub known_agent_roles: Vec<Role>,
    /// Every planned spawn request tagged as `originalRole@cost`.
    pub planned_spawns: Vec<String>,
}

/// Format a planned spawn as `role@cost`.
pub fn spawn_tag(role: Role, cost: u32) -> String {
    format!("{role}@{cost}")
}
