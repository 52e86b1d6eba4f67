//! Persistent per-agent memory.
//!
//! [`AgentMemory`] is everything the colony core keeps about one agent
//! between ticks: its [`RoleState`] plus the role-specific bindings the
//! handlers read. It is plain data and serializes to JSON as
//! `{"role": {"act", "was", "age"}, "source", "storage"}`.

use serde::{Deserialize, Serialize};
use swarm_types::{EntityId, Role};

use crate::role_stack::RoleState;

/// One agent's persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMemory {
    /// Role stack and time in role.
    pub role: RoleState,
    /// Energy source the agent harvests from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EntityId>,
    /// Structure the agent refills from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<EntityId>,
}

impl AgentMemory {
    /// A record running `role` with no history and no bindings.
    pub const fn new(role: Role) -> Self {
        Self {
            role: RoleState::new(role),
            source: None,
            storage: None,
        }
    }

    /// Initial memory of a harvester: harvests `source`, returns nowhere.
    pub const fn harvester(source: Option<EntityId>) -> Self {
        Self {
            role: RoleState::new(Role::Harvest),
            source,
            storage: None,
        }
    }

    /// Initial memory of a worker: starts by refilling from `storage` and
    /// upgrades once full.
    pub fn worker(storage: Option<EntityId>) -> Self {
        Self {
            role: RoleState::with_history(Role::Refill, vec![Role::Upgrade]),
            source: None,
            storage,
        }
    }
}
