//! Spawn requests handed from the planner to a spawner.

use serde::{Deserialize, Serialize};
use swarm_types::{BodyPart, Role, spawn_tag};

use crate::costs::body_cost;
use crate::memory::AgentMemory;

/// A body to spawn, the memory to give it, and what it costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Body parts in spawn order.
    pub body: Vec<BodyPart>,
    /// Memory attached to the new agent.
    pub memory: AgentMemory,
    /// Energy cost of `body`.
    pub cost: u32,
}

impl SpawnRequest {
    /// Price `body` and pair it with its initial memory.
    pub fn new(body: Vec<BodyPart>, memory: AgentMemory) -> Self {
        let cost = body_cost(&body);
        Self { body, memory, cost }
    }

    /// The role the new agent is being created for.
    pub fn role(&self) -> Role {
        self.memory.role.original_role()
    }

    /// Short label used in plan records, e.g. `"harvest@300"`.
    pub fn tag(&self) -> String {
        spawn_tag(self.role(), self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_types::BodyPart::{Carry, Move, Work};

    #[test]
    fn cost_matches_body() {
        let req = SpawnRequest::new(vec![Move, Move, Work, Carry], AgentMemory::harvester(None));
        assert_eq!(req.cost, 250);
        assert_eq!(req.role(), Role::Harvest);
        assert_eq!(req.tag(), "harvest@250");
    }

    #[test]
    fn worker_request_is_tagged_upgrade() {
        let body = vec![Move, Move, Move, Work, Work, Carry];
        let req = SpawnRequest::new(body, AgentMemory::worker(None));
        assert_eq!(req.role(), Role::Upgrade);
        assert_eq!(req.tag(), "upgrade@400");
    }
}
