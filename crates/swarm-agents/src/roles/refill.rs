//! Refill role: draw energy from the bound storage structure until full,
//! then return to whatever the agent was doing.

use swarm_types::ActionResult;
use swarm_world::World;
use tracing::{debug, warn};

use crate::registry::{AgentContext, RoleHandler};

/// Withdraws energy from the bound storage structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefillRole;

impl RoleHandler for RefillRole {
    fn act(&self, agent: &mut AgentContext<'_>, world: &mut dyn World) {
        let id = agent.id();
        let result = agent
            .storage()
            .map_or(ActionResult::InvalidTarget, |storage| world.withdraw(id, storage));

        match result {
            ActionResult::Ok => {}
            ActionResult::NotInRange => {
                if let Some(storage) = agent.storage() {
                    world.move_to(id, storage);
                }
            }
            ActionResult::Full => agent.unbecome(),
            ActionResult::NotEnoughResources => {
                debug!(agent = %id, "refill: storage empty, waiting");
            }
            ActionResult::Busy => debug!(agent = %id, "refill: still being spawned"),
            ActionResult::InvalidTarget => {
                warn!(agent = %id, storage = ?agent.storage(), "refill: storage missing, waiting");
            }
            other => warn!(agent = %id, code = other.code(), "refill: unexpected result"),
        }
    }
}
