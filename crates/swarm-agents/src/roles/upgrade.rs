//! Upgrade role: spend carried energy on the room controller, detouring to
//! refill when empty.

use swarm_types::{ActionResult, Role};
use swarm_world::World;
use tracing::{debug, warn};

use crate::registry::{AgentContext, RoleHandler};

/// Upgrades the agent's room controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpgradeRole;

impl RoleHandler for UpgradeRole {
    fn act(&self, agent: &mut AgentContext<'_>, world: &mut dyn World) {
        let id = agent.id();
        let Some(controller) = world.room_of(id).and_then(|room| world.controller(room)) else {
            warn!(agent = %id, "upgrade: room has no controller");
            return;
        };

        match world.upgrade_controller(id, controller) {
            ActionResult::Ok => {}
            ActionResult::NotEnoughResources => agent.become_role(Role::Refill),
            ActionResult::NotInRange => {
                world.move_to(id, controller);
            }
            ActionResult::Busy => debug!(agent = %id, "upgrade: still being spawned"),
            other => warn!(agent = %id, code = other.code(), "upgrade: unexpected result"),
        }
    }
}
