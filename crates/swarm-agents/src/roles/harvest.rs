//! Harvest role: mine the bound source, then hand off to store when full.
//!
//! A harvester whose source has vanished rebinds to the nearest reachable
//! one. With nowhere left to harvest it removes itself from the world so the
//! planner can replace it.

use swarm_types::{ActionResult, EntityCategory, Role};
use swarm_world::World;
use tracing::{debug, warn};

use crate::registry::{AgentContext, RoleHandler};

/// Mines energy from the bound source.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarvestRole;

impl RoleHandler for HarvestRole {
    fn act(&self, agent: &mut AgentContext<'_>, world: &mut dyn World) {
        let id = agent.id();
        if world.carry(id).is_some_and(|carry| carry.is_full()) {
            agent.become_role(Role::Store);
            return;
        }

        let result = agent
            .source()
            .map_or(ActionResult::InvalidTarget, |source| world.harvest(id, source));

        match result {
            ActionResult::Ok => {}
            ActionResult::NotInRange => {
                if let Some(source) = agent.source() {
                    world.move_to(id, source);
                }
            }
            ActionResult::InvalidTarget => {
                let Some(found) = world.find_closest(id, EntityCategory::Source, None) else {
                    warn!(agent = %id, "harvest: no reachable source, self-terminating");
                    world.suicide(id);
                    return;
                };
                warn!(agent = %id, source = %found.id, "harvest: source lost, rebinding");
                agent.bind_source(found.id);
            }
            ActionResult::Busy => debug!(agent = %id, "harvest: still being spawned"),
            other => warn!(agent = %id, code = other.code(), "harvest: unexpected result"),
        }
    }
}
