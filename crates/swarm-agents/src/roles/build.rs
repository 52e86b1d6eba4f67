//! Build role: put carried energy into the nearest construction site.

use swarm_types::{ActionResult, EntityCategory, Role};
use swarm_world::World;
use tracing::{debug, warn};

use crate::registry::{AgentContext, RoleHandler};

/// Spends energy on construction, detouring to refill when empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildRole;

impl RoleHandler for BuildRole {
    fn act(&self, agent: &mut AgentContext<'_>, world: &mut dyn World) {
        let id = agent.id();
        let Some(site) = world.find_closest(id, EntityCategory::ConstructionSite, None) else {
            debug!(agent = %id, "build: no construction site in reach");
            return;
        };

        match world.build(id, site.id) {
            ActionResult::Ok => {}
            ActionResult::NotInRange => {
                world.move_to(id, site.id);
            }
            ActionResult::NotEnoughResources => agent.become_role(Role::Refill),
            ActionResult::InvalidTarget => {
                warn!(agent = %id, site = %site.id, "build: site rejected as target");
            }
            ActionResult::Busy => debug!(agent = %id, "build: still being spawned"),
            other => warn!(agent = %id, code = other.code(), "build: unexpected result"),
        }
    }
}
