//! Store role: deposit carried energy into a spawn or extension that still
//! has room, then return to the previous role.
//!
//! The sink is chosen afresh every tick: spawns first, then extensions, each
//! in room discovery order.

use swarm_types::{ActionResult, EntityCategory};
use swarm_world::{EntityInfo, World};
use tracing::{debug, warn};

use crate::registry::{AgentContext, RoleHandler};

/// Delivers energy to the room's spawn structures.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreRole;

impl RoleHandler for StoreRole {
    fn act(&self, agent: &mut AgentContext<'_>, world: &mut dyn World) {
        let id = agent.id();
        let Some(room) = world.room_of(id) else {
            debug!(agent = %id, "store: agent has no room");
            return;
        };

        let has_room = |info: &EntityInfo| info.has_free_capacity();
        let target = [EntityCategory::Spawn, EntityCategory::Extension]
            .into_iter()
            .flat_map(|category| world.find_in_room(room, category, Some(&has_room)))
            .next();
        let Some(target) = target else {
            debug!(agent = %id, "store: every sink is full");
            return;
        };

        match world.transfer(id, target.id) {
            ActionResult::Ok => agent.unbecome(),
            ActionResult::NotInRange => {
                world.move_to(id, target.id);
            }
            ActionResult::Busy => debug!(agent = %id, "store: still being spawned"),
            other => warn!(agent = %id, code = other.code(), "store: unexpected result"),
        }
    }
}
