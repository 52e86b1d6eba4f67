//! Collaborator interfaces the colony core consumes.
//!
//! The core never owns the world. It asks questions through [`WorldQuery`],
//! attempts one action per agent per tick through [`Actions`], and hands
//! spawn requests to a [`Spawner`]. Every call is synchronous and returns
//! immediately; failures come back as [`ActionResult`] codes or as the
//! absence of a match, never as errors.

use serde::{Deserialize, Serialize};
use swarm_types::{ActionResult, AgentId, BodyPart, EntityCategory, EntityId, RoomId};

/// What a search reports about a world object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    /// The object's identifier.
    pub id: EntityId,
    /// The object's category.
    pub category: EntityCategory,
    /// The room the object lives in.
    pub room: RoomId,
    /// Stored energy (sources, spawns, extensions), otherwise 0.
    pub energy: u32,
    /// Maximum storable energy, otherwise 0.
    pub energy_capacity: u32,
}

impl EntityInfo {
    /// Whether the object can accept more energy.
    pub const fn has_free_capacity(&self) -> bool {
        self.energy < self.energy_capacity
    }
}

/// An agent's carried energy and carry capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carry {
    /// Energy currently carried.
    pub energy: u32,
    /// Maximum carried energy.
    pub capacity: u32,
}

impl Carry {
    /// Whether the agent carries as much as it can.
    pub const fn is_full(&self) -> bool {
        self.energy == self.capacity
    }
}

/// Optional predicate narrowing a search.
pub type EntityFilter<'a> = Option<&'a dyn Fn(&EntityInfo) -> bool>;

/// Read-only queries against the world.
pub trait WorldQuery {
    /// All agents the world currently considers alive, in a stable order.
    fn live_agents(&self) -> Vec<AgentId>;

    /// Whether the agent still exists.
    fn is_alive(&self, agent: AgentId) -> bool;

    /// The room the agent is in.
    fn room_of(&self, agent: AgentId) -> Option<RoomId>;

    /// The agent's carried energy, or `None` for an unknown agent.
    fn carry(&self, agent: AgentId) -> Option<Carry>;

    /// The object of `category` with the shortest walkable path from
    /// `agent`, optionally narrowed by `filter`.
    fn find_closest(
        &self,
        agent: AgentId,
        category: EntityCategory,
        filter: EntityFilter<'_>,
    ) -> Option<EntityInfo>;

    /// Every object of `category` in `room`, in discovery order.
    fn find_in_room(
        &self,
        room: RoomId,
        category: EntityCategory,
        filter: EntityFilter<'_>,
    ) -> Vec<EntityInfo>;

    /// The room's controller, if it has one.
    fn controller(&self, room: RoomId) -> Option<EntityId> {
        self.find_in_room(room, EntityCategory::Controller, None)
            .first()
            .map(|info| info.id)
    }
}

/// Physical action primitives. Each returns the host's result code.
pub trait Actions {
    /// Take one step toward `target`.
    fn move_to(&mut self, agent: AgentId, target: EntityId) -> ActionResult;

    /// Harvest energy from a source.
    fn harvest(&mut self, agent: AgentId, source: EntityId) -> ActionResult;

    /// Spend carried energy on a construction site.
    fn build(&mut self, agent: AgentId, site: EntityId) -> ActionResult;

    /// Draw energy out of a sink into the agent.
    fn withdraw(&mut self, agent: AgentId, from: EntityId) -> ActionResult;

    /// Deposit carried energy into a sink.
    fn transfer(&mut self, agent: AgentId, to: EntityId) -> ActionResult;

    /// Spend carried energy on the room controller.
    fn upgrade_controller(&mut self, agent: AgentId, controller: EntityId) -> ActionResult;

    /// Remove the agent from the world permanently.
    fn suicide(&mut self, agent: AgentId) -> ActionResult;
}

/// The full world capability handed to behavior handlers.
pub trait World: WorldQuery + Actions {}

impl<T: WorldQuery + Actions + ?Sized> World for T {}

/// Materializes spawn requests into new agents.
///
/// The planner never sees the outcome. The host's tick cycle uses the
/// returned id only to attach the request's initial memory.
pub trait Spawner {
    /// Try to start spawning a body in `room`. Returns the new agent's id
    /// when a spawn structure accepted the order.
    fn submit(&mut self, room: RoomId, body: &[BodyPart], cost: u32) -> Option<AgentId>;
}

/// The host's notion of time.
pub trait Clock {
    /// The current tick.
    fn now(&self) -> u64;

    /// Close the current tick and start the next one.
    fn advance(&mut self);
}
