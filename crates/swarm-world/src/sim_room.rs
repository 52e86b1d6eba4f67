//! In-memory single-room world.
//!
//! [`SimRoom`] implements every collaborator trait from [`crate::api`] over a
//! small grid: sources that regenerate, spawns and extensions that hold
//! energy, construction sites that turn into extensions when finished, and a
//! controller that accumulates upgrade progress. It exists so the colony core
//! can be exercised end-to-end without a live host, in tests and in the
//! engine binary.
//!
//! Rules:
//! - harvest, withdraw, and transfer need range 1; build and upgrade need
//!   range 3;
//! - each `work` part harvests 2, builds 5, or upgrades 1 energy per tick;
//! - each `carry` part holds 50 energy;
//! - a new agent is busy for 3 ticks per body part while it spawns.

use std::collections::BTreeMap;

use swarm_types::{ActionResult, AgentId, BodyPart, EntityCategory, EntityId, RoomId};
use tracing::debug;

use crate::api::{Actions, Carry, Clock, EntityFilter, EntityInfo, Spawner, WorldQuery};
use crate::error::WorldError;
use crate::position::{Position, ROOM_SIZE};

/// Energy held by one `carry` part.
pub const CARRY_CAPACITY: u32 = 50;

/// Energy harvested per `work` part per tick.
pub const HARVEST_POWER: u32 = 2;

/// Build progress per `work` part per tick.
pub const BUILD_POWER: u32 = 5;

/// Upgrade progress per `work` part per tick.
pub const UPGRADE_POWER: u32 = 1;

/// Energy capacity of a spawn structure.
pub const SPAWN_ENERGY_CAPACITY: u32 = 300;

/// Energy capacity of an extension.
pub const EXTENSION_ENERGY_CAPACITY: u32 = 50;

/// Energy a source regains per tick.
pub const SOURCE_REGEN_PER_TICK: u32 = 10;

/// Energy a spawn regains per tick on its own.
pub const SPAWN_REGEN_PER_TICK: u32 = 1;

/// Ticks a spawn spends per body part.
pub const SPAWN_TICKS_PER_PART: u64 = 3;

const ACTION_RANGE: u8 = 1;
const WORK_RANGE: u8 = 3;

/// Host code for acting on an agent the caller does not control.
const ERR_NOT_OWNER: i32 = -1;
/// Host code for an agent missing the body part an action needs.
const ERR_NO_BODYPART: i32 = -12;

#[derive(Debug, Clone)]
struct SimEntity {
    id: EntityId,
    category: EntityCategory,
    pos: Position,
    energy: u32,
    energy_capacity: u32,
    progress: u32,
    progress_total: u32,
    busy_until: u64,
}

impl SimEntity {
    const fn info(&self, room: RoomId) -> EntityInfo {
        EntityInfo {
            id: self.id,
            category: self.category,
            room,
            energy: self.energy,
            energy_capacity: self.energy_capacity,
        }
    }

    const fn is_sink(&self) -> bool {
        matches!(
            self.category,
            EntityCategory::Spawn | EntityCategory::Extension
        )
    }
}

#[derive(Debug, Clone)]
struct SimAgent {
    pos: Position,
    body: Vec<BodyPart>,
    energy: u32,
    busy_until: u64,
}

impl SimAgent {
    fn parts(&self, part: BodyPart) -> u32 {
        let count = self.body.iter().filter(|p| **p == part).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn capacity(&self) -> u32 {
        self.parts(BodyPart::Carry).saturating_mul(CARRY_CAPACITY)
    }

    fn free_capacity(&self) -> u32 {
        self.capacity().saturating_sub(self.energy)
    }
}

/// A single simulated room.
#[derive(Debug, Clone)]
pub struct SimRoom {
    id: RoomId,
    tick: u64,
    /// World objects in discovery order.
    entities: Vec<SimEntity>,
    agents: BTreeMap<AgentId, SimAgent>,
}

impl SimRoom {
    /// Create an empty room at tick 0.
    pub fn new() -> Self {
        Self {
            id: RoomId::new(),
            tick: 0,
            entities: Vec::new(),
            agents: BTreeMap::new(),
        }
    }

    /// The room's identifier.
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// The room's current tick.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    // -------------------------------------------------------------------
    // Setup
    // -------------------------------------------------------------------

    /// Add a full energy source holding `capacity` energy.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a position off the grid.
    pub fn add_source(&mut self, pos: Position, capacity: u32) -> Result<EntityId, WorldError> {
        self.insert_entity(EntityCategory::Source, pos, capacity, capacity, 0)
    }

    /// Add a spawn structure holding `energy`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::OverCapacity`].
    pub fn add_spawn(&mut self, pos: Position, energy: u32) -> Result<EntityId, WorldError> {
        self.insert_entity(EntityCategory::Spawn, pos, energy, SPAWN_ENERGY_CAPACITY, 0)
    }

    /// Add an extension holding `energy`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] or [`WorldError::OverCapacity`].
    pub fn add_extension(&mut self, pos: Position, energy: u32) -> Result<EntityId, WorldError> {
        self.insert_entity(
            EntityCategory::Extension,
            pos,
            energy,
            EXTENSION_ENERGY_CAPACITY,
            0,
        )
    }

    /// Add a construction site that completes after `progress_total`
    /// build points. A finished site becomes an empty extension.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a position off the grid.
    pub fn add_construction_site(
        &mut self,
        pos: Position,
        progress_total: u32,
    ) -> Result<EntityId, WorldError> {
        self.insert_entity(EntityCategory::ConstructionSite, pos, 0, 0, progress_total)
    }

    /// Add the room controller.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a position off the grid.
    pub fn add_controller(&mut self, pos: Position) -> Result<EntityId, WorldError> {
        self.insert_entity(EntityCategory::Controller, pos, 0, 0, 0)
    }

    fn insert_entity(
        &mut self,
        category: EntityCategory,
        pos: Position,
        energy: u32,
        energy_capacity: u32,
        progress_total: u32,
    ) -> Result<EntityId, WorldError> {
        check_bounds(pos)?;
        if energy > energy_capacity {
            return Err(WorldError::OverCapacity {
                energy,
                capacity: energy_capacity,
            });
        }
        let id = EntityId::new();
        self.entities.push(SimEntity {
            id,
            category,
            pos,
            energy,
            energy_capacity,
            progress: 0,
            progress_total,
            busy_until: 0,
        });
        Ok(id)
    }

    /// Place a ready (not spawning) agent with an empty carry.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for a position off the grid.
    pub fn add_agent(&mut self, pos: Position, body: Vec<BodyPart>) -> Result<AgentId, WorldError> {
        check_bounds(pos)?;
        let id = AgentId::new();
        self.agents.insert(
            id,
            SimAgent {
                pos,
                body,
                energy: 0,
                busy_until: 0,
            },
        );
        Ok(id)
    }

    /// Remove a world object, as if it had been destroyed or depleted.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if no such object exists.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<EntityInfo, WorldError> {
        let idx = self
            .entities
            .iter()
            .position(|e| e.id == id)
            .ok_or(WorldError::EntityNotFound(id))?;
        let removed = self.entities.remove(idx);
        Ok(removed.info(self.id))
    }

    /// Set the energy an agent carries.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotFound`] or [`WorldError::OverCapacity`].
    pub fn set_agent_energy(&mut self, agent: AgentId, energy: u32) -> Result<(), WorldError> {
        let state = self
            .agents
            .get_mut(&agent)
            .ok_or(WorldError::AgentNotFound(agent))?;
        let capacity = state.capacity();
        if energy > capacity {
            return Err(WorldError::OverCapacity { energy, capacity });
        }
        state.energy = energy;
        Ok(())
    }

    // -------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------

    /// Current state of a world object.
    pub fn entity(&self, id: EntityId) -> Option<EntityInfo> {
        self.entities
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.info(self.id))
    }

    /// Accumulated build or upgrade progress of a world object.
    pub fn entity_progress(&self, id: EntityId) -> Option<u32> {
        self.entities.iter().find(|e| e.id == id).map(|e| e.progress)
    }

    /// Where an agent stands.
    pub fn agent_position(&self, agent: AgentId) -> Option<Position> {
        self.agents.get(&agent).map(|a| a.pos)
    }

    /// Total energy currently stored in spawns and extensions.
    pub fn stored_energy(&self) -> u32 {
        self.entities
            .iter()
            .filter(|e| e.is_sink())
            .fold(0_u32, |acc, e| acc.saturating_add(e.energy))
    }

    // -------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------

    /// Close the current tick: sources and spawns regenerate, then the tick
    /// counter advances.
    pub fn end_tick(&mut self) {
        for entity in &mut self.entities {
            let regen = match entity.category {
                EntityCategory::Source => SOURCE_REGEN_PER_TICK,
                EntityCategory::Spawn => SPAWN_REGEN_PER_TICK,
                _ => 0,
            };
            entity.energy = entity
                .energy
                .saturating_add(regen)
                .min(entity.energy_capacity);
        }
        self.tick = self.tick.saturating_add(1);
    }
}

impl Default for SimRoom {
    fn default() -> Self {
        Self::new()
    }
}

const fn check_bounds(pos: Position) -> Result<(), WorldError> {
    if pos.in_bounds() {
        Ok(())
    } else {
        Err(WorldError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            size: ROOM_SIZE,
        })
    }
}

/// Resolve an agent that may act this tick.
fn ready_agent(
    agents: &mut BTreeMap<AgentId, SimAgent>,
    agent: AgentId,
    tick: u64,
) -> Result<&mut SimAgent, ActionResult> {
    let state = agents
        .get_mut(&agent)
        .ok_or(ActionResult::Other(ERR_NOT_OWNER))?;
    if state.busy_until > tick {
        return Err(ActionResult::Busy);
    }
    Ok(state)
}

fn find_target(
    entities: &mut [SimEntity],
    id: EntityId,
    accepts: impl Fn(&SimEntity) -> bool,
) -> Option<&mut SimEntity> {
    entities.iter_mut().find(|e| e.id == id && accepts(e))
}

impl WorldQuery for SimRoom {
    fn live_agents(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    fn is_alive(&self, agent: AgentId) -> bool {
        self.agents.contains_key(&agent)
    }

    fn room_of(&self, agent: AgentId) -> Option<RoomId> {
        self.agents.contains_key(&agent).then_some(self.id)
    }

    fn carry(&self, agent: AgentId) -> Option<Carry> {
        self.agents.get(&agent).map(|a| Carry {
            energy: a.energy,
            capacity: a.capacity(),
        })
    }

    fn find_closest(
        &self,
        agent: AgentId,
        category: EntityCategory,
        filter: EntityFilter<'_>,
    ) -> Option<EntityInfo> {
        let from = self.agents.get(&agent)?.pos;
        self.entities
            .iter()
            .filter(|e| e.category == category)
            .filter(|e| filter.is_none_or(|f| f(&e.info(self.id))))
            .min_by_key(|e| from.range_to(e.pos))
            .map(|e| e.info(self.id))
    }

    fn find_in_room(
        &self,
        room: RoomId,
        category: EntityCategory,
        filter: EntityFilter<'_>,
    ) -> Vec<EntityInfo> {
        if room != self.id {
            return Vec::new();
        }
        self.entities
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.info(self.id))
            .filter(|info| filter.is_none_or(|f| f(info)))
            .collect()
    }
}

impl Actions for SimRoom {
    fn move_to(&mut self, agent: AgentId, target: EntityId) -> ActionResult {
        let state = match ready_agent(&mut self.agents, agent, self.tick) {
            Ok(state) => state,
            Err(code) => return code,
        };
        if state.parts(BodyPart::Move) == 0 {
            return ActionResult::Other(ERR_NO_BODYPART);
        }
        let Some(goal) = find_target(&mut self.entities, target, |_| true) else {
            return ActionResult::InvalidTarget;
        };
        if state.pos.range_to(goal.pos) > ACTION_RANGE {
            state.pos = state.pos.step_toward(goal.pos);
        }
        ActionResult::Ok
    }

    fn harvest(&mut self, agent: AgentId, source: EntityId) -> ActionResult {
        let state = match ready_agent(&mut self.agents, agent, self.tick) {
            Ok(state) => state,
            Err(code) => return code,
        };
        let power = state.parts(BodyPart::Work).saturating_mul(HARVEST_POWER);
        if power == 0 {
            return ActionResult::Other(ERR_NO_BODYPART);
        }
        let Some(node) = find_target(&mut self.entities, source, |e| {
            e.category == EntityCategory::Source
        }) else {
            return ActionResult::InvalidTarget;
        };
        if state.pos.range_to(node.pos) > ACTION_RANGE {
            return ActionResult::NotInRange;
        }
        if node.energy == 0 {
            return ActionResult::NotEnoughResources;
        }
        let taken = power.min(node.energy);
        node.energy = node.energy.saturating_sub(taken);
        // Energy beyond carry capacity is lost.
        state.energy = state.energy.saturating_add(taken).min(state.capacity());
        ActionResult::Ok
    }

    fn build(&mut self, agent: AgentId, site: EntityId) -> ActionResult {
        let state = match ready_agent(&mut self.agents, agent, self.tick) {
            Ok(state) => state,
            Err(code) => return code,
        };
        let power = state.parts(BodyPart::Work).saturating_mul(BUILD_POWER);
        if power == 0 {
            return ActionResult::Other(ERR_NO_BODYPART);
        }
        let Some(target) = find_target(&mut self.entities, site, |e| {
            e.category == EntityCategory::ConstructionSite
        }) else {
            return ActionResult::InvalidTarget;
        };
        if state.pos.range_to(target.pos) > WORK_RANGE {
            return ActionResult::NotInRange;
        }
        if state.energy == 0 {
            return ActionResult::NotEnoughResources;
        }
        let remaining = target.progress_total.saturating_sub(target.progress);
        let spent = power.min(state.energy).min(remaining);
        state.energy = state.energy.saturating_sub(spent);
        target.progress = target.progress.saturating_add(spent);
        if target.progress >= target.progress_total {
            debug!(site = %target.id, "construction finished, extension built");
            target.category = EntityCategory::Extension;
            target.energy = 0;
            target.energy_capacity = EXTENSION_ENERGY_CAPACITY;
        }
        ActionResult::Ok
    }

    fn withdraw(&mut self, agent: AgentId, from: EntityId) -> ActionResult {
        let state = match ready_agent(&mut self.agents, agent, self.tick) {
            Ok(state) => state,
            Err(code) => return code,
        };
        let Some(sink) = find_target(&mut self.entities, from, SimEntity::is_sink) else {
            return ActionResult::InvalidTarget;
        };
        if state.pos.range_to(sink.pos) > ACTION_RANGE {
            return ActionResult::NotInRange;
        }
        let free = state.free_capacity();
        if free == 0 {
            return ActionResult::Full;
        }
        if sink.energy == 0 {
            return ActionResult::NotEnoughResources;
        }
        let amount = free.min(sink.energy);
        sink.energy = sink.energy.saturating_sub(amount);
        state.energy = state.energy.saturating_add(amount);
        ActionResult::Ok
    }

    fn transfer(&mut self, agent: AgentId, to: EntityId) -> ActionResult {
        let state = match ready_agent(&mut self.agents, agent, self.tick) {
            Ok(state) => state,
            Err(code) => return code,
        };
        let Some(sink) = find_target(&mut self.entities, to, SimEntity::is_sink) else {
            return ActionResult::InvalidTarget;
        };
        if state.pos.range_to(sink.pos) > ACTION_RANGE {
            return ActionResult::NotInRange;
        }
        if state.energy == 0 {
            return ActionResult::NotEnoughResources;
        }
        let free = sink.energy_capacity.saturating_sub(sink.energy);
        if free == 0 {
            return ActionResult::Full;
        }
        let amount = free.min(state.energy);
        state.energy = state.energy.saturating_sub(amount);
        sink.energy = sink.energy.saturating_add(amount);
        ActionResult::Ok
    }

    fn upgrade_controller(&mut self, agent: AgentId, controller: EntityId) -> ActionResult {
        let state = match ready_agent(&mut self.agents, agent, self.tick) {
            Ok(state) => state,
            Err(code) => return code,
        };
        let power = state.parts(BodyPart::Work).saturating_mul(UPGRADE_POWER);
        if power == 0 {
            return ActionResult::Other(ERR_NO_BODYPART);
        }
        let Some(target) = find_target(&mut self.entities, controller, |e| {
            e.category == EntityCategory::Controller
        }) else {
            return ActionResult::InvalidTarget;
        };
        if state.pos.range_to(target.pos) > WORK_RANGE {
            return ActionResult::NotInRange;
        }
        if state.energy == 0 {
            return ActionResult::NotEnoughResources;
        }
        let spent = power.min(state.energy);
        state.energy = state.energy.saturating_sub(spent);
        target.progress = target.progress.saturating_add(spent);
        ActionResult::Ok
    }

    fn suicide(&mut self, agent: AgentId) -> ActionResult {
        if let Err(code) = ready_agent(&mut self.agents, agent, self.tick) {
            return code;
        }
        self.agents.remove(&agent);
        debug!(agent = %agent, "agent removed from room");
        ActionResult::Ok
    }
}

impl Clock for SimRoom {
    fn now(&self) -> u64 {
        self.tick
    }

    fn advance(&mut self) {
        self.end_tick();
    }
}

impl Spawner for SimRoom {
    fn submit(&mut self, room: RoomId, body: &[BodyPart], cost: u32) -> Option<AgentId> {
        if room != self.id || cost > self.stored_energy() {
            return None;
        }
        let tick = self.tick;
        let spawn_pos = self
            .entities
            .iter()
            .find(|e| e.category == EntityCategory::Spawn && e.busy_until <= tick)
            .map(|e| e.pos)?;

        let parts = u64::try_from(body.len()).unwrap_or(u64::MAX);
        let busy_until = tick.saturating_add(parts.saturating_mul(SPAWN_TICKS_PER_PART));

        let mut owed = cost;
        for sink in self.entities.iter_mut().filter(|e| e.is_sink()) {
            let drawn = owed.min(sink.energy);
            sink.energy = sink.energy.saturating_sub(drawn);
            owed = owed.saturating_sub(drawn);
        }
        if let Some(spawn) = self
            .entities
            .iter_mut()
            .find(|e| e.category == EntityCategory::Spawn && e.pos == spawn_pos)
        {
            spawn.busy_until = busy_until;
        }

        let id = AgentId::new();
        let exit = Position::new(spawn_pos.x.saturating_add(1), spawn_pos.y).clamped();
        self.agents.insert(
            id,
            SimAgent {
                pos: exit,
                body: body.to_vec(),
                energy: 0,
                busy_until,
            },
        );
        debug!(agent = %id, cost, parts = body.len(), "spawn started");
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: [BodyPart; 4] = [BodyPart::Move, BodyPart::Move, BodyPart::Work, BodyPart::Carry];

    fn room_with_agent(pos: Position) -> (SimRoom, AgentId) {
        let mut room = SimRoom::new();
        let agent = room.add_agent(pos, BASIC.to_vec());
        (room, agent.unwrap_or_default())
    }

    #[test]
    fn harvest_requires_adjacency() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let source = room.add_source(Position::new(15, 10), 3000).unwrap_or_default();

        assert_eq!(room.harvest(agent, source), ActionResult::NotInRange);
        for _ in 0..4 {
            assert_eq!(room.move_to(agent, source), ActionResult::Ok);
        }
        assert_eq!(room.agent_position(agent), Some(Position::new(14, 10)));
        assert_eq!(room.harvest(agent, source), ActionResult::Ok);
        assert_eq!(room.carry(agent).map(|c| c.energy), Some(HARVEST_POWER));
    }

    #[test]
    fn harvest_missing_source_is_invalid_target() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let source = room.add_source(Position::new(11, 10), 3000).unwrap_or_default();
        assert!(room.remove_entity(source).is_ok());
        assert_eq!(room.harvest(agent, source), ActionResult::InvalidTarget);
    }

    #[test]
    fn build_without_energy_reports_not_enough_resources() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let site = room
            .add_construction_site(Position::new(12, 10), 10)
            .unwrap_or_default();
        assert_eq!(room.build(agent, site), ActionResult::NotEnoughResources);
    }

    #[test]
    fn finished_site_becomes_extension() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let site = room
            .add_construction_site(Position::new(12, 10), 5)
            .unwrap_or_default();
        assert!(room.set_agent_energy(agent, 50).is_ok());
        assert_eq!(room.build(agent, site), ActionResult::Ok);
        let info = room.entity(site);
        assert_eq!(info.map(|i| i.category), Some(EntityCategory::Extension));
        assert_eq!(room.carry(agent).map(|c| c.energy), Some(45));
    }

    #[test]
    fn withdraw_reports_full_when_carry_is_full() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let spawn = room.add_spawn(Position::new(11, 10), 300).unwrap_or_default();
        assert_eq!(room.withdraw(agent, spawn), ActionResult::Ok);
        assert_eq!(room.carry(agent).map(|c| c.energy), Some(50));
        assert_eq!(room.withdraw(agent, spawn), ActionResult::Full);
    }

    #[test]
    fn transfer_into_full_sink_reports_full() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let ext = room.add_extension(Position::new(11, 10), 50).unwrap_or_default();
        assert!(room.set_agent_energy(agent, 20).is_ok());
        assert_eq!(room.transfer(agent, ext), ActionResult::Full);
    }

    #[test]
    fn suicide_removes_agent() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        assert_eq!(room.suicide(agent), ActionResult::Ok);
        assert!(!room.is_alive(agent));
        assert_eq!(room.suicide(agent), ActionResult::Other(ERR_NOT_OWNER));
    }

    #[test]
    fn spawn_deducts_energy_and_new_agent_is_busy() {
        let mut room = SimRoom::new();
        let spawn = room.add_spawn(Position::new(25, 25), 300).unwrap_or_default();
        let source = room.add_source(Position::new(27, 25), 3000).unwrap_or_default();

        let agent = room.submit(room.id(), &BASIC, 250);
        assert!(agent.is_some());
        let agent = agent.unwrap_or_default();
        assert_eq!(room.entity(spawn).map(|s| s.energy), Some(50));
        assert_eq!(room.harvest(agent, source), ActionResult::Busy);

        // A busy spawn refuses another order.
        assert!(room.submit(room.id(), &BASIC, 10).is_none());
    }

    #[test]
    fn spawn_refused_without_energy() {
        let mut room = SimRoom::new();
        assert!(room.add_spawn(Position::new(25, 25), 100).is_ok());
        assert!(room.submit(room.id(), &BASIC, 250).is_none());
        assert!(room.live_agents().is_empty());
    }

    #[test]
    fn find_in_room_keeps_discovery_order() {
        let mut room = SimRoom::new();
        let first = room.add_extension(Position::new(5, 5), 0).unwrap_or_default();
        let second = room.add_extension(Position::new(1, 1), 10).unwrap_or_default();
        let found = room.find_in_room(room.id(), EntityCategory::Extension, None);
        let ids: Vec<EntityId> = found.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first, second]);

        let nonempty = |info: &EntityInfo| info.energy > 0;
        let filtered = room.find_in_room(room.id(), EntityCategory::Extension, Some(&nonempty));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn find_closest_picks_nearest() {
        let (mut room, agent) = room_with_agent(Position::new(10, 10));
        let _far = room.add_source(Position::new(40, 40), 3000);
        let near = room.add_source(Position::new(12, 12), 3000).unwrap_or_default();
        let found = room.find_closest(agent, EntityCategory::Source, None);
        assert_eq!(found.map(|i| i.id), Some(near));
    }

    #[test]
    fn end_tick_regenerates() {
        let mut room = SimRoom::new();
        let spawn = room.add_spawn(Position::new(25, 25), 0).unwrap_or_default();
        room.end_tick();
        assert_eq!(room.entity(spawn).map(|s| s.energy), Some(SPAWN_REGEN_PER_TICK));
        assert_eq!(room.tick(), 1);
    }
}
