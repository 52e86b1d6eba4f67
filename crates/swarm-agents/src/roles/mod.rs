//! Behavior handlers, one per role.
//!
//! - [`build`] -- spend energy on the nearest construction site
//! - [`harvest`] -- mine the bound source until full
//! - [`refill`] -- draw energy from the bound storage structure
//! - [`store`] -- deposit energy into a spawn or extension with room
//! - [`upgrade`] -- spend energy on the room controller
//!
//! Every handler performs at most one physical action and at most one role
//! transition per tick, and moves toward its target on `NotInRange`.

pub mod build;
pub mod harvest;
pub mod refill;
pub mod store;
pub mod upgrade;

pub use build::BuildRole;
pub use harvest::HarvestRole;
pub use refill::RefillRole;
pub use store::StoreRole;
pub use upgrade::UpgradeRole;

#[cfg(test)]
pub(crate) mod test_support {
    use swarm_types::{ActionResult, AgentId, BodyPart, EntityCategory, EntityId, RoomId};
    use swarm_world::{
        Actions, Carry, EntityFilter, EntityInfo, Position, SimRoom, Spawner, WorldQuery,
    };

    /// `[MOVE, MOVE, WORK, CARRY]`, 50 carry capacity.
    pub(crate) const BASIC: [BodyPart; 4] =
        [BodyPart::Move, BodyPart::Move, BodyPart::Work, BodyPart::Carry];

    pub(crate) fn agent_at(room: &mut SimRoom, x: u8, y: u8) -> AgentId {
        room.add_agent(Position::new(x, y), BASIC.to_vec())
            .unwrap_or_default()
    }

    /// An agent with no `work` part: every work action reports an
    /// unrecognized host code.
    pub(crate) fn carrier_at(room: &mut SimRoom, x: u8, y: u8) -> AgentId {
        room.add_agent(Position::new(x, y), vec![BodyPart::Move, BodyPart::Carry])
            .unwrap_or_default()
    }

    /// An agent that a spawn at `(x, y)` has only just started building.
    pub(crate) fn spawning_agent(room: &mut SimRoom, x: u8, y: u8) -> AgentId {
        let _ = room.add_spawn(Position::new(x, y), 300);
        let id = room.id();
        room.submit(id, &BASIC, 250).unwrap_or_default()
    }

    /// A world where every target exists and every action reports `result`.
    pub(crate) struct Scripted {
        pub(crate) result: ActionResult,
        pub(crate) carry: Carry,
        pub(crate) moves: usize,
        pub(crate) suicides: usize,
        room: RoomId,
    }

    impl Scripted {
        pub(crate) fn new(result: ActionResult, energy: u32) -> Self {
            Self {
                result,
                carry: Carry {
                    energy,
                    capacity: 50,
                },
                moves: 0,
                suicides: 0,
                room: RoomId::new(),
            }
        }

        fn target(&self, category: EntityCategory) -> EntityInfo {
            EntityInfo {
                id: EntityId::new(),
                category,
                room: self.room,
                energy: 0,
                energy_capacity: 300,
            }
        }
    }

    impl WorldQuery for Scripted {
        fn live_agents(&self) -> Vec<AgentId> {
            Vec::new()
        }

        fn is_alive(&self, _agent: AgentId) -> bool {
            true
        }

        fn room_of(&self, _agent: AgentId) -> Option<RoomId> {
            Some(self.room)
        }

        fn carry(&self, _agent: AgentId) -> Option<Carry> {
            Some(self.carry)
        }

        fn find_closest(
            &self,
            _agent: AgentId,
            category: EntityCategory,
            _filter: EntityFilter<'_>,
        ) -> Option<EntityInfo> {
            Some(self.target(category))
        }

        fn find_in_room(
            &self,
            _room: RoomId,
            category: EntityCategory,
            _filter: EntityFilter<'_>,
        ) -> Vec<EntityInfo> {
            vec![self.target(category)]
        }
    }

    impl Actions for Scripted {
        fn move_to(&mut self, _agent: AgentId, _target: EntityId) -> ActionResult {
            self.moves = self.moves.saturating_add(1);
            ActionResult::Ok
        }

        fn harvest(&mut self, _agent: AgentId, _source: EntityId) -> ActionResult {
            self.result
        }

        fn build(&mut self, _agent: AgentId, _site: EntityId) -> ActionResult {
            self.result
        }

        fn withdraw(&mut self, _agent: AgentId, _from: EntityId) -> ActionResult {
            self.result
        }

        fn transfer(&mut self, _agent: AgentId, _to: EntityId) -> ActionResult {
            self.result
        }

        fn upgrade_controller(&mut self, _agent: AgentId, _controller: EntityId) -> ActionResult {
            self.result
        }

        fn suicide(&mut self, _agent: AgentId) -> ActionResult {
            self.suicides = self.suicides.saturating_add(1);
            ActionResult::Ok
        }
    }
}
