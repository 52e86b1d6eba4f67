//! Fleet planner: rebalances roles across the colony and decides what to
//! spawn next.
//!
//! Once per tick, before any agent acts, [`FleetPlanner::plan`]:
//!
//! 1. classifies every live agent by its original role (bottom of its role
//!    stack, or its current role when the stack is empty);
//! 2. runs the rebalancing pass ([`FleetPlanner::modify_roles`]);
//! 3. queues harvesters up to `harvesters_per_source` per source, workers
//!    while `workers * worker_ratio < harvesters`, then pads with harvesters
//!    so no spawn structure sits idle;
//! 4. sizes every body from the room's available energy;
//! 5. writes a [`PlanRecord`] into the memory store.
//!
//! The rebalancing pass is the only code allowed to force a role on an
//! agent. Every forced transition is listed in the returned
//! [`RebalanceReport`].

use swarm_agents::{AgentMemory, RoleRegistry, SpawnRequest, harvester_body, worker_body};
use swarm_types::{AgentId, EntityCategory, EntityId, PlanRecord, Role, RoomId};
use swarm_world::WorldQuery;
use tracing::{debug, info, warn};

use crate::config::{EnergyConfig, PlannerConfig, SwarmConfig};
use crate::store::MemoryStore;

/// Errors that stop the planner from producing a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The home room has no spawn structure to spawn from or refill at.
    #[error("home room {room} has no spawn structure")]
    NoSpawn {
        /// The home room.
        room: RoomId,
    },
}

/// What the planner needs to know about the home room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeBase {
    /// The home room.
    pub room: RoomId,
    /// Spawn structures, in discovery order. The first is the home spawn.
    pub spawns: Vec<EntityId>,
    /// Energy sources, in discovery order.
    pub sources: Vec<EntityId>,
    /// Built extensions.
    pub extensions: u32,
    /// Open construction sites.
    pub construction_sites: usize,
}

impl HomeBase {
    /// Survey `room` through the world query interface.
    pub fn observe<W: WorldQuery + ?Sized>(world: &W, room: RoomId) -> Self {
        let ids = |category| {
            world
                .find_in_room(room, category, None)
                .into_iter()
                .map(|info| info.id)
                .collect::<Vec<_>>()
        };
        let extensions = world.find_in_room(room, EntityCategory::Extension, None).len();
        Self {
            room,
            spawns: ids(EntityCategory::Spawn),
            sources: ids(EntityCategory::Source),
            extensions: u32::try_from(extensions).unwrap_or(u32::MAX),
            construction_sites: world
                .find_in_room(room, EntityCategory::ConstructionSite, None)
                .len(),
        }
    }

    /// The spawn workers refill from.
    pub fn home_spawn(&self) -> Option<EntityId> {
        self.spawns.first().copied()
    }
}

/// Which rebalancing rule forced a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceRule {
    /// A refiller waited too long and was sent to harvest.
    StarvationRescue,
    /// Builders existed with no upgrader, so one builder became the upgrader.
    UpgraderFloor,
    /// Nothing to build, so builders went back to upgrading.
    NoConstruction,
    /// Construction pending, so upgraders beyond the first became builders.
    BuilderRotation,
}

/// One transition forced by the rebalancing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedTransition {
    /// The agent whose role was changed.
    pub agent: AgentId,
    /// The rule responsible.
    pub rule: RebalanceRule,
    /// Current role before the change.
    pub from: Role,
    /// Current role after the change.
    pub to: Role,
}

/// Every transition the rebalancing pass forced, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebalanceReport {
    transitions: Vec<ForcedTransition>,
}

impl RebalanceReport {
    fn record(&mut self, agent: AgentId, rule: RebalanceRule, from: Role, to: Role) {
        debug!(agent = %agent, ?rule, %from, %to, "forced role transition");
        self.transitions.push(ForcedTransition {
            agent,
            rule,
            from,
            to,
        });
    }

    /// All forced transitions.
    pub fn transitions(&self) -> &[ForcedTransition] {
        &self.transitions
    }

    /// Forced transitions made by `rule`.
    pub fn by_rule(&self, rule: RebalanceRule) -> impl Iterator<Item = &ForcedTransition> {
        self.transitions.iter().filter(move |t| t.rule == rule)
    }

    /// Number of forced transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether nothing was forced.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// The planner's output for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetPlan {
    /// Spawn requests in submission order.
    pub requests: Vec<SpawnRequest>,
    /// Transitions forced while rebalancing.
    pub report: RebalanceReport,
    /// The record written to the memory store.
    pub record: PlanRecord,
}

/// Population targets and rebalancing policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetPlanner {
    planner: PlannerConfig,
    energy: EnergyConfig,
}

impl FleetPlanner {
    /// A planner with explicit tuning.
    pub const fn new(planner: PlannerConfig, energy: EnergyConfig) -> Self {
        Self { planner, energy }
    }

    /// A planner tuned from the loaded configuration.
    pub fn from_config(config: &SwarmConfig) -> Self {
        Self::new(config.planner.clone(), config.energy.clone())
    }

    /// Spawn energy available in `home`.
    pub const fn available_energy(&self, home: &HomeBase) -> u32 {
        self.energy.available_energy(home.extensions)
    }

    /// Force role corrections across the colony.
    ///
    /// Rules run in this order, each at most once per call:
    ///
    /// - **starvation rescue**: every agent refilling for longer than
    ///   `refill_patience` ticks becomes a harvester (the refill role stays on
    ///   its stack). Rescued agents are left alone by the remaining rules.
    /// - **upgrader floor**: if some agents were built as builders and none as
    ///   upgraders, the last builder is reassigned to upgrade.
    /// - **no construction**: with no construction sites, every remaining
    ///   builder and every agent currently building is reassigned to upgrade.
    /// - **builder rotation**: otherwise every upgrader after the first
    ///   unwinds its stack and is reassigned to build.
    ///
    /// Agents without a memory record are ignored.
    pub fn modify_roles(
        &self,
        home: &HomeBase,
        agents: &[AgentId],
        store: &mut MemoryStore,
        registry: &RoleRegistry,
    ) -> RebalanceReport {
        let mut report = RebalanceReport::default();

        let mut rescued = Vec::new();
        for &agent in agents {
            let Some(memory) = store.get_mut(agent) else {
                continue;
            };
            let (act, age) = (memory.role.act(), memory.role.age());
            if act != Role::Refill || age <= self.planner.refill_patience {
                continue;
            }
            if memory.role.become_role(Role::Harvest, registry).is_ok() {
                warn!(agent = %agent, age, "refill: waited too long, converting to harvester");
                report.record(agent, RebalanceRule::StarvationRescue, act, Role::Harvest);
                rescued.push(agent);
            }
        }

        let unrescued: Vec<AgentId> = agents
            .iter()
            .copied()
            .filter(|agent| !rescued.contains(agent))
            .collect();
        let mut builders = originally(store, &unrescued, Role::Build);
        let mut upgraders = originally(store, &unrescued, Role::Upgrade);

        if upgraders.is_empty()
            && let Some(agent) = builders.pop()
        {
            let rule = RebalanceRule::UpgraderFloor;
            force(store, registry, &mut report, agent, Role::Upgrade, rule);
            upgraders.push(agent);
        }

        if home.construction_sites == 0 {
            let mut idle = builders;
            for &agent in &unrescued {
                let building = store
                    .get(agent)
                    .is_some_and(|memory| memory.role.act() == Role::Build);
                if building && !idle.contains(&agent) {
                    idle.push(agent);
                }
            }
            let rule = RebalanceRule::NoConstruction;
            for agent in idle {
                force(store, registry, &mut report, agent, Role::Upgrade, rule);
            }
        } else {
            let rule = RebalanceRule::BuilderRotation;
            for &agent in upgraders.iter().skip(1) {
                if let Some(memory) = store.get_mut(agent) {
                    memory.role.unwind();
                }
                force(store, registry, &mut report, agent, Role::Build, rule);
            }
        }

        report
    }

    /// Rebalance, then produce this tick's spawn requests and plan record.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NoSpawn`] without touching the store when the
    /// home room has no spawn structure.
    pub fn plan(
        &self,
        home: &HomeBase,
        agents: &[AgentId],
        store: &mut MemoryStore,
        registry: &RoleRegistry,
    ) -> Result<FleetPlan, PlanError> {
        let spawn = home.home_spawn().ok_or(PlanError::NoSpawn { room: home.room })?;
        let report = self.modify_roles(home, agents, store, registry);

        let mut harvesters: u32 = 0;
        let mut workers: u32 = 0;
        for memory in agents.iter().filter_map(|agent| store.get(*agent)) {
            if memory.role.original_role() == Role::Harvest {
                harvesters = harvesters.saturating_add(1);
            }
            if memory.role.act().is_worker_role() {
                workers = workers.saturating_add(1);
            }
        }

        let energy = self.available_energy(home);
        let first_source = home.sources.first().copied();
        let source_count = u32::try_from(home.sources.len()).unwrap_or(u32::MAX);
        let wanted_harvesters = self.planner.harvesters_per_source.saturating_mul(source_count);

        let mut requests = Vec::new();
        while harvesters < wanted_harvesters {
            requests.push(harvester_request(energy, first_source));
            harvesters = harvesters.saturating_add(1);
        }

        if self.planner.worker_ratio == 0 {
            debug!("worker ratio is zero, no workers planned");
        } else {
            while workers.saturating_mul(self.planner.worker_ratio) < harvesters {
                requests.push(worker_request(energy, spawn));
                workers = workers.saturating_add(1);
            }
        }

        if let Some(source) = first_source {
            while requests.len() < home.spawns.len() {
                requests.push(harvester_request(energy, Some(source)));
            }
        } else if requests.len() < home.spawns.len() {
            warn!(room = %home.room, "no energy source, spawn capacity left idle");
        }

        let record = PlanRecord {
            known_agent_roles: agents
                .iter()
                .filter_map(|agent| store.get(*agent))
                .map(|memory| memory.role.act())
                .collect(),
            planned_spawns: requests.iter().map(SpawnRequest::tag).collect(),
        };
        store.set_plan(record.clone());

        info!(
            agents = agents.len(),
            harvesters,
            workers,
            energy,
            planned = requests.len(),
            forced = report.len(),
            "fleet planned"
        );

        Ok(FleetPlan {
            requests,
            report,
            record,
        })
    }
}

/// Agents whose original role is `role`, in `agents` order.
fn originally(store: &MemoryStore, agents: &[AgentId], role: Role) -> Vec<AgentId> {
    agents
        .iter()
        .copied()
        .filter(|agent| {
            store
                .get(*agent)
                .is_some_and(|memory| memory.role.original_role() == role)
        })
        .collect()
}

/// Replace `agent`'s current role with `role` and note it in `report`.
fn force(
    store: &mut MemoryStore,
    registry: &RoleRegistry,
    report: &mut RebalanceReport,
    agent: AgentId,
    role: Role,
    rule: RebalanceRule,
) {
    let Some(memory) = store.get_mut(agent) else {
        return;
    };
    let from = memory.role.act();
    if memory.role.reassign(role, registry).is_ok() {
        report.record(agent, rule, from, role);
    }
}

fn harvester_request(energy: u32, source: Option<EntityId>) -> SpawnRequest {
    SpawnRequest::new(harvester_body(energy), AgentMemory::harvester(source))
}

fn worker_request(energy: u32, storage: EntityId) -> SpawnRequest {
    SpawnRequest::new(worker_body(energy), AgentMemory::worker(Some(storage)))
}

#[cfg(test)]
mod tests {
    use swarm_agents::RoleState;
    use swarm_types::BodyPart::{Carry, Move, Work};

    use super::*;

    fn home(sources: usize, extensions: u32, construction_sites: usize) -> HomeBase {
        HomeBase {
            room: RoomId::new(),
            spawns: vec![EntityId::new()],
            sources: (0..sources).map(|_| EntityId::new()).collect(),
            extensions,
            construction_sites,
        }
    }

    fn colony(roles: &[RoleState]) -> (Vec<AgentId>, MemoryStore) {
        let mut store = MemoryStore::new();
        let mut ids = Vec::new();
        for role in roles {
            let id = AgentId::new();
            let mut memory = AgentMemory::new(role.act());
            memory.role = role.clone();
            store.insert(id, memory);
            ids.push(id);
        }
        (ids, store)
    }

    fn act_of(store: &MemoryStore, agent: AgentId) -> Option<Role> {
        store.get(agent).map(|m| m.role.act())
    }

    fn count_current(store: &MemoryStore, role: Role) -> usize {
        store.records().filter(|(_, m)| m.role.act() == role).count()
    }

    #[test]
    fn available_energy_from_extensions() {
        let planner = FleetPlanner::default();
        assert_eq!(planner.available_energy(&home(1, 0, 0)), 300);
        assert_eq!(planner.available_energy(&home(1, 2, 0)), 400);
    }

    #[test]
    fn empty_colony_gets_three_small_harvesters_per_source() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 0);
        let mut store = MemoryStore::new();
        let plan = planner.plan(&base, &[], &mut store, &RoleRegistry::standard());
        assert!(plan.is_ok());
        let plan = plan.unwrap_or_else(|_| FleetPlan {
            requests: Vec::new(),
            report: RebalanceReport::default(),
            record: PlanRecord::default(),
        });

        let harvesters: Vec<&SpawnRequest> = plan
            .requests
            .iter()
            .filter(|r| r.role() == Role::Harvest)
            .collect();
        assert_eq!(harvesters.len(), 3);
        for request in &harvesters {
            assert_eq!(request.body, vec![Move, Move, Work, Carry]);
            assert_eq!(request.cost, 250);
            assert_eq!(request.memory.source, base.sources.first().copied());
        }
    }

    #[test]
    fn workers_follow_harvesters() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 0);
        let mut store = MemoryStore::new();
        let plan = planner
            .plan(&base, &[], &mut store, &RoleRegistry::standard())
            .ok();
        let requests = plan.map(|p| p.requests).unwrap_or_default();

        let workers: Vec<&SpawnRequest> =
            requests.iter().filter(|r| r.role() == Role::Upgrade).collect();
        // 0 * 2 < 3, 1 * 2 < 3, 2 * 2 >= 3
        assert_eq!(workers.len(), 2);
        for request in workers {
            assert_eq!(request.memory.role.act(), Role::Refill);
            assert_eq!(request.memory.role.was(), &[Role::Upgrade]);
            assert_eq!(request.memory.storage, base.home_spawn());
        }
        // Harvesters are queued first.
        assert_eq!(
            requests.iter().map(SpawnRequest::role).collect::<Vec<_>>(),
            vec![Role::Harvest, Role::Harvest, Role::Harvest, Role::Upgrade, Role::Upgrade]
        );
    }

    #[test]
    fn bodies_grow_with_extensions() {
        let planner = FleetPlanner::default();
        let base = home(1, 4, 0);
        let mut store = MemoryStore::new();
        let requests = planner
            .plan(&base, &[], &mut store, &RoleRegistry::standard())
            .map(|p| p.requests)
            .unwrap_or_default();
        assert!(!requests.is_empty());
        for request in requests {
            assert_eq!(request.cost, 500);
        }
    }

    #[test]
    fn harvesters_are_bound_to_first_source() {
        let planner = FleetPlanner::default();
        let base = home(2, 0, 0);
        let mut store = MemoryStore::new();
        let requests = planner
            .plan(&base, &[], &mut store, &RoleRegistry::standard())
            .map(|p| p.requests)
            .unwrap_or_default();
        let harvesters: Vec<_> = requests.iter().filter(|r| r.role() == Role::Harvest).collect();
        assert_eq!(harvesters.len(), 6);
        // Every request targets the first source, even with two available.
        assert!(harvesters
            .iter()
            .all(|r| r.memory.source == base.sources.first().copied()));
    }

    #[test]
    fn full_colony_pads_to_spawn_count() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 1);
        let roles = [
            RoleState::new(Role::Harvest),
            RoleState::new(Role::Harvest),
            RoleState::new(Role::Harvest),
            RoleState::new(Role::Upgrade),
            RoleState::new(Role::Build),
        ];
        let (ids, mut store) = colony(&roles);
        let requests = planner
            .plan(&base, &ids, &mut store, &RoleRegistry::standard())
            .map(|p| p.requests)
            .unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests.first().map(SpawnRequest::role), Some(Role::Harvest));
    }

    #[test]
    fn no_sources_means_no_harvesters_and_no_padding() {
        let planner = FleetPlanner::default();
        let base = home(0, 0, 0);
        let mut store = MemoryStore::new();
        let requests = planner
            .plan(&base, &[], &mut store, &RoleRegistry::standard())
            .map(|p| p.requests)
            .unwrap_or_default();
        assert!(requests.is_empty());
    }

    #[test]
    fn missing_spawn_is_an_error() {
        let planner = FleetPlanner::default();
        let mut base = home(1, 0, 0);
        base.spawns.clear();
        let mut store = MemoryStore::new();
        let result = planner.plan(&base, &[], &mut store, &RoleRegistry::standard());
        assert_eq!(result.err(), Some(PlanError::NoSpawn { room: base.room }));
        assert!(store.plan().is_none());
    }

    #[test]
    fn plan_record_lists_current_roles_and_tags() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 1);
        let (ids, mut store) = colony(&[RoleState::with_history(Role::Store, vec![Role::Harvest])]);
        let plan = planner.plan(&base, &ids, &mut store, &RoleRegistry::standard()).ok();

        let record = store.plan().cloned().unwrap_or_default();
        assert_eq!(record.known_agent_roles, vec![Role::Store]);
        assert_eq!(
            record.planned_spawns.first().map(String::as_str),
            Some("harvest@250")
        );
        assert_eq!(plan.map(|p| p.record), Some(record));
    }

    #[test]
    fn stale_refiller_is_rescued_to_harvest() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 1);
        let (ids, mut store) = colony(&[
            RoleState::with_history(Role::Refill, vec![Role::Upgrade]).with_age(30),
            RoleState::with_history(Role::Refill, vec![Role::Build]).with_age(26),
            RoleState::with_history(Role::Refill, vec![Role::Upgrade]).with_age(25),
        ]);
        let report = planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());

        for agent in ids.iter().take(2) {
            let memory = store.get(*agent);
            assert_eq!(memory.map(|m| m.role.act()), Some(Role::Harvest));
            assert_eq!(memory.and_then(|m| m.role.was().last().copied()), Some(Role::Refill));
        }
        assert_eq!(report.by_rule(RebalanceRule::StarvationRescue).count(), 2);
        // Age 25 is within patience.
        assert_eq!(ids.get(2).and_then(|id| act_of(&store, *id)), Some(Role::Refill));
    }

    #[test]
    fn upgrader_floor_converts_last_builder() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 2);
        let (ids, mut store) = colony(&[RoleState::new(Role::Build), RoleState::new(Role::Build)]);
        let before = count_current(&store, Role::Upgrade);

        let report = planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());

        assert_eq!(count_current(&store, Role::Upgrade), before.saturating_add(1));
        assert_eq!(ids.last().and_then(|id| act_of(&store, *id)), Some(Role::Upgrade));
        assert_eq!(ids.first().and_then(|id| act_of(&store, *id)), Some(Role::Build));
        assert_eq!(report.by_rule(RebalanceRule::UpgraderFloor).count(), 1);
    }

    #[test]
    fn upgrader_floor_keeps_history() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 2);
        let (ids, mut store) = colony(&[RoleState::with_history(Role::Refill, vec![Role::Build])]);
        planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());

        let memory = ids.first().and_then(|id| store.get(*id));
        assert_eq!(memory.map(|m| m.role.act()), Some(Role::Upgrade));
        assert_eq!(memory.map(|m| m.role.was().to_vec()), Some(vec![Role::Build]));
        assert_eq!(memory.map(|m| m.role.age()), Some(0));
    }

    #[test]
    fn no_construction_sends_builders_to_upgrade() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 0);
        let (ids, mut store) = colony(&[
            RoleState::new(Role::Upgrade),
            RoleState::new(Role::Build),
            RoleState::new(Role::Build),
            // Built as a harvester but currently building.
            RoleState::with_history(Role::Build, vec![Role::Harvest]),
        ]);
        let report = planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());

        assert_eq!(count_current(&store, Role::Build), 0);
        assert_eq!(report.by_rule(RebalanceRule::NoConstruction).count(), 3);
    }

    #[test]
    fn construction_rotates_extra_upgraders_to_build() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 3);
        let (ids, mut store) = colony(&[
            RoleState::new(Role::Upgrade),
            RoleState::with_history(Role::Refill, vec![Role::Upgrade]),
            RoleState::new(Role::Upgrade),
        ]);
        let report = planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());

        assert_eq!(ids.first().and_then(|id| act_of(&store, *id)), Some(Role::Upgrade));
        for agent in ids.iter().skip(1) {
            let memory = store.get(*agent);
            assert_eq!(memory.map(|m| m.role.act()), Some(Role::Build));
            assert_eq!(memory.map(|m| m.role.was().is_empty()), Some(true));
        }
        assert_eq!(report.by_rule(RebalanceRule::BuilderRotation).count(), 2);
    }

    #[test]
    fn rescued_agent_is_not_rotated() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 3);
        let (ids, mut store) = colony(&[
            RoleState::new(Role::Upgrade),
            RoleState::with_history(Role::Refill, vec![Role::Upgrade]).with_age(40),
        ]);
        let report = planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());

        let rescued = ids.get(1).and_then(|id| store.get(*id));
        assert_eq!(rescued.map(|m| m.role.act()), Some(Role::Harvest));
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn balanced_colony_is_left_alone() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 1);
        let (ids, mut store) = colony(&[
            RoleState::new(Role::Harvest),
            RoleState::new(Role::Upgrade),
            RoleState::new(Role::Build),
        ]);
        let before = store.clone();
        let report = planner.modify_roles(&base, &ids, &mut store, &RoleRegistry::standard());
        assert!(report.is_empty());
        assert_eq!(store, before);
    }

    #[test]
    fn forced_transitions_come_only_from_the_rebalance_pass() {
        let planner = FleetPlanner::default();
        let base = home(1, 0, 0);
        let (ids, mut store) = colony(&[RoleState::new(Role::Build)]);
        let plan = planner.plan(&base, &ids, &mut store, &RoleRegistry::standard()).ok();
        let report = plan.map(|p| p.report).unwrap_or_default();
        assert!(report
            .transitions()
            .iter()
            .all(|t| ids.contains(&t.agent)));
        assert_eq!(report.len(), 1);
    }
}
