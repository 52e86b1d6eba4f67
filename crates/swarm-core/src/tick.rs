//! Tick cycle: plan, spawn, dispatch, advance.
//!
//! Each call to [`run_tick`] runs these steps in order:
//!
//! 1. **Census** -- ask the world which agents are alive. Records of dead
//!    agents stay in the store; only the host removes memory.
//! 2. **Plan** -- survey the home room and run the [`FleetPlanner`], which
//!    rebalances roles and returns spawn requests.
//! 3. **Spawn** -- submit every request in order. Accepted spawns get their
//!    initial memory right away but are not dispatched until a later tick.
//! 4. **Dispatch** -- run [`work`] once for every agent alive at the start of
//!    the tick, in id order.
//! 5. **Advance** -- close the tick on the world clock.
//!
//! Everything is synchronous and deterministic given the same world.

use swarm_agents::{RoleRegistry, work};
use swarm_types::{AgentId, RoomId};
use swarm_world::{Clock, Spawner, World};
use tracing::{debug, info, warn};

use crate::config::SwarmConfig;
use crate::planner::{FleetPlanner, HomeBase, PlanError};
use crate::store::MemoryStore;

/// Errors that abort a tick before any agent acts.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The planner could not run.
    #[error("planning failed: {source}")]
    Plan {
        /// The underlying planner error.
        #[from]
        source: PlanError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick that was executed.
    pub tick: u64,
    /// Agents alive when the tick started.
    pub live_agents: usize,
    /// Spawn requests the planner produced.
    pub planned: usize,
    /// Agents whose spawn was accepted this tick.
    pub spawned: Vec<AgentId>,
    /// Agents whose role ran.
    pub dispatched: usize,
    /// Agents skipped for lack of memory or because they died mid-tick.
    pub skipped: usize,
    /// Agents whose current role has no handler.
    pub failed: usize,
    /// Transitions forced by the planner.
    pub forced_transitions: usize,
}

/// The colony's state between ticks.
#[derive(Debug, Clone)]
pub struct Colony {
    /// The room the colony plans for.
    pub home: RoomId,
    /// Persistent agent memory and the plan record.
    pub store: MemoryStore,
    /// Population targets and rebalancing policy.
    pub planner: FleetPlanner,
    /// Role handlers.
    pub registry: RoleRegistry,
}

impl Colony {
    /// A colony in `home` with empty memory and the standard roles.
    pub fn new(home: RoomId, config: &SwarmConfig) -> Self {
        Self {
            home,
            store: MemoryStore::new(),
            planner: FleetPlanner::from_config(config),
            registry: RoleRegistry::standard(),
        }
    }
}

/// Execute one complete tick of the colony against `world`.
///
/// # Errors
///
/// Returns [`TickError::Plan`] when the home room cannot be planned for. No
/// agent acts and the world clock does not advance in that case.
pub fn run_tick<W>(colony: &mut Colony, world: &mut W) -> Result<TickSummary, TickError>
where
    W: World + Spawner + Clock,
{
    let tick = world.now();

    // --- Census ---
    let mut live = world.live_agents();
    live.sort_unstable();

    // --- Plan ---
    let home = HomeBase::observe(&*world, colony.home);
    let plan = colony
        .planner
        .plan(&home, &live, &mut colony.store, &colony.registry)?;

    // --- Spawn ---
    let mut spawned = Vec::new();
    for request in &plan.requests {
        match world.submit(home.room, &request.body, request.cost) {
            Some(agent) => {
                colony.store.insert(agent, request.memory.clone());
                spawned.push(agent);
            }
            None => debug!(tick, request = %request.tag(), "spawn request not accepted"),
        }
    }

    // --- Dispatch ---
    let mut dispatched: usize = 0;
    let mut skipped: usize = 0;
    let mut failed: usize = 0;
    for &agent in &live {
        if !world.is_alive(agent) {
            skipped = skipped.saturating_add(1);
            continue;
        }
        let Some(memory) = colony.store.get_mut(agent) else {
            warn!(tick, agent = %agent, "live agent has no memory record, skipping");
            skipped = skipped.saturating_add(1);
            continue;
        };
        match work(agent, memory, world, &colony.registry) {
            Ok(()) => dispatched = dispatched.saturating_add(1),
            Err(err) => {
                warn!(tick, %err, "dispatch failed");
                failed = failed.saturating_add(1);
            }
        }
    }

    // --- Advance ---
    world.advance();

    let summary = TickSummary {
        tick,
        live_agents: live.len(),
        planned: plan.requests.len(),
        spawned,
        dispatched,
        skipped,
        failed,
        forced_transitions: plan.report.len(),
    };
    info!(
        tick,
        live = summary.live_agents,
        planned = summary.planned,
        spawned = summary.spawned.len(),
        dispatched,
        failed,
        "tick complete"
    );
    Ok(summary)
}
