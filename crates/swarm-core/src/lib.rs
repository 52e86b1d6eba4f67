//! Fleet planning and the tick cycle for the swarm colony core.
//!
//! This crate owns the colony-wide view: who is alive, what each agent is
//! remembered as, how roles are rebalanced, and what to spawn next. The
//! per-agent logic it drives lives in `swarm-agents`.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `swarm-config.yaml` into
//!   strongly-typed structs.
//! - [`planner`] -- [`FleetPlanner`]: rebalancing, population targets, body
//!   sizing, and the plan record.
//! - [`store`] -- [`MemoryStore`]: agent memory and plan record with JSON
//!   persistence.
//! - [`tick`] -- [`run_tick`]: census, plan, spawn, dispatch, advance.

pub mod config;
pub mod planner;
pub mod store;
pub mod tick;

pub use config::{ConfigError, SwarmConfig};
pub use planner::{
    FleetPlan, FleetPlanner, ForcedTransition, HomeBase, PlanError, RebalanceReport,
    RebalanceRule,
};
pub use store::{MemoryStore, StoreError};
pub use tick::{Colony, TickError, TickSummary, run_tick};
