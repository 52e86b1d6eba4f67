//! Per-agent decision logic for the swarm colony core.
//!
//! Everything here operates on one agent at a time and touches the world
//! only through the `swarm-world` collaborator traits. The fleet-wide view
//! (population targets, spawning, rebalancing) lives in `swarm-core`.
//!
//! # Modules
//!
//! - [`body`] -- Body tiers keyed by available energy
//! - [`costs`] -- Energy price of body parts and bodies
//! - [`error`] -- Error types for transitions and dispatch ([`RoleError`], [`DispatchError`])
//! - [`memory`] -- Persistent per-agent record ([`AgentMemory`])
//! - [`registry`] -- Role-to-handler table and the per-tick [`work`] dispatch
//! - [`role_stack`] -- Current role, return stack, and time in role ([`RoleState`])
//! - [`roles`] -- The five behavior handlers
//! - [`spawn`] -- Spawn requests produced by the planner ([`SpawnRequest`])

pub mod body;
pub mod costs;
pub mod error;
pub mod memory;
pub mod registry;
pub mod role_stack;
pub mod roles;
pub mod spawn;

pub use body::{harvester_body, worker_body};
pub use costs::{body_cost, part_cost};
pub use error::{DispatchError, RoleError};
pub use memory::AgentMemory;
pub use registry::{AgentContext, RoleHandler, RoleRegistry, work};
pub use role_stack::RoleState;
pub use spawn::SpawnRequest;
