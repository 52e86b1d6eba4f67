//! Shared type definitions for the Swarm colony controller.
//!
//! This crate is the single source of truth for the identifiers and
//! enumerations shared by the world adapter, the agent role engine, and the
//! fleet planner. Types flow downstream to `TypeScript` via `ts-rs` for
//! external inspection tooling.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for agents, world objects, and rooms
//! - [`enums`] -- Roles, body segments, action result codes, search categories
//! - [`plan`] -- The planner's per-tick observability record

pub mod enums;
pub mod ids;
pub mod plan;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionResult, BodyPart, EntityCategory, Role, UnknownRole};
pub use ids::{AgentId, EntityId, RoomId};
pub use plan::{PlanRecord, spawn_tag};
