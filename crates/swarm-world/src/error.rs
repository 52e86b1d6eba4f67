//! Error types for the `swarm-world` crate.
//!
//! Action primitives never fail with an error -- they report an
//! [`ActionResult`](swarm_types::ActionResult). [`WorldError`] covers the
//! setup and inspection API of the in-memory room.

use swarm_types::{AgentId, EntityId};

/// Errors that can occur while building or inspecting a simulated room.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A world object was not found in the room.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// An agent was not found in the room.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// A position lies outside the room grid.
    #[error("position ({x}, {y}) is outside the {size}x{size} room")]
    OutOfBounds {
        /// Column.
        x: u8,
        /// Row.
        y: u8,
        /// Room edge length.
        size: u8,
    },

    /// An energy amount exceeds the holder's capacity.
    #[error("energy {energy} exceeds capacity {capacity}")]
    OverCapacity {
        /// Requested energy.
        energy: u32,
        /// Capacity of the holder.
        capacity: u32,
    },
}
