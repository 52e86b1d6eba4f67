//! World collaborator interfaces and an in-memory room for the Swarm
//! colony controller.
//!
//! The colony core depends on the world only through the traits in
//! [`api`]. This crate also ships [`SimRoom`], a small deterministic room
//! that implements those traits so the core runs without a live host.
//!
//! # Modules
//!
//! - [`api`] -- [`WorldQuery`], [`Actions`], [`Spawner`] and the data they
//!   exchange ([`EntityInfo`], [`Carry`]).
//! - [`error`] -- Error types for room setup and inspection.
//! - [`position`] -- Grid positions and Chebyshev range.
//! - [`sim_room`] -- The in-memory room implementation.
//! - [`starting_room`] -- Default room layout for the engine binary.

pub mod api;
pub mod error;
pub mod position;
pub mod sim_room;
pub mod starting_room;

// Re-export primary types at crate root.
pub use api::{Actions, Carry, Clock, EntityFilter, EntityInfo, Spawner, World, WorldQuery};
pub use error::WorldError;
pub use position::Position;
pub use sim_room::SimRoom;
pub use starting_room::{StartingRoomIds, create_starting_room};
