//! Default starting room for the engine binary.
//!
//! One spawn in the middle of the room, two sources at different distances,
//! a controller, and two construction sites waiting for builders. No
//! extensions yet, so the first spawn requests are sized for 300 energy.

use swarm_types::EntityId;

use crate::error::WorldError;
use crate::position::Position;
use crate::sim_room::SimRoom;

/// Energy a starting source holds.
const SOURCE_CAPACITY: u32 = 3000;

/// Build points a starting construction site needs.
const SITE_PROGRESS_TOTAL: u32 = 300;

/// Identifiers for the starting room's objects.
#[derive(Debug, Clone)]
pub struct StartingRoomIds {
    /// The home spawn.
    pub spawn: EntityId,
    /// Source two tiles from the spawn.
    pub near_source: EntityId,
    /// Source across the room.
    pub far_source: EntityId,
    /// The room controller.
    pub controller: EntityId,
    /// Construction sites, in creation order.
    pub construction_sites: Vec<EntityId>,
}

/// Create the default starting room.
///
/// # Errors
///
/// Returns [`WorldError`] if any object cannot be placed.
pub fn create_starting_room() -> Result<(SimRoom, StartingRoomIds), WorldError> {
    let mut room = SimRoom::new();

    let spawn = room.add_spawn(Position::new(25, 25), 300)?;
    let near_source = room.add_source(Position::new(27, 22), SOURCE_CAPACITY)?;
    let far_source = room.add_source(Position::new(8, 40), SOURCE_CAPACITY)?;
    let controller = room.add_controller(Position::new(30, 12))?;
    let construction_sites = vec![
        room.add_construction_site(Position::new(23, 27), SITE_PROGRESS_TOTAL)?,
        room.add_construction_site(Position::new(27, 27), SITE_PROGRESS_TOTAL)?,
    ];

    Ok((
        room,
        StartingRoomIds {
            spawn,
            near_source,
            far_source,
            controller,
            construction_sites,
        },
    ))
}
