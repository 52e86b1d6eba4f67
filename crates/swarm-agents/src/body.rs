//! Body tiers for the two kinds of agent the planner spawns.
//!
//! Each kind has three bodies keyed by the room's available energy. The
//! highest tier whose threshold the energy meets wins; the last tier has no
//! threshold and always fits a bare spawn.

use swarm_types::BodyPart::{self, Carry, Move, Work};

/// Harvester bodies, best first, with the energy each requires.
pub const HARVESTER_TIERS: [(u32, &[BodyPart]); 3] = [
    (500, &[Move, Move, Move, Move, Work, Work, Carry, Carry]),
    (350, &[Move, Move, Move, Work, Carry, Carry]),
    (0, &[Move, Move, Work, Carry]),
];

/// Worker bodies, best first, with the energy each requires.
pub const WORKER_TIERS: [(u32, &[BodyPart]); 3] = [
    (500, &[Move, Move, Move, Move, Work, Work, Carry, Carry]),
    (400, &[Move, Move, Move, Work, Work, Carry]),
    (0, &[Move, Move, Work, Carry]),
];

fn select(tiers: &[(u32, &[BodyPart])], energy: u32) -> Vec<BodyPart> {
    tiers
        .iter()
        .find(|(threshold, _)| energy >= *threshold)
        .map(|(_, body)| body.to_vec())
        .unwrap_or_default()
}

/// The largest harvester body `energy` can pay for.
pub fn harvester_body(energy: u32) -> Vec<BodyPart> {
    select(&HARVESTER_TIERS, energy)
}

/// The largest worker body `energy` can pay for.
pub fn worker_body(energy: u32) -> Vec<BodyPart> {
    select(&WORKER_TIERS, energy)
}
