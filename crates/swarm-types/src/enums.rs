//! Enumeration types for the Swarm colony controller.
//!
//! Roles, body segments, action result codes, and the categories of world
//! objects an agent can search for.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// A named behavior mode. Every agent is driven by exactly one active role.
///
/// The set is closed: a role identifier read from persisted memory or a
/// config file either parses into one of these variants or fails with
/// [`UnknownRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Role {
    /// Make progress on the nearest construction site.
    Build,
    /// Harvest energy from a bound source.
    Harvest,
    /// Draw stored energy from a bound sink, then resume the previous role.
    Refill,
    /// Deliver carried energy to spawns and extensions.
    Store,
    /// Upgrade the room controller.
    Upgrade,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Build,
        Self::Harvest,
        Self::Refill,
        Self::Store,
        Self::Upgrade,
    ];

    /// The lowercase identifier used in persisted memory and plan records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Harvest => "harvest",
            Self::Refill => "refill",
            Self::Store => "store",
            Self::Upgrade => "upgrade",
        }
    }

    /// Whether this role counts toward the general worker population
    /// (builders, upgraders, and anyone currently refilling).
    pub const fn is_worker_role(self) -> bool {
        matches!(self, Self::Build | Self::Upgrade | Self::Refill)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role identifier that does not name any [`Role`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no such role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Body segments
// ---------------------------------------------------------------------------

/// A single segment of an agent's body. Each segment has a fixed energy
/// cost (see the cost model in `swarm-agents`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BodyPart {
    /// Locomotion.
    Move,
    /// Harvesting, building, and upgrading.
    Work,
    /// Energy carrying capacity.
    Carry,
    /// Melee attack.
    Attack,
    /// Ranged attack.
    RangedAttack,
    /// Healing.
    Heal,
    /// Cheap hit points.
    Tough,
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Move => "move",
            Self::Work => "work",
            Self::Carry => "carry",
            Self::Attack => "attack",
            Self::RangedAttack => "ranged_attack",
            Self::Heal => "heal",
            Self::Tough => "tough",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Action results
// ---------------------------------------------------------------------------

/// Outcome of a single action primitive.
///
/// Handlers branch on nothing but this value. Codes outside the recognized
/// set are carried as [`ActionResult::Other`] and logged as unexpected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActionResult {
    /// The action was scheduled successfully.
    Ok,
    /// The target is too far away.
    NotInRange,
    /// The target does not exist or cannot be acted upon.
    InvalidTarget,
    /// The agent is not ready yet (still being spawned).
    Busy,
    /// The agent or target lacks the energy the action needs.
    NotEnoughResources,
    /// The receiving side is already at capacity.
    Full,
    /// Any code outside the recognized set.
    Other(i32),
}

impl ActionResult {
    /// The numeric host result code for this outcome.
    pub const fn code(self) -> i32 {
        match self {
            Self::Ok => 0,
            Self::Busy => -4,
            Self::NotEnoughResources => -6,
            Self::InvalidTarget => -7,
            Self::Full => -8,
            Self::NotInRange => -9,
            Self::Other(code) => code,
        }
    }

    /// Whether the action succeeded.
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

// ---------------------------------------------------------------------------
// World object categories
// ---------------------------------------------------------------------------

/// Typed category of a world object, used to scope searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum EntityCategory {
    /// A regenerating energy source.
    Source,
    /// An unfinished structure that accepts build progress.
    ConstructionSite,
    /// An owned spawn structure (also an energy sink).
    Spawn,
    /// An owned extension (extra spawn energy capacity, also a sink).
    Extension,
    /// The room controller.
    Controller,
}
