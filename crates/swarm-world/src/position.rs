//! Grid positions inside a simulated room.
//!
//! Distances are Chebyshev (diagonal steps cost the same as straight ones),
//! which is how range is measured on the room grid. The simulated room has
//! no obstacles, so range also stands in for path length.

use serde::{Deserialize, Serialize};

/// Edge length of a room grid.
pub const ROOM_SIZE: u8 = 50;

/// A tile on the room grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, `0..ROOM_SIZE`.
    pub x: u8,
    /// Row, `0..ROOM_SIZE`.
    pub y: u8,
}

impl Position {
    /// Create a position. Callers validate bounds with [`Position::in_bounds`].
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether the position lies on the grid.
    pub const fn in_bounds(self) -> bool {
        self.x < ROOM_SIZE && self.y < ROOM_SIZE
    }

    /// Chebyshev distance to `other`.
    pub const fn range_to(self, other: Self) -> u8 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }

    /// The nearest tile on the grid.
    pub const fn clamped(self) -> Self {
        let last = ROOM_SIZE.saturating_sub(1);
        Self {
            x: if self.x > last { last } else { self.x },
            y: if self.y > last { last } else { self.y },
        }
    }

    /// The neighboring tile one step closer to `target`.
    pub fn step_toward(self, target: Self) -> Self {
        Self {
            x: step_axis(self.x, target.x),
            y: step_axis(self.y, target.y),
        }
    }
}

fn step_axis(from: u8, to: u8) -> u8 {
    match from.cmp(&to) {
        core::cmp::Ordering::Less => from.saturating_add(1),
        core::cmp::Ordering::Greater => from.saturating_sub(1),
        core::cmp::Ordering::Equal => from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_chebyshev() {
        let a = Position::new(10, 10);
        assert_eq!(a.range_to(Position::new(13, 11)), 3);
        assert_eq!(a.range_to(Position::new(7, 4)), 6);
        assert_eq!(a.range_to(a), 0);
    }

    #[test]
    fn step_moves_diagonally() {
        let a = Position::new(10, 10);
        assert_eq!(a.step_toward(Position::new(20, 5)), Position::new(11, 9));
        assert_eq!(a.step_toward(Position::new(10, 12)), Position::new(10, 11));
        assert_eq!(a.step_toward(a), a);
    }

    #[test]
    fn bounds() {
        assert!(Position::new(0, 49).in_bounds());
        assert!(!Position::new(50, 0).in_bounds());
    }
}
