//! Energy cost of bodies.
//!
//! Every body part has a fixed price; a body costs the sum of its parts.
//! All values are `u32` and sums saturate.

use swarm_types::BodyPart;

/// Return the energy cost of one body part.
///
/// - Move: 50
/// - Work: 100
/// - Carry: 50
/// - Attack: 80
/// - `RangedAttack`: 150
/// - Heal: 250
/// - Tough: 10
#[allow(clippy::match_same_arms)] // Move and Carry share a price but are priced independently.
pub const fn part_cost(part: BodyPart) -> u32 {
    match part {
        BodyPart::Move => 50,
        BodyPart::Work => 100,
        BodyPart::Carry => 50,
        BodyPart::Attack => 80,
        BodyPart::RangedAttack => 150,
        BodyPart::Heal => 250,
        BodyPart::Tough => 10,
    }
}

/// Return the energy cost of a whole body. An empty body costs nothing.
pub fn body_cost(body: &[BodyPart]) -> u32 {
    body.iter()
        .fold(0_u32, |total, part| total.saturating_add(part_cost(*part)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_worker_costs_250() {
        let body = [BodyPart::Move, BodyPart::Move, BodyPart::Work, BodyPart::Carry];
        assert_eq!(body_cost(&body), 250);
    }

    #[test]
    fn empty_body_is_free() {
        assert_eq!(body_cost(&[]), 0);
    }

    #[test]
    fn order_does_not_matter() {
        let a = [BodyPart::Work, BodyPart::Carry, BodyPart::Move];
        let b = [BodyPart::Move, BodyPart::Work, BodyPart::Carry];
        assert_eq!(body_cost(&a), body_cost(&b));
    }

    #[test]
    fn combat_parts() {
        let body = [
            BodyPart::Tough,
            BodyPart::Attack,
            BodyPart::RangedAttack,
            BodyPart::Heal,
        ];
        assert_eq!(body_cost(&body), 10 + 80 + 150 + 250);
    }

    #[test]
    fn tiers_used_by_the_planner() {
        use swarm_types::BodyPart::{Carry, Move, Work};
        assert_eq!(body_cost(&[Move, Move, Move, Work, Carry]), 300);
        assert_eq!(body_cost(&[Move, Move, Move, Work, Work, Carry]), 400);
        assert_eq!(
            body_cost(&[Move, Move, Move, Move, Work, Work, Carry, Carry]),
            500
        );
    }
}
