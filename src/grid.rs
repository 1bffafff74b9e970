// Coordinate arithmetic shared by the flood fill, the cost model and the
// path search. All of these rely on the same canonical neighbor order so
// that bounded traversals produce reproducible results.

use crate::types::{Coord, Direction};

/// The four neighbors of a coordinate, in canonical order (up, down, left,
/// right). Out-of-bounds coordinates are included; callers filter.
pub fn neighbors(coord: Coord) -> [Coord; 4] {
    [
        Direction::Up.apply(&coord),
        Direction::Down.apply(&coord),
        Direction::Left.apply(&coord),
        Direction::Right.apply(&coord),
    ]
}

/// Manhattan distance between two coordinates.
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Looks up the direction for a single-step delta between two coordinates.
/// Returns `None` when the coordinates are not exactly one step apart.
pub fn direction_between(from: Coord, to: Coord) -> Option<Direction> {
    let delta = (to.x - from.x, to.y - from.y);
    Direction::all()
        .iter()
        .find(|d| d.delta() == delta)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_in_canonical_order() {
        let c = Coord { x: 3, y: 3 };
        assert_eq!(
            neighbors(c),
            [
                Coord { x: 3, y: 2 },
                Coord { x: 3, y: 4 },
                Coord { x: 2, y: 3 },
                Coord { x: 4, y: 3 },
            ]
        );
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(manhattan(Coord { x: 0, y: 0 }, Coord { x: 3, y: 4 }), 7);
        assert_eq!(manhattan(Coord { x: 2, y: 2 }, Coord { x: 2, y: 2 }), 0);
    }

    #[test]
    fn direction_lookup_covers_all_deltas() {
        let c = Coord { x: 5, y: 5 };
        assert_eq!(
            direction_between(c, Coord { x: 5, y: 4 }),
            Some(Direction::Up)
        );
        assert_eq!(
            direction_between(c, Coord { x: 5, y: 6 }),
            Some(Direction::Down)
        );
        assert_eq!(
            direction_between(c, Coord { x: 4, y: 5 }),
            Some(Direction::Left)
        );
        assert_eq!(
            direction_between(c, Coord { x: 6, y: 5 }),
            Some(Direction::Right)
        );
    }

    #[test]
    fn direction_lookup_rejects_non_steps() {
        let c = Coord { x: 5, y: 5 };
        assert_eq!(direction_between(c, c), None);
        assert_eq!(direction_between(c, Coord { x: 6, y: 6 }), None);
        assert_eq!(direction_between(c, Coord { x: 5, y: 7 }), None);
    }
}
