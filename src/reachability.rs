// Bounded breadth-first flood fill.
//
// Used two ways per decision: sizing the free region behind each candidate
// move (with a size cap, since a region already known to be large enough
// needs no further exploration) and building a depth gradient around enemy
// heads (with a depth cap). The expansion order is the canonical neighbor
// order, so depth-limited results are reproducible.

use std::collections::{HashMap, VecDeque};

use crate::grid;
use crate::types::Coord;

/// Result of a fill: every reached coordinate with its BFS depth from the
/// start (the start itself is at depth 0).
#[derive(Debug)]
pub struct FloodFill {
    pub cells: HashMap<Coord, u32>,
}

impl FloodFill {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn depth(&self, coord: Coord) -> Option<u32> {
        self.cells.get(&coord).copied()
    }
}

/// Breadth-first traversal from `start` over cells for which `is_open`
/// holds. The start cell itself is exempt from the openness check, so fills
/// may be rooted at occupied cells such as enemy heads.
///
/// `max_size` stops the traversal once that many cells have been explored;
/// `max_depth` stops expanding past that many hops. No coordinate is
/// visited twice.
pub fn flood_fill<F>(
    start: Coord,
    is_open: F,
    max_size: Option<usize>,
    max_depth: Option<u32>,
) -> FloodFill
where
    F: Fn(Coord) -> bool,
{
    let mut cells = HashMap::new();
    let mut queue = VecDeque::new();

    cells.insert(start, 0u32);
    queue.push_back((start, 0u32));

    'fill: while let Some((coord, depth)) = queue.pop_front() {
        if max_depth.map_or(false, |limit| depth >= limit) {
            continue;
        }
        for &neighbor in grid::neighbors(coord).iter() {
            if cells.contains_key(&neighbor) || !is_open(neighbor) {
                continue;
            }
            if max_size.map_or(false, |limit| cells.len() >= limit) {
                break 'fill;
            }
            cells.insert(neighbor, depth + 1);
            queue.push_back((neighbor, depth + 1));
        }
    }

    FloodFill { cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i32, height: i32) -> impl Fn(Coord) -> bool {
        move |c| c.x >= 0 && c.x < width && c.y >= 0 && c.y < height
    }

    #[test]
    fn fills_whole_open_region() {
        let fill = flood_fill(Coord { x: 0, y: 0 }, open_grid(3, 3), None, None);
        assert_eq!(fill.len(), 9);
    }

    #[test]
    fn depths_match_manhattan_on_open_grid() {
        let fill = flood_fill(Coord { x: 1, y: 1 }, open_grid(4, 4), None, None);
        assert_eq!(fill.depth(Coord { x: 1, y: 1 }), Some(0));
        assert_eq!(fill.depth(Coord { x: 1, y: 0 }), Some(1));
        assert_eq!(fill.depth(Coord { x: 3, y: 3 }), Some(4));
    }

    #[test]
    fn size_cap_stops_exploration() {
        let fill = flood_fill(Coord { x: 0, y: 0 }, open_grid(10, 10), Some(6), None);
        assert_eq!(fill.len(), 6);
    }

    #[test]
    fn depth_cap_bounds_the_gradient() {
        let fill = flood_fill(Coord { x: 5, y: 5 }, open_grid(11, 11), None, Some(2));
        assert!(fill.cells.values().all(|&d| d <= 2));
        // 1 + 4 + 8 cells within two hops of an interior start
        assert_eq!(fill.len(), 13);
    }

    #[test]
    fn walls_split_regions() {
        // A vertical wall at x == 2 splits a 5x5 grid.
        let open = |c: Coord| c.x >= 0 && c.x < 5 && c.y >= 0 && c.y < 5 && c.x != 2;
        let fill = flood_fill(Coord { x: 0, y: 0 }, open, None, None);
        assert_eq!(fill.len(), 10);
        assert_eq!(fill.depth(Coord { x: 4, y: 0 }), None);
    }

    #[test]
    fn start_is_exempt_from_openness() {
        // Rooted at a blocked cell; neighbors still explored.
        let open = |c: Coord| c.x >= 0 && c.x < 3 && c.y >= 0 && c.y < 3 && !(c.x == 1 && c.y == 1);
        let fill = flood_fill(Coord { x: 1, y: 1 }, open, None, None);
        assert_eq!(fill.depth(Coord { x: 1, y: 1 }), Some(0));
        assert_eq!(fill.len(), 9);
    }

    #[test]
    fn traversal_is_deterministic() {
        let a = flood_fill(Coord { x: 0, y: 0 }, open_grid(7, 7), Some(20), None);
        let b = flood_fill(Coord { x: 0, y: 0 }, open_grid(7, 7), Some(20), None);
        assert_eq!(a.cells, b.cells);
    }
}
