// Weighted shortest-path search.
//
// Best-first expansion ordered by accumulated cost plus an admissible
// Manhattan heuristic (every step costs at least the base-cost floor).
// Multi-target queries run one search per target; sharing a search would
// couple the targets' cost frontiers.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::cost::CostModel;
use crate::decision::DecisionContext;
use crate::grid;
use crate::types::Coord;

/// A discovered route: accumulated cost and the full coordinate sequence,
/// source first, target last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub cost: i64,
    pub coords: Vec<Coord>,
}

impl Path {
    pub fn hops(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// The cell to move onto next (the second coordinate).
    pub fn first_step(&self) -> Option<Coord> {
        self.coords.get(1).copied()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct Frontier {
    estimate: i64,
    spent: i64,
    coord: Coord,
}

// BinaryHeap is a max-heap; reverse the comparison for cheapest-first.
// Coordinates participate last to keep the expansion order fully defined.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.spent.cmp(&self.spent))
            .then_with(|| (other.coord.x, other.coord.y).cmp(&(self.coord.x, self.coord.y)))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Cheapest path from `start` to `goal`, or `None` when the goal is
/// unreachable. A zero-hop query (`start == goal`) is "no path".
pub fn shortest_path(
    ctx: &DecisionContext,
    cost: &mut CostModel,
    start: Coord,
    goal: Coord,
) -> Option<Path> {
    if start == goal {
        return None;
    }

    let step_floor = ctx.genome.base_cost.max(0);
    let heuristic = |c: Coord| grid::manhattan(c, goal) as i64 * step_floor;

    let mut best: HashMap<Coord, i64> = HashMap::new();
    let mut came_from: HashMap<Coord, Coord> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(start, 0);
    frontier.push(Frontier {
        estimate: heuristic(start),
        spent: 0,
        coord: start,
    });

    while let Some(Frontier { spent, coord, .. }) = frontier.pop() {
        if spent > best.get(&coord).copied().unwrap_or(i64::MAX) {
            continue; // stale heap entry
        }
        if coord == goal {
            return Some(reconstruct(&came_from, start, goal, spent));
        }
        for next in ctx.open_neighbors(coord) {
            let next_spent = spent + cost.cost(coord, next);
            if next_spent < best.get(&next).copied().unwrap_or(i64::MAX) {
                best.insert(next, next_spent);
                came_from.insert(next, coord);
                frontier.push(Frontier {
                    estimate: next_spent + heuristic(next),
                    spent: next_spent,
                    coord: next,
                });
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord, cost: i64) -> Path {
    let mut coords = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                coords.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    coords.reverse();
    Path { cost, coords }
}

/// Independent searches to each target, keeping only reachable results and
/// dropping paths longer than `max_steps` hops.
pub fn paths_to_targets(
    ctx: &DecisionContext,
    cost: &mut CostModel,
    start: Coord,
    targets: &[Coord],
    max_steps: Option<usize>,
) -> Vec<Path> {
    targets
        .iter()
        .filter_map(|&target| shortest_path(ctx, cost, start, target))
        .filter(|path| max_steps.map_or(true, |limit| path.hops() <= limit))
        .collect()
}
