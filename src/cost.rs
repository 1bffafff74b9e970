// Traversal cost of a single grid cell.
//
// Every term reads the destination cell of an edge, so the function is
// directional: it is only meaningful for the forward search the engine
// runs, never as a symmetric distance metric. Results are memoized per
// destination for the lifetime of one decision; the model is never shared
// across turns or requests.

use std::collections::HashMap;

use crate::decision::DecisionContext;
use crate::grid;
use crate::types::Coord;

pub struct CostModel<'a> {
    ctx: &'a DecisionContext<'a>,
    memo: HashMap<Coord, i64>,
}

impl<'a> CostModel<'a> {
    pub fn new(ctx: &'a DecisionContext<'a>) -> Self {
        CostModel {
            ctx,
            memo: HashMap::new(),
        }
    }

    /// Cost of stepping onto `to`. The source cell does not participate;
    /// see the module note on directionality.
    pub fn cost(&mut self, _from: Coord, to: Coord) -> i64 {
        if let Some(&cached) = self.memo.get(&to) {
            return cached;
        }

        let genome = &self.ctx.genome;
        let board = self.ctx.board;
        let mut cost = 0i64;

        // Food cells can be made unattractive (slot defaults to 0).
        if board.food.contains(&to) {
            cost += genome.food_cost;
        }

        // Distance from the board midlines, in half-cell units. Edges cut
        // off future escape routes, so cells further from the center cost
        // more.
        let off_center = (2 * to.x as i64 - (board.width as i64 - 1)).abs()
            + (2 * to.y as i64 - (board.height as i64 - 1)).abs();
        cost += genome.wall_danger_cost * off_center / 2;

        // Hugging snake bodies leaves fewer exits.
        let body_adjacent = grid::neighbors(to)
            .iter()
            .filter(|&&n| self.ctx.is_fatal(n))
            .count() as i64;
        cost += genome.body_danger_cost * body_adjacent;

        // Cells an enemy head can reach soon; nearer layers of the
        // gradient weigh more.
        if let Some(depths) = self.ctx.head_danger.get(&to) {
            for &depth in depths {
                cost += genome.head_danger_cost / depth.max(1) as i64;
            }
        }

        // Moves leading into constrained regions cost more the tighter they
        // are. A region that reached the exploration cap is roomy enough and
        // carries no penalty.
        if let Some(&size) = self.ctx.fill_sizes.get(&to) {
            if size < self.ctx.fill_cap {
                cost += genome.trap_danger_cost / size.max(1) as i64;
            }
        }

        let cost = cost.max(genome.base_cost);
        self.memo.insert(to, cost);
        cost
    }
}
