// The behavior policy: a fixed-priority rule chain evaluated once per turn.
//
// A rule fires only when its precondition holds and it finds a usable path;
// otherwise control falls through to the next rule. When no rule produces a
// path the snake takes its cheapest immediate neighbor, and when there is no
// neighbor left at all it moves blind — a losing move, but the reply must
// still be a legal direction token.

use log::debug;
use rand::Rng;

use crate::config::TieBreak;
use crate::cost::CostModel;
use crate::decision::DecisionContext;
use crate::grid;
use crate::pathfind::{paths_to_targets, Path};
use crate::types::{Coord, Direction};

/// Picks the minimum-key item. Equal keys are resolved per policy: keep the
/// first candidate, or draw uniformly among the tied ones.
fn pick_min<T>(items: Vec<T>, key: impl Fn(&T) -> i64, tie_break: TieBreak) -> Option<T> {
    match tie_break {
        TieBreak::FirstFound => {
            let mut best: Option<(i64, T)> = None;
            for item in items {
                let k = key(&item);
                let replace = best.as_ref().map_or(true, |(best_k, _)| k < *best_k);
                if replace {
                    best = Some((k, item));
                }
            }
            best.map(|(_, item)| item)
        }
        TieBreak::Random => {
            let min = items.iter().map(&key).min()?;
            let tied: Vec<T> = items.into_iter().filter(|item| key(item) == min).collect();
            let mut rng = rand::rng();
            let index = rng.random_range(0..tied.len());
            tied.into_iter().nth(index)
        }
    }
}

fn random_direction() -> Direction {
    let directions = Direction::all();
    let mut rng = rand::rng();
    directions[rng.random_range(0..directions.len())]
}

pub struct MoveSelector<'a> {
    ctx: &'a DecisionContext<'a>,
    cost: CostModel<'a>,
    tie_break: TieBreak,
    /// Food query result, shared by the three eating rules.
    food_path: Option<Option<Path>>,
}

impl<'a> MoveSelector<'a> {
    pub fn new(ctx: &'a DecisionContext<'a>, tie_break: TieBreak) -> Self {
        MoveSelector {
            ctx,
            cost: CostModel::new(ctx),
            tie_break,
            food_path: None,
        }
    }

    /// Runs the rule chain and returns the chosen direction together with
    /// the name of the rule that produced it.
    pub fn decide(&mut self) -> (Direction, &'static str) {
        if let Some(next) = self.trapped_escape() {
            return (self.emit(next), "trapped-escape");
        }
        if let Some(next) = self.starving() {
            return (self.emit(next), "starving");
        }
        if let Some(next) = self.opportunistic() {
            return (self.emit(next), "opportunistic");
        }
        if let Some(next) = self.growth() {
            return (self.emit(next), "growth");
        }
        if let Some(next) = self.aggression() {
            return (self.emit(next), "aggression");
        }
        if let Some(next) = self.insecurity() {
            return (self.emit(next), "insecurity");
        }
        if let Some(next) = self.cheapest_neighbor() {
            return (self.emit(next), "fallback");
        }
        debug!("no valid neighbor left, moving blind");
        (random_direction(), "cornered")
    }

    fn emit(&self, next: Coord) -> Direction {
        grid::direction_between(self.ctx.my_head(), next).unwrap_or_else(random_direction)
    }

    /// A path that outlasts our health starves us before arrival.
    fn max_steps(&self) -> usize {
        self.ctx.me.health.max(0) as usize
    }

    fn best_path_to(&mut self, targets: &[Coord]) -> Option<Path> {
        let max_steps = self.max_steps();
        let paths = paths_to_targets(
            self.ctx,
            &mut self.cost,
            self.ctx.my_head(),
            targets,
            Some(max_steps),
        );
        pick_min(paths, |path| path.cost, self.tie_break)
    }

    fn food_path(&mut self) -> Option<Path> {
        if self.food_path.is_none() {
            let food = self.ctx.board.food.clone();
            let best = self.best_path_to(&food);
            self.food_path = Some(best);
        }
        self.food_path.clone().flatten()
    }

    fn is_safe(&self, path: &Path) -> bool {
        let limit = self.ctx.genome.max_cost_considered_safe;
        limit == 0 || path.cost <= limit
    }

    /// Boxed in: follow a tail out. Ours first, then the gap behind our own
    /// body segment nearest the tail (vacated by the time we arrive), then
    /// anyone else's tail.
    fn trapped_escape(&mut self) -> Option<Coord> {
        if !self.ctx.trapped {
            return None;
        }
        debug!("trapped: every move leads into a region smaller than us");

        let own_tail_exits = self.ctx.open_neighbors(self.ctx.me.tail());
        if let Some(path) = self.best_path_to(&own_tail_exits) {
            return path.first_step();
        }

        if self.ctx.my_length() >= 3 {
            let body = &self.ctx.me.body;
            let near_tail = body[body.len() - 2];
            let exits = self.ctx.open_neighbors(near_tail);
            if let Some(path) = self.best_path_to(&exits) {
                return path.first_step();
            }
        }

        let other_tail_exits: Vec<Coord> = self
            .ctx
            .board
            .snakes
            .iter()
            .filter(|s| s.id != self.ctx.me.id)
            .flat_map(|s| self.ctx.open_neighbors(s.tail()))
            .collect();
        self.best_path_to(&other_tail_exits)
            .and_then(|path| path.first_step())
    }

    fn starving(&mut self) -> Option<Coord> {
        if i64::from(self.ctx.me.health) >= self.ctx.genome.starving_threshold {
            return None;
        }
        self.food_path().and_then(|path| path.first_step())
    }

    fn opportunistic(&mut self) -> Option<Coord> {
        let peckish = i64::from(self.ctx.me.health) < self.ctx.genome.peckish_threshold;
        if !self.ctx.traits.opportunistic && !peckish {
            return None;
        }
        let path = self.food_path()?;
        if path.cost <= self.ctx.genome.max_opportunistic_eat_cost || self.is_safe(&path) {
            path.first_step()
        } else {
            None
        }
    }

    fn growth(&mut self) -> Option<Coord> {
        if !self.ctx.traits.gluttonous {
            return None;
        }
        if self.ctx.my_length() >= self.ctx.board.longest_length() {
            return None;
        }
        let path = self.food_path()?;
        if self.is_safe(&path) {
            path.first_step()
        } else {
            None
        }
    }

    /// Hunt a cell beside a smaller snake's head. With the cooperative
    /// trait, snakes carrying our name are never hunted.
    fn aggression(&mut self) -> Option<Coord> {
        if !self.ctx.traits.aggressive {
            return None;
        }
        let me = self.ctx.me;
        let targets: Vec<Coord> = self
            .ctx
            .board
            .snakes
            .iter()
            .filter(|s| s.id != me.id && s.len() < me.len())
            .filter(|s| !(self.ctx.traits.cooperative && s.name == me.name))
            .flat_map(|s| self.ctx.open_neighbors(s.head()))
            .collect();
        let path = self.best_path_to(&targets)?;
        if self.is_safe(&path) {
            path.first_step()
        } else {
            None
        }
    }

    fn insecurity(&mut self) -> Option<Coord> {
        if !self.ctx.traits.insecure {
            return None;
        }
        let exits = self.ctx.open_neighbors(self.ctx.me.tail());
        let path = self.best_path_to(&exits)?;
        if self.is_safe(&path) {
            path.first_step()
        } else {
            None
        }
    }

    fn cheapest_neighbor(&mut self) -> Option<Coord> {
        let head = self.ctx.my_head();
        let scored: Vec<(i64, Coord)> = self
            .ctx
            .valid_moves
            .iter()
            .map(|&m| (self.cost.cost(head, m), m))
            .collect();
        pick_min(scored, |&(cost, _)| cost, self.tie_break).map(|(_, m)| m)
    }
}
