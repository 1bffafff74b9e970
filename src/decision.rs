// Per-decision derived state.
//
// Everything the strategy rules and the cost model need to know about the
// current turn is computed once, up front, and carried in a single context
// value: which cells end the snake, which immediate moves are valid, how
// much room each of those moves leads into, and how close every cell is to
// an enemy head. The context borrows the turn's snapshot and is dropped
// with it.

use std::collections::HashMap;

use crate::config::SearchConfig;
use crate::genome::{Genome, TraitSet};
use crate::grid;
use crate::reachability::flood_fill;
use crate::types::{Battlesnake, Board, Coord};

/// How long a cell stays deadly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lethality {
    /// Occupied for longer than any approach could take.
    Always,
    /// Fatal only while our head is within `turns` steps; the occupant
    /// will have vacated before a longer approach arrives.
    Vacating(u32),
}

fn in_bounds(board: &Board, c: Coord) -> bool {
    c.x >= 0 && c.x < board.width && c.y >= 0 && c.y < board.height
}

fn merge_lethality(map: &mut HashMap<Coord, Lethality>, coord: Coord, new: Lethality) {
    let entry = map.entry(coord).or_insert(new);
    *entry = match (*entry, new) {
        (Lethality::Always, _) | (_, Lethality::Always) => Lethality::Always,
        (Lethality::Vacating(a), Lethality::Vacating(b)) => Lethality::Vacating(a.max(b)),
    };
}

/// Builds the map of deadly cells for this turn.
///
/// By default a tail cell is left out (its owner vacates it next turn),
/// unless the tail is stacked, in which case it stays occupied one extra
/// turn and is deadly to anyone close enough to enter it meanwhile. With
/// foresight, every segment gets the same treatment: a cell at offset `k`
/// from its owner's tail is deadly only within `k` steps of our head.
fn build_lethal_map(
    board: &Board,
    foresighted: bool,
) -> HashMap<Coord, Lethality> {
    let mut lethal = HashMap::new();
    for snake in &board.snakes {
        let len = snake.body.len();
        let tail = snake.tail();
        if foresighted {
            for (i, &cell) in snake.body.iter().enumerate() {
                let offset = (len - 1 - i) as u32;
                merge_lethality(&mut lethal, cell, Lethality::Vacating(offset));
            }
        } else {
            for &cell in &snake.body {
                if cell == tail {
                    continue;
                }
                merge_lethality(&mut lethal, cell, Lethality::Always);
            }
            if snake.has_stacked_tail() {
                merge_lethality(&mut lethal, tail, Lethality::Vacating(1));
            }
        }
    }
    lethal
}

fn is_fatal_at(lethal: &HashMap<Coord, Lethality>, my_head: Coord, c: Coord) -> bool {
    match lethal.get(&c) {
        None => false,
        Some(Lethality::Always) => true,
        Some(Lethality::Vacating(turns)) => grid::manhattan(my_head, c) <= *turns as i32,
    }
}

/// One turn's worth of derived state, built fresh per request.
pub struct DecisionContext<'a> {
    pub board: &'a Board,
    pub me: &'a Battlesnake,
    pub genome: Genome,
    pub traits: TraitSet,
    lethal: HashMap<Coord, Lethality>,
    /// Immediate moves that are in-bounds and not deadly, canonical order.
    pub valid_moves: Vec<Coord>,
    /// Size of the region reachable behind each valid move, capped at
    /// `fill_cap` cells.
    pub fill_sizes: HashMap<Coord, usize>,
    /// Exploration bound for `fill_sizes`: `length * trap_size_multiplier`.
    /// A region that reaches the cap counts as roomy enough.
    pub fill_cap: usize,
    /// Every valid move leads into a region smaller than our own body.
    pub trapped: bool,
    /// Cell -> BFS depths from each enemy head whose gradient reaches it.
    pub head_danger: HashMap<Coord, Vec<u32>>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        board: &'a Board,
        me: &'a Battlesnake,
        genome: Genome,
        traits: TraitSet,
        search: &SearchConfig,
    ) -> Self {
        let lethal = build_lethal_map(board, traits.foresighted);
        let my_head = me.head();
        let my_length = me.len();
        let open = |c: Coord| in_bounds(board, c) && !is_fatal_at(&lethal, my_head, c);

        let valid_moves: Vec<Coord> = grid::neighbors(my_head)
            .iter()
            .copied()
            .filter(|&c| open(c))
            .collect();

        let cap = (my_length * search.trap_size_multiplier).max(1);
        let fill_sizes: HashMap<Coord, usize> = valid_moves
            .iter()
            .map(|&m| (m, flood_fill(m, &open, Some(cap), None).len()))
            .collect();

        let trapped = valid_moves.iter().all(|m| fill_sizes[m] < my_length);

        let mut head_danger: HashMap<Coord, Vec<u32>> = HashMap::new();
        for enemy in board.snakes.iter().filter(|s| s.id != me.id) {
            let fill = flood_fill(enemy.head(), &open, None, Some(search.head_danger_depth));
            // A strictly shorter snake loses a head-to-head, so the cells it
            // threatens right next to our head are not dangerous to us.
            let shorter = enemy.len() < my_length;
            for (&cell, &depth) in &fill.cells {
                if shorter && grid::manhattan(cell, my_head) == 1 {
                    continue;
                }
                head_danger.entry(cell).or_default().push(depth);
            }
        }

        DecisionContext {
            board,
            me,
            genome,
            traits,
            lethal,
            valid_moves,
            fill_sizes,
            fill_cap: cap,
            trapped,
            head_danger,
        }
    }

    pub fn my_head(&self) -> Coord {
        self.me.head()
    }

    pub fn my_length(&self) -> usize {
        self.me.len()
    }

    pub fn in_bounds(&self, c: Coord) -> bool {
        in_bounds(self.board, c)
    }

    /// Entering this cell this turn (or before its occupant vacates it)
    /// ends the snake.
    pub fn is_fatal(&self, c: Coord) -> bool {
        is_fatal_at(&self.lethal, self.my_head(), c)
    }

    pub fn is_open(&self, c: Coord) -> bool {
        self.in_bounds(c) && !self.is_fatal(c)
    }

    /// In-bounds, non-deadly neighbors of a cell, canonical order.
    pub fn open_neighbors(&self, c: Coord) -> Vec<Coord> {
        grid::neighbors(c)
            .iter()
            .copied()
            .filter(|&n| self.is_open(n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn snake(id: &str, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord { x, y }).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: String::new(),
            shout: None,
        }
    }

    fn board(width: i32, height: i32, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes,
        }
    }

    fn context<'a>(board: &'a Board, traits: TraitSet) -> DecisionContext<'a> {
        let config = Config::default_hardcoded();
        DecisionContext::new(
            board,
            &board.snakes[0],
            Genome::default(),
            traits,
            &config.search,
        )
    }

    #[test]
    fn body_is_fatal_but_plain_tail_is_not() {
        let b = board(7, 7, vec![snake("me", &[(3, 3), (3, 4), (3, 5), (3, 6)])]);
        let ctx = context(&b, TraitSet::default());
        assert!(ctx.is_fatal(Coord { x: 3, y: 4 }));
        assert!(ctx.is_fatal(Coord { x: 3, y: 5 }));
        assert!(!ctx.is_fatal(Coord { x: 3, y: 6 }), "tail vacates next turn");
    }

    #[test]
    fn stacked_tail_is_fatal_only_near_our_head() {
        // Our head one step from the opponent's duplicated tail.
        let b = board(
            7,
            7,
            vec![
                snake("me", &[(2, 3), (1, 3), (0, 3)]),
                snake("them", &[(5, 3), (4, 3), (3, 3), (3, 3)]),
            ],
        );
        let ctx = context(&b, TraitSet::default());
        assert!(ctx.is_fatal(Coord { x: 3, y: 3 }), "still occupied when we could arrive");

        // Same board, our head two steps away: the tail clears in time.
        let b = board(
            7,
            7,
            vec![
                snake("me", &[(2, 4), (1, 4), (0, 4)]),
                snake("them", &[(5, 3), (4, 3), (3, 3), (3, 3)]),
            ],
        );
        let ctx = context(&b, TraitSet::default());
        assert!(!ctx.is_fatal(Coord { x: 3, y: 3 }));
    }

    #[test]
    fn foresight_clears_segments_we_cannot_reach_in_time() {
        // Opponent segment at offset 3 from its tail; our head 4+ steps away.
        let b = board(
            9,
            9,
            vec![
                snake("me", &[(0, 0), (0, 1)]),
                snake("them", &[(4, 4), (4, 5), (4, 6), (4, 7), (4, 8)]),
            ],
        );
        let foresighted = TraitSet {
            foresighted: true,
            ..TraitSet::default()
        };
        let ctx = context(&b, foresighted);
        // Head (4,4): offset 4 from tail, our distance 8 > 4: clear.
        assert!(!ctx.is_fatal(Coord { x: 4, y: 4 }));
        // Without foresight the same cell is deadly.
        let ctx = context(&b, TraitSet::default());
        assert!(ctx.is_fatal(Coord { x: 4, y: 4 }));
    }

    #[test]
    fn foresight_keeps_segments_we_could_hit() {
        let b = board(
            9,
            9,
            vec![
                snake("me", &[(3, 4), (2, 4), (1, 4)]),
                snake("them", &[(4, 4), (4, 5), (4, 6), (4, 7), (4, 8)]),
            ],
        );
        let foresighted = TraitSet {
            foresighted: true,
            ..TraitSet::default()
        };
        let ctx = context(&b, foresighted);
        // Enemy head one step away, offset 4 from its tail: deadly.
        assert!(ctx.is_fatal(Coord { x: 4, y: 4 }));
        // Its tail (offset 0) is never deadly to an adjacent head.
        assert!(!ctx.is_fatal(Coord { x: 4, y: 8 }));
    }

    #[test]
    fn valid_moves_filter_walls_and_bodies() {
        // Head in the top-left corner, body blocking the right.
        let b = board(5, 5, vec![snake("me", &[(0, 0), (1, 0), (1, 1)])]);
        let ctx = context(&b, TraitSet::default());
        assert_eq!(ctx.valid_moves, vec![Coord { x: 0, y: 1 }]);
    }

    #[test]
    fn trapped_when_every_region_is_smaller_than_us() {
        // A length-5 snake whose only exit leads into a 2-cell pocket.
        //   p p W w .
        //   W h W . .
        //   W b W . .
        //   W b W . .
        //   W W W . .
        let walls = snake(
            "walls",
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 4),
                (2, 4),
                (2, 3),
                (2, 2),
                (2, 1),
                (2, 0),
                (3, 0),
            ],
        );
        let me = snake("me", &[(1, 1), (1, 2), (1, 3), (1, 3), (1, 3)]);
        let b = board(5, 5, vec![me, walls]);
        let ctx = context(&b, TraitSet::default());
        assert_eq!(ctx.valid_moves, vec![Coord { x: 1, y: 0 }]);
        assert_eq!(ctx.fill_sizes[&Coord { x: 1, y: 0 }], 2);
        assert!(ctx.fill_sizes[&Coord { x: 1, y: 0 }] < ctx.my_length());
        assert!(ctx.trapped);
    }

    #[test]
    fn not_trapped_when_one_region_fits_us() {
        let b = board(7, 7, vec![snake("me", &[(3, 3), (3, 4), (3, 5)])]);
        let ctx = context(&b, TraitSet::default());
        assert!(!ctx.trapped);
        // Caps hold: no fill explored past twice our length.
        assert!(ctx
            .fill_sizes
            .values()
            .all(|&size| size <= 2 * ctx.my_length()));
    }

    #[test]
    fn head_danger_wraps_enemy_heads() {
        let b = board(
            11,
            11,
            vec![
                snake("me", &[(1, 1), (1, 2), (1, 3)]),
                snake("them", &[(8, 8), (8, 9), (8, 10), (7, 10)]),
            ],
        );
        let ctx = context(&b, TraitSet::default());
        let next_to_head = ctx.head_danger.get(&Coord { x: 8, y: 7 });
        assert_eq!(next_to_head, Some(&vec![1]));
        // Beyond the default depth the gradient ends.
        assert!(ctx.head_danger.get(&Coord { x: 8, y: 1 }).is_none());
    }

    #[test]
    fn shorter_enemy_is_no_threat_beside_our_head() {
        // Enemy head two cells from ours; the cell between is adjacent to
        // both heads.
        let b = board(
            11,
            11,
            vec![
                snake("me", &[(4, 4), (4, 5), (4, 6), (4, 7)]),
                snake("them", &[(6, 4), (7, 4)]),
            ],
        );
        let ctx = context(&b, TraitSet::default());
        let contested = Coord { x: 5, y: 4 };
        assert!(ctx.head_danger.get(&contested).is_none());

        // A longer enemy in the same spot is a real threat there.
        let b = board(
            11,
            11,
            vec![
                snake("me", &[(4, 4), (4, 5), (4, 6), (4, 7)]),
                snake("them", &[(6, 4), (7, 4), (8, 4), (9, 4), (9, 5)]),
            ],
        );
        let ctx = context(&b, TraitSet::default());
        assert!(ctx.head_danger.get(&contested).is_some());
    }
}
