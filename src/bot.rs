// Bot orchestration.
//
// One /move request becomes one self-contained decision: parse the genome
// and traits that arrived with the request, derive this turn's state from
// the board snapshot, run the strategy chain, answer with a direction.
// Nothing survives the call, so concurrent requests never share state.

use log::{error, info};
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::decision::DecisionContext;
use crate::genome::{Genome, TraitSet};
use crate::strategy::MoveSelector;
use crate::types::{Battlesnake, Board, Direction, Game};

/// Battlesnake bot holding the static engine configuration and exposing
/// methods corresponding to the API endpoints.
pub struct Bot {
    config: Config,
}

impl Bot {
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "dna-snake",
            "color": "#00FF00",
            "head": "fang",
            "tail": "curled",
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, _game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START");
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, _game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER");
    }

    /// Computes and returns the next move.
    /// Corresponds to POST /move endpoint.
    ///
    /// The decision itself is pure CPU-bound graph work, so it runs off the
    /// async worker via `spawn_blocking`. `dna` and `traits` are the
    /// out-of-band request parameters carrying the genome encoding and the
    /// behavior flags.
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
        dna: Option<String>,
        traits: Option<String>,
    ) -> Value {
        let start_time = Instant::now();

        let board = board.clone();
        let you = you.clone();
        let config = self.config.clone();

        let result = tokio::task::spawn_blocking(move || {
            Bot::choose_move(&board, &you, dna.as_deref(), traits.as_deref(), &config)
        })
        .await;

        let (direction, rule) = match result {
            Ok(choice) => choice,
            Err(e) => {
                error!("move computation failed: {}", e);
                (Direction::Up, "error")
            }
        };

        info!(
            "Turn {}: Chose {} (rule: {}, time: {}ms)",
            turn,
            direction.as_str(),
            rule,
            start_time.elapsed().as_millis()
        );

        json!({ "move": direction.as_str() })
    }

    /// The synchronous decision core. Also the entry point the tests use.
    pub fn choose_move(
        board: &Board,
        you: &Battlesnake,
        dna: Option<&str>,
        traits: Option<&str>,
        config: &Config,
    ) -> (Direction, &'static str) {
        let genome = Genome::parse(dna);
        let traits = TraitSet::parse(traits);
        let ctx = DecisionContext::new(board, you, genome, traits, &config.search);
        MoveSelector::new(&ctx, config.selection.tie_break).decide()
    }
}
