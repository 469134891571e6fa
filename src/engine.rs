//! The engine facade: one game session with its board, its transposition
//! table and its random source.
//!
//! A presentation layer drives a session through this type only. It asks
//! whether a column is legal, applies the human's move, checks for a win or a
//! draw, then asks the engine for a reply and applies that too.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::ai::{computer_move, plan, Difficulty, EngineConfig, Plan, TranspositionTable};
use crate::error::{ConfigError, EngineError};
use crate::game::{Cell, GameState, COLS, ROWS};

pub struct Engine<R: Rng = StdRng> {
    state: GameState,
    table: TranspositionTable,
    config: EngineConfig,
    rng: R,
}

impl Engine<StdRng> {
    /// A session with default tuning, seeded from the OS.
    pub fn new() -> Self {
        Engine::build(EngineConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        Engine::with_rng(config, StdRng::from_os_rng())
    }

    /// A session whose random choices are reproducible from `seed`.
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Engine::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for Engine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine::build(config, rng))
    }

    fn build(config: EngineConfig, rng: R) -> Self {
        Engine {
            state: GameState::initial(),
            table: TranspositionTable::new(),
            config,
            rng,
        }
    }

    /// Reset the board and forget everything the search learned.
    pub fn new_game(&mut self) {
        trace!(
            entries = self.table.len(),
            "new game, clearing transposition table"
        );
        self.state = GameState::initial();
        self.table.clear();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of positions currently cached by the search.
    pub fn transposition_entries(&self) -> usize {
        self.table.len()
    }

    pub fn board_value(&self, column: usize, row: usize) -> Result<Cell, EngineError> {
        if column >= COLS || row >= ROWS {
            return Err(EngineError::InvalidPosition { column, row });
        }
        Ok(self.state.value(column, row))
    }

    pub fn is_legal(&self, column: usize) -> bool {
        self.state.is_legal(column)
    }

    /// Drop the mover's disk into `column`.
    pub fn make_move(&mut self, column: usize) -> Result<(), EngineError> {
        if column >= COLS {
            return Err(EngineError::InvalidColumn(column));
        }
        if self.is_over() {
            return Err(EngineError::TerminalState);
        }
        if !self.state.is_legal(column) {
            return Err(EngineError::IllegalMove { column });
        }
        self.state.make_move(column);
        Ok(())
    }

    /// Take back the most recent move.
    pub fn undo_move(&mut self) -> Result<(), EngineError> {
        if self.state.number_of_moves() == 0 {
            return Err(EngineError::NothingToUndo);
        }
        self.state.undo_last_move();
        Ok(())
    }

    /// True iff the board is full. A win on the last disk must be ruled out
    /// with [`Engine::four_in_a_row`] first.
    pub fn is_draw(&self) -> bool {
        self.state.is_draw()
    }

    /// True iff the most recent move completed a four.
    pub fn four_in_a_row(&self) -> bool {
        self.state.four_in_a_row()
    }

    /// Cells of every four-in-a-row on the board as (column, row) pairs, for
    /// highlighting.
    pub fn four_in_a_row_positions(&self) -> BTreeSet<(usize, usize)> {
        self.state.board().winning_positions()
    }

    fn is_over(&self) -> bool {
        self.state.four_in_a_row() || self.state.is_draw()
    }

    /// The engine's reply for difficulty level 1, 2 or 3. The move is not
    /// applied.
    pub fn engine_move(&mut self, level: u8) -> Result<usize, EngineError> {
        let difficulty = Difficulty::try_from(level)?;
        self.choose_move(difficulty)
    }

    pub fn choose_move(&mut self, difficulty: Difficulty) -> Result<usize, EngineError> {
        if self.is_over() {
            return Err(EngineError::TerminalState);
        }

        let (depth, heuristic) =
            match plan(difficulty, &self.state, &self.config, &mut self.rng) {
                Plan::Opening(column) => {
                    debug!(%difficulty, column, "opening move");
                    return Ok(column);
                }
                Plan::Search { depth, heuristic } => (depth, heuristic),
            };

        trace!(moves = self.state.number_of_moves(), "searching from\n{}", self.state.board());
        let choice = computer_move(
            &mut self.state,
            &mut self.table,
            depth,
            &heuristic,
            &mut self.rng,
        )
        .ok_or(EngineError::TerminalState)?;

        debug!(
            %difficulty,
            moves = self.state.number_of_moves(),
            depth,
            ?heuristic,
            column = choice.column,
            decision = ?choice.decision,
            nodes = choice.nodes,
            entries = self.table.len(),
            "engine move"
        );
        Ok(choice.column)
    }
}
