//! Core four-in-a-row game logic: the sentinel-bordered board, player types,
//! and the mutable game state with make/undo primitives used by the search.

mod board;
mod player;
mod state;

pub use board::{index, Board, BoardKey, Cell, COLS, PADDED_CELLS, ROWS};
pub use player::Player;
pub use state::{GameState, NullTrial, Trial, MAX_MOVES};
