//! Move selection: heuristics for ordering, threat detection, the negamax
//! search with its transposition table, and the difficulty policies.

mod difficulty;
mod heuristic;
mod negamax;
mod threats;
mod transposition;

pub use difficulty::{plan, Difficulty, EngineConfig, Plan};
pub use heuristic::{Heuristic, HeuristicKind};
pub use negamax::{computer_move, Decision, MoveChoice, Searcher, ROOT_WINDOW};
pub use threats::{blocking_moves, heuristic_move, immediate_winning_moves, legal_moves, MOVE_ORDER};
pub use transposition::{EntryKind, TranspositionTable, TtEntry};
