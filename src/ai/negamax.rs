use std::cmp::Reverse;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::game::{GameState, MAX_MOVES};

use super::heuristic::Heuristic;
use super::threats::{
    blocking_moves, heuristic_move, immediate_winning_moves, legal_moves, MOVE_ORDER,
};
use super::transposition::{EntryKind, TranspositionTable};

/// Window used for a full-width root search. Any real score fits well inside.
pub const ROOT_WINDOW: i32 = 10_000;

/// Blocking shortcuts are only tried while at least two cells remain.
const BLOCK_PROBE_LIMIT: usize = MAX_MOVES - 2;

/// How `computer_move` arrived at its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The move completes a four.
    ImmediateWin,
    /// The move takes a cell the opponent would win on.
    Block,
    /// The move came out of the negamax search.
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    pub column: usize,
    pub decision: Decision,
    /// Nodes visited by the search, 0 for the shortcuts.
    pub nodes: u64,
}

/// Exact negamax search with fail-hard alpha-beta pruning.
///
/// Scores are `MAX_MOVES - number_of_moves` at the node where the mover can
/// complete a four, so faster wins score higher. 0 means a draw or no result
/// before the horizon. `depth` is an absolute move count: the search stops at
/// positions with `depth - 1` disks, and `depth == 42` searches to the end.
pub struct Searcher<'a> {
    table: &'a mut TranspositionTable,
    nodes: u64,
}

impl<'a> Searcher<'a> {
    pub fn new(table: &'a mut TranspositionTable) -> Self {
        Searcher { table, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Value of `state` for the player to move. `state` must not already
    /// contain a four; wins are detected one ply early instead.
    pub fn negamax(&mut self, state: &mut GameState, depth: usize, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let original_alpha = alpha;

        if state.can_win_this_move() {
            return (MAX_MOVES - state.number_of_moves()) as i32;
        }

        if state.number_of_moves() + 1 == depth || state.is_draw() {
            return 0;
        }

        let key = (depth > 0).then(|| state.key());
        if let Some(entry) = key.and_then(|key| self.table.probe(key)) {
            if entry.kind == EntryKind::Exact {
                return entry.value;
            }
            if (entry.value != 0 || entry.depth >= depth) && entry.value >= beta {
                return beta;
            }
        }

        for column in MOVE_ORDER {
            if !state.is_legal(column) {
                continue;
            }
            let value = {
                let mut child = state.trial(column);
                -self.negamax(&mut child, depth, -beta, -alpha)
            };
            if value >= beta {
                if let Some(key) = key {
                    self.table.store(key, depth, EntryKind::LowerBound, beta);
                }
                return beta;
            }
            if value > alpha {
                alpha = value;
            }
        }

        if let Some(key) = key.filter(|_| alpha > original_alpha && alpha != 0) {
            self.table.store(key, depth, EntryKind::Exact, alpha);
        }
        alpha
    }

    /// The first column in `move_order` whose value beats everything before
    /// it; later columns with equal value never replace it.
    pub fn root_negamax(
        &mut self,
        state: &mut GameState,
        move_order: &[usize],
        depth: usize,
        mut alpha: i32,
        beta: i32,
    ) -> Option<usize> {
        let mut best_move = None;
        for &column in move_order {
            let value = {
                let mut child = state.trial(column);
                -self.negamax(&mut child, depth, -beta, -alpha)
            };
            if value > alpha {
                best_move = Some(column);
                alpha = value;
            }
        }
        best_move
    }
}

/// Choose a column for the player to move: win now, else block, else search
/// to the absolute horizon `depth`.
///
/// Legal moves are shuffled and then stable-sorted by `heuristic`, so equally
/// rated moves come out in varied order from game to game. Returns `None`
/// only when no column is playable.
pub fn computer_move<R: Rng + ?Sized>(
    state: &mut GameState,
    table: &mut TranspositionTable,
    depth: usize,
    heuristic: &dyn Heuristic,
    rng: &mut R,
) -> Option<MoveChoice> {
    let mut moves = legal_moves(state);
    if moves.is_empty() {
        return None;
    }
    moves.shuffle(rng);
    moves.sort_by_key(|&column| Reverse(heuristic.score(state, column)));

    let wins = immediate_winning_moves(state);
    if let Some(&column) = moves.iter().find(|column| wins.contains(column)) {
        return Some(MoveChoice {
            column,
            decision: Decision::ImmediateWin,
            nodes: 0,
        });
    }

    if state.number_of_moves() <= BLOCK_PROBE_LIMIT {
        let blocks = blocking_moves(state);
        if let Some(column) = heuristic_move(state, &blocks, heuristic, rng) {
            return Some(MoveChoice {
                column,
                decision: Decision::Block,
                nodes: 0,
            });
        }
    }

    let mut searcher = Searcher::new(table);
    let column = searcher.root_negamax(state, &moves, depth, -ROOT_WINDOW, ROOT_WINDOW)?;
    Some(MoveChoice {
        column,
        decision: Decision::Search,
        nodes: searcher.nodes(),
    })
}
