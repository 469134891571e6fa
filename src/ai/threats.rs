use rand::Rng;

use crate::game::{GameState, MAX_MOVES};

use super::heuristic::Heuristic;

/// Column ordering: center-first for better alpha-beta pruning.
pub const MOVE_ORDER: [usize; 7] = [3, 2, 4, 1, 5, 0, 6];

/// Playable columns in center-out order.
pub fn legal_moves(state: &GameState) -> Vec<usize> {
    MOVE_ORDER
        .into_iter()
        .filter(|&column| state.is_legal(column))
        .collect()
}

/// Columns that complete a four for the player to move.
pub fn immediate_winning_moves(state: &mut GameState) -> Vec<usize> {
    legal_moves(state)
        .into_iter()
        .filter(|&column| state.trial(column).four_in_a_row())
        .collect()
}

/// Columns where the opponent would complete a four if it were their turn,
/// found by passing the turn and probing every legal reply. Playing one of
/// them denies that win.
pub fn blocking_moves(state: &mut GameState) -> Vec<usize> {
    // The probe needs room for the null move plus one disk.
    if state.number_of_moves() + 2 > MAX_MOVES {
        return Vec::new();
    }

    let candidates = legal_moves(state);
    let mut passed = state.null_trial();
    candidates
        .into_iter()
        .filter(|&column| passed.trial(column).four_in_a_row())
        .collect()
}

/// Pick uniformly among the moves the heuristic rates highest.
pub fn heuristic_move<R: Rng + ?Sized>(
    state: &GameState,
    moves: &[usize],
    heuristic: &dyn Heuristic,
    rng: &mut R,
) -> Option<usize> {
    let best = moves.iter().map(|&m| heuristic.score(state, m)).max()?;
    let best_moves: Vec<usize> = moves
        .iter()
        .copied()
        .filter(|&m| heuristic.score(state, m) == best)
        .collect();
    Some(best_moves[rng.random_range(0..best_moves.len())])
}
