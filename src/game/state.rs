use std::ops::{Deref, DerefMut};

use super::board::{column_of, index, Board, BoardKey, Cell, COLS, ROWS};
use super::Player;

/// Number of cells on the board, and therefore the longest possible game.
pub const MAX_MOVES: usize = COLS * ROWS;

/// Line directions on the padded grid: vertical, horizontal and both diagonals.
const DIRECTIONS: [isize; 4] = [9, 1, 10, 8];

/// Mutable game state shared by the facade and the search.
///
/// The player to move is derived from `number_of_moves`, so a null move only
/// needs to bump the counter.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    column_height: [usize; COLS],
    move_history: [usize; MAX_MOVES],
    number_of_moves: usize,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
            column_height: [0; COLS],
            move_history: [0; MAX_MOVES],
            number_of_moves: 0,
        }
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn value(&self, column: usize, row: usize) -> Cell {
        self.board.get(column, row)
    }

    pub fn column_height(&self, column: usize) -> usize {
        self.column_height[column]
    }

    pub fn number_of_moves(&self) -> usize {
        self.number_of_moves
    }

    pub fn current_player(&self) -> Player {
        Player::to_move(self.number_of_moves)
    }

    /// True iff `column` exists and still has room for a disk.
    pub fn is_legal(&self, column: usize) -> bool {
        column < COLS && self.column_height[column] < ROWS
    }

    pub fn is_draw(&self) -> bool {
        self.number_of_moves == MAX_MOVES
    }

    /// Number of columns that still accept a disk.
    pub fn open_columns(&self) -> usize {
        self.column_height.iter().filter(|&&h| h < ROWS).count()
    }

    /// Flat index of the most recent disk, if any.
    pub fn last_move(&self) -> Option<usize> {
        self.number_of_moves
            .checked_sub(1)
            .map(|i| self.move_history[i])
    }

    /// Drop the mover's disk into `column`.
    ///
    /// The column must be legal; checking is the caller's job.
    pub fn make_move(&mut self, column: usize) {
        debug_assert!(self.is_legal(column), "column {column} is not playable");
        let position = index(column, self.column_height[column]);
        self.board.set(position, self.current_player().to_cell());
        self.move_history[self.number_of_moves] = position;
        self.column_height[column] += 1;
        self.number_of_moves += 1;
    }

    /// Take back the most recent `make_move`. Calls must mirror `make_move`
    /// in strict LIFO order.
    pub fn undo_last_move(&mut self) {
        debug_assert!(self.number_of_moves > 0, "no move to undo");
        self.number_of_moves -= 1;
        let position = self.move_history[self.number_of_moves];
        self.column_height[column_of(position)] -= 1;
        self.board.set(position, Cell::Empty);
    }

    /// Pass the turn without placing a disk.
    pub fn make_null_move(&mut self) {
        debug_assert!(self.number_of_moves < MAX_MOVES);
        self.number_of_moves += 1;
    }

    pub fn undo_null_move(&mut self) {
        debug_assert!(self.number_of_moves > 0);
        self.number_of_moves -= 1;
    }

    /// Apply `column` for the duration of the returned guard; the move is
    /// undone when the guard drops.
    pub fn trial(&mut self, column: usize) -> Trial<'_> {
        self.make_move(column);
        Trial { state: self }
    }

    /// Pass the turn for the duration of the returned guard.
    pub fn null_trial(&mut self) -> NullTrial<'_> {
        self.make_null_move();
        NullTrial { state: self }
    }

    /// True iff the most recent move completed a line of four. Only lines
    /// through that disk are inspected.
    pub fn four_in_a_row(&self) -> bool {
        let Some(position) = self.last_move() else {
            return false;
        };
        let cell = self.board.at(position);
        if cell == Cell::Empty {
            return false;
        }

        DIRECTIONS.iter().any(|&step| {
            1 + self.board.run_length(position, step, cell)
                + self.board.run_length(position, -step, cell)
                >= 4
        })
    }

    /// True iff the player to move has a move that wins on the spot.
    pub fn can_win_this_move(&mut self) -> bool {
        (0..COLS).any(|column| self.is_legal(column) && self.trial(column).four_in_a_row())
    }

    pub fn key(&self) -> BoardKey {
        self.board.key()
    }
}

// History slots past `number_of_moves` are scratch space and take no part in
// equality.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.number_of_moves == other.number_of_moves
            && self.column_height == other.column_height
            && self.board == other.board
            && self.move_history[..self.number_of_moves]
                == other.move_history[..other.number_of_moves]
    }
}

impl Eq for GameState {}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// A move applied by [`GameState::trial`], taken back on drop.
pub struct Trial<'a> {
    state: &'a mut GameState,
}

impl Deref for Trial<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.state.undo_last_move();
    }
}

/// A passed turn applied by [`GameState::null_trial`], restored on drop.
pub struct NullTrial<'a> {
    state: &'a mut GameState,
}

impl Deref for NullTrial<'_> {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        self.state
    }
}

impl DerefMut for NullTrial<'_> {
    fn deref_mut(&mut self) -> &mut GameState {
        self.state
    }
}

impl Drop for NullTrial<'_> {
    fn drop(&mut self) {
        self.state.undo_null_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn play(columns: &[usize]) -> GameState {
        let mut state = GameState::initial();
        for &column in columns {
            state.make_move(column);
        }
        state
    }

    fn assert_invariants(state: &GameState) {
        let total: usize = (0..COLS).map(|c| state.column_height(c)).sum();
        assert_eq!(total, state.number_of_moves());
        for column in 0..COLS {
            for row in 0..ROWS {
                let occupied = state.value(column, row) != Cell::Empty;
                assert_eq!(occupied, row < state.column_height(column));
            }
        }
        for i in 0..state.number_of_moves() {
            let position = state.move_history[i];
            assert_ne!(state.board.at(position), Cell::Empty);
        }
    }

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.number_of_moves(), 0);
        assert_eq!(state.current_player(), Player::PlayerOne);
        assert_eq!(state.open_columns(), 7);
        assert_eq!(state.last_move(), None);
        assert!(!state.four_in_a_row());
        assert!(!state.is_draw());
    }

    #[test]
    fn test_make_move_stacks_disks() {
        let state = play(&[3, 3]);
        assert_eq!(state.value(3, 0), Cell::PlayerOne);
        assert_eq!(state.value(3, 1), Cell::PlayerTwo);
        assert_eq!(state.column_height(3), 2);
        assert_eq!(state.current_player(), Player::PlayerOne);
        assert_eq!(state.last_move(), Some(index(3, 1)));
        assert_invariants(&state);
    }

    #[test]
    fn test_make_undo_round_trip() {
        let mut state = play(&[3, 2, 3, 4]);
        for column in 0..COLS {
            let before = state.clone();
            state.make_move(column);
            state.undo_last_move();
            assert_eq!(state.board(), before.board());
            assert_eq!(state.column_height, before.column_height);
            assert_eq!(state.number_of_moves(), before.number_of_moves());
        }
    }

    #[test]
    fn test_trial_undoes_on_drop() {
        let mut state = play(&[0, 1]);
        let before = state.clone();
        {
            let trial = state.trial(6);
            assert_eq!(trial.number_of_moves(), 3);
            assert_eq!(trial.value(6, 0), Cell::PlayerOne);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_null_move_flips_turn_only() {
        let mut state = play(&[3]);
        let board = *state.board();
        {
            let mut passed = state.null_trial();
            assert_eq!(passed.current_player(), Player::PlayerOne);
            passed.make_move(3);
            assert_eq!(passed.value(3, 1), Cell::PlayerOne);
            passed.undo_last_move();
        }
        assert_eq!(state.number_of_moves(), 1);
        assert_eq!(state.board(), &board);
        assert_eq!(state.current_player(), Player::PlayerTwo);
    }

    #[test]
    fn test_vertical_four() {
        let state = play(&[0, 1, 0, 1, 0, 1, 0]);
        assert!(state.four_in_a_row());
        assert!(state.value(0, 3) == Cell::PlayerOne);
    }

    #[test]
    fn test_horizontal_four_completed_in_the_middle() {
        // Player one: 0, 1, 3 then 2 fills the gap.
        let state = play(&[0, 0, 1, 1, 3, 3, 2]);
        assert!(state.four_in_a_row());
    }

    #[test]
    fn test_diagonal_up_four() {
        let state = play(&[0, 1, 1, 2, 2, 3, 2, 3, 3, 6, 3]);
        assert_eq!(state.value(3, 3), Cell::PlayerOne);
        assert!(state.four_in_a_row());
    }

    #[test]
    fn test_diagonal_down_four() {
        let state = play(&[6, 5, 5, 4, 4, 3, 4, 3, 3, 0, 3]);
        assert_eq!(state.value(3, 3), Cell::PlayerOne);
        assert!(state.four_in_a_row());
    }

    #[test]
    fn test_no_four_with_three() {
        let state = play(&[0, 0, 1, 1, 2]);
        assert!(!state.four_in_a_row());
    }

    #[test]
    fn test_line_of_opponent_does_not_count() {
        // Player two's disk breaks the row: X X O X on the bottom.
        let state = play(&[0, 2, 1, 5, 3]);
        assert!(!state.four_in_a_row());
    }

    #[test]
    fn test_no_wrap_around_rows() {
        // Disks at columns 4..=6 of row 0 and column 0 of row 1 would be
        // adjacent in an unpadded flat layout.
        let state = play(&[4, 0, 5, 1, 6, 2, 0]);
        assert_eq!(state.value(0, 1), Cell::PlayerOne);
        assert!(!state.four_in_a_row());
    }

    #[test]
    fn test_can_win_this_move() {
        let mut state = play(&[0, 1, 0, 1, 0]);
        // Player two to move cannot win, but player one threatens column 0.
        assert!(!state.can_win_this_move());
        state.make_move(6);
        assert!(state.can_win_this_move());
        assert_eq!(state.number_of_moves(), 6);
    }

    #[test]
    fn test_full_column_is_illegal() {
        let state = play(&[2, 2, 2, 2, 2, 2]);
        assert!(!state.is_legal(2));
        assert!(state.is_legal(3));
        assert!(!state.is_legal(COLS));
        assert_eq!(state.open_columns(), 6);
    }

    #[test]
    fn test_key_ignores_move_order() {
        let a = play(&[0, 1, 2, 3]);
        let b = play(&[2, 3, 0, 1]);
        let c = play(&[1, 0, 3, 2]);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_draw_after_full_board() {
        // Fill columns in pairs of three so no four ever forms.
        let order = [0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 2, 3, 2, 3, 2, 3, 3, 2, 3, 2, 3, 2, 4, 5,
            4, 5, 4, 5, 5, 4, 5, 4, 5, 4, 6, 6, 6, 6, 6, 6];
        let mut state = GameState::initial();
        for column in order {
            state.make_move(column);
            assert!(!state.four_in_a_row(), "unexpected four after column {column}");
        }
        assert!(state.is_draw());
        assert_eq!(state.open_columns(), 0);
    }

    #[test]
    fn test_random_playouts_keep_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut state = GameState::initial();
            let mut snapshots = Vec::new();
            while !state.is_draw() {
                let legal: Vec<usize> = (0..COLS).filter(|&c| state.is_legal(c)).collect();
                let column = legal[rng.random_range(0..legal.len())];
                snapshots.push(state.clone());
                state.make_move(column);
                assert_invariants(&state);

                let expected = state
                    .board()
                    .winning_positions()
                    .contains(&(column, state.column_height(column) - 1));
                assert_eq!(state.four_in_a_row(), expected);
                if expected {
                    break;
                }
            }
            while let Some(snapshot) = snapshots.pop() {
                state.undo_last_move();
                assert_eq!(state, snapshot);
            }
        }
    }
}
