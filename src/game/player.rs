use super::board::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    PlayerOne,
    PlayerTwo,
}

impl Player {
    /// The player whose turn it is after `number_of_moves` disks were dropped.
    /// PlayerOne always opens the game.
    pub fn to_move(number_of_moves: usize) -> Player {
        if number_of_moves % 2 == 0 {
            Player::PlayerOne
        } else {
            Player::PlayerTwo
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::PlayerOne => Cell::PlayerOne,
            Player::PlayerTwo => Cell::PlayerTwo,
        }
    }
}
