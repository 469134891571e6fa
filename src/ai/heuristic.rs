use crate::game::{GameState, COLS, ROWS};

/// Trait for scoring a candidate column before it is searched.
///
/// Scores only order moves and break ties; the search itself never looks at
/// them. Higher is better regardless of which player is to move.
pub trait Heuristic {
    fn score(&self, state: &GameState, column: usize) -> i32;
}

/// Landing cells worth contesting: the central diamond of the board.
/// Indexed by `[row][column]`, row 0 at the bottom.
const ZONE_WEIGHTS: [[i32; COLS]; ROWS] = [
    [0, 0, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 1, 1, 1, 1, 1, 0],
    [0, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 0, 0, 0, 0],
];

/// The move evaluators an engine policy can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeuristicKind {
    /// Every move scores 0, leaving the order to the shuffle.
    Constant,
    /// Prefers columns near the center.
    CenterColumn,
    /// Prefers landing cells near the center of the board, both ways.
    CenterDistance,
    /// Scores 1 for landing in the central zone, 0 elsewhere.
    WeightedZone,
}

impl Heuristic for HeuristicKind {
    fn score(&self, state: &GameState, column: usize) -> i32 {
        let row = state.column_height(column) as i32;
        let column = column as i32;
        match self {
            HeuristicKind::Constant => 0,
            HeuristicKind::CenterColumn => -(3 - column).abs(),
            // Doubled so the half-row center stays integral.
            HeuristicKind::CenterDistance => -2 * (3 - column).abs() - (5 - 2 * row).abs(),
            HeuristicKind::WeightedZone => ZONE_WEIGHTS
                .get(row as usize)
                .map_or(0, |weights| weights[column as usize]),
        }
    }
}
