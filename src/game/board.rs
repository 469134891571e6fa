use std::collections::BTreeSet;
use std::fmt;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Width of the padded grid: the playable columns plus a sentinel column on
/// each side.
pub const PADDED_WIDTH: usize = COLS + 2;
/// Total number of cells in the padded grid (8 rows × 9 columns).
pub const PADDED_CELLS: usize = 72;
/// Flat index of the playable cell at column 0, row 0.
const ORIGIN: usize = PADDED_WIDTH + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// Single-character rendering used by `Display`.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }

    fn bits(self) -> u128 {
        match self {
            Cell::Empty => 0,
            Cell::PlayerOne => 1,
            Cell::PlayerTwo => 2,
        }
    }
}

/// Canonical serialization of the board contents, two bits per playable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(u128);

/// Map a playable (column, row) pair to its flat index. Row 0 is the bottom.
#[inline]
pub const fn index(column: usize, row: usize) -> usize {
    ORIGIN + column + PADDED_WIDTH * row
}

/// Inverse of [`index`] for playable cells.
#[inline]
pub const fn column_of(position: usize) -> usize {
    position % PADDED_WIDTH - 1
}

/// Inverse of [`index`] for playable cells.
#[inline]
pub const fn row_of(position: usize) -> usize {
    position / PADDED_WIDTH - 1
}

/// The 7×6 grid embedded in a one-cell border of permanently empty sentinels,
/// so line scans that step off the playable area read `Empty` instead of
/// leaving the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; PADDED_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; PADDED_CELLS],
        }
    }

    /// Get the cell at a playable position
    pub fn get(&self, column: usize, row: usize) -> Cell {
        self.cells[index(column, row)]
    }

    /// Get the cell at a flat index, sentinels included
    #[inline]
    pub fn at(&self, position: usize) -> Cell {
        self.cells[position]
    }

    #[inline]
    pub(crate) fn set(&mut self, position: usize, cell: Cell) {
        debug_assert!(
            position >= ORIGIN && column_of(position) < COLS && row_of(position) < ROWS,
            "attempt to write sentinel cell {position}"
        );
        self.cells[position] = cell;
    }

    /// Count same-colored cells starting one step away from `position` in
    /// direction `step`, stopping after three or at the first mismatch.
    ///
    /// The walk always stops at the border because sentinels are `Empty` and
    /// `cell` never is.
    #[inline]
    pub(crate) fn run_length(&self, position: usize, step: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut cursor = position as isize;
        while count < 3 {
            cursor += step;
            if self.cells[cursor as usize] != cell {
                break;
            }
            count += 1;
        }
        count
    }

    pub fn key(&self) -> BoardKey {
        let mut key = 0u128;
        for row in 0..ROWS {
            for column in 0..COLS {
                key = (key << 2) | self.get(column, row).bits();
            }
        }
        BoardKey(key)
    }

    /// Every cell belonging to some line of four equal, non-empty cells,
    /// anywhere on the board, as (column, row) pairs.
    pub fn winning_positions(&self) -> BTreeSet<(usize, usize)> {
        const LINES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        let mut positions = BTreeSet::new();
        for (dc, dr) in LINES {
            for column in 0..COLS as isize {
                for row in 0..ROWS as isize {
                    let end_column = column + 3 * dc;
                    let end_row = row + 3 * dr;
                    if !(0..COLS as isize).contains(&end_column)
                        || !(0..ROWS as isize).contains(&end_row)
                    {
                        continue;
                    }

                    let line: Vec<(usize, usize)> = (0..4)
                        .map(|i| ((column + i * dc) as usize, (row + i * dr) as usize))
                        .collect();
                    let first = self.get(line[0].0, line[0].1);
                    if first != Cell::Empty && line.iter().all(|&(c, r)| self.get(c, r) == first)
                    {
                        positions.extend(line);
                    }
                }
            }
        }
        positions
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..ROWS).rev() {
            let line: String = (0..COLS).map(|column| self.get(column, row).symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
