use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::EnvError;

/// A cell on the grid, addressed as `(row, col)` from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: GridPosition) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Row-major index of this cell on a grid `cols` wide.
    pub fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    pub fn from_index(index: usize, cols: usize) -> Self {
        Self::new(index / cols, index % cols)
    }

    pub fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// The cell reached by taking `action`, clamped to a `rows` x `cols` grid.
    /// Moving into a wall leaves the position unchanged.
    pub fn moved(self, action: Action, rows: usize, cols: usize) -> Self {
        let Self { row, col } = self;
        match action {
            Action::Up => Self::new(row.saturating_sub(1), col),
            Action::Down => Self::new((row + 1).min(rows - 1), col),
            Action::Left => Self::new(row, col.saturating_sub(1)),
            Action::Right => Self::new(row, (col + 1).min(cols - 1)),
        }
    }

    /// Grid sides are validated to fit in `i32`, so the casts are lossless.
    pub fn to_obs(self) -> [i32; 2] {
        [self.row as i32, self.col as i32]
    }
}

impl From<(usize, usize)> for GridPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four moves, with the integer encoding drivers use on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Up),
            1 => Ok(Action::Down),
            2 => Ok(Action::Left),
            3 => Ok(Action::Right),
            other => Err(EnvError::InvalidAction(other)),
        }
    }
}
