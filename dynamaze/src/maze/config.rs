use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::GridPosition;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid {rows}x{cols} is too large; each side must fit in an i32 and the cell count in a usize")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("{which} position {pos} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        which: &'static str,
        pos: GridPosition,
        rows: usize,
        cols: usize,
    },

    #[error("start and goal must differ, both are {0}")]
    StartIsGoal(GridPosition),

    #[error("{requested} bombs, pits and bonuses requested but only {available} free cells")]
    TooManyItems { requested: usize, available: usize },

    #[error("max_steps must be at least 1")]
    ZeroMaxSteps,

    #[error("layout places {0} in more than one set")]
    LayoutOverlap(GridPosition),

    #[error("layout places an item on the start or goal cell {0}")]
    LayoutCoversEndpoint(GridPosition),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How running out of steps is reported to the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationMode {
    /// Step-budget exhaustion sets `terminated`; `truncated` is never set.
    #[default]
    Combined,
    /// Step-budget exhaustion sets `truncated`; `terminated` is reserved for
    /// hazards and the goal.
    Separate,
}

/// Everything fixed for the lifetime of a [`MazeEnvironment`](super::MazeEnvironment).
///
/// Missing fields take their defaults when deserializing, so a JSON document
/// only needs the values it changes:
///
/// ```
/// let cfg = dynamaze::maze::MazeConfig::from_json_str(r#"{"num_bombs": 0, "max_steps": 50}"#).unwrap();
/// assert_eq!(cfg.grid_rows, 10);
/// assert_eq!(cfg.max_steps, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub start_pos: GridPosition,
    /// Defaults to the bottom-right cell.
    pub goal_pos: Option<GridPosition>,
    pub num_bombs: usize,
    pub num_pits: usize,
    pub num_rewards: usize,
    pub max_steps: u32,
    pub truncation: TruncationMode,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            grid_rows: 10,
            grid_cols: 10,
            start_pos: GridPosition::new(0, 0),
            goal_pos: None,
            num_bombs: 8,
            num_pits: 2,
            num_rewards: 5,
            max_steps: 200,
            truncation: TruncationMode::Combined,
        }
    }
}

impl MazeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid_rows = rows;
        self.grid_cols = cols;
        self
    }

    pub fn with_start(mut self, start: GridPosition) -> Self {
        self.start_pos = start;
        self
    }

    pub fn with_goal(mut self, goal: GridPosition) -> Self {
        self.goal_pos = Some(goal);
        self
    }

    pub fn with_counts(mut self, bombs: usize, pits: usize, rewards: usize) -> Self {
        self.num_bombs = bombs;
        self.num_pits = pits;
        self.num_rewards = rewards;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_truncation(mut self, mode: TruncationMode) -> Self {
        self.truncation = mode;
        self
    }

    pub fn goal(&self) -> GridPosition {
        self.goal_pos.unwrap_or(GridPosition::new(
            self.grid_rows.saturating_sub(1),
            self.grid_cols.saturating_sub(1),
        ))
    }

    pub fn cell_count(&self) -> usize {
        self.grid_rows.saturating_mul(self.grid_cols)
    }

    /// Cells available for bombs, pits and bonuses.
    pub fn free_cells(&self) -> usize {
        self.cell_count().saturating_sub(2)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (rows, cols) = (self.grid_rows, self.grid_cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        // Observations are i32 pairs.
        let max_side = i32::MAX as usize;
        if rows > max_side || cols > max_side || rows.checked_mul(cols).is_none() {
            return Err(ConfigError::GridTooLarge { rows, cols });
        }

        let goal = self.goal();
        for (which, pos) in [("start", self.start_pos), ("goal", goal)] {
            if !pos.in_bounds(rows, cols) {
                return Err(ConfigError::OutOfBounds { which, pos, rows, cols });
            }
        }
        if self.start_pos == goal {
            return Err(ConfigError::StartIsGoal(goal));
        }

        let available = self.free_cells();
        let requested = self
            .num_bombs
            .checked_add(self.num_pits)
            .and_then(|n| n.checked_add(self.num_rewards))
            .unwrap_or(usize::MAX);
        if requested > available {
            return Err(ConfigError::TooManyItems { requested, available });
        }

        if self.max_steps == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        Ok(())
    }
}
