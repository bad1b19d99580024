use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{ConfigError, GridPosition, MazeConfig};

/// What occupies a cell, as seen by the reward function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellEvent {
    Empty,
    Bomb,
    Pit,
    Bonus,
    Goal,
}

impl CellEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            CellEvent::Empty => "empty",
            CellEvent::Bomb => "bomb",
            CellEvent::Pit => "pit",
            CellEvent::Bonus => "bonus",
            CellEvent::Goal => "goal",
        }
    }
}

/// Per-episode placement of bombs, pits and bonus cells.
///
/// Cells are stored by row-major index so membership is a hash lookup. The
/// three sets are pairwise disjoint and never contain the start or goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeLayout {
    cols: usize,
    bombs: HashSet<usize>,
    pits: HashSet<usize>,
    bonuses: HashSet<usize>,
}

impl EpisodeLayout {
    /// A layout with no items, used before the first shuffle.
    pub fn empty(cols: usize) -> Self {
        Self {
            cols,
            bombs: HashSet::new(),
            pits: HashSet::new(),
            bonuses: HashSet::new(),
        }
    }

    /// Shuffles every cell except start and goal, then deals the first
    /// `num_bombs` to bombs, the next `num_pits` to pits and the next
    /// `num_rewards` to bonuses. The config must already be validated.
    pub fn sample<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Self {
        let cols = config.grid_cols;
        let start = config.start_pos.index(cols);
        let goal = config.goal().index(cols);

        let mut pool: Vec<usize> = (0..config.cell_count())
            .filter(|&cell| cell != start && cell != goal)
            .collect();
        pool.shuffle(rng);

        let mut dealt = pool.into_iter();
        let bombs = dealt.by_ref().take(config.num_bombs).collect();
        let pits = dealt.by_ref().take(config.num_pits).collect();
        let bonuses = dealt.take(config.num_rewards).collect();

        Self { cols, bombs, pits, bonuses }
    }

    /// Builds a fixed layout, checking the same invariants sampling guarantees.
    pub fn from_cells(
        config: &MazeConfig,
        bombs: &[GridPosition],
        pits: &[GridPosition],
        bonuses: &[GridPosition],
    ) -> Result<Self, ConfigError> {
        let (rows, cols) = (config.grid_rows, config.grid_cols);
        let endpoints = [config.start_pos, config.goal()];
        let mut seen = HashSet::new();
        let mut to_set = |cells: &[GridPosition]| -> Result<HashSet<usize>, ConfigError> {
            let mut set = HashSet::with_capacity(cells.len());
            for &pos in cells {
                if !pos.in_bounds(rows, cols) {
                    return Err(ConfigError::OutOfBounds { which: "layout", pos, rows, cols });
                }
                if endpoints.contains(&pos) {
                    return Err(ConfigError::LayoutCoversEndpoint(pos));
                }
                if !seen.insert(pos) {
                    return Err(ConfigError::LayoutOverlap(pos));
                }
                set.insert(pos.index(cols));
            }
            Ok(set)
        };

        Ok(Self {
            cols,
            bombs: to_set(bombs)?,
            pits: to_set(pits)?,
            bonuses: to_set(bonuses)?,
        })
    }

    pub fn is_bomb(&self, pos: GridPosition) -> bool {
        self.bombs.contains(&pos.index(self.cols))
    }

    pub fn is_pit(&self, pos: GridPosition) -> bool {
        self.pits.contains(&pos.index(self.cols))
    }

    pub fn is_bonus(&self, pos: GridPosition) -> bool {
        self.bonuses.contains(&pos.index(self.cols))
    }

    /// Classifies `pos` in reward precedence order: bomb, pit, bonus, goal.
    pub fn classify(&self, pos: GridPosition, goal: GridPosition) -> CellEvent {
        if self.is_bomb(pos) {
            CellEvent::Bomb
        } else if self.is_pit(pos) {
            CellEvent::Pit
        } else if self.is_bonus(pos) {
            CellEvent::Bonus
        } else if pos == goal {
            CellEvent::Goal
        } else {
            CellEvent::Empty
        }
    }

    pub fn bomb_cells(&self) -> Vec<GridPosition> {
        self.sorted(&self.bombs)
    }

    pub fn pit_cells(&self) -> Vec<GridPosition> {
        self.sorted(&self.pits)
    }

    pub fn bonus_cells(&self) -> Vec<GridPosition> {
        self.sorted(&self.bonuses)
    }

    fn sorted(&self, cells: &HashSet<usize>) -> Vec<GridPosition> {
        let mut out: Vec<_> = cells.iter().copied().collect();
        out.sort_unstable();
        out.into_iter()
            .map(|i| GridPosition::from_index(i, self.cols))
            .collect()
    }
}
