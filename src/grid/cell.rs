use std::fmt::{Display, Formatter};

use crate::pathfind::moves::Change;

/// Identity of one grid cell, row-major.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CellPos {
    pub row: i32,
    pub col: i32,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The cell reached by applying `change` to this position. The result
    /// may lie outside any particular grid; bounds are the grid's concern.
    #[must_use]
    pub const fn offset(self, change: Change) -> Self {
        Self {
            row: self.row + change.dr,
            col: self.col + change.dc,
        }
    }

    /// Straight-line distance to `other`.
    #[must_use]
    pub fn euclidean(self, other: Self) -> f64 {
        let dr = f64::from(self.row - other.row);
        let dc = f64::from(self.col - other.col);
        dr.mul_add(dr, dc * dc).sqrt()
    }

    /// Taxicab distance to `other`.
    #[must_use]
    pub fn manhattan(self, other: Self) -> f64 {
        f64::from((self.row - other.row).abs() + (self.col - other.col).abs())
    }
}

impl Display for CellPos {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Per-cell state. Pure data: anything visual about a cell is derived from
/// these fields by whichever front end renders the grid.
#[derive(Copy, Clone, Debug)]
pub struct Cell {
    /// impassable cells are never relaxed into
    pub obstacle: bool,
    /// cheapest known cost from the start
    pub g: f64,
    /// heuristic estimate to the end, recomputed whenever `g` improves
    pub h: f64,
    /// frontier selection key, `g + h`
    pub f: f64,
    /// back-reference the final path is rebuilt from
    pub previous: Option<CellPos>,
    /// closed-set membership, set once per run
    pub visited: bool,
    /// member of the revealed final path
    pub on_path: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            obstacle: false,
            g: f64::INFINITY,
            h: 0.0,
            f: f64::INFINITY,
            previous: None,
            visited: false,
            on_path: false,
        }
    }
}

impl Cell {
    /// Forget everything from the previous run. Obstacle status survives;
    /// it is grid configuration, not search state.
    pub(crate) fn reset_search_state(&mut self) {
        *self = Self {
            obstacle: self.obstacle,
            ..Self::default()
        };
    }
}
