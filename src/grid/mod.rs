//! The board a search runs on: a dense `rows x cols` block of [`Cell`]s with
//! exactly one start, exactly one end, and any number of obstacles.
//!
//! The endpoints live on the grid itself rather than as flags on cells, so
//! "exactly one of each, never coinciding, never on an obstacle" holds by
//! construction and every edit path below re-checks the rest.

use itertools::Itertools;
use rand::Rng;
use tracing::debug;

pub use cell::{Cell, CellPos};

use crate::error::{Error, Res};

pub mod cell;

pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<Cell>,
    start: CellPos,
    end: CellPos,
}

impl Grid {
    /// A fresh grid with no obstacles, the start in the top-left corner and
    /// the end in the bottom-right.
    ///
    /// # Panics
    /// When either dimension is below 1, or the grid has fewer than two
    /// cells; a single cell cannot keep the endpoints apart.
    #[must_use]
    pub fn new(rows: i32, cols: i32) -> Self {
        assert!(rows >= 1 && cols >= 1, "grid dimensions must be positive");
        assert!(
            i64::from(rows) * i64::from(cols) >= 2,
            "grid needs at least two cells"
        );
        let len = (i64::from(rows) * i64::from(cols)) as usize;
        Self {
            rows,
            cols,
            cells: vec![Cell::default(); len],
            start: CellPos::new(0, 0),
            end: CellPos::new(rows - 1, cols - 1),
        }
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }

    #[must_use]
    pub const fn start(&self) -> CellPos {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> CellPos {
        self.end
    }

    #[must_use]
    pub const fn in_bounds(&self, pos: CellPos) -> bool {
        pos.row >= 0 && pos.row < self.rows && pos.col >= 0 && pos.col < self.cols
    }

    fn idx(&self, pos: CellPos) -> usize {
        assert!(
            self.in_bounds(pos),
            "{pos} is outside the {}x{} grid",
            self.rows,
            self.cols
        );
        (pos.row * self.cols + pos.col) as usize
    }

    /// Read one cell.
    ///
    /// # Panics
    /// When `pos` lies outside the grid. Check [`Self::in_bounds`] first if
    /// the position is untrusted.
    #[must_use]
    pub fn cell(&self, pos: CellPos) -> &Cell {
        &self.cells[self.idx(pos)]
    }

    pub(crate) fn cell_mut(&mut self, pos: CellPos) -> &mut Cell {
        let idx = self.idx(pos);
        &mut self.cells[idx]
    }

    /// Whether `pos` holds an obstacle.
    ///
    /// # Panics
    /// When `pos` lies outside the grid.
    #[must_use]
    pub fn is_obstacle(&self, pos: CellPos) -> bool {
        self.cell(pos).obstacle
    }

    /// Move the start marker. The grid is untouched when this fails.
    pub fn set_start(&mut self, pos: CellPos) -> Res {
        self.check_endpoint(pos, self.end)?;
        self.start = pos;
        Ok(())
    }

    /// Move the end marker. The grid is untouched when this fails.
    pub fn set_end(&mut self, pos: CellPos) -> Res {
        self.check_endpoint(pos, self.start)?;
        self.end = pos;
        Ok(())
    }

    fn check_endpoint(&self, pos: CellPos, other: CellPos) -> Res {
        if !self.in_bounds(pos) {
            return Err(Error::OutOfBounds(pos));
        }
        if self.cell(pos).obstacle {
            return Err(Error::Obstructed(pos));
        }
        if pos == other {
            return Err(Error::StartEndOverlap(pos));
        }
        Ok(())
    }

    /// Set or clear the obstacle flag on one cell. The start and end cells
    /// silently refuse; they can never be walled over in place.
    pub fn set_obstacle(&mut self, pos: CellPos, obstacle: bool) -> Res {
        if !self.in_bounds(pos) {
            return Err(Error::OutOfBounds(pos));
        }
        if pos == self.start || pos == self.end {
            return Ok(());
        }
        self.cell_mut(pos).obstacle = obstacle;
        Ok(())
    }

    /// Clear every obstacle. Endpoints and search state stay as they are.
    pub fn clear_obstacles(&mut self) {
        for cell in &mut self.cells {
            cell.obstacle = false;
        }
    }

    /// Block each free cell except the endpoints with the given
    /// probability. Purely additive; existing obstacles stay. Returns how
    /// many cells were newly blocked.
    ///
    /// # Panics
    /// When `probability` is not in `0.0..=1.0`.
    pub fn scatter_obstacles(&mut self, rng: &mut impl Rng, probability: f64) -> usize {
        let mut placed = 0;
        for pos in self.positions() {
            if pos == self.start || pos == self.end {
                continue;
            }
            if !self.cell(pos).obstacle && rng.gen_bool(probability) {
                self.cell_mut(pos).obstacle = true;
                placed += 1;
            }
        }
        debug!(placed, probability, "scattered obstacles");
        placed
    }

    /// Wipe all per-run search state. Obstacles and endpoints persist.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_state();
        }
    }

    pub(crate) fn mark_path(&mut self, pos: CellPos) {
        self.cell_mut(pos).on_path = true;
    }

    /// Every position of the grid in row-major order.
    #[must_use]
    pub fn positions(&self) -> impl Iterator<Item = CellPos> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| CellPos::new(row, col))
    }
}
