//! A* shortest paths on 2D grids, built to be watched as much as used: the
//! engine yields one visitation event per step so a front end can animate
//! the frontier, then replays the found path cell by cell.
//!
//! [`Grid`] holds the board (obstacles, one start, one end) and
//! [`PathConfig`] the movement rules. [`search`] answers in one call;
//! [`Events`] streams the same run event by event; [`Runner`] adds pacing
//! and locks the grid while a run is live.
//!
//! ```
//! use gridpath::{search, CellPos, Grid, PathConfig};
//!
//! let mut grid = Grid::new(5, 5);
//! grid.set_obstacle(CellPos::new(2, 2), true)?;
//! let report = search(&mut grid, &PathConfig::default());
//! assert!(report.path.is_some());
//! # Ok::<(), gridpath::Error>(())
//! ```

pub use error::{Error, Res};
pub use grid::{Cell, CellPos, Grid};
pub use pathfind::{search, AStar, Costs, Events, Path, PathConfig, RunReport, SearchEvent};
pub use runner::{RunEvent, Runner, RunnerOptions};

pub mod error;
pub mod grid;
pub mod pathfind;
pub mod runner;
