//! Drives a search over an owned [`Grid`] one event at a time.
//!
//! The [`Runner`] owns the board and hands out one [`RunEvent`] per
//! [`Runner::step`]: first every expansion of the search, then the found
//! path one intermediate cell at a time, then the report. While a run is
//! active every edit to the board is refused, so the cells the engine is
//! scoring cannot change under it.

use std::{
    thread,
    time::{Duration, Instant},
};

use rand::Rng;
use tracing::debug;

use crate::{
    error::{Error, Res},
    grid::{CellPos, Grid},
    pathfind::{AStar, Path, PathConfig, RunReport, SearchEvent},
};

/// Pacing for [`Runner::run`]. Zero delays make the run synchronous.
#[derive(Clone, Copy, Debug)]
pub struct RunnerOptions {
    /// sleep after each visited cell
    pub step_delay: Duration,
    /// sleep after each revealed path cell
    pub reveal_delay: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(50),
            reveal_delay: Duration::from_millis(100),
        }
    }
}

/// One observable moment of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// the search expanded a cell that is neither start nor end
    Visited(CellPos),
    /// one intermediate cell of the found path, in travel order
    PathCell(CellPos),
    /// the run is over and the board is unlocked again
    Finished(RunReport),
}

struct Reveal {
    path: Path,
    /// index into `path.cells` of the next cell to hand out
    next: usize,
    /// search time frozen at the moment the path was found; revealing is
    /// presentation and stays off the clock
    elapsed: Duration,
}

struct RunState {
    engine: AStar,
    started: Instant,
    /// populated once the search finds the path
    reveal: Option<Reveal>,
}

/// Owns a [`Grid`] and runs searches over it.
pub struct Runner {
    grid: Grid,
    config: PathConfig,
    options: RunnerOptions,
    state: Option<RunState>,
}

impl Runner {
    #[must_use]
    pub const fn new(grid: Grid, config: PathConfig, options: RunnerOptions) -> Self {
        Self {
            grid,
            config,
            options,
            state: None,
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub const fn options(&self) -> RunnerOptions {
        self.options
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.is_some()
    }

    const fn ensure_idle(&self) -> Res {
        if self.state.is_some() {
            return Err(Error::RunInProgress);
        }
        Ok(())
    }

    /// Move the start marker. Refused while a run is active.
    pub fn set_start(&mut self, pos: CellPos) -> Res {
        self.ensure_idle()?;
        self.grid.set_start(pos)
    }

    /// Move the end marker. Refused while a run is active.
    pub fn set_end(&mut self, pos: CellPos) -> Res {
        self.ensure_idle()?;
        self.grid.set_end(pos)
    }

    /// Set or clear one obstacle. Refused while a run is active.
    pub fn set_obstacle(&mut self, pos: CellPos, obstacle: bool) -> Res {
        self.ensure_idle()?;
        self.grid.set_obstacle(pos, obstacle)
    }

    /// Free every blocked cell. Refused while a run is active.
    pub fn clear_obstacles(&mut self) -> Res {
        self.ensure_idle()?;
        self.grid.clear_obstacles();
        Ok(())
    }

    /// Randomly block free cells, see [`Grid::scatter_obstacles`]. Refused
    /// while a run is active.
    pub fn scatter_obstacles(&mut self, rng: &mut impl Rng, probability: f64) -> Res<usize> {
        self.ensure_idle()?;
        Ok(self.grid.scatter_obstacles(rng, probability))
    }

    /// Wipe scores, backpointers and path marks from a previous run.
    /// Refused while a run is active.
    pub fn reset(&mut self) -> Res {
        self.ensure_idle()?;
        self.grid.reset_search_state();
        Ok(())
    }

    /// Start a run. The board is locked until the [`RunEvent::Finished`]
    /// event has been handed out.
    pub fn begin(&mut self) -> Res {
        self.ensure_idle()?;
        debug!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            diagonal = self.config.allow_diagonal,
            "search started"
        );
        let started = Instant::now();
        let engine = AStar::new(&mut self.grid, &self.config);
        self.state = Some(RunState {
            engine,
            started,
            reveal: None,
        });
        Ok(())
    }

    /// Advance the run by one event.
    ///
    /// # Panics
    /// When called without [`Self::begin`], or after the run finished.
    pub fn step(&mut self) -> RunEvent {
        let state = self.state.as_mut().expect("step called with no active run");

        if state.reveal.is_none() {
            match state.engine.iterate(&mut self.grid, &self.config) {
                SearchEvent::Visited(pos) => return RunEvent::Visited(pos),
                SearchEvent::Found(path) => {
                    state.reveal = Some(Reveal {
                        path,
                        next: 1,
                        elapsed: state.started.elapsed(),
                    });
                }
                SearchEvent::NoPath => {
                    let report = RunReport {
                        path: None,
                        nodes_visited: state.engine.nodes_visited(),
                        elapsed: state.started.elapsed(),
                    };
                    return self.finish(report);
                }
            }
        }

        let reveal = state
            .reveal
            .as_mut()
            .expect("a run past the search phase must be revealing");
        if reveal.next + 1 < reveal.path.cells.len() {
            let pos = reveal.path.cells[reveal.next];
            reveal.next += 1;
            self.grid.mark_path(pos);
            return RunEvent::PathCell(pos);
        }
        let report = RunReport {
            path: Some(reveal.path.clone()),
            nodes_visited: state.engine.nodes_visited(),
            elapsed: reveal.elapsed,
        };
        self.finish(report)
    }

    fn finish(&mut self, report: RunReport) -> RunEvent {
        debug!(
            visited = report.nodes_visited,
            found = report.path.is_some(),
            elapsed = ?report.elapsed,
            "run finished"
        );
        self.state = None;
        RunEvent::Finished(report)
    }

    /// Run a whole search, feeding every visit and reveal to `observer`
    /// with the configured pacing in between. The report comes back by
    /// value once the run is over.
    pub fn run(&mut self, mut observer: impl FnMut(&RunEvent)) -> Res<RunReport> {
        self.begin()?;
        loop {
            match self.step() {
                RunEvent::Finished(report) => return Ok(report),
                event @ RunEvent::Visited(_) => {
                    observer(&event);
                    Self::pause(self.options.step_delay);
                }
                event @ RunEvent::PathCell(_) => {
                    observer(&event);
                    Self::pause(self.options.reveal_delay);
                }
            }
        }
    }

    fn pause(delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn instant() -> RunnerOptions {
        RunnerOptions {
            step_delay: Duration::ZERO,
            reveal_delay: Duration::ZERO,
        }
    }

    #[test]
    fn begin_twice_is_refused() {
        let mut runner = Runner::new(Grid::new(3, 3), PathConfig::default(), instant());
        assert!(!runner.is_running());
        runner.begin().unwrap();
        assert!(runner.is_running());
        assert_matches!(runner.begin(), Err(Error::RunInProgress));
    }

    #[test]
    fn edits_are_locked_during_a_run() {
        let mut runner = Runner::new(Grid::new(4, 4), PathConfig::default(), instant());
        runner.begin().unwrap();

        assert_matches!(
            runner.set_start(CellPos::new(1, 2)),
            Err(Error::RunInProgress)
        );
        assert_matches!(
            runner.set_end(CellPos::new(2, 2)),
            Err(Error::RunInProgress)
        );
        assert_matches!(
            runner.set_obstacle(CellPos::new(1, 1), true),
            Err(Error::RunInProgress)
        );
        assert_matches!(runner.clear_obstacles(), Err(Error::RunInProgress));
        let mut rng = StdRng::seed_from_u64(5);
        assert_matches!(
            runner.scatter_obstacles(&mut rng, 0.4),
            Err(Error::RunInProgress)
        );
        assert_matches!(runner.reset(), Err(Error::RunInProgress));

        while !matches!(runner.step(), RunEvent::Finished(_)) {}
        assert!(!runner.is_running());
        runner.set_start(CellPos::new(1, 2)).unwrap();
    }

    #[test]
    fn events_phase_from_visits_to_path_to_finish() {
        let mut runner = Runner::new(Grid::new(3, 3), PathConfig::default(), instant());
        runner.begin().unwrap();

        assert_eq!(runner.step(), RunEvent::Visited(CellPos::new(1, 1)));
        assert_eq!(runner.step(), RunEvent::PathCell(CellPos::new(1, 1)));
        assert!(runner.grid().cell(CellPos::new(1, 1)).on_path);
        assert!(!runner.grid().cell(CellPos::new(0, 0)).on_path);
        assert!(!runner.grid().cell(CellPos::new(2, 2)).on_path);

        match runner.step() {
            RunEvent::Finished(report) => {
                assert_eq!(report.path_len(), 3);
                assert_eq!(report.nodes_visited, 1);
            }
            other => panic!("expected the report, got {other:?}"),
        }
        assert!(!runner.is_running());
    }

    #[test]
    fn no_path_finishes_without_reveal() {
        let mut runner = Runner::new(Grid::new(3, 3), PathConfig::default(), instant());
        runner.set_end(CellPos::new(0, 2)).unwrap();
        for pos in [CellPos::new(0, 1), CellPos::new(1, 1), CellPos::new(2, 1)] {
            runner.set_obstacle(pos, true).unwrap();
        }

        let report = runner
            .run(|event| assert_matches!(event, RunEvent::Visited(_)))
            .unwrap();
        assert!(report.path.is_none());
        assert_eq!(report.path_len(), 0);
        assert_eq!(report.nodes_visited, 2);
        // the explored region stays marked for inspection
        assert!(runner.grid().cell(CellPos::new(1, 0)).visited);
    }

    #[test]
    fn run_reports_and_unlocks() {
        let mut runner = Runner::new(Grid::new(5, 5), PathConfig::default(), instant());
        let mut visits = 0;
        let mut reveals = 0;
        let report = runner
            .run(|event| match event {
                RunEvent::Visited(_) => visits += 1,
                RunEvent::PathCell(_) => reveals += 1,
                RunEvent::Finished(_) => panic!("the report comes back by value"),
            })
            .unwrap();

        let path = report.path.as_ref().unwrap();
        assert_eq!(path.cells.len(), 5);
        assert_eq!(visits, report.nodes_visited);
        assert_eq!(reveals, path.cells.len() - 2);
        assert!(!runner.is_running());

        let second = runner.run(|_| {}).unwrap();
        assert_eq!(second.path, report.path);
        assert_eq!(second.nodes_visited, report.nodes_visited);
    }

    #[test]
    fn adjacent_endpoints_reveal_nothing() {
        let mut runner = Runner::new(Grid::new(1, 2), PathConfig::default(), instant());
        let report = runner.run(|_| panic!("nothing to animate")).unwrap();

        let path = report.path.as_ref().unwrap();
        assert_eq!(path.cells.len(), 2);
        assert_eq!(report.nodes_visited, 0);
    }

    #[test]
    #[should_panic(expected = "no active run")]
    fn step_without_a_run_panics() {
        let mut runner = Runner::new(Grid::new(2, 2), PathConfig::default(), instant());
        runner.step();
    }
}
