//! The A* engine. It advances one observable event per call so a front end
//! can animate the search, and leaves its working state in the grid cells
//! where the reveal phase and post-run inspection can read it.

use std::{collections::BinaryHeap, time::Instant};

use tracing::{debug, trace};

use crate::{
    grid::{CellPos, Grid},
    pathfind::{moves::Movements, MinHeapNode, Path, PathConfig, RunReport},
};

/// One observable step of a run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// a cell moved into the closed set; never the start or the end
    Visited(CellPos),
    /// the end cell was reached and the run is over
    Found(Path),
    /// the frontier ran dry with the end unreached. Not an error; a walled
    /// off end is a legitimate board.
    NoPath,
}

/// Stepwise A* over one grid. Single use: build it, [`Self::iterate`] until
/// a terminal event, drop it.
pub struct AStar {
    queue: BinaryHeap<MinHeapNode>,
    seq: u64,
    nodes_visited: usize,
    finished: bool,
}

impl AStar {
    /// Prime a fresh run: wipe the grid's search state, score the start
    /// cell, seed the frontier with it.
    pub fn new(grid: &mut Grid, config: &PathConfig) -> Self {
        grid.reset_search_state();

        let start = grid.start();
        let h = config.heuristic(start, grid.end());
        {
            let cell = grid.cell_mut(start);
            cell.g = 0.0;
            cell.h = h;
            cell.f = h;
        }

        let mut queue = BinaryHeap::new();
        queue.push(MinHeapNode::new(start, h, 0));
        Self {
            queue,
            seq: 1,
            nodes_visited: 0,
            finished: false,
        }
    }

    /// Closed-set insertions so far, the start and end cells excluded.
    #[must_use]
    pub const fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    /// Advance the run to its next observable event. Expanding the start
    /// emits nothing and is folded into the same call.
    ///
    /// # Panics
    /// When called again after a terminal event.
    pub fn iterate(&mut self, grid: &mut Grid, config: &PathConfig) -> SearchEvent {
        assert!(!self.finished, "iterate called after the run finished");

        while let Some(node) = self.queue.pop() {
            let pos = node.contents;
            if grid.cell(pos).visited {
                // stale entry; the cell was re-scored and popped already
                continue;
            }
            grid.cell_mut(pos).visited = true;

            if pos == grid.end() {
                self.finished = true;
                let path = reconstruct(grid, pos);
                debug!(visited = self.nodes_visited, cost = path.cost, "path found");
                return SearchEvent::Found(path);
            }

            self.relax_neighbors(grid, config, pos);

            if pos != grid.start() {
                self.nodes_visited += 1;
                trace!(%pos, "visited");
                return SearchEvent::Visited(pos);
            }
        }

        self.finished = true;
        debug!(visited = self.nodes_visited, "frontier exhausted, no path");
        SearchEvent::NoPath
    }

    fn relax_neighbors(&mut self, grid: &mut Grid, config: &PathConfig, pos: CellPos) {
        let end = grid.end();
        let current_g = grid.cell(pos).g;
        for neighbor in Movements::adjacent(pos, grid, config) {
            let cell = grid.cell(neighbor);
            if cell.visited || cell.obstacle {
                continue;
            }
            let tentative = current_g + config.step_cost(pos, neighbor);
            if tentative < cell.g {
                let h = config.heuristic(neighbor, end);
                let f = tentative + h;
                let cell = grid.cell_mut(neighbor);
                cell.previous = Some(pos);
                cell.g = tentative;
                cell.h = h;
                cell.f = f;
                self.queue.push(MinHeapNode::new(neighbor, f, self.seq));
                self.seq += 1;
            }
        }
    }
}

/// Rebuild the walk by following back-references from the end. The cost is
/// the end cell's g-score, already the sum of step costs along the walk.
fn reconstruct(grid: &Grid, end: CellPos) -> Path {
    let mut cells = vec![end];
    let mut on = end;
    while let Some(previous) = grid.cell(on).previous {
        cells.push(previous);
        on = previous;
    }
    cells.reverse();
    Path {
        cells,
        cost: grid.cell(end).g,
    }
}

/// Lazy event stream over one run: zero or more `Visited`, one terminal
/// `Found`/`NoPath`, then `None` forever. Holding the grid mutably for its
/// whole lifetime is what keeps edits out of a running search.
pub struct Events<'g> {
    engine: AStar,
    grid: &'g mut Grid,
    config: PathConfig,
}

impl<'g> Events<'g> {
    pub fn new(grid: &'g mut Grid, config: PathConfig) -> Self {
        let engine = AStar::new(grid, &config);
        Self {
            engine,
            grid,
            config,
        }
    }

    /// Closed-set insertions so far.
    #[must_use]
    pub const fn nodes_visited(&self) -> usize {
        self.engine.nodes_visited()
    }
}

impl Iterator for Events<'_> {
    type Item = SearchEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.engine.finished {
            return None;
        }
        Some(self.engine.iterate(self.grid, &self.config))
    }
}

/// Run a whole search in one call and report the outcome.
pub fn search(grid: &mut Grid, config: &PathConfig) -> RunReport {
    let started = Instant::now();
    let mut engine = AStar::new(grid, config);
    let path = loop {
        match engine.iterate(grid, config) {
            SearchEvent::Visited(_) => {}
            SearchEvent::Found(path) => break Some(path),
            SearchEvent::NoPath => break None,
        }
    };
    RunReport {
        path,
        nodes_visited: engine.nodes_visited(),
        elapsed: started.elapsed(),
    }
}
