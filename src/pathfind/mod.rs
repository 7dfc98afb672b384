//! A* search over a [`Grid`](crate::grid::Grid): cost model, neighbor
//! enumeration, the stepwise engine, and the data types its results come
//! back in.

use std::{cmp::Ordering, time::Duration};

use float_ord::FloatOrd;

pub use context::{Costs, PathConfig};
pub use incremental::{search, AStar, Events, SearchEvent};
pub use moves::{Change, Direction, Movements};

use crate::grid::CellPos;

pub mod context;
pub mod incremental;
pub mod moves;

/// Entry in the open-set heap. [`std::collections::BinaryHeap`] is a
/// max-heap, so comparisons are reversed to pop the lowest f-score first;
/// equal scores fall back to insertion order through `seq`, which keeps the
/// pop order deterministic.
#[derive(PartialEq, Eq)]
pub(crate) struct MinHeapNode {
    pub contents: CellPos,
    score: FloatOrd<f64>,
    seq: u64,
}

impl MinHeapNode {
    pub const fn new(contents: CellPos, score: f64, seq: u64) -> Self {
        Self {
            contents,
            score: FloatOrd(score),
            seq,
        }
    }
}

impl PartialOrd for MinHeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinHeapNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A start-to-end walk, both endpoints included.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// cells in travel order, start first
    pub cells: Vec<CellPos>,
    /// sum of step costs along the walk, equal to the end cell's g-score
    pub cost: f64,
}

/// What a finished run looked like from the outside.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// the discovered path, or `None` when the end is unreachable
    pub path: Option<Path>,
    /// closed-set insertions over the run, the start and end cells excluded
    pub nodes_visited: usize,
    /// wall-clock search time, reveal pacing excluded
    pub elapsed: Duration,
}

impl RunReport {
    /// Cell count of the path including both endpoints, `0` when no path
    /// was found.
    #[must_use]
    pub fn path_len(&self) -> usize {
        self.path.as_ref().map_or(0, |path| path.cells.len())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BinaryHeap;

    use super::*;

    #[test]
    fn heap_pops_lowest_score_first() {
        let mut heap = BinaryHeap::new();
        heap.push(MinHeapNode::new(CellPos::new(0, 0), 3.2, 0));
        heap.push(MinHeapNode::new(CellPos::new(1, 1), 1.4, 1));
        heap.push(MinHeapNode::new(CellPos::new(2, 2), 2.8, 2));

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|node| node.contents)
            .collect();
        assert_eq!(
            order,
            vec![CellPos::new(1, 1), CellPos::new(2, 2), CellPos::new(0, 0)]
        );
    }

    #[test]
    fn equal_scores_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new();
        for (seq, col) in [(0, 5), (1, 3), (2, 8), (3, 1)] {
            heap.push(MinHeapNode::new(CellPos::new(0, col), 4.0, seq));
        }

        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|node| node.contents.col)
            .collect();
        assert_eq!(order, vec![5, 3, 8, 1]);
    }

    #[test]
    fn empty_report_has_no_length() {
        let report = RunReport {
            path: None,
            nodes_visited: 9,
            elapsed: Duration::ZERO,
        };
        assert_eq!(report.path_len(), 0);
    }
}
