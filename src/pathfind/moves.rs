use smallvec::SmallVec;

use crate::{
    grid::{CellPos, Grid},
    pathfind::PathConfig,
};

/// Row/column offset of a single step.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Change {
    pub dr: i32,
    pub dc: i32,
}

impl Change {
    #[must_use]
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }
}

/// The eight directions a step can take, north being the lower row index.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// The four cardinal directions, row-major like [`Self::ALL`].
    pub const CARDINAL: [Self; 4] = [Self::North, Self::West, Self::East, Self::South];

    /// All eight directions, row-major over the 3x3 neighborhood. The
    /// enumeration order is fixed; it decides frontier insertion order and
    /// therefore which of two equally scored candidates pops first.
    pub const ALL: [Self; 8] = [
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::West,
        Self::East,
        Self::SouthWest,
        Self::South,
        Self::SouthEast,
    ];

    #[must_use]
    pub const fn unit_change(self) -> Change {
        match self {
            Self::NorthWest => Change::new(-1, -1),
            Self::North => Change::new(-1, 0),
            Self::NorthEast => Change::new(-1, 1),
            Self::West => Change::new(0, -1),
            Self::East => Change::new(0, 1),
            Self::SouthWest => Change::new(1, -1),
            Self::South => Change::new(1, 0),
            Self::SouthEast => Change::new(1, 1),
        }
    }

    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        let change = self.unit_change();
        change.dr != 0 && change.dc != 0
    }
}

/// Neighbor candidate enumeration.
pub struct Movements;

impl Movements {
    /// In-bounds neighbors of `from`, in the fixed enumeration order of the
    /// configured movement mode. Obstacles are not filtered here; whether a
    /// candidate can be entered is the search's decision.
    #[must_use]
    pub fn adjacent(from: CellPos, grid: &Grid, config: &PathConfig) -> SmallVec<[CellPos; 8]> {
        let directions: &[Direction] = if config.allow_diagonal {
            &Direction::ALL
        } else {
            &Direction::CARDINAL
        };
        directions
            .iter()
            .map(|direction| from.offset(direction.unit_change()))
            .filter(|&pos| grid.in_bounds(pos))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(pairs: &[(i32, i32)]) -> Vec<CellPos> {
        pairs.iter().map(|&(r, c)| CellPos::new(r, c)).collect()
    }

    #[test]
    fn interior_cell_sees_all_eight_in_order() {
        let grid = Grid::new(5, 5);
        let got = Movements::adjacent(CellPos::new(2, 2), &grid, &PathConfig::default());
        let want = positions(&[
            (1, 1),
            (1, 2),
            (1, 3),
            (2, 1),
            (2, 3),
            (3, 1),
            (3, 2),
            (3, 3),
        ]);
        assert_eq!(got.as_slice(), want.as_slice());
    }

    #[test]
    fn cardinal_mode_keeps_four_in_order() {
        let grid = Grid::new(5, 5);
        let config = PathConfig {
            allow_diagonal: false,
            ..PathConfig::default()
        };
        let got = Movements::adjacent(CellPos::new(2, 2), &grid, &config);
        let want = positions(&[(1, 2), (2, 1), (2, 3), (3, 2)]);
        assert_eq!(got.as_slice(), want.as_slice());
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        let grid = Grid::new(3, 3);
        let config = PathConfig::default();

        let corner = Movements::adjacent(CellPos::new(0, 0), &grid, &config);
        assert_eq!(corner.as_slice(), positions(&[(0, 1), (1, 0), (1, 1)]).as_slice());

        let edge = Movements::adjacent(CellPos::new(0, 1), &grid, &config);
        assert_eq!(
            edge.as_slice(),
            positions(&[(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]).as_slice()
        );

        let cardinal = PathConfig {
            allow_diagonal: false,
            ..config
        };
        let corner = Movements::adjacent(CellPos::new(2, 2), &grid, &cardinal);
        assert_eq!(corner.as_slice(), positions(&[(1, 2), (2, 1)]).as_slice());
    }

    #[test]
    fn diagonality_matches_the_offsets() {
        for direction in Direction::ALL {
            let change = direction.unit_change();
            assert_eq!(direction.is_diagonal(), change.dr != 0 && change.dc != 0);
        }
        assert!(Direction::CARDINAL.iter().all(|d| !d.is_diagonal()));
    }
}
