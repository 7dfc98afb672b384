use std::fmt::{Display, Formatter};

use crate::grid::CellPos;

pub type Res<T = ()> = Result<T, Error>;

/// Ways a grid edit or run request can be refused. An exhausted search is
/// not among them; finding no path is a normal outcome reported through
/// [`RunReport`](crate::pathfind::RunReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// the cell does not exist on this grid
    OutOfBounds(CellPos),
    /// start or end would land on an obstacle
    Obstructed(CellPos),
    /// start and end would occupy the same cell
    StartEndOverlap(CellPos),
    /// the grid is locked while a search is running
    RunInProgress,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds(pos) => write!(f, "{pos} is outside the grid"),
            Self::Obstructed(pos) => write!(f, "{pos} is blocked by an obstacle"),
            Self::StartEndOverlap(pos) => {
                write!(f, "start and end cannot both occupy {pos}")
            }
            Self::RunInProgress => f.write_str("a search is already in progress"),
        }
    }
}

impl std::error::Error for Error {}
