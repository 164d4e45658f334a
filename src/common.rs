//! Common types for the engine: coordinates, attack outcomes and board errors.

use core::fmt;

/// A cell on the board, addressed by row and column.
///
/// Used directly as the key for the grid, the attack sets, the AI target
/// queue and the known-water set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shift by a signed delta. Returns `None` when either component would go
    /// below zero; the upper bound is the board's business.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Coord> {
        Some(Coord {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Index of a placed ship inside its board.
pub type ShipId = usize;

/// Result of a successful attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    /// Attack landed on open water.
    Miss,
    /// Attack damaged a ship that is still afloat.
    Hit { ship: ShipId },
    /// Attack delivered the final hit on a ship.
    Sunk { ship: ShipId },
}

impl AttackOutcome {
    /// The struck ship, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match *self {
            AttackOutcome::Miss => None,
            AttackOutcome::Hit { ship } | AttackOutcome::Sunk { ship } => Some(ship),
        }
    }

    pub fn is_hit(&self) -> bool {
        !matches!(self, AttackOutcome::Miss)
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, AttackOutcome::Sunk { .. })
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate lies outside the board.
    OutOfBounds { row: usize, col: usize },
    /// Some ship segment would fall outside the board.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement touches another ship, diagonals included.
    ShipTooClose,
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced,
    /// The cell was already attacked.
    AlreadyAttacked,
    /// Named ship not found in the catalog.
    NameNotFound,
    /// Specified index is out of range.
    InvalidIndex,
    /// Random placement ran out of attempts.
    UnableToPlaceShip,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the board", row, col)
            }
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipTooClose => write!(f, "Ship placement touches another ship"),
            BoardError::ShipAlreadyPlaced => write!(f, "Ship is already placed on the board"),
            BoardError::AlreadyAttacked => write!(f, "Cell was already attacked"),
            BoardError::NameNotFound => write!(f, "Ship name not found in catalog"),
            BoardError::InvalidIndex => write!(f, "Index is out of range"),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
