//! Ship definitions: catalog entries, orientation and per-ship damage.

use core::fmt;
use core::str::FromStr;

use crate::common::{BoardError, Coord};
use crate::config::SHIPS;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step along the ship, as (row, col) deltas.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for direction tags other than horizontal/vertical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOrientationError;

impl fmt::Display for ParseOrientationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected \"horizontal\" or \"vertical\"")
    }
}

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "horizontal" | "Horizontal" | "h" | "H" => Ok(Orientation::Horizontal),
            "vertical" | "Vertical" | "v" | "V" => Ok(Orientation::Vertical),
            _ => Err(ParseOrientationError),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipType {
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, length: usize) -> Self {
        Self { name, length }
    }

    /// Look up a ship class in the fixed catalog.
    pub fn from_name(name: &str) -> Option<ShipType> {
        SHIPS.iter().copied().find(|def| def.name == name)
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Where a ship sits once a board has accepted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub head: Coord,
    pub orientation: Orientation,
}

/// A vessel with a damage counter.
///
/// Ships are created unplaced. A [`Board`](crate::Board) sets the placement
/// exactly once and is the only thing that applies damage to it.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    hit_count: usize,
    placement: Option<Placement>,
}

impl Ship {
    /// New, unplaced and undamaged.
    pub fn new(ship_type: ShipType) -> Self {
        Ship {
            ship_type,
            hit_count: 0,
            placement: None,
        }
    }

    /// Build a ship from its catalog name.
    pub fn named(name: &str) -> Result<Self, BoardError> {
        ShipType::from_name(name)
            .map(Ship::new)
            .ok_or(BoardError::NameNotFound)
    }

    /// Register one hit. Has no effect once the ship is sunk.
    pub fn hit(&mut self) {
        if !self.is_sunk() {
            self.hit_count += 1;
        }
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hit_count == self.ship_type.length()
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    /// Ship's type.
    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Origin of the ship, once placed.
    pub fn head(&self) -> Option<Coord> {
        self.placement.map(|p| p.head)
    }

    /// Orientation of the ship, once placed.
    pub fn orientation(&self) -> Option<Orientation> {
        self.placement.map(|p| p.orientation)
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Cells occupied by the ship. Empty while unplaced.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        let len = if self.placement.is_some() { self.length() } else { 0 };
        (0..len).filter_map(move |i| {
            let p = self.placement?;
            let (dr, dc) = p.orientation.step();
            Some(Coord::new(p.head.row + dr * i, p.head.col + dc * i))
        })
    }

    pub(crate) fn set_placement(&mut self, placement: Placement) {
        debug_assert!(self.placement.is_none());
        self.placement = Some(placement);
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.placement {
            Some(p) => write!(
                f,
                "Ship {{ name: \"{}\", head: {}, orientation: {}, hits: {}/{} }}",
                self.name(),
                p.head,
                p.orientation,
                self.hit_count,
                self.length(),
            ),
            None => write!(
                f,
                "Ship {{ name: \"{}\", unplaced, hits: {}/{} }}",
                self.name(),
                self.hit_count,
                self.length(),
            ),
        }
    }
}
