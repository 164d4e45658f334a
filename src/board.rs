//! Game board state: grid ownership, ship placement and attack resolution.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, trace};
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{AttackOutcome, BoardError, Coord, ShipId};
use crate::ship::{Orientation, Placement, Ship};

/// A rejected placement. Hands the ship back so the caller keeps ownership.
#[derive(Debug)]
pub struct PlacementError {
    pub reason: BoardError,
    pub ship: Ship,
}

impl PlacementError {
    pub fn into_ship(self) -> Ship {
        self.ship
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot place {}: {}", self.ship.name(), self.reason)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}

/// One player's board: who owns each cell, the placed ships, and every
/// attack received so far.
#[derive(Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Option<ShipId>>,
    ships: Vec<Ship>,
    hits: BitBoard,
    misses: BitBoard,
}

impl Board {
    /// Create an empty `size×size` board (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![None; size * size],
            ships: Vec::new(),
            hits: BitBoard::new(size),
            misses: BitBoard::new(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether (`row`, `col`) lies on the board.
    pub fn is_valid_coordinate(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Cells a ship of `length` would occupy from `head` along `orientation`.
    pub fn ship_cells(
        &self,
        head: Coord,
        length: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, BoardError> {
        let (dr, dc) = orientation.step();
        (0..length)
            .map(|i| {
                let row = head.row.checked_add(dr * i);
                let col = head.col.checked_add(dc * i);
                match (row, col) {
                    (Some(r), Some(c)) if self.is_valid_coordinate(r, c) => Ok(Coord::new(r, c)),
                    _ => Err(BoardError::ShipOutOfBounds),
                }
            })
            .collect()
    }

    /// The up to eight on-board neighbours of `coord`, diagonals included.
    pub fn surrounding_cells(&self, coord: Coord) -> Vec<Coord> {
        let mut out = Vec::with_capacity(8);
        for dr in -1isize..=1 {
            for dc in -1isize..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(n) = coord.offset(dr, dc) {
                    if self.is_valid_coordinate(n.row, n.col) {
                        out.push(n);
                    }
                }
            }
        }
        out
    }

    /// Validate a placement without touching the board.
    ///
    /// Fails when the ship would leave the board, cover an occupied cell, or
    /// touch another ship on any side or corner.
    pub fn check_placement(
        &self,
        length: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if !self.is_valid_coordinate(row, col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        let cells = self.ship_cells(Coord::new(row, col), length, orientation)?;
        if cells.iter().any(|&c| self.ship_id_at(c).is_some()) {
            return Err(BoardError::ShipOverlaps);
        }
        let crowded = cells.iter().any(|&c| {
            self.surrounding_cells(c)
                .into_iter()
                .any(|n| self.ship_id_at(n).is_some())
        });
        if crowded {
            return Err(BoardError::ShipTooClose);
        }
        Ok(())
    }

    /// Place `ship` with its head at (`row`, `col`).
    ///
    /// All-or-nothing: the board is only written after the whole placement
    /// validated. On success the ship moves into the board and its id is
    /// returned; on failure it comes back inside the error.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, PlacementError> {
        let checked = if ship.is_placed() {
            Err(BoardError::ShipAlreadyPlaced)
        } else {
            self.check_placement(ship.length(), row, col, orientation)
        };
        if let Err(reason) = checked {
            trace!("rejected {} at ({}, {}) {}: {}", ship.name(), row, col, orientation, reason);
            return Err(PlacementError { reason, ship });
        }

        let head = Coord::new(row, col);
        ship.set_placement(Placement { head, orientation });
        let id = self.ships.len();
        for c in ship.cells() {
            let idx = self.index(c);
            self.cells[idx] = Some(id);
        }
        debug!("placed {} at {} {}", ship.name(), head, orientation);
        self.ships.push(ship);
        Ok(id)
    }

    /// Returns a random in-bounds (head, orientation) that passes
    /// [`check_placement`](Self::check_placement), trying at most
    /// `max_attempts` times.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        max_attempts: usize,
    ) -> Result<(Coord, Orientation), BoardError> {
        if length == 0 || length > self.size {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..max_attempts {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_r = if orient == Orientation::Vertical {
                self.size - length
            } else {
                self.size - 1
            };
            let max_c = if orient == Orientation::Horizontal {
                self.size - length
            } else {
                self.size - 1
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            if self.check_placement(length, r, c, orient).is_ok() {
                return Ok((Coord::new(r, c), orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Whether a ship of `length` still has at least one legal spot.
    /// Scans every head and orientation.
    pub fn has_room_for(&self, length: usize) -> bool {
        (0..self.size).any(|r| {
            (0..self.size).any(|c| {
                [Orientation::Horizontal, Orientation::Vertical]
                    .into_iter()
                    .any(|o| self.check_placement(length, r, c, o).is_ok())
            })
        })
    }

    /// Resolve an attack at (`row`, `col`).
    ///
    /// This is the only place ship damage is applied.
    pub fn receive_attack(&mut self, row: usize, col: usize) -> Result<AttackOutcome, BoardError> {
        if !self.is_valid_coordinate(row, col) {
            return Err(BoardError::OutOfBounds { row, col });
        }
        if self.is_attacked_before(row, col) {
            return Err(BoardError::AlreadyAttacked);
        }
        let coord = Coord::new(row, col);
        let outcome = match self.ship_id_at(coord) {
            Some(id) => {
                self.hits.insert(coord)?;
                let ship = &mut self.ships[id];
                ship.hit();
                if ship.is_sunk() {
                    AttackOutcome::Sunk { ship: id }
                } else {
                    AttackOutcome::Hit { ship: id }
                }
            }
            None => {
                self.misses.insert(coord)?;
                AttackOutcome::Miss
            }
        };
        debug!("attack at {} -> {:?}", coord, outcome);
        Ok(outcome)
    }

    /// Whether (`row`, `col`) already took a shot, hit or miss.
    pub fn is_attacked_before(&self, row: usize, col: usize) -> bool {
        let c = Coord::new(row, col);
        self.hits.contains(c) || self.misses.contains(c)
    }

    /// Returns `true` when every placed ship is sunk. Vacuously true on a
    /// board with no ships.
    pub fn all_ships_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Placed ships, indexed by [`ShipId`].
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    /// Id of the ship occupying `coord`, if any.
    pub fn ship_id_at(&self, coord: Coord) -> Option<ShipId> {
        if self.is_valid_coordinate(coord.row, coord.col) {
            self.cells[self.index(coord)]
        } else {
            None
        }
    }

    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        self.ship_id_at(Coord::new(row, col))
            .and_then(|id| self.ships.get(id))
    }

    /// Cells that were attacked and held a ship.
    pub fn hits(&self) -> &BitBoard {
        &self.hits
    }

    /// Cells that were attacked and held water.
    pub fn misses(&self) -> &BitBoard {
        &self.misses
    }

    /// Every attacked cell.
    pub fn attacked(&self) -> BitBoard {
        &self.hits | &self.misses
    }

    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size + coord.col
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.size, self.hits, self.misses, self.ships
        )
    }
}
