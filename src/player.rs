use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::mem;
use log::{debug, warn};
use rand::Rng;

use crate::ai::{AiMove, AiState};
use crate::board::Board;
use crate::common::{AttackOutcome, BoardError, ShipId};
use crate::config::MAX_ATTEMPTS;
use crate::ship::{Orientation, Ship};

/// Name given to players created without one.
pub const COMPUTER_NAME: &str = "Computer";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    Human,
    Computer,
}

#[derive(Debug, Clone)]
enum Controller {
    Human,
    Computer(AiState),
}

/// A fleet still waiting to be placed plus the board it goes onto.
///
/// Computer players also carry their targeting state.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    fleet: Vec<Ship>,
    board: Board,
    max_attempts: usize,
    controller: Controller,
}

impl Player {
    /// A player with an empty name is the computer.
    pub fn new(name: &str, fleet: Vec<Ship>, board: Board) -> Self {
        if name.is_empty() {
            Self::computer(fleet, board)
        } else {
            Self::human(name, fleet, board)
        }
    }

    pub fn human(name: &str, fleet: Vec<Ship>, board: Board) -> Self {
        Player {
            name: name.to_string(),
            fleet,
            board,
            max_attempts: MAX_ATTEMPTS,
            controller: Controller::Human,
        }
    }

    pub fn computer(fleet: Vec<Ship>, board: Board) -> Self {
        let ai = AiState::new(board.size());
        Player {
            name: COMPUTER_NAME.to_string(),
            fleet,
            board,
            max_attempts: MAX_ATTEMPTS,
            controller: Controller::Computer(ai),
        }
    }

    /// Retry ceiling for random placement and AI targeting. Zero skips random
    /// placement entirely; targeting still takes one queue pop or hunt draw.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlayerKind {
        match self.controller {
            Controller::Human => PlayerKind::Human,
            Controller::Computer(_) => PlayerKind::Computer,
        }
    }

    pub fn is_computer(&self) -> bool {
        self.kind() == PlayerKind::Computer
    }

    /// Ships not yet placed, in the order they will be offered.
    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Targeting state; `None` for humans.
    pub fn ai_state(&self) -> Option<&AiState> {
        match &self.controller {
            Controller::Computer(ai) => Some(ai),
            Controller::Human => None,
        }
    }

    /// Move the fleet ship at `index` onto the board.
    ///
    /// On failure the ship stays in the fleet at the same position.
    pub fn place_ship(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        if index >= self.fleet.len() {
            return Err(BoardError::InvalidIndex);
        }
        let ship = self.fleet.remove(index);
        match self.board.place_ship(ship, row, col, orientation) {
            Ok(id) => Ok(id),
            Err(e) => {
                self.fleet.insert(index, e.ship);
                Err(e.reason)
            }
        }
    }

    /// Same as [`place_ship`](Self::place_ship), picking the ship by name.
    pub fn place_ship_named(
        &mut self,
        name: &str,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let index = self
            .fleet
            .iter()
            .position(|s| s.name() == name)
            .ok_or(BoardError::NameNotFound)?;
        self.place_ship(index, row, col, orientation)
    }

    /// Place every remaining fleet ship at random, in fleet order.
    ///
    /// Each ship gets `max_attempts` tries. A ship that runs out stays in the
    /// fleet; the return value is `true` only if the whole fleet got placed.
    pub fn place_ships_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        for ship in mem::take(&mut self.fleet) {
            let spot = self
                .board
                .random_placement(rng, ship.length(), self.max_attempts);
            match spot {
                Ok((head, orient)) => {
                    if let Err(e) = self.board.place_ship(ship, head.row, head.col, orient) {
                        self.fleet.push(e.into_ship());
                    }
                }
                Err(e) => {
                    warn!("{}: leaving {} unplaced: {}", self.name, ship.name(), e);
                    self.fleet.push(ship);
                }
            }
        }
        self.fleet.is_empty()
    }

    /// Fire at (`row`, `col`) on the enemy's board.
    pub fn attack(
        &self,
        enemy: &mut Player,
        row: usize,
        col: usize,
    ) -> Result<AttackOutcome, BoardError> {
        enemy.board.receive_attack(row, col)
    }

    /// Let the AI pick a target on `enemy`, fire, and learn from the result.
    ///
    /// Returns `None` for human players.
    pub fn ai_attack<R: Rng + ?Sized>(&mut self, enemy: &mut Player, rng: &mut R) -> Option<AiMove> {
        let Controller::Computer(ai) = &mut self.controller else {
            return None;
        };
        let (coord, source) = ai.choose_target(&enemy.board, rng, self.max_attempts);
        let outcome = enemy.board.receive_attack(coord.row, coord.col);
        ai.observe(coord, &outcome, &enemy.board);
        debug!("{} fires at {} ({:?}) -> {:?}", self.name, coord, source, outcome);
        Some(AiMove {
            coord,
            source,
            outcome,
        })
    }
}
