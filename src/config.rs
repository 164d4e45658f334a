use alloc::vec::Vec;
use core::fmt;

use crate::ship::{Ship, ShipType};

pub const DEFAULT_BOARD_SIZE: usize = 10;
/// Smallest side that always fits the fleet: one ship per even row, with the
/// Destroyer and Submarine sharing row 4.
pub const MIN_BOARD_SIZE: usize = 7;
/// Retry ceiling for random placement and for AI target selection.
pub const MAX_ATTEMPTS: usize = 100;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Destroyer", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Cruiser", 2),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// A fresh, unplaced copy of the standard fleet in catalog order.
pub fn create_fleet() -> Vec<Ship> {
    SHIPS.iter().copied().map(Ship::new).collect()
}

/// Single player pits a human against the computer; multiplayer is hot-seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum GameType {
    #[default]
    Single,
    Multiplayer,
}

/// Runtime settings for a game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct GameConfig {
    pub board_size: usize,
    pub max_attempts: usize,
    pub game_type: GameType,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board_size: DEFAULT_BOARD_SIZE,
            max_attempts: MAX_ATTEMPTS,
            game_type: GameType::Single,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reject settings the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall {
                min: MIN_BOARD_SIZE,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(())
    }
}

/// Settings rejected by [`GameConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The fleet might not fit.
    BoardTooSmall { min: usize },
    ZeroAttempts,
    /// A supplied board does not match `board_size`.
    BoardSizeMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooSmall { min } => write!(f, "board size must be at least {}", min),
            ConfigError::ZeroAttempts => write!(f, "max_attempts must be at least 1"),
            ConfigError::BoardSizeMismatch => write!(f, "board size does not match the configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
