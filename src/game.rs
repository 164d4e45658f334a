use core::fmt;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::TargetSource;
use crate::board::Board;
use crate::common::{AttackOutcome, BoardError, Coord};
use crate::config::{create_fleet, ConfigError, GameConfig, GameType};
use crate::player::{Player, PlayerKind};

/// Phases only move forward: setup, playing, game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    Setup,
    Playing,
    /// Carries the index of the winning player.
    GameOver { winner: usize },
}

/// Errors returned by Game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Operation not allowed in the current phase.
    WrongPhase,
    /// The current player is not a human.
    NotHumanTurn,
    /// The current player is not the computer.
    NotComputerTurn,
    /// Player index is not 0 or 1.
    InvalidPlayer,
    /// The attack itself was rejected by the board.
    Attack(BoardError),
    /// The settings passed to setup are unusable.
    Config(ConfigError),
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase => write!(f, "Not allowed in the current phase"),
            GameError::NotHumanTurn => write!(f, "It is not a human player's turn"),
            GameError::NotComputerTurn => write!(f, "It is not the computer's turn"),
            GameError::InvalidPlayer => write!(f, "Player index is out of range"),
            GameError::Attack(e) => write!(f, "Attack rejected: {}", e),
            GameError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Result of one computer turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTurn {
    pub coord: Coord,
    pub outcome: AttackOutcome,
    pub source: TargetSource,
    pub game_over: bool,
}

/// Two players, whose turn it is, and the phase of play.
pub struct Game {
    config: GameConfig,
    players: [Player; 2],
    current: usize,
    phase: GamePhase,
    rng: SmallRng,
}

impl Game {
    /// Build both players with fresh fleets and boards.
    ///
    /// Player one is always human. Player two is the computer in single
    /// player mode, or in multiplayer when no name is given. A computer's
    /// fleet is placed at random straight away.
    pub fn setup(
        config: GameConfig,
        player_one: &str,
        player_two: Option<&str>,
    ) -> Result<Self, GameError> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => default_rng(),
        };
        Self::setup_with_rng(config, player_one, player_two, rng)
    }

    /// [`setup`](Self::setup) with a caller-supplied RNG.
    pub fn setup_with_rng(
        config: GameConfig,
        player_one: &str,
        player_two: Option<&str>,
        mut rng: SmallRng,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let size = config.board_size;
        let name_one = if player_one.is_empty() { "Player" } else { player_one };
        let one = Player::human(name_one, create_fleet(), Board::new(size))
            .with_max_attempts(config.max_attempts);

        let two = match (config.game_type, player_two) {
            (GameType::Multiplayer, Some(name)) if !name.is_empty() => {
                Player::human(name, create_fleet(), Board::new(size))
            }
            _ => Player::computer(create_fleet(), Board::new(size)),
        };
        let mut two = two.with_max_attempts(config.max_attempts);

        if two.is_computer() && !two.place_ships_randomly(&mut rng) {
            warn!("computer fleet incomplete: {} ship(s) unplaced", two.fleet().len());
        }

        info!(
            "setup {:?} game on {}x{}: {} vs {}",
            config.game_type,
            size,
            size,
            one.name(),
            two.name()
        );
        Ok(Game {
            config,
            players: [one, two],
            current: 0,
            phase: GamePhase::Setup,
            rng,
        })
    }

    /// Start from two ready-made players, e.g. two computers for a simulation.
    /// Boards must match `config.board_size`.
    pub fn with_players(
        config: GameConfig,
        players: [Player; 2],
        rng: SmallRng,
    ) -> Result<Self, GameError> {
        config.validate()?;
        if players.iter().any(|p| p.board().size() != config.board_size) {
            return Err(GameError::Config(ConfigError::BoardSizeMismatch));
        }
        Ok(Game {
            config,
            players,
            current: 0,
            phase: GamePhase::Setup,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<&Player> {
        match self.phase {
            GamePhase::GameOver { winner } => self.players.get(winner),
            _ => None,
        }
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Mutable access for ship placement. Only granted during setup.
    pub fn player_mut(&mut self, index: usize) -> Result<&mut Player, GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::WrongPhase);
        }
        self.players.get_mut(index).ok_or(GameError::InvalidPlayer)
    }

    /// Place the remaining fleet of `index` at random using the game's RNG.
    pub fn place_fleet_randomly(&mut self, index: usize) -> Result<bool, GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::WrongPhase);
        }
        let player = self.players.get_mut(index).ok_or(GameError::InvalidPlayer)?;
        Ok(player.place_ships_randomly(&mut self.rng))
    }

    /// Whether both fleets are fully on their boards.
    pub fn all_fleets_placed(&self) -> bool {
        self.players.iter().all(|p| p.fleet().is_empty())
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[1 - self.current]
    }

    pub fn switch_turn(&mut self) {
        self.current = 1 - self.current;
    }

    /// Leave setup and hand the first turn to player one.
    pub fn start_playing(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Setup {
            return Err(GameError::WrongPhase);
        }
        if !self.all_fleets_placed() {
            warn!("starting with unplaced ships");
        }
        self.phase = GamePhase::Playing;
        self.current = 0;
        info!("battle started");
        Ok(())
    }

    /// A human move at (`row`, `col`) against the opponent.
    ///
    /// A hit keeps the turn, a miss passes it, sinking the last ship ends
    /// the game.
    pub fn make_move(&mut self, row: usize, col: usize) -> Result<AttackOutcome, GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::WrongPhase);
        }
        if self.current_player().kind() != PlayerKind::Human {
            return Err(GameError::NotHumanTurn);
        }
        let [a, b] = &mut self.players;
        let (attacker, defender) = if self.current == 0 { (a, b) } else { (b, a) };
        let outcome = attacker
            .attack(defender, row, col)
            .map_err(GameError::Attack)?;
        self.finish_turn(outcome);
        Ok(outcome)
    }

    /// Let the computer take its turn. Same turn rules as
    /// [`make_move`](Self::make_move).
    pub fn make_ai_move(&mut self) -> Result<AiTurn, GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::WrongPhase);
        }
        let [a, b] = &mut self.players;
        let (attacker, defender) = if self.current == 0 { (a, b) } else { (b, a) };
        let mv = attacker
            .ai_attack(defender, &mut self.rng)
            .ok_or(GameError::NotComputerTurn)?;
        let outcome = mv.outcome.map_err(GameError::Attack)?;
        let game_over = self.finish_turn(outcome);
        Ok(AiTurn {
            coord: mv.coord,
            outcome,
            source: mv.source,
            game_over,
        })
    }

    /// Apply win detection and turn passing. Returns `true` on game over.
    fn finish_turn(&mut self, outcome: AttackOutcome) -> bool {
        if self.opponent().board().all_ships_sunk() {
            self.phase = GamePhase::GameOver {
                winner: self.current,
            };
            info!("{} wins", self.current_player().name());
            return true;
        }
        if outcome == AttackOutcome::Miss {
            self.switch_turn();
        }
        false
    }
}

#[cfg(feature = "std")]
fn default_rng() -> SmallRng {
    SmallRng::from_rng(&mut rand::rng())
}

#[cfg(not(feature = "std"))]
fn default_rng() -> SmallRng {
    // No entropy source without std; fix the seed in GameConfig instead.
    SmallRng::seed_from_u64(0)
}
