use broadside::{
    create_fleet, AttackOutcome, Board, BoardError, ConfigError, Game, GameConfig, GameError,
    GamePhase, GameType, Orientation, Player, PlayerKind, COMPUTER_NAME, MIN_BOARD_SIZE, NUM_SHIPS,
};
use rand::{rngs::SmallRng, SeedableRng};

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

fn hotseat() -> GameConfig {
    GameConfig {
        game_type: GameType::Multiplayer,
        seed: Some(1),
        ..GameConfig::default()
    }
}

/// Hot-seat game with one Cruiser each: player one's at A1, player two's at
/// row 5.
fn duel() -> Game {
    let mut game = Game::setup(hotseat(), "Alice", Some("Bob")).unwrap();
    game.player_mut(0)
        .unwrap()
        .place_ship_named("Cruiser", 0, 0, Orientation::Horizontal)
        .unwrap();
    game.player_mut(1)
        .unwrap()
        .place_ship_named("Cruiser", 5, 5, Orientation::Horizontal)
        .unwrap();
    game.start_playing().unwrap();
    game
}

#[test]
fn test_single_player_setup() {
    let game = Game::setup(seeded(3), "Alice", None).unwrap();
    assert_eq!(game.phase(), GamePhase::Setup);
    let [one, two] = game.players();
    assert_eq!(one.name(), "Alice");
    assert_eq!(one.kind(), PlayerKind::Human);
    assert_eq!(one.fleet().len(), NUM_SHIPS);
    assert_eq!(two.name(), COMPUTER_NAME);
    assert!(two.is_computer());
    assert!(two.fleet().is_empty(), "computer fleet is placed at setup");
    assert_eq!(two.board().ships().len(), NUM_SHIPS);
    assert!(!game.all_fleets_placed());
}

#[test]
fn test_multiplayer_setup() {
    let game = Game::setup(hotseat(), "Alice", Some("Bob")).unwrap();
    assert_eq!(game.players()[1].name(), "Bob");
    assert_eq!(game.players()[1].kind(), PlayerKind::Human);
    assert_eq!(game.players()[1].fleet().len(), NUM_SHIPS);

    let game = Game::setup(hotseat(), "Alice", None).unwrap();
    assert!(game.players()[1].is_computer());

    let game = Game::setup(hotseat(), "", Some("")).unwrap();
    assert_eq!(game.players()[0].name(), "Player");
    assert!(game.players()[1].is_computer());
}

#[test]
fn test_single_player_ignores_second_name() {
    let game = Game::setup(seeded(3), "Alice", Some("Bob")).unwrap();
    assert!(game.players()[1].is_computer());
}

#[test]
fn test_bad_config_is_rejected() {
    let config = GameConfig {
        board_size: 0,
        ..GameConfig::default()
    };
    assert_eq!(
        Game::setup(config, "Alice", None).err(),
        Some(GameError::Config(ConfigError::BoardTooSmall { min: MIN_BOARD_SIZE }))
    );
    let config = GameConfig {
        board_size: MIN_BOARD_SIZE - 1,
        ..GameConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::BoardTooSmall { min: MIN_BOARD_SIZE }));
    let config = GameConfig {
        board_size: 30,
        ..GameConfig::default()
    };
    assert_eq!(config.validate(), Ok(()));
    let config = GameConfig {
        max_attempts: 0,
        ..GameConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroAttempts));

    let players = [
        Player::computer(create_fleet(), Board::new(8)),
        Player::computer(create_fleet(), Board::new(10)),
    ];
    let rng = SmallRng::seed_from_u64(0);
    assert_eq!(
        Game::with_players(GameConfig::default(), players, rng).err(),
        Some(GameError::Config(ConfigError::BoardSizeMismatch))
    );
}

#[test]
fn test_moves_need_the_playing_phase() {
    let mut game = Game::setup(seeded(4), "Alice", None).unwrap();
    assert_eq!(game.make_move(0, 0), Err(GameError::WrongPhase));
    assert_eq!(game.make_ai_move().err(), Some(GameError::WrongPhase));

    game.start_playing().unwrap();
    assert_eq!(game.start_playing(), Err(GameError::WrongPhase));
    assert_eq!(game.player_mut(0).err(), Some(GameError::WrongPhase));
    assert_eq!(game.place_fleet_randomly(0), Err(GameError::WrongPhase));
}

#[test]
fn test_turn_ownership() {
    let mut game = Game::setup(seeded(4), "Alice", None).unwrap();
    assert_eq!(game.player_mut(2).err(), Some(GameError::InvalidPlayer));
    assert_eq!(game.place_fleet_randomly(0), Ok(true));
    game.start_playing().unwrap();
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.make_ai_move().err(), Some(GameError::NotComputerTurn));

    // walk the human onto open water so the computer gets its turn
    let enemy = game.opponent().board().clone();
    let water = (0..10)
        .flat_map(|r| (0..10).map(move |c| (r, c)))
        .find(|&(r, c)| enemy.ship_at(r, c).is_none())
        .unwrap();
    assert_eq!(game.make_move(water.0, water.1), Ok(AttackOutcome::Miss));
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.make_move(0, 0), Err(GameError::NotHumanTurn));

    let turn = game.make_ai_move().unwrap();
    assert!(game.players()[0].board().is_attacked_before(turn.coord.row, turn.coord.col));
    assert!(!turn.game_over);
    let expected = if turn.outcome == AttackOutcome::Miss { 0 } else { 1 };
    assert_eq!(game.current_index(), expected);
}

#[test]
fn test_hit_keeps_turn_and_miss_passes_it() {
    let mut game = duel();
    assert_eq!(game.current_player().name(), "Alice");

    assert!(game.make_move(5, 5).unwrap().is_hit());
    assert_eq!(game.current_player().name(), "Alice");

    assert_eq!(
        game.make_move(5, 5),
        Err(GameError::Attack(BoardError::AlreadyAttacked))
    );
    assert_eq!(
        game.make_move(0, 12),
        Err(GameError::Attack(BoardError::OutOfBounds { row: 0, col: 12 }))
    );
    assert_eq!(game.current_player().name(), "Alice");

    assert_eq!(game.make_move(9, 9), Ok(AttackOutcome::Miss));
    assert_eq!(game.current_player().name(), "Bob");
    assert_eq!(game.opponent().name(), "Alice");
}

#[test]
fn test_sinking_the_last_ship_wins() {
    let mut game = duel();
    game.make_move(5, 5).unwrap();
    assert!(game.winner().is_none());
    assert!(game.make_move(5, 6).unwrap().is_sunk());

    assert!(game.is_over());
    assert_eq!(game.phase(), GamePhase::GameOver { winner: 0 });
    assert_eq!(game.winner().map(|p| p.name()), Some("Alice"));
    assert_eq!(game.make_move(0, 5), Err(GameError::WrongPhase));
    assert_eq!(game.make_ai_move().err(), Some(GameError::WrongPhase));
}

#[test]
fn test_same_seed_same_computer_fleet() {
    let a = Game::setup(seeded(1234), "Alice", None).unwrap();
    let b = Game::setup(seeded(1234), "Alice", None).unwrap();
    let layout = |g: &Game| {
        g.players()[1]
            .board()
            .ships()
            .iter()
            .map(|s| (s.name(), s.head(), s.orientation()))
            .collect::<Vec<_>>()
    };
    assert_eq!(layout(&a), layout(&b));
}

#[test]
fn test_computer_against_computer_finishes() {
    let config = seeded(77);
    let mut rng = SmallRng::seed_from_u64(77);
    let mut one = Player::computer(create_fleet(), Board::new(config.board_size));
    let mut two = Player::computer(create_fleet(), Board::new(config.board_size));
    assert!(one.place_ships_randomly(&mut rng));
    assert!(two.place_ships_randomly(&mut rng));

    let mut game = Game::with_players(config, [one, two], rng).unwrap();
    game.start_playing().unwrap();
    for _ in 0..2000 {
        if game.is_over() {
            break;
        }
        match game.make_ai_move() {
            Ok(_) | Err(GameError::Attack(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    let GamePhase::GameOver { winner } = game.phase() else {
        panic!("game did not finish");
    };
    assert!(game.players()[1 - winner].board().all_ships_sunk());
    assert!(!game.players()[winner].board().all_ships_sunk());
}

#[test]
fn test_config_json_defaults() {
    let config: GameConfig = serde_json::from_str(r#"{"board_size": 8}"#).unwrap();
    assert_eq!(config.board_size, 8);
    assert_eq!(config.max_attempts, GameConfig::default().max_attempts);
    assert_eq!(config.game_type, GameType::Single);
    assert_eq!(config.seed, None);

    let config: GameConfig =
        serde_json::from_str(r#"{"game_type": "multiplayer", "seed": 9}"#).unwrap();
    assert_eq!(config.game_type, GameType::Multiplayer);
    assert_eq!(config.seed, Some(9));
}

#[test]
fn test_smallest_board_fits_the_fleet() {
    let config = GameConfig {
        board_size: MIN_BOARD_SIZE,
        ..seeded(5)
    };
    let mut game = Game::setup(config, "Alice", None).unwrap();
    let alice = game.player_mut(0).unwrap();
    let layout = [
        ("Carrier", 0, 0),
        ("Battleship", 2, 0),
        ("Destroyer", 4, 0),
        ("Submarine", 4, 4),
        ("Cruiser", 6, 0),
    ];
    for (name, row, col) in layout {
        alice
            .place_ship_named(name, row, col, Orientation::Horizontal)
            .unwrap();
    }
    assert!(alice.fleet().is_empty());
}
