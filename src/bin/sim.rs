use broadside::{create_fleet, init_logging, Board, Game, GameConfig, GameError, Player};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Hard stop for a runaway simulation.
const MAX_TURNS: usize = 10_000;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let config = GameConfig::default();
    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut p1 = Player::computer(create_fleet(), Board::new(config.board_size));
    let mut p2 = Player::computer(create_fleet(), Board::new(config.board_size));
    let placed1 = p1.place_ships_randomly(&mut rng1);
    let placed2 = p2.place_ships_randomly(&mut rng2);

    let mut game = Game::with_players(config, [p1, p2], rng1)?;
    game.start_playing()?;

    let mut shots = [0usize; 2];
    let mut rejected = 0usize;
    for _ in 0..MAX_TURNS {
        if game.is_over() {
            break;
        }
        let shooter = game.current_index();
        match game.make_ai_move() {
            Ok(_) => shots[shooter] += 1,
            Err(GameError::Attack(_)) => rejected += 1,
            Err(e) => return Err(e.into()),
        }
    }

    let winner = match game.phase() {
        broadside::GamePhase::GameOver { winner: 0 } => Some("player1"),
        broadside::GamePhase::GameOver { .. } => Some("player2"),
        _ => None,
    };

    let result = json!({
        "player1": {"shots": shots[0], "fleet_placed": placed1},
        "player2": {"shots": shots[1], "fleet_placed": placed2},
        "rejected_shots": rejected,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
