#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use std::path::PathBuf;

#[cfg(feature = "std")]
use anyhow::{anyhow, Context};
#[cfg(feature = "std")]
use broadside::{
    init_logging,
    ui::{coord_to_string, parse_coord, parse_placement, render_board, render_player_view},
    AttackOutcome, Coord, Game, GameConfig, GameError, GamePhase, GameType, PlayerKind,
};
#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct Settings {
    /// JSON file with a GameConfig; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, help = "Board side length (default 10)")]
    size: Option<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Retry ceiling for random placement and AI hunting")]
    max_attempts: Option<usize>,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer.
    Local {
        #[arg(long, default_value = "Player")]
        name: String,
        #[command(flatten)]
        settings: Settings,
    },
    /// Two humans sharing one terminal.
    Hotseat {
        #[arg(long, default_value = "Player 1")]
        first: String,
        #[arg(long, default_value = "Player 2")]
        second: String,
        #[command(flatten)]
        settings: Settings,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut game = match cli.command {
        Commands::Local { name, settings } => {
            let config = load_config(&settings, GameType::Single)?;
            if let Some(s) = config.seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            Game::setup(config, &name, None)?
        }
        Commands::Hotseat {
            first,
            second,
            settings,
        } => {
            let config = load_config(&settings, GameType::Multiplayer)?;
            Game::setup(config, &first, Some(&second))?
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    for idx in 0..2 {
        if game.players()[idx].kind() == PlayerKind::Human {
            place_fleet(&mut game, idx, &mut input)?;
        }
    }
    game.start_playing()?;
    play(&mut game, &mut input)?;

    println!("\n=== GAME OVER ===\n");
    for p in game.players() {
        println!("{}:", p.name());
        print!("{}", render_board(p.board(), true));
    }
    if let Some(winner) = game.winner() {
        println!("\n{} sank the whole enemy fleet!", winner.name());
    }
    Ok(())
}

#[cfg(feature = "std")]
fn load_config(settings: &Settings, game_type: GameType) -> anyhow::Result<GameConfig> {
    let mut config = match &settings.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    config.game_type = game_type;
    if let Some(size) = settings.size {
        config.board_size = size;
    }
    if settings.seed.is_some() {
        config.seed = settings.seed;
    }
    if let Some(n) = settings.max_attempts {
        config.max_attempts = n;
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "std")]
fn prompt(input: &mut impl BufRead, text: &str) -> anyhow::Result<String> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(line.trim().to_string())
}

#[cfg(feature = "std")]
fn place_fleet(game: &mut Game, idx: usize, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!(
        "{}: place your ships (e.g. A5 h). Press enter to place the rest at random.",
        game.players()[idx].name()
    );
    loop {
        let player = game.player_mut(idx)?;
        let Some(next) = player.fleet().first().cloned() else {
            return Ok(());
        };
        if !player.board().has_room_for(next.length()) {
            return Err(anyhow!(
                "no room left for the {} (length {}); start a new game",
                next.name(),
                next.length()
            ));
        }
        print!("{}", render_board(player.board(), true));
        let line = prompt(
            input,
            &format!("Place {} (length {}): ", next.name(), next.length()),
        )?;
        if line.is_empty() {
            if !game.place_fleet_randomly(idx)? {
                println!("Could not fit every ship; place the rest by hand.");
                continue;
            }
            print!("{}", render_board(game.players()[idx].board(), true));
            return Ok(());
        }
        match parse_placement(&line) {
            Some((c, orient)) => {
                if let Err(e) = player.place_ship(0, c.row, c.col, orient) {
                    println!("Error: {}", e);
                }
            }
            None => println!("Invalid input"),
        }
    }
}

#[cfg(feature = "std")]
fn play(game: &mut Game, input: &mut impl BufRead) -> anyhow::Result<()> {
    while game.phase() == GamePhase::Playing {
        let idx = game.current_index();
        let name = game.current_player().name().to_string();
        match game.current_player().kind() {
            PlayerKind::Human => {
                println!("\n=== {}'s turn ===", name);
                print!("{}", render_player_view(game, idx));
                let line = prompt(input, "Enter target: ")?;
                let Some(c) = parse_coord(&line) else {
                    println!("Invalid coordinate");
                    continue;
                };
                match game.make_move(c.row, c.col) {
                    Ok(outcome) => report(game, idx, &name, c, outcome),
                    Err(e) => println!("{}", e),
                }
            }
            PlayerKind::Computer => match game.make_ai_move() {
                Ok(turn) => report(game, idx, &name, turn.coord, turn.outcome),
                // a fallback shot can land on a spent cell; the turn is simply retried
                Err(GameError::Attack(e)) => log::debug!("computer shot rejected: {}", e),
                Err(e) => return Err(e.into()),
            },
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn report(game: &Game, shooter: usize, name: &str, at: Coord, outcome: AttackOutcome) {
    let target = &game.players()[1 - shooter];
    let what = match outcome {
        AttackOutcome::Miss => "miss".to_string(),
        AttackOutcome::Hit { .. } => "hit!".to_string(),
        AttackOutcome::Sunk { ship } => {
            let ship_name = target.board().ship(ship).map_or("ship", |s| s.name());
            format!("sunk the {}!", ship_name)
        }
    };
    println!("{} fires at {} -> {}", name, coord_to_string(at), what);
}
