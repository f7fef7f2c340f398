#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use seabattle::{
    cancel_channel, init_logging, parse_fleet,
    ui::{coord_to_string, describe_event, print_fleet, print_player_view},
    AiPlayer, CliCommand, CommandLines, DriverOutcome, GameConfig, GameSession, GameStatus,
    OpponentDriver, Phase, Player, ShotOutcome, Side, BOARD_SIZE, DEFAULT_FLEET, OPPONENT_DELAY_MS,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct GameOpts {
    #[arg(long, default_value_t = BOARD_SIZE, help = "Board side length")]
    size: usize,
    #[arg(long, help = "Comma separated ship sizes (e.g., --fleet 4,3,3,2)")]
    fleet: Option<String>,
    #[arg(long, help = "Allow ships to touch each other")]
    allow_touch: bool,
    #[arg(long, help = "Disable moving a ship once per turn")]
    no_move: bool,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = OPPONENT_DELAY_MS, help = "Pause before each opponent shot")]
    delay_ms: u64,
}

#[cfg(feature = "std")]
impl GameOpts {
    fn config(&self) -> GameConfig {
        let fleet = self
            .fleet
            .as_deref()
            .and_then(|f| parse_fleet(f, self.size))
            .unwrap_or_else(|| DEFAULT_FLEET.to_vec());
        GameConfig {
            board_size: self.size,
            fleet,
            enforce_no_touch: !self.allow_touch,
            allow_move: !self.no_move,
        }
    }

    fn rngs(&self) -> (SmallRng, SmallRng) {
        match self.seed {
            Some(s) => (
                SmallRng::seed_from_u64(s),
                SmallRng::seed_from_u64(s.wrapping_add(1)),
            ),
            None => {
                let mut seed_rng = rand::rng();
                (
                    SmallRng::from_rng(&mut seed_rng),
                    SmallRng::from_rng(&mut seed_rng),
                )
            }
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play(GameOpts),
    /// Watch the computer play against itself.
    Watch(GameOpts),
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(opts) => play(opts).await,
        Commands::Watch(opts) => watch(opts).await,
    }
}

#[cfg(feature = "std")]
fn announce(opts: &GameOpts, config: &GameConfig) {
    println!(
        "Sea battle {}x{}, fleet {:?}, ships {} touch",
        config.board_size,
        config.board_size,
        config.fleet,
        if config.enforce_no_touch { "may not" } else { "may" }
    );
    if let Some(s) = opts.seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
}

#[cfg(feature = "std")]
fn print_new_events(session: &GameSession, seen: &mut usize) {
    let total = session.event_count();
    let fresh: Vec<_> = session.events().take(total - *seen).collect();
    for event in fresh.iter().rev() {
        println!("• {}", describe_event(event));
    }
    *seen = total;
}

#[cfg(feature = "std")]
async fn play(opts: GameOpts) -> anyhow::Result<()> {
    let config = opts.config();
    announce(&opts, &config);
    let (mut rng, mut opponent_rng) = opts.rngs();
    let mut session = GameSession::new(config, &mut opponent_rng).map_err(|e| anyhow::anyhow!(e))?;

    session.auto_place_player(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
    session.start().map_err(|e| anyhow::anyhow!(e))?;
    let mut input = CommandLines::stdin();

    let (cancel_tx, mut cancel_rx) = cancel_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(true);
        }
    });

    let driver = OpponentDriver::new(Duration::from_millis(opts.delay_ms));
    let mut seen = 0;
    while session.phase() == Phase::InProgress {
        print_new_events(&session, &mut seen);
        if session.turn() == Side::Opponent {
            println!("Opponent is aiming...");
            match driver
                .run_turn(&mut session, &mut opponent_rng, &mut cancel_rx)
                .await
                .map_err(|e| anyhow::anyhow!(e))?
            {
                DriverOutcome::Played(_) => continue,
                DriverOutcome::Cancelled(_) => {
                    print_new_events(&session, &mut seen);
                    println!("Game aborted.");
                    return Ok(());
                }
            }
        }

        println!();
        print_player_view(&session);
        let size = session.config().board_size;
        let Some(command) = input.next_command(size, &mut cancel_rx).await? else {
            println!("Game aborted.");
            return Ok(());
        };
        let result = match command {
            CliCommand::Quit => {
                println!("Bye.");
                return Ok(());
            }
            CliCommand::Fleet => {
                print_fleet(session.player_board());
                Ok(())
            }
            CliCommand::Fire(at) => session.player_fire(at).map(|outcome| {
                if outcome == ShotOutcome::Repeat {
                    println!("You already fired at {}.", coord_to_string(at));
                }
            }),
            CliCommand::Move { ship, to } => match ship_id(&session, ship) {
                Some(id) => session.move_player_ship(&id, to),
                None => {
                    println!("No ship number {}.", ship + 1);
                    Ok(())
                }
            },
            CliCommand::Rotate { ship } => match ship_id(&session, ship) {
                Some(id) => session.rotate_player_ship(&id),
                None => {
                    println!("No ship number {}.", ship + 1);
                    Ok(())
                }
            },
        };
        if let Err(e) = result {
            println!("{}", e);
        }
    }

    print_new_events(&session, &mut seen);
    finish(&session);
    Ok(())
}

#[cfg(feature = "std")]
fn ship_id(session: &GameSession, index: usize) -> Option<String> {
    session
        .player_board()
        .ships()
        .get(index)
        .map(|s| s.id().to_string())
}

#[cfg(feature = "std")]
async fn watch(opts: GameOpts) -> anyhow::Result<()> {
    let config = opts.config();
    announce(&opts, &config);
    let (mut rng, mut opponent_rng) = opts.rngs();
    let mut session = GameSession::new(config, &mut opponent_rng).map_err(|e| anyhow::anyhow!(e))?;

    let mut bot = AiPlayer::new(session.config().board_size);
    let board = bot
        .place_ships(&mut rng, session.player_board(), session.config())
        .map_err(|e| anyhow::anyhow!(e))?;
    session.set_player_board(board).map_err(|e| anyhow::anyhow!(e))?;
    session.start().map_err(|e| anyhow::anyhow!(e))?;

    let (_cancel_tx, mut cancel_rx) = cancel_channel();
    let driver = OpponentDriver::new(Duration::from_millis(opts.delay_ms));
    let mut seen = 0;
    while session.phase() == Phase::InProgress {
        match session.turn() {
            Side::Player => {
                let at = bot
                    .select_target(&mut rng, &session.opponent_view())
                    .ok_or_else(|| anyhow::anyhow!("no target left"))?;
                tokio::time::sleep(driver.delay()).await;
                let outcome = session.player_fire(at).map_err(|e| anyhow::anyhow!(e))?;
                bot.handle_shot_result(at, outcome);
            }
            Side::Opponent => {
                driver
                    .run_turn(&mut session, &mut opponent_rng, &mut cancel_rx)
                    .await
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
        }
        print_new_events(&session, &mut seen);
    }
    finish(&session);
    Ok(())
}

#[cfg(feature = "std")]
fn finish(session: &GameSession) {
    println!("\n=== GAME OVER ===\n");
    print_player_view(session);
    match session.status() {
        GameStatus::Won => println!("\nVICTORY! You have sunk all enemy ships!"),
        GameStatus::Lost => println!("\nDEFEAT. All your ships have been destroyed."),
        GameStatus::InProgress => {}
    }
    println!(
        "Shots fired: you {}, opponent {}",
        session.shots_fired(Side::Player),
        session.shots_fired(Side::Opponent)
    );
}
