use rand::{rngs::SmallRng, SeedableRng};
use seabattle::init_logging_with_default;
use seabattle::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct SideReport {
    shots: usize,
    ships_left: usize,
}

#[derive(Serialize)]
struct SimReport {
    status: GameStatus,
    player: SideReport,
    opponent: SideReport,
    winner: Option<Side>,
}

fn main() -> anyhow::Result<()> {
    init_logging_with_default(log::LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let config = GameConfig::default();
    let max_turns = 2 * config.board_size * config.board_size;
    let mut session = GameSession::new(config, &mut rng2).map_err(|e| anyhow::anyhow!(e))?;
    let mut bot = AiPlayer::new(session.config().board_size);
    let board = bot
        .place_ships(&mut rng1, session.player_board(), session.config())
        .map_err(|e| anyhow::anyhow!(e))?;
    session.set_player_board(board).map_err(|e| anyhow::anyhow!(e))?;
    session.start().map_err(|e| anyhow::anyhow!(e))?;

    let mut turns = 0;
    while session.phase() == Phase::InProgress {
        turns += 1;
        if turns > max_turns {
            anyhow::bail!("game did not finish within {} shots", max_turns);
        }
        match session.turn() {
            Side::Player => {
                let at = bot
                    .select_target(&mut rng1, &session.opponent_view())
                    .ok_or_else(|| anyhow::anyhow!("player has no target left"))?;
                let outcome = session.player_fire(at).map_err(|e| anyhow::anyhow!(e))?;
                bot.handle_shot_result(at, outcome);
            }
            Side::Opponent => {
                session.opponent_turn(&mut rng2).map_err(|e| anyhow::anyhow!(e))?;
            }
        }
    }

    let status = session.status();
    let report = SimReport {
        status,
        player: SideReport {
            shots: session.shots_fired(Side::Player),
            ships_left: session.remaining_player_ships(),
        },
        opponent: SideReport {
            shots: session.shots_fired(Side::Opponent),
            ships_left: session.remaining_opponent_ships(),
        },
        winner: match status {
            GameStatus::Won => Some(Side::Player),
            GameStatus::Lost => Some(Side::Opponent),
            GameStatus::InProgress => None,
        },
    };

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
