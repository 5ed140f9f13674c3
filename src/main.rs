use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use twenty48::{init_logging, init_logging_with, Direction, Game, Tile, DEFAULT_BOARD_SIZE};

/// Play random self-play games and report score statistics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: u64,
    /// Board side length.
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Log every move at debug level.
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        init_logging_with(log::LevelFilter::Debug);
    } else {
        init_logging();
    }
    if let Some(s) = cli.seed {
        log::info!("using fixed seed: {} (games will be reproducible)", s);
    }

    let mut rng = if let Some(s) = cli.seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    };

    let mut total_score = 0u64;
    let mut best_score = 0u64;
    let mut best_tile: Tile = 0;
    let mut total_moves = 0u64;

    for game_idx in 0..cli.games {
        let (score, moves, highest) = play_one(cli.size, &mut rng)?;
        log::info!(
            "game {}: score {} after {} moves, highest tile {}",
            game_idx,
            score,
            moves,
            highest
        );
        total_score += score;
        total_moves += moves;
        best_score = best_score.max(score);
        best_tile = best_tile.max(highest);
    }

    if cli.games == 0 {
        return Ok(());
    }
    println!("played {} games on a {}x{} board", cli.games, cli.size, cli.size);
    println!(
        "average score: {:.1}, best score: {}, best tile: {}, average moves: {:.1}",
        total_score as f64 / cli.games as f64,
        best_score,
        best_tile,
        total_moves as f64 / cli.games as f64
    );
    Ok(())
}

/// Run one game to completion with uniformly random legal moves.
fn play_one(size: usize, rng: &mut SmallRng) -> anyhow::Result<(u64, u64, Tile)> {
    let mut game = Game::new(size, rng).map_err(|e| anyhow::anyhow!(e))?;
    let mut moves = 0u64;
    while !game.is_over() {
        let legal: Vec<Direction> = Direction::ALL
            .iter()
            .copied()
            .filter(|&d| game.board().can_shift(d))
            .collect();
        if legal.is_empty() {
            break;
        }
        let direction = legal[rng.random_range(0..legal.len())];
        let step = game.step(direction, rng);
        moves += 1;
        log::debug!(
            "move {}: {:?} gained {}, spawned {:?}",
            moves,
            direction,
            step.score_delta,
            step.spawned
        );
    }
    log::debug!("final board:\n{}", game.board());
    Ok((game.score(), moves, game.board().highest_tile()))
}
