use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use twenty48::{Direction, Game, DEFAULT_BOARD_SIZE};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <seed> [<seed> ...]", args[0]);
        std::process::exit(1);
    }

    for arg in &args[1..] {
        let seed: u64 = arg.parse()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut game =
            Game::new(DEFAULT_BOARD_SIZE, &mut rng).map_err(|e| anyhow::anyhow!(e))?;

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
            game.step(legal[rng.random_range(0..legal.len())], &mut rng);
            moves += 1;
        }

        let result = json!({
            "seed": seed,
            "size": game.board().size(),
            "score": game.score(),
            "moves": moves,
            "highest_tile": game.board().highest_tile(),
            "board": game.board().rows().map(|r| r.to_vec()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}
