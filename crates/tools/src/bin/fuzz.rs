use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use anyhow::{Result, bail};
use arena::{
    AdvanceStopReason, Arena, Difficulty, Direction, EntityTag, Game, ItemKind, MatchPhase,
};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Frames to simulate per difficulty tier
    #[arg(short, long, default_value_t = 20_000)]
    frames: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[rng.next_u64() as usize % slice.len()]
}

fn main() -> Result<()> {
    let args = Args::parse();

    for difficulty in Difficulty::ALL {
        println!(
            "Fuzzing {} on seed {} for up to {} frames...",
            difficulty.key(),
            args.seed,
            args.frames
        );
        run_one(args.seed, difficulty, args.frames)?;
    }
    println!("Fuzzing complete. No invariants broken.");
    Ok(())
}

fn run_one(seed: u64, difficulty: Difficulty, frames: u32) -> Result<()> {
    let mut game = Game::new(seed, difficulty);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut scores: BTreeMap<EntityTag, u32> = BTreeMap::new();

    for frame in 0..frames {
        if rng.next_u64() % 4 == 0 {
            let _ = game.steer(choose(&mut rng, &Direction::ALL));
        }
        if rng.next_u64() % 500 == 0 {
            game.toggle_pause();
        }
        if game.phase() == MatchPhase::Paused && rng.next_u64() % 20 == 0 {
            game.toggle_pause();
        }

        let dt = Duration::from_millis(1 + rng.next_u64() % 50);
        let result = game.advance(dt);

        if let Err(violation) = check_invariants(game.state(), &mut scores) {
            bail!("frame {frame} ({}): {violation}", difficulty.key());
        }
        if let AdvanceStopReason::Finished(outcome) = result.stop_reason {
            println!(
                "  finished with {:?} after {:.2}s, player score {}",
                outcome,
                game.elapsed().as_secs_f64(),
                game.player_score()
            );
            return Ok(());
        }
    }
    println!("  frame budget reached at {:.2}s", game.elapsed().as_secs_f64());
    Ok(())
}

fn check_invariants(arena: &Arena, scores: &mut BTreeMap<EntityTag, u32>) -> Result<(), String> {
    let apples = arena.items.values().filter(|item| item.kind == ItemKind::Apple).count();
    if apples != 1 {
        return Err(format!("expected exactly one apple, found {apples}"));
    }

    for snake in arena.snakes.iter().filter(|snake| snake.is_alive()) {
        let mut seen = HashSet::new();
        for &cell in &snake.body {
            if !arena.in_bounds(cell) {
                return Err(format!("{:?} body left the arena at {cell}", snake.tag));
            }
            if !seen.insert(cell) {
                return Err(format!("{:?} body repeats cell {cell}", snake.tag));
            }
        }
        for other in arena.snakes.iter().filter(|other| other.is_alive()) {
            if other.tag != snake.tag && other.occupies(snake.head()) {
                return Err(format!(
                    "{:?} head at {} is inside {:?}",
                    snake.tag,
                    snake.head(),
                    other.tag
                ));
            }
        }
    }

    for snake in &arena.snakes {
        let last = scores.entry(snake.tag).or_insert(0);
        if snake.score < *last {
            return Err(format!("{:?} score dropped from {} to {}", snake.tag, last, snake.score));
        }
        *last = snake.score;
    }
    Ok(())
}
