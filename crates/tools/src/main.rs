use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use arena::content::COUNTDOWN;
use arena::{
    AdvanceStopReason, Difficulty, Direction, EntityTag, Game, InputJournal, MatchPhase,
    ScoreLedger, choose_move, replay_to_end,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::trace;
use tracing_subscriber::EnvFilter;

mod ledger;

use ledger::FileLedger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play one headless match and print the result
    Simulate(SimulateArgs),
    /// Re-run a recorded journal and print its final state
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

#[derive(Args)]
struct SimulateArgs {
    #[arg(short, long, value_enum, default_value_t = Tier::Normal)]
    difficulty: Tier,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Simulated frame length in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    #[arg(long, value_enum, default_value_t = Pilot::Planner)]
    pilot: Pilot,
    /// Best-score ledger file; defaults to the per-user data directory
    #[arg(long)]
    ledger: Option<PathBuf>,
    /// Write the input journal here once the match ends
    #[arg(long)]
    journal_out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Tier {
    Normal,
    Medium,
    Hard,
}

impl From<Tier> for Difficulty {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Normal => Difficulty::Normal,
            Tier::Medium => Difficulty::Medium,
            Tier::Hard => Difficulty::Hard,
        }
    }
}

/// Who steers the player snake.
#[derive(Clone, Copy, ValueEnum)]
enum Pilot {
    /// Nobody; the snake keeps heading up
    Idle,
    /// Seeded random turns
    Random,
    /// The hard-tier AI policy
    Planner,
}

fn main() -> Result<()> {
    init_tracing();
    match Cli::parse().command {
        Command::Simulate(args) => simulate(&args),
        Command::Replay { journal } => replay(&journal),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn simulate(args: &SimulateArgs) -> Result<()> {
    if args.frame_ms == 0 {
        return Err(anyhow!("--frame-ms must be at least 1"));
    }
    let difficulty = Difficulty::from(args.difficulty);
    let frame = Duration::from_millis(args.frame_ms);
    let mut game = Game::new(args.seed, difficulty);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed ^ 0x5EED);

    let budget = COUNTDOWN + game.config().duration + frame * 4;
    let max_frames = budget.as_millis() / frame.as_millis();
    for _ in 0..max_frames {
        if game.phase() == MatchPhase::Running {
            steer_player(&mut game, args.pilot, &mut rng);
        }
        if let AdvanceStopReason::Finished(_) = game.advance(frame).stop_reason {
            break;
        }
    }
    if game.outcome().is_none() {
        game.abort();
    }

    println!("Simulation complete.");
    println!("Difficulty: {}", difficulty.key());
    println!("Phase: {:?}", game.phase());
    println!("Elapsed: {:.2}s", game.elapsed().as_secs_f64());
    for snake in &game.state().snakes {
        println!("  {:?}: score {} ({:?})", snake.tag, snake.score, snake.life);
    }
    println!("Snapshot Hash: {:#018x}", game.snapshot_hash());

    if game.outcome().is_some() {
        let path = match &args.ledger {
            Some(path) => path.clone(),
            None => FileLedger::default_path()
                .context("no data directory available for the score ledger")?,
        };
        let mut ledger = FileLedger::open(&path)
            .with_context(|| format!("Failed to open ledger: {}", path.display()))?;
        if game.record_best_score(&mut ledger) == Some(true) {
            println!("New best score for {}: {}", difficulty.key(), game.player_score());
        } else {
            println!(
                "Best score for {}: {} ({})",
                difficulty.key(),
                ledger.best_score(difficulty),
                ledger.path().display()
            );
        }
    }

    if let Some(path) = &args.journal_out {
        let json = game.journal().to_json().context("Failed to serialize journal")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }

    Ok(())
}

fn steer_player(game: &mut Game, pilot: Pilot, rng: &mut ChaCha8Rng) {
    let Some(player) = game.state().player().filter(|player| player.is_alive()) else {
        return;
    };
    let wanted = match pilot {
        Pilot::Idle => return,
        Pilot::Random => {
            if rng.next_u64() % 8 != 0 {
                return;
            }
            Direction::ALL[rng.next_u64() as usize % Direction::ALL.len()]
        }
        Pilot::Planner => {
            let target = game.state().apple().unwrap_or(player.head());
            choose_move(&game.planning_view(), player, target, Difficulty::Hard)
        }
    };
    // Reversed controls flip whatever is pressed, so press the opposite.
    let pressed = if player.reversal.is_some() { wanted.opposite() } else { wanted };
    if let Err(rejected) = game.steer(pressed) {
        trace!(%rejected, entity = ?EntityTag::Player, "steer ignored");
    }
}

fn replay(path: &Path) -> Result<()> {
    let journal_data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read journal file: {}", path.display()))?;
    let journal =
        InputJournal::from_json(&journal_data).context("Failed to deserialize journal JSON")?;

    let result = replay_to_end(&journal).context("Replay failed during execution")?;

    println!("Replay complete.");
    println!("Final Phase: {:?}", result.final_phase);
    println!("Elapsed: {:.2}s", result.final_elapsed.as_secs_f64());
    println!("Player Score: {}", result.player_score);
    println!("Snapshot Hash: {:#018x}", result.final_snapshot_hash);

    Ok(())
}
