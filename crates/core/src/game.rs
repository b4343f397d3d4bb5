use std::mem;
use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::content::*;
use crate::journal::{InputJournal, InputPayload};
use crate::ledger::ScoreLedger;
use crate::state::{Arena, Life, Snake};
use crate::types::*;

mod engine;
mod hash;
pub mod occupancy;
pub mod pathfinding;
pub mod policy;
mod spawn;

#[cfg(test)]
mod test_support;

use occupancy::{CellState, Occupancy};
use policy::choose_move;

/// Simulated-time markers for the timed spawn kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct SpawnMarkers {
    wall: Duration,
    poison: Duration,
    trap: Duration,
}

pub struct Game {
    seed: u64,
    rng: ChaCha8Rng,
    config: TierConfig,
    state: Arena,
    phase: MatchPhase,
    countdown_left: Duration,
    elapsed: Duration,
    player_acc: Duration,
    ai_acc: Duration,
    markers: SpawnMarkers,
    events: Vec<GameEvent>,
    journal: InputJournal,
    score_recorded: bool,
}

impl Game {
    /// Standard arena for `difficulty`: the player plus the tier's bots and one apple.
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        let config = TierConfig::for_difficulty(difficulty);
        let mut arena = Arena::empty();
        arena.add_snake(Snake::new(EntityTag::Player, PLAYER_SPAWN));
        for &(tag, spawn) in &config.bots {
            arena.add_snake(Snake::new(tag, spawn));
        }
        let mut game = Self::from_arena(seed, config, arena);
        game.journal.standard_arena = true;
        game
    }

    /// Match over a hand-built arena. An apple is spawned if the arena has none.
    pub fn from_arena(seed: u64, config: TierConfig, arena: Arena) -> Self {
        let mut game = Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            journal: InputJournal::new(seed, config.difficulty),
            config,
            state: arena,
            phase: MatchPhase::Countdown,
            countdown_left: COUNTDOWN,
            elapsed: Duration::ZERO,
            player_acc: Duration::ZERO,
            ai_acc: Duration::ZERO,
            markers: SpawnMarkers::default(),
            events: Vec::new(),
            score_recorded: false,
        };
        game.events.push(GameEvent::CountdownTick { remaining: whole_seconds(COUNTDOWN) });
        if game.state.apple().is_none() {
            game.spawn_item(ItemKind::Apple);
        }
        game
    }

    /// Buffers a heading for the player's next tick. Reversed controls negate
    /// the input before the 180 degree check.
    pub fn steer(&mut self, direction: Direction) -> Result<(), InputRejected> {
        self.journal.record(InputPayload::Steer { direction });
        if self.phase != MatchPhase::Running {
            return Err(InputRejected::NotRunning);
        }
        let Some(player) = self.state.snake_mut(EntityTag::Player) else {
            return Err(InputRejected::PlayerDead);
        };
        if !player.is_alive() {
            return Err(InputRejected::PlayerDead);
        }
        let requested =
            if player.reversal.is_some() { direction.opposite() } else { direction };
        if requested == player.direction.opposite() {
            return Err(InputRejected::Reversal { current: player.direction, requested });
        }
        player.pending = requested;
        Ok(())
    }

    /// Flips between running and paused. Returns false when the phase cannot pause.
    pub fn toggle_pause(&mut self) -> bool {
        self.journal.record(InputPayload::TogglePause);
        match self.phase {
            MatchPhase::Running => {
                self.phase = MatchPhase::Paused;
                self.events.push(GameEvent::Paused);
                true
            }
            MatchPhase::Paused => {
                self.phase = MatchPhase::Running;
                self.events.push(GameEvent::Resumed);
                true
            }
            MatchPhase::Countdown | MatchPhase::Finished(_) | MatchPhase::Aborted => false,
        }
    }

    /// Stops the match for good. Pending respawns are cancelled.
    pub fn abort(&mut self) {
        self.journal.record(InputPayload::Abort);
        if matches!(self.phase, MatchPhase::Finished(_) | MatchPhase::Aborted) {
            return;
        }
        for snake in &mut self.state.snakes {
            if matches!(snake.life, Life::AwaitingRespawn { .. }) {
                snake.life = Life::Dead;
            }
        }
        self.phase = MatchPhase::Aborted;
        self.events.push(GameEvent::MatchAborted);
        tracing::info!(elapsed_ms = self.elapsed.as_millis() as u64, "match aborted");
    }

    /// Offers the player's final score to `ledger`, once, after the match finished.
    pub fn record_best_score(&mut self, ledger: &mut impl ScoreLedger) -> Option<bool> {
        if self.score_recorded || self.outcome().is_none() {
            return None;
        }
        self.score_recorded = true;
        let difficulty = self.config.difficulty;
        let score = self.player_score();
        let is_best = ledger.record_if_best(difficulty, score);
        if is_best {
            tracing::info!(difficulty = difficulty.key(), score, "new best score");
            self.events.push(GameEvent::NewBestScore { difficulty, score });
        }
        Some(is_best)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &Arena {
        &self.state
    }

    pub fn config(&self) -> &TierConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn remaining(&self) -> Duration {
        self.config.duration.saturating_sub(self.elapsed)
    }

    pub fn countdown_remaining(&self) -> Duration {
        self.countdown_left
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.phase {
            MatchPhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn player_score(&self) -> u32 {
        self.state.player().map_or(0, |player| player.score)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    /// Read-only planning view of the current board.
    pub fn planning_view(&self) -> Occupancy {
        Occupancy::planning(&self.state)
    }
}

/// Whole seconds shown on a countdown, rounded up.
fn whole_seconds(left: Duration) -> u8 {
    let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
    u8::try_from(secs).unwrap_or(u8::MAX)
}
