//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u8(self.config.difficulty as u8);
        hasher.write_u8(match self.phase {
            MatchPhase::Countdown => 0,
            MatchPhase::Running => 1,
            MatchPhase::Paused => 2,
            MatchPhase::Finished(outcome) => 3 + u8::from(outcome.is_victory()),
            MatchPhase::Aborted => 5,
        });
        for clock in [self.countdown_left, self.elapsed, self.player_acc, self.ai_acc] {
            hasher.write_u128(clock.as_nanos());
        }
        for snake in &self.state.snakes {
            hasher.write_u8(snake.tag as u8);
            hasher.write_u8(snake.direction as u8);
            hasher.write_u8(snake.pending as u8);
            hasher.write_u32(snake.score);
            hasher.write_u32(snake.growth);
            hasher.write_u32(snake.reversal.map_or(0, |reversal| reversal.remaining_ticks));
            match snake.life {
                Life::Alive => hasher.write_u8(0),
                Life::Dead => hasher.write_u8(1),
                Life::AwaitingRespawn { at } => {
                    hasher.write_u8(2);
                    hasher.write_u128(at.as_nanos());
                }
            }
            hasher.write_usize(snake.body.len());
            for cell in &snake.body {
                hasher.write_i32(cell.x);
                hasher.write_i32(cell.y);
            }
        }
        for item in self.state.items.values() {
            hasher.write_u8(item.kind as u8);
            hasher.write_i32(item.pos.x);
            hasher.write_i32(item.pos.y);
            hasher.write_u8(u8::from(item.warning));
        }
        for hazard in &self.state.hazards {
            hasher.write_i32(hazard.pos.x);
            hasher.write_i32(hazard.pos.y);
            hasher.write_u8(u8::from(hazard.warning));
        }
        hasher.finish()
    }
}
