//! Fixed arena constants and per-difficulty tier bundles.
//! This module exists so every tunable number lives in one table.
//! It does not own any simulation state.

use std::time::Duration;

use crate::types::{Difficulty, EntityTag, ItemKind, Pos};

pub const GRID_WIDTH: i32 = 30;
pub const GRID_HEIGHT: i32 = 40;
pub const START_BODY_LEN: i32 = 3;

pub const PLAYER_SPAWN: Pos = Pos::new(15, 30);
pub const RED_BOT_SPAWN: Pos = Pos::new(5, 5);
pub const ORANGE_BOT_SPAWN: Pos = Pos::new(25, 5);

pub const MATCH_DURATION: Duration = Duration::from_secs(180);
pub const COUNTDOWN: Duration = Duration::from_secs(3);
pub const RESPAWN_DELAY: Duration = Duration::from_secs(3);
pub const WALL_TELEGRAPH: Duration = Duration::from_millis(500);

/// Own-tick count a trap keeps controls reversed.
pub const REVERSAL_TICKS: u32 = 30;

pub const PATH_BUDGET: u32 = 1000;
pub const SURVIVAL_AREA_CAP: usize = 150;
pub const SAFETY_MARGIN: usize = 5;

pub const SPAWN_ATTEMPTS: u32 = 1000;
pub const SPAWN_FALLBACK: Pos = Pos::new(GRID_WIDTH / 2, GRID_HEIGHT / 2);

/// Catch-up cap for a single group inside one frame.
pub const MAX_STEPS_PER_FRAME: u32 = 8;

/// Warning time before a freshly spawned object of `kind` becomes live.
pub const fn item_telegraph(kind: ItemKind) -> Duration {
    match kind {
        ItemKind::Apple | ItemKind::Poison | ItemKind::Trap => Duration::ZERO,
    }
}

/// Everything a difficulty tier decides. `Duration::ZERO` on a spawn interval
/// means that kind never spawns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierConfig {
    pub difficulty: Difficulty,
    pub player_interval: Duration,
    pub ai_interval: Duration,
    pub win_score: u32,
    pub duration: Duration,
    pub wall_interval: Duration,
    pub poison_interval: Duration,
    pub trap_interval: Duration,
    pub bots: Vec<(EntityTag, Pos)>,
}

impl TierConfig {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (ai_ms, win_score, wall_s, poison_s, trap_s) = match difficulty {
            Difficulty::Normal => (150, 20, 10, 0, 0),
            Difficulty::Medium => (100, 20, 5, 12, 18),
            Difficulty::Hard => (70, 30, 2, 6, 10),
        };
        let mut bots = vec![(EntityTag::RedBot, RED_BOT_SPAWN)];
        if difficulty == Difficulty::Hard {
            bots.push((EntityTag::OrangeBot, ORANGE_BOT_SPAWN));
        }
        Self {
            difficulty,
            player_interval: Duration::from_millis(player_interval_ms(ai_ms)),
            ai_interval: Duration::from_millis(ai_ms),
            win_score,
            duration: MATCH_DURATION,
            wall_interval: Duration::from_secs(wall_s),
            poison_interval: Duration::from_secs(poison_s),
            trap_interval: Duration::from_secs(trap_s),
            bots,
        }
    }
}

/// The player runs 1.2x faster than the AI, rounded to the nearest millisecond.
const fn player_interval_ms(ai_ms: u64) -> u64 {
    (ai_ms * 10 + 6) / 12
}
