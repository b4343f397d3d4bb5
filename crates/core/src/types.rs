use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub const fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal heading. Screen coordinates: `Up` decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Candidate order used by every neighbor scan.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn between(from: Pos, to: Pos) -> Option<Self> {
        Self::ALL.into_iter().find(|direction| from.step(*direction) == to)
    }
}

/// Competitor identity. Declaration order is creation order and doubles as the
/// time-expiry tie-break rank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityTag {
    Player,
    RedBot,
    OrangeBot,
}

impl EntityTag {
    pub const fn is_player(self) -> bool {
        matches!(self, Self::Player)
    }

    pub const fn group(self) -> TickGroup {
        match self {
            Self::Player => TickGroup::Player,
            Self::RedBot | Self::OrangeBot => TickGroup::Ai,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickGroup {
    Player,
    Ai,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Scores a point and grows the eater by one cell.
    Apple,
    /// Kills whoever eats it.
    Poison,
    /// Reverses the eater's controls for a while.
    Trap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Normal,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Normal, Difficulty::Medium, Difficulty::Hard];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeathCause {
    OutOfBounds,
    Hazard,
    Collision,
    HeadOn,
    Poison,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    ScoreTarget,
    PlayerEliminated,
    TimeExpired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    Victory { reason: EndReason },
    Defeat { reason: EndReason, winner: Option<EntityTag> },
}

impl MatchOutcome {
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory { .. })
    }

    pub const fn reason(self) -> EndReason {
        match self {
            Self::Victory { reason } | Self::Defeat { reason, .. } => reason,
        }
    }

    pub const fn winner(self) -> Option<EntityTag> {
        match self {
            Self::Victory { .. } => Some(EntityTag::Player),
            Self::Defeat { winner, .. } => winner,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchPhase {
    Countdown,
    Running,
    Paused,
    Finished(MatchOutcome),
    Aborted,
}

/// Discrete notifications for presentation and audio layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CountdownTick { remaining: u8 },
    MatchStarted,
    ItemEaten { entity: EntityTag, kind: ItemKind, at: Pos },
    ItemSpawned { kind: ItemKind, at: Pos },
    EntityDied { entity: EntityTag, at: Pos, cause: DeathCause },
    EntityRespawned { entity: EntityTag, at: Pos },
    HazardWarning { at: Pos },
    HazardActivated { at: Pos },
    ControlsReversed { entity: EntityTag },
    ControlsRestored { entity: EntityTag },
    Paused,
    Resumed,
    MatchEnded { outcome: MatchOutcome },
    MatchAborted,
    NewBestScore { difficulty: Difficulty, score: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Countdown { remaining: Duration },
    Paused,
    FrameComplete,
    Finished(MatchOutcome),
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub player_ticks: u32,
    pub ai_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}

/// Why a steering input was dropped. The buffered heading is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InputRejected {
    #[error("match is not accepting input")]
    NotRunning,
    #[error("player is no longer alive")]
    PlayerDead,
    #[error("cannot reverse from {current:?} to {requested:?}")]
    Reversal { current: Direction, requested: Direction },
}
