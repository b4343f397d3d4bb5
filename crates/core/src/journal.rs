use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{Difficulty, Direction};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every host call that mutates a match, in order. Seed plus journal
/// reproduces the match exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub difficulty: Difficulty,
    /// False for matches built from a hand-made arena; those cannot be replayed.
    pub standard_arena: bool,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    Advance { dt: Duration },
    Steer { direction: Direction },
    TogglePause,
    Abort,
}

impl InputJournal {
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            seed,
            difficulty,
            standard_arena: false,
            inputs: Vec::new(),
        }
    }

    pub fn record(&mut self, payload: InputPayload) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, payload });
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
