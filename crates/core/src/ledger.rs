//! Best-score persistence seam.
//! This module exists so the engine can hand a final score to whatever store
//! the host provides. It does not own any file or storage format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Difficulty;

/// Best score per difficulty tier.
pub trait ScoreLedger {
    fn best_score(&self, tier: Difficulty) -> u32;

    /// Stores `score` when it beats the current best. Returns whether it did.
    fn record_if_best(&mut self, tier: Difficulty, score: u32) -> bool;
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLedger {
    pub best: BTreeMap<Difficulty, u32>,
}

impl ScoreLedger for MemoryLedger {
    fn best_score(&self, tier: Difficulty) -> u32 {
        self.best.get(&tier).copied().unwrap_or(0)
    }

    fn record_if_best(&mut self, tier: Difficulty, score: u32) -> bool {
        if score <= self.best_score(tier) {
            return false;
        }
        self.best.insert(tier, score);
        true
    }
}
