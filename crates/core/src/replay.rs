use std::time::Duration;

use thiserror::Error;

use crate::{
    MatchPhase,
    game::Game,
    journal::{InputJournal, InputPayload, JOURNAL_FORMAT_VERSION},
};

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("journal format {found} is not supported")]
    UnsupportedVersion { found: u16 },
    #[error("journal was recorded over a hand-built arena")]
    CustomArena,
    #[error("journal record {found} is out of sequence (expected {expected})")]
    OutOfSequence { expected: u64, found: u64 },
    #[error("journal ended while the match was still {phase:?}")]
    Unfinished { phase: MatchPhase },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_phase: MatchPhase,
    pub final_snapshot_hash: u64,
    pub final_elapsed: Duration,
    pub player_score: u32,
}

/// Re-runs a recorded standard match from its seed. The journal must carry
/// the match all the way to a finish or an abort.
pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion { found: journal.format_version });
    }
    if !journal.standard_arena {
        return Err(ReplayError::CustomArena);
    }
    let mut game = Game::new(journal.seed, journal.difficulty);

    for (expected, record) in (0u64..).zip(&journal.inputs) {
        if record.seq != expected {
            return Err(ReplayError::OutOfSequence { expected, found: record.seq });
        }
        match &record.payload {
            InputPayload::Advance { dt } => {
                game.advance(*dt);
            }
            InputPayload::Steer { direction } => {
                // Rejected inputs were rejected live too.
                let _ = game.steer(*direction);
            }
            InputPayload::TogglePause => {
                game.toggle_pause();
            }
            InputPayload::Abort => game.abort(),
        }
    }

    match game.phase() {
        phase @ (MatchPhase::Finished(_) | MatchPhase::Aborted) => Ok(ReplayResult {
            final_phase: phase,
            final_snapshot_hash: game.snapshot_hash(),
            final_elapsed: game.elapsed(),
            player_score: game.player_score(),
        }),
        phase => Err(ReplayError::Unfinished { phase }),
    }
}
