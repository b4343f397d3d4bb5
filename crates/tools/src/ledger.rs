//! File-backed best-score ledger.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arena::{Difficulty, MemoryLedger, ScoreLedger};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const LEDGER_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to access ledger at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ledger at {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("ledger at {path} has unsupported format version {found}")]
    Version { path: PathBuf, found: u32 },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct LedgerFile {
    format_version: u32,
    scores: MemoryLedger,
}

/// Best scores kept in a JSON file, rewritten atomically on every new record.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    scores: MemoryLedger,
}

impl FileLedger {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "SnakeArena").map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("best_scores.json");
            path
        })
    }

    /// Loads `path`, starting empty when the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Self { path, scores: MemoryLedger::default() });
            }
            Err(source) => return Err(LedgerError::Io { path, source }),
        };
        let file: LedgerFile = match serde_json::from_str(&raw) {
            Ok(file) => file,
            Err(source) => return Err(LedgerError::Parse { path, source }),
        };
        if file.format_version != LEDGER_FORMAT_VERSION {
            return Err(LedgerError::Version { path, found: file.format_version });
        }
        Ok(Self { path, scores: file.scores })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let file =
            LedgerFile { format_version: LEDGER_FORMAT_VERSION, scores: self.scores.clone() };
        write_atomic(&self.path, &file)
            .map_err(|source| LedgerError::Io { path: self.path.clone(), source })
    }
}

impl ScoreLedger for FileLedger {
    fn best_score(&self, tier: Difficulty) -> u32 {
        self.scores.best_score(tier)
    }

    fn record_if_best(&mut self, tier: Difficulty, score: u32) -> bool {
        if !self.scores.record_if_best(tier, score) {
            return false;
        }
        if let Err(err) = self.save() {
            tracing::warn!(error = %err, "best score kept in memory only");
        }
        true
    }
}

fn write_atomic(path: &Path, file: &LedgerFile) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(file).map_err(io::Error::other)?;

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
