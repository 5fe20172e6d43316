//! High-score persistence: one non-negative integer under a fixed key.
//!
//! Read once at startup, written whenever the current score beats the
//! stored value. Failures on either side are non-fatal: load degrades to
//! zero, save is skipped silently and the in-memory best survives the
//! session.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fixed storage key (a file name in the working directory by default).
pub const HIGH_SCORE_FILE: &str = "neotris_highscore.txt";

#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Open the store under the default key.
    pub fn open_default() -> Self {
        Self::open(HIGH_SCORE_FILE)
    }

    /// Open a store at `path`, reading the persisted best; any read or
    /// parse failure yields an in-memory zero.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = read_score(&path).unwrap_or(0);
        Self { path, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record `score` if it beats the stored best. Returns whether a new
    /// best was set; write failures keep the new best in memory only.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        let _ = write_score(&self.path, score);
        true
    }
}

fn read_score(path: &Path) -> io::Result<u32> {
    let text = fs::read_to_string(path)?;
    text.trim()
        .parse()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_score(path: &Path, score: u32) -> io::Result<()> {
    fs::write(path, score.to_string())
}
