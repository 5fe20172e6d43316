//! Progression tracker - score, lines, level and the derived fall speed.
//!
//! Level and fall interval are always recomputed from the line total;
//! they are never set independently. Scoring is deliberately linear in
//! the number of rows cleared (no quadratic multi-line bonus, no combo
//! chains) - a simplification carried over from the source ruleset, not
//! an oversight.

use crate::types::{
    HARD_DROP_BONUS, INITIAL_FALL_INTERVAL_MS, LEVEL_SPEEDUP_MS, LINES_PER_LEVEL,
    MIN_FALL_INTERVAL_MS, POINTS_PER_LINE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u32,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Record a sweep that cleared `n > 0` rows.
    ///
    /// The score credit uses the level in effect *before* the new lines
    /// are counted; level and fall interval are then recomputed from the
    /// updated total.
    pub fn apply_clear(&mut self, n: u32) {
        debug_assert!(n > 0, "apply_clear called with no cleared rows");
        self.lines += n;
        self.score = self.score.saturating_add(n * POINTS_PER_LINE * self.level);
        self.level = self.lines / LINES_PER_LEVEL + 1;
        self.fall_interval_ms = INITIAL_FALL_INTERVAL_MS
            .saturating_sub((self.level - 1) * LEVEL_SPEEDUP_MS)
            .max(MIN_FALL_INTERVAL_MS);
    }

    /// Credit the hard-drop bonus for `rows` descended.
    pub fn add_drop_bonus(&mut self, rows: u32) {
        self.score = self.score.saturating_add(rows * HARD_DROP_BONUS);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
