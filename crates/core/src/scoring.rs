//! Scoring module - classic line-clear scoring, score-derived levels and gravity
//!
//! - A lock that clears `n` rows awards `table[n] * level` (n clamps to 4).
//! - Level is `score / points_per_level + 1`, so it starts at 1.
//! - Gravity period is `base_ms / level`, never below 1ms.

use crate::types::{BASE_TICK_MS, LINE_SCORES, POINTS_PER_LEVEL};

/// Calculate line clear score against a score table
/// lines: number of lines cleared by one lock
/// level: current level (1-based)
pub fn calculate_line_score(table: &[u32; 5], lines: u32, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = table[lines.min(4) as usize];
    base.saturating_mul(level)
}

/// Classic table shortcut for [`calculate_line_score`].
pub fn classic_line_score(lines: u32, level: u32) -> u32 {
    calculate_line_score(&LINE_SCORES, lines, level)
}

/// Level for a score
pub fn calculate_level(score: u32, points_per_level: u32) -> u32 {
    score / points_per_level.max(1) + 1
}

/// Gravity period for a level, in milliseconds
pub fn tick_period_ms(level: u32, base_ms: u32) -> u32 {
    (base_ms / level.max(1)).max(1)
}

/// Score bookkeeping after one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub awarded: u32,
    pub score: u32,
    pub level: u32,
    pub level_changed: bool,
}

/// Apply a clear of `lines` rows to `score` at `level`.
pub fn apply_clear(
    table: &[u32; 5],
    points_per_level: u32,
    score: u32,
    level: u32,
    lines: u32,
) -> ScoreResult {
    let awarded = calculate_line_score(table, lines, level);
    let score = score.saturating_add(awarded);
    let new_level = calculate_level(score, points_per_level);
    ScoreResult {
        awarded,
        score,
        level: new_level,
        level_changed: new_level != level,
    }
}

/// Classic defaults for [`tick_period_ms`] and [`calculate_level`].
pub fn classic_tick_period_ms(level: u32) -> u32 {
    tick_period_ms(level, BASE_TICK_MS)
}

pub fn classic_level(score: u32) -> u32 {
    calculate_level(score, POINTS_PER_LEVEL)
}
