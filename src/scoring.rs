//! Pure scoring formulas for both mini-games.

/// Points removed for a click on the aim background. Score never drops below zero.
pub const AIM_MISS_PENALTY: u32 = 10;

/// Reaction times at or above this many milliseconds earn no speed bonus.
pub const AIM_SPEED_WINDOW_MS: u64 = 1000;

/// Points for hitting an aim target of diameter `size` after `reaction_ms`.
///
/// Smaller targets pay more (`50 * 100 / size`) and fast reactions add up to
/// 100 bonus points (`(1000 - reaction) / 10`).
pub fn aim_hit_points(size: f64, reaction_ms: u64) -> u32 {
    let size_multiplier = 100.0 / size;
    let speed_bonus = AIM_SPEED_WINDOW_MS.saturating_sub(reaction_ms) as f64 / 10.0;
    (50.0 * size_multiplier + speed_bonus).round().max(0.0) as u32
}

/// Points for completing a word of `word_len` characters in `time_taken_secs`.
///
/// `had_error` is whether any mismatch was typed during this word's attempt.
pub fn typing_word_points(word_len: usize, time_taken_secs: f64, had_error: bool) -> u32 {
    let base_score = word_len as f64 * 10.0;
    let time_bonus = (50.0 - time_taken_secs * 5.0).max(0.0);
    let error_penalty = if had_error { -20.0 } else { 0.0 };
    (base_score + time_bonus + error_penalty).round().max(0.0) as u32
}

/// Applies the background-miss penalty, flooring at zero.
pub fn apply_miss_penalty(score: u32) -> u32 {
    score.saturating_sub(AIM_MISS_PENALTY)
}
