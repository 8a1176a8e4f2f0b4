use serde::{Deserialize, Serialize};

/// Which mini-game a session or ranking belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameKind {
    Typing,
    Aim,
}

impl GameKind {
    pub const ALL: [GameKind; 2] = [GameKind::Typing, GameKind::Aim];

    /// Accuracy reported before any attempt was made.
    ///
    /// The two games disagree here (aim reports 0, typing reports 100); both
    /// are kept as-is.
    pub fn default_accuracy(self) -> u32 {
        match self {
            GameKind::Typing => 100,
            GameKind::Aim => 0,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            GameKind::Typing => "Speed Typing",
            GameKind::Aim => "Aim Trainer",
        }
    }
}

/// Percentage of successful actions, rounded, or `default` with no attempts.
pub fn accuracy(successes: u32, failures: u32, default: u32) -> u32 {
    let attempts = successes as u64 + failures as u64;
    if attempts == 0 {
        return default;
    }
    (100.0 * successes as f64 / attempts as f64).round() as u32
}

/// Snapshot of a session's counters, valid at any point of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub game: GameKind,
    pub score: u32,
    pub successes: u32,
    pub failures: u32,
    pub accuracy: u32,
    pub remaining_secs: u32,
}

impl SessionSummary {
    pub fn new(
        game: GameKind,
        score: u32,
        successes: u32,
        failures: u32,
        remaining_secs: u32,
    ) -> Self {
        Self {
            game,
            score,
            successes,
            failures,
            accuracy: accuracy(successes, failures, game.default_accuracy()),
            remaining_secs,
        }
    }
}
