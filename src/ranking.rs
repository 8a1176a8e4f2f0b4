//! Ranking board collaborator.
//!
//! The board is read-only: a finished session only produces a candidate
//! submission that is shown next to the static top list.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{ReflexError, Result};
use crate::results::{GameKind, SessionSummary};

pub const MAX_NAME_LEN: usize = 20;
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    pub name: String,
    pub score: u32,
    pub accuracy: u32,
    pub date: NaiveDate,
}

/// Supplies the top list for a game
pub trait RankingSource {
    fn top(&self, game: GameKind) -> Vec<RankingEntry>;
}

/// Static leaderboard with fixed sample data
#[derive(Debug, Clone)]
pub struct MockRanking {
    typing: Vec<RankingEntry>,
    aim: Vec<RankingEntry>,
}

impl MockRanking {
    pub fn new() -> Self {
        Self {
            typing: rank_entries(vec![
                ("SpeedMaster", 2450, 98, (2024, 1, 15)),
                ("FastTyper", 2280, 95, (2024, 1, 14)),
                ("KeyboardNinja", 2150, 96, (2024, 1, 13)),
                ("TypePro", 2050, 92, (2024, 1, 12)),
                ("QuickFingers", 1980, 94, (2024, 1, 11)),
            ]),
            aim: rank_entries(vec![
                ("Sharpshooter", 3250, 97, (2024, 1, 15)),
                ("PrecisionKing", 3100, 95, (2024, 1, 14)),
                ("AimGod", 2950, 93, (2024, 1, 13)),
                ("TargetHunter", 2800, 91, (2024, 1, 12)),
                ("QuickShot", 2650, 89, (2024, 1, 11)),
            ]),
        }
    }
}

impl Default for MockRanking {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingSource for MockRanking {
    fn top(&self, game: GameKind) -> Vec<RankingEntry> {
        match game {
            GameKind::Typing => self.typing.clone(),
            GameKind::Aim => self.aim.clone(),
        }
    }
}

type RawEntry = (&'static str, u32, u32, (i32, u32, u32));

/// Orders by score descending and keeps the top window. Ranks are dense:
/// equal scores share a rank and the next distinct score takes the next one.
fn rank_entries(raw: Vec<RawEntry>) -> Vec<RankingEntry> {
    raw.into_iter()
        .filter_map(|(name, score, accuracy, (y, m, d))| {
            NaiveDate::from_ymd_opt(y, m, d).map(|date| (name, score, accuracy, date))
        })
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(TOP_N)
        .scan(None::<(u32, u32)>, |prev, (name, score, accuracy, date)| {
            let rank = match *prev {
                Some((prev_score, prev_rank)) if prev_score == score => prev_rank,
                Some((_, prev_rank)) => prev_rank + 1,
                None => 1,
            };
            *prev = Some((score, rank));
            Some(RankingEntry {
                rank,
                name: name.to_string(),
                score,
                accuracy,
                date,
            })
        })
        .collect()
}

/// A finished, named session offered to the ranking board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSubmission {
    pub game: GameKind,
    pub name: String,
    pub score: u32,
    pub accuracy: u32,
}

impl RankingSubmission {
    pub fn new(summary: &SessionSummary, name: &str) -> Result<Self> {
        let name = validate_name(name)?;
        Ok(Self {
            game: summary.game,
            name,
            score: summary.score,
            accuracy: summary.accuracy.min(100),
        })
    }
}

/// Trims `raw` and checks it is 1 to `MAX_NAME_LEN` characters long.
pub fn validate_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        tracing::debug!(name = raw, "rejected player name");
        return Err(ReflexError::InvalidName(raw.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Name entry field: at most `MAX_NAME_LEN` characters, submit only when non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameInput {
    value: String,
}

impl NameInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        let mut input = Self::new();
        for c in value.chars() {
            input.push(c);
        }
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Extra characters past the limit are dropped.
    pub fn push(&mut self, c: char) {
        if self.value.chars().count() < MAX_NAME_LEN {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn can_submit(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// The trimmed name, or `None` while the field is blank.
    pub fn submit(&self) -> Option<String> {
        validate_name(&self.value).ok()
    }
}

/// What the ranking screen shows: the top list plus the player's own result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingView {
    pub game: GameKind,
    pub entries: Vec<RankingEntry>,
    pub candidate: Option<RankingSubmission>,
}

impl RankingView {
    pub fn new<S: RankingSource>(
        source: &S,
        game: GameKind,
        candidate: Option<RankingSubmission>,
    ) -> Self {
        Self {
            game,
            entries: source.top(game),
            candidate: candidate.filter(|c| c.game == game),
        }
    }

    /// Where the candidate would place among the shown entries, if inside the window.
    pub fn candidate_position(&self) -> Option<u32> {
        let candidate = self.candidate.as_ref()?;
        let above: Vec<&RankingEntry> = self
            .entries
            .iter()
            .filter(|e| e.score > candidate.score)
            .collect();
        if above.len() >= TOP_N {
            return None;
        }
        let distinct_above = above.iter().map(|e| e.score).dedup().count();
        Some(distinct_above as u32 + 1)
    }
}
