use include_dir::{include_dir, Dir};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::Result;
use crate::results::GameKind;
use crate::scheduler::{TaskKind, COUNTDOWN_INTERVAL_MS};
use crate::scoring::typing_word_points;
use crate::session::{GameSession, SessionConfig, SessionCore};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

const TYPING_TASKS: &[(TaskKind, u64)] = &[(TaskKind::Countdown, COUNTDOWN_INTERVAL_MS)];

/// Fixed list of words a typing session draws from
#[derive(Deserialize, Clone, Debug)]
pub struct WordPool {
    pub name: String,
    pub words: Vec<String>,
}

impl WordPool {
    /// The built-in Spanish pool.
    pub fn builtin() -> Self {
        Self::load_or_fallback("spanish")
    }

    /// Loads an embedded pool, falling back to a single word if it is unreadable.
    pub fn load_or_fallback(name: &str) -> Self {
        Self::load(name).unwrap_or_else(|err| {
            tracing::warn!(pool = name, %err, "unreadable word pool, using fallback");
            Self::from_words("fallback", ["juego"])
        })
    }

    pub fn load(name: &str) -> Result<Self> {
        let file_name = format!("{name}.json");
        let contents = WORDS_DIR
            .get_file(&file_name)
            .and_then(|f| f.contents_utf8())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("word pool {file_name} not found"),
                )
            })?;
        let pool: WordPool = serde_json::from_str(contents)?;
        Ok(pool)
    }

    pub fn from_words<I, S>(name: &str, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

/// What an input change did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Completed { points: u32 },
    Mismatch,
    Progress,
    Ignored,
}

#[derive(Debug)]
pub struct TypingSession {
    core: SessionCore,
    pool: WordPool,
    current_word: String,
    input: String,
    attempt_started_at_ms: u64,
    word_had_error: bool,
    rng: StdRng,
}

impl TypingSession {
    pub fn new(config: SessionConfig, pool: WordPool) -> Self {
        Self::with_rng(config, pool, StdRng::from_entropy())
    }

    pub fn with_seed(config: SessionConfig, pool: WordPool, seed: u64) -> Self {
        Self::with_rng(config, pool, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, pool: WordPool, rng: StdRng) -> Self {
        Self {
            core: SessionCore::new(config),
            pool,
            current_word: String::new(),
            input: String::new(),
            attempt_started_at_ms: 0,
            word_had_error: false,
            rng,
        }
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn word_had_error(&self) -> bool {
        self.word_had_error
    }

    fn draw_word(&mut self, now_ms: u64) {
        self.current_word = self
            .pool
            .words
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        self.input.clear();
        self.attempt_started_at_ms = now_ms;
        self.word_had_error = false;
    }

    /// Handles the full input buffer after every change.
    ///
    /// Only an exact match completes the word; a non-empty buffer that is not
    /// a prefix of the word counts as an error, every time it happens.
    pub fn on_input(&mut self, buffer: &str, now_ms: u64) -> InputOutcome {
        if !self.core.is_playing() {
            return InputOutcome::Ignored;
        }
        self.input = buffer.to_string();

        if !self.current_word.is_empty() && buffer == self.current_word {
            let secs = now_ms.saturating_sub(self.attempt_started_at_ms) as f64 / 1000.0;
            let points = typing_word_points(
                self.current_word.chars().count(),
                secs,
                self.word_had_error,
            );
            self.core.record_success(points);
            tracing::debug!(word = %self.current_word, points, secs, "word completed");
            self.draw_word(now_ms);
            InputOutcome::Completed { points }
        } else if !buffer.is_empty() && !self.current_word.starts_with(buffer) {
            self.core.record_failure(0);
            self.word_had_error = true;
            InputOutcome::Mismatch
        } else {
            InputOutcome::Progress
        }
    }

    /// Appends one typed character to the buffer.
    pub fn type_char(&mut self, c: char, now_ms: u64) -> InputOutcome {
        let mut buffer = self.input.clone();
        buffer.push(c);
        self.on_input(&buffer, now_ms)
    }

    /// Removes the last character of the buffer.
    pub fn backspace(&mut self, now_ms: u64) -> InputOutcome {
        if self.input.is_empty() {
            return InputOutcome::Ignored;
        }
        let mut buffer = self.input.clone();
        buffer.pop();
        self.on_input(&buffer, now_ms)
    }
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new(SessionConfig::default(), WordPool::builtin())
    }
}

impl GameSession for TypingSession {
    fn kind(&self) -> GameKind {
        GameKind::Typing
    }

    fn core(&self) -> &SessionCore {
        &self.core
    }

    fn start(&mut self, now_ms: u64) -> u64 {
        let epoch = self.core.start(now_ms);
        self.draw_word(now_ms);
        epoch
    }

    fn periodic_tasks(&self) -> &'static [(TaskKind, u64)] {
        TYPING_TASKS
    }

    fn on_countdown(&mut self, epoch: u64) {
        self.core.countdown(epoch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameState;

    fn single_word(word: &str) -> TypingSession {
        let mut s =
            TypingSession::with_seed(SessionConfig::default(), WordPool::from_words("t", [word]), 1);
        s.start(0);
        s
    }

    fn type_str(s: &mut TypingSession, text: &str, now_ms: u64) -> InputOutcome {
        let mut last = InputOutcome::Ignored;
        for c in text.chars() {
            last = s.type_char(c, now_ms);
        }
        last
    }

    #[test]
    fn test_builtin_pool_loads() {
        let pool = WordPool::load("spanish").unwrap();
        assert_eq!(pool.name, "spanish");
        assert_eq!(pool.words.len(), 34);
        assert!(pool.words.iter().any(|w| w == "juego"));
    }

    #[test]
    fn test_missing_pool_is_error() {
        assert!(WordPool::load("klingon").is_err());
    }

    #[test]
    fn test_missing_pool_falls_back_to_one_word() {
        let pool = WordPool::load_or_fallback("klingon");
        assert_eq!(pool.name, "fallback");
        assert_eq!(pool.words, vec!["juego".to_string()]);
        assert_eq!(WordPool::load_or_fallback("spanish").words.len(), 34);
    }

    #[test]
    fn test_start_draws_a_word() {
        let mut s = TypingSession::with_seed(SessionConfig::default(), WordPool::builtin(), 9);
        assert_eq!(s.current_word(), "");
        s.start(0);
        assert!(WordPool::builtin()
            .words
            .iter()
            .any(|w| w == s.current_word()));
    }

    #[test]
    fn test_reference_completion_scores_90() {
        let mut s = single_word("juego");
        assert_eq!(
            s.on_input("juego", 2000),
            InputOutcome::Completed { points: 90 }
        );
        assert_eq!(s.core().score(), 90);
        assert_eq!(s.core().successes(), 1);
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_prefix_is_progress_not_error() {
        let mut s = single_word("juego");
        assert_eq!(type_str(&mut s, "jueg", 100), InputOutcome::Progress);
        assert_eq!(s.core().failures(), 0);
        assert_eq!(s.core().successes(), 0);
    }

    #[test]
    fn test_every_bad_keystroke_counts() {
        let mut s = single_word("juego");
        s.type_char('j', 10);
        assert_eq!(s.type_char('x', 20), InputOutcome::Mismatch);
        assert_eq!(s.type_char('y', 30), InputOutcome::Mismatch);
        assert_eq!(s.core().failures(), 2);
        assert!(s.word_had_error());
    }

    #[test]
    fn test_error_penalty_applies_to_corrected_word() {
        let mut s = single_word("juego");
        s.on_input("x", 100);
        s.on_input("", 200);
        assert_eq!(
            s.on_input("juego", 2000),
            InputOutcome::Completed { points: 70 }
        );
        // the next word starts clean
        assert!(!s.word_had_error());
        assert_eq!(
            s.on_input("juego", 4000),
            InputOutcome::Completed { points: 90 }
        );
    }

    #[test]
    fn test_attempt_timer_resets_per_word() {
        let mut s = single_word("poder");
        s.on_input("poder", 10_000); // 50 + 0
        assert_eq!(s.core().score(), 50);
        s.on_input("poder", 11_000); // 50 + 45
        assert_eq!(s.core().score(), 145);
    }

    #[test]
    fn test_backspace_on_empty_is_ignored() {
        let mut s = single_word("ganar");
        assert_eq!(s.backspace(0), InputOutcome::Ignored);
        s.type_char('g', 0);
        assert_eq!(s.backspace(0), InputOutcome::Progress);
        assert_eq!(s.input(), "");
    }

    #[test]
    fn test_input_ignored_when_not_playing() {
        let mut s =
            TypingSession::with_seed(SessionConfig::default(), WordPool::from_words("t", ["a"]), 1);
        assert_eq!(s.on_input("a", 0), InputOutcome::Ignored);
        assert_eq!(s.state(), GameState::Ready);
    }

    #[test]
    fn test_accuracy_defaults_to_100() {
        let s = single_word("juego");
        assert_eq!(s.summary().accuracy, 100);
    }
}
