use crate::results::{GameKind, SessionSummary};
use crate::scheduler::{Scheduler, TaskKind};

/// Length of a session in countdown units (seconds).
pub const SESSION_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ready,
    Playing,
    Finished,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub duration_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: SESSION_SECS,
        }
    }
}

/// State shared by every mini-game: lifecycle, score, counters and countdown.
///
/// Every mutator is a no-op unless the session is `Playing`.
#[derive(Debug, Clone)]
pub struct SessionCore {
    config: SessionConfig,
    state: GameState,
    score: u32,
    successes: u32,
    failures: u32,
    remaining_secs: u32,
    epoch: u64,
    started_at_ms: u64,
}

impl SessionCore {
    pub fn new(config: SessionConfig) -> Self {
        let remaining_secs = config.duration_secs;
        Self {
            config,
            state: GameState::Ready,
            score: 0,
            successes: 0,
            failures: 0,
            remaining_secs,
            epoch: 0,
            started_at_ms: 0,
        }
    }

    /// Resets all counters and enters `Playing`. Valid from any state.
    /// Returns the new session epoch.
    pub fn start(&mut self, now_ms: u64) -> u64 {
        self.epoch += 1;
        self.state = GameState::Playing;
        self.score = 0;
        self.successes = 0;
        self.failures = 0;
        self.remaining_secs = self.config.duration_secs;
        self.started_at_ms = now_ms;
        tracing::info!(epoch = self.epoch, secs = self.remaining_secs, "session started");
        self.epoch
    }

    /// Whether a timer callback tagged with `epoch` may still act on this session.
    pub fn accepts(&self, epoch: u64) -> bool {
        self.state == GameState::Playing && epoch == self.epoch
    }

    /// One countdown unit. Returns true when this tick finished the session.
    pub fn countdown(&mut self, epoch: u64) -> bool {
        if !self.accepts(epoch) {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.state = GameState::Finished;
            tracing::info!(
                epoch = self.epoch,
                score = self.score,
                successes = self.successes,
                failures = self.failures,
                "session finished"
            );
            return true;
        }
        false
    }

    pub fn record_success(&mut self, points: u32) {
        if self.is_playing() {
            self.score = self.score.saturating_add(points);
            self.successes += 1;
        }
    }

    /// Counts a failure and removes `penalty` points, flooring at zero.
    pub fn record_failure(&mut self, penalty: u32) {
        if self.is_playing() {
            self.failures += 1;
            self.score = self.score.saturating_sub(penalty);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    pub fn summary(&self, game: GameKind) -> SessionSummary {
        SessionSummary::new(
            game,
            self.score,
            self.successes,
            self.failures,
            self.remaining_secs,
        )
    }
}

impl Default for SessionCore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// A timed mini-game driven by periodic tasks
pub trait GameSession {
    fn kind(&self) -> GameKind;

    fn core(&self) -> &SessionCore;

    /// Resets the game and enters `Playing`, returning the new epoch.
    fn start(&mut self, now_ms: u64) -> u64;

    /// Periodic tasks to arm on start, as `(kind, interval_ms)`.
    fn periodic_tasks(&self) -> &'static [(TaskKind, u64)];

    fn on_countdown(&mut self, epoch: u64);

    fn on_spawn(&mut self, _epoch: u64, _now_ms: u64) {}

    fn state(&self) -> GameState {
        self.core().state()
    }

    fn summary(&self) -> SessionSummary {
        self.core().summary(self.kind())
    }
}

/// Owns a game together with its timers.
///
/// Timers are cancelled the moment the game leaves `Playing`, on `teardown`
/// and when the driver is dropped.
#[derive(Debug)]
pub struct SessionDriver<G: GameSession> {
    game: G,
    scheduler: Scheduler,
}

impl<G: GameSession> SessionDriver<G> {
    pub fn new(game: G) -> Self {
        Self {
            game,
            scheduler: Scheduler::new(),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Player actions go straight to the game; it guards its own state.
    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn start(&mut self, now_ms: u64) -> u64 {
        self.scheduler.cancel_all();
        let epoch = self.game.start(now_ms);
        for &(kind, interval_ms) in self.game.periodic_tasks() {
            self.scheduler.arm(kind, interval_ms, epoch, now_ms);
        }
        epoch
    }

    /// Dispatches every timer firing due by `now_ms`. Returns how many were delivered.
    pub fn advance(&mut self, now_ms: u64) -> usize {
        let mut delivered = 0;
        for firing in self.scheduler.poll(now_ms) {
            if !self.game.core().is_playing() {
                break;
            }
            match firing.kind {
                TaskKind::Countdown => self.game.on_countdown(firing.epoch),
                TaskKind::Spawn => self.game.on_spawn(firing.epoch, firing.due_ms),
            }
            delivered += 1;
        }
        if !self.game.core().is_playing() {
            self.scheduler.cancel_all();
        }
        delivered
    }

    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
    }

    pub fn has_active_timers(&self) -> bool {
        !self.scheduler.is_idle()
    }
}

impl<G: GameSession> Drop for SessionDriver<G> {
    fn drop(&mut self) {
        self.scheduler.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_core_is_ready() {
        let core = SessionCore::default();
        assert_eq!(core.state(), GameState::Ready);
        assert_eq!(core.remaining_secs(), SESSION_SECS);
        assert_eq!(core.epoch(), 0);
    }

    #[test]
    fn test_mutations_ignored_unless_playing() {
        let mut core = SessionCore::default();
        core.record_success(50);
        core.record_failure(10);
        assert_eq!(core.score(), 0);
        assert_eq!(core.successes(), 0);
        assert_eq!(core.failures(), 0);
    }

    #[test]
    fn test_start_resets_everything() {
        let mut core = SessionCore::default();
        let first = core.start(0);
        core.record_success(120);
        core.record_failure(10);
        core.countdown(first);

        let second = core.start(5000);
        assert_eq!(second, first + 1);
        assert_eq!(core.state(), GameState::Playing);
        assert_eq!(core.score(), 0);
        assert_eq!(core.successes(), 0);
        assert_eq!(core.failures(), 0);
        assert_eq!(core.remaining_secs(), SESSION_SECS);
        assert_eq!(core.started_at_ms(), 5000);
    }

    #[test]
    fn test_countdown_finishes_exactly_once() {
        let mut core = SessionCore::new(SessionConfig { duration_secs: 3 });
        let epoch = core.start(0);
        assert!(!core.countdown(epoch));
        assert!(!core.countdown(epoch));
        assert!(core.countdown(epoch));
        assert_eq!(core.state(), GameState::Finished);
        assert_eq!(core.remaining_secs(), 0);

        assert!(!core.countdown(epoch));
        assert_eq!(core.remaining_secs(), 0);
    }

    #[test]
    fn test_stale_epoch_is_ignored() {
        let mut core = SessionCore::new(SessionConfig { duration_secs: 5 });
        let old = core.start(0);
        let _new = core.start(10);
        assert!(!core.countdown(old));
        assert_eq!(core.remaining_secs(), 5);
    }

    #[test]
    fn test_failure_penalty_floors_at_zero() {
        let mut core = SessionCore::default();
        core.start(0);
        core.record_success(15);
        for _ in 0..5 {
            core.record_failure(10);
        }
        assert_eq!(core.score(), 0);
        assert_eq!(core.failures(), 5);
    }
}
