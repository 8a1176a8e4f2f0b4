use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::results::GameKind;
use crate::scheduler::{TaskKind, COUNTDOWN_INTERVAL_MS, SPAWN_INTERVAL_MS};
use crate::scoring::{aim_hit_points, AIM_MISS_PENALTY};
use crate::session::{GameSession, SessionConfig, SessionCore};

pub const MAX_ACTIVE_TARGETS: usize = 3;
pub const MIN_TARGET_SIZE: f64 = 40.0;
pub const MAX_TARGET_SIZE: f64 = 70.0;

const AIM_TASKS: &[(TaskKind, u64)] = &[
    (TaskKind::Countdown, COUNTDOWN_INTERVAL_MS),
    (TaskKind::Spawn, SPAWN_INTERVAL_MS),
];

/// Measured size of the play area, in the same units as target sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

impl PlayArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn fits(&self, size: f64) -> bool {
        size <= self.width && size <= self.height
    }

    fn holds(&self, target: &Target) -> bool {
        target.x + target.size <= self.width && target.y + target.size <= self.height
    }
}

/// A round target. `x`/`y` is the top-left corner of its bounding square.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub created_at_ms: u64,
}

impl Target {
    pub fn center(&self) -> (f64, f64) {
        let r = self.size / 2.0;
        (self.x + r, self.y + r)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (cx, cy) = self.center();
        let r = self.size / 2.0;
        (px - cx).powi(2) + (py - cy).powi(2) <= r * r
    }
}

/// What a click did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Hit { points: u32 },
    Miss,
    Ignored,
}

#[derive(Debug)]
pub struct AimSession {
    core: SessionCore,
    targets: Vec<Target>,
    next_id: u64,
    area: Option<PlayArea>,
    rng: StdRng,
}

impl AimSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, rng: StdRng) -> Self {
        Self {
            core: SessionCore::new(config),
            targets: Vec::new(),
            next_id: 0,
            area: None,
            rng,
        }
    }

    /// Records the play-area size once the front end has laid it out.
    /// Targets that no longer fit the new area are dropped.
    pub fn set_area(&mut self, area: Option<PlayArea>) {
        let before = self.targets.len();
        match area {
            Some(area) => self.targets.retain(|t| area.holds(t)),
            None => self.targets.clear(),
        }
        let dropped = before - self.targets.len();
        if dropped > 0 {
            tracing::debug!(dropped, ?area, "dropped targets outside resized play area");
        }
        self.area = area;
    }

    pub fn area(&self) -> Option<PlayArea> {
        self.area
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Spawns one target if fewer than the cap are active.
    pub fn spawn(&mut self, now_ms: u64) -> Option<u64> {
        if !self.core.is_playing() || self.targets.len() >= MAX_ACTIVE_TARGETS {
            return None;
        }
        let Some(area) = self.area else {
            tracing::debug!("play area not measured yet, skipping spawn");
            return None;
        };

        let size = self.rng.gen_range(MIN_TARGET_SIZE..=MAX_TARGET_SIZE);
        if !area.fits(size) {
            tracing::debug!(size, ?area, "target does not fit play area, skipping spawn");
            return None;
        }
        let x = self.rng.gen_range(0.0..=area.width - size);
        let y = self.rng.gen_range(0.0..=area.height - size);

        let id = self.next_id;
        self.next_id += 1;
        self.targets.push(Target {
            id,
            x,
            y,
            size,
            created_at_ms: now_ms,
        });
        tracing::trace!(id, x, y, size, "target spawned");
        Some(id)
    }

    /// Scores a click on target `id`. Unknown ids are ignored.
    pub fn click_target(&mut self, id: u64, now_ms: u64) -> ClickOutcome {
        if !self.core.is_playing() {
            return ClickOutcome::Ignored;
        }
        let Some(idx) = self.targets.iter().position(|t| t.id == id) else {
            return ClickOutcome::Ignored;
        };
        let target = self.targets.remove(idx);
        let reaction_ms = now_ms.saturating_sub(target.created_at_ms);
        let points = aim_hit_points(target.size, reaction_ms);
        self.core.record_success(points);
        ClickOutcome::Hit { points }
    }

    /// A click that landed on no target.
    pub fn click_background(&mut self) -> ClickOutcome {
        if !self.core.is_playing() {
            return ClickOutcome::Ignored;
        }
        self.core.record_failure(AIM_MISS_PENALTY);
        ClickOutcome::Miss
    }

    /// Topmost (most recently spawned) target under the point.
    pub fn target_at(&self, x: f64, y: f64) -> Option<u64> {
        self.targets
            .iter()
            .rev()
            .find(|t| t.contains(x, y))
            .map(|t| t.id)
    }

    /// Routes a click at `(x, y)` to a hit or a miss.
    pub fn click_at(&mut self, x: f64, y: f64, now_ms: u64) -> ClickOutcome {
        match self.target_at(x, y) {
            Some(id) => self.click_target(id, now_ms),
            None => self.click_background(),
        }
    }
}

impl Default for AimSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl GameSession for AimSession {
    fn kind(&self) -> GameKind {
        GameKind::Aim
    }

    fn core(&self) -> &SessionCore {
        &self.core
    }

    fn start(&mut self, now_ms: u64) -> u64 {
        self.targets.clear();
        self.next_id = 0;
        self.core.start(now_ms)
    }

    fn periodic_tasks(&self) -> &'static [(TaskKind, u64)] {
        AIM_TASKS
    }

    fn on_countdown(&mut self, epoch: u64) {
        self.core.countdown(epoch);
    }

    fn on_spawn(&mut self, epoch: u64, now_ms: u64) {
        if self.core.accepts(epoch) {
            self.spawn(now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GameState;
    use assert_matches::assert_matches;

    fn playing_session() -> AimSession {
        let mut aim = AimSession::with_seed(SessionConfig::default(), 7);
        aim.set_area(Some(PlayArea::new(800.0, 500.0)));
        aim.start(0);
        aim
    }

    fn place(aim: &mut AimSession, x: f64, y: f64, size: f64, created_at_ms: u64) -> u64 {
        let id = aim.next_id;
        aim.next_id += 1;
        aim.targets.push(Target {
            id,
            x,
            y,
            size,
            created_at_ms,
        });
        id
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut aim = playing_session();
        for t in 0..10 {
            aim.spawn(t * 800);
        }
        assert_eq!(aim.targets().len(), MAX_ACTIVE_TARGETS);
    }

    #[test]
    fn test_spawn_ids_strictly_increase() {
        let mut aim = playing_session();
        let a = aim.spawn(0).unwrap();
        let b = aim.spawn(1).unwrap();
        aim.click_target(a, 2);
        let c = aim.spawn(3).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_spawned_targets_stay_in_bounds() {
        let mut aim = AimSession::with_seed(SessionConfig::default(), 42);
        let area = PlayArea::new(120.0, 75.0);
        aim.set_area(Some(area));
        aim.start(0);
        for i in 0..500 {
            if let Some(id) = aim.spawn(i) {
                let t = aim.targets().iter().find(|t| t.id == id).unwrap().clone();
                assert!((MIN_TARGET_SIZE..=MAX_TARGET_SIZE).contains(&t.size));
                assert!(t.x >= 0.0 && t.x + t.size <= area.width);
                assert!(t.y >= 0.0 && t.y + t.size <= area.height);
                aim.click_target(id, i);
            }
        }
    }

    #[test]
    fn test_shrinking_area_drops_out_of_bounds_targets() {
        let mut aim = AimSession::with_seed(SessionConfig::default(), 9);
        aim.set_area(Some(PlayArea::new(2000.0, 1200.0)));
        aim.start(0);
        let kept = place(&mut aim, 10.0, 10.0, 50.0, 0);
        place(&mut aim, 1500.0, 900.0, 60.0, 0);
        place(&mut aim, 250.0, 10.0, 70.0, 0);
        assert_eq!(aim.targets().len(), MAX_ACTIVE_TARGETS);

        let small = PlayArea::new(300.0, 200.0);
        aim.set_area(Some(small));
        let ids: Vec<u64> = aim.targets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![kept]);
        for t in aim.targets() {
            assert!(t.x + t.size <= small.width && t.y + t.size <= small.height);
        }

        // the cap no longer blocks spawning
        assert!(aim.spawn(100).is_some());
        assert!(aim.spawn(200).is_some());
        assert_eq!(aim.targets().len(), MAX_ACTIVE_TARGETS);
    }

    #[test]
    fn test_losing_area_clears_targets() {
        let mut aim = playing_session();
        aim.spawn(0);
        aim.spawn(1);
        aim.set_area(None);
        assert!(aim.targets().is_empty());
        assert_eq!(aim.spawn(2), None);
    }

    #[test]
    fn test_spawn_without_area_is_noop() {
        let mut aim = AimSession::with_seed(SessionConfig::default(), 1);
        aim.start(0);
        assert_eq!(aim.spawn(0), None);
        assert!(aim.targets().is_empty());
    }

    #[test]
    fn test_spawn_outside_playing_is_noop() {
        let mut aim = AimSession::with_seed(SessionConfig::default(), 1);
        aim.set_area(Some(PlayArea::new(800.0, 500.0)));
        assert_eq!(aim.spawn(0), None);
    }

    #[test]
    fn test_hit_scores_reference_case() {
        let mut aim = playing_session();
        let id = place(&mut aim, 10.0, 10.0, 50.0, 1000);
        assert_matches!(aim.click_target(id, 1200), ClickOutcome::Hit { points: 180 });
        assert_eq!(aim.core().score(), 180);
        assert_eq!(aim.core().successes(), 1);
        assert!(aim.targets().is_empty());
    }

    #[test]
    fn test_click_on_vanished_target_is_ignored() {
        let mut aim = playing_session();
        let id = place(&mut aim, 0.0, 0.0, 50.0, 0);
        aim.click_target(id, 100);
        assert_eq!(aim.click_target(id, 200), ClickOutcome::Ignored);
        assert_eq!(aim.core().successes(), 1);
        assert_eq!(aim.click_target(999, 200), ClickOutcome::Ignored);
    }

    #[test]
    fn test_misses_never_push_score_below_zero() {
        let mut aim = playing_session();
        let id = place(&mut aim, 0.0, 0.0, 50.0, 0);
        aim.click_target(id, 900); // 100 + 10
        for _ in 0..50 {
            assert_eq!(aim.click_background(), ClickOutcome::Miss);
        }
        assert_eq!(aim.core().score(), 0);
        assert_eq!(aim.core().failures(), 50);
    }

    #[test]
    fn test_click_at_routes_hits_and_misses() {
        let mut aim = playing_session();
        let id = place(&mut aim, 100.0, 100.0, 60.0, 0);
        assert_eq!(aim.target_at(130.0, 130.0), Some(id));
        // bounding-box corner is outside the circle
        assert_eq!(aim.target_at(101.0, 101.0), None);

        assert_eq!(aim.click_at(5.0, 5.0, 10), ClickOutcome::Miss);
        assert_matches!(aim.click_at(130.0, 130.0, 10), ClickOutcome::Hit { .. });
    }

    #[test]
    fn test_target_at_prefers_latest() {
        let mut aim = playing_session();
        let _under = place(&mut aim, 0.0, 0.0, 60.0, 0);
        let over = place(&mut aim, 10.0, 10.0, 60.0, 0);
        assert_eq!(aim.target_at(35.0, 35.0), Some(over));
    }

    #[test]
    fn test_start_clears_targets_and_ids() {
        let mut aim = playing_session();
        aim.spawn(0);
        aim.spawn(1);
        aim.click_background();
        aim.start(5000);
        assert!(aim.targets().is_empty());
        assert_eq!(aim.core().failures(), 0);
        assert_eq!(aim.spawn(5000), Some(0));
    }

    #[test]
    fn test_clicks_after_finish_are_ignored() {
        let mut aim = AimSession::with_seed(SessionConfig { duration_secs: 1 }, 3);
        aim.set_area(Some(PlayArea::new(800.0, 500.0)));
        let epoch = aim.start(0);
        let id = aim.spawn(0).unwrap();
        aim.on_countdown(epoch);
        assert_eq!(aim.state(), GameState::Finished);
        assert_eq!(aim.click_target(id, 100), ClickOutcome::Ignored);
        assert_eq!(aim.click_background(), ClickOutcome::Ignored);
        assert_eq!(aim.summary().score, 0);
    }

    #[test]
    fn test_stale_spawn_firing_is_ignored() {
        let mut aim = playing_session();
        let old = aim.core().epoch();
        aim.start(10);
        aim.on_spawn(old, 20);
        assert!(aim.targets().is_empty());
    }
}
