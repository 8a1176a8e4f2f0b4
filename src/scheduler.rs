//! Periodic tasks tagged with the session epoch that armed them.
//!
//! The scheduler never calls into a session itself. `poll` hands back the
//! firings that are due and the owner decides what to do with them, so a
//! cancelled task can never reach a finished or restarted session.

/// Interval of the countdown task: one remaining-time unit per second.
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;

/// Interval of the aim spawn task.
pub const SPAWN_INTERVAL_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Countdown,
    Spawn,
}

/// One due invocation of a periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub kind: TaskKind,
    pub epoch: u64,
    pub due_ms: u64,
}

#[derive(Debug, Clone)]
struct PeriodicTask {
    kind: TaskKind,
    interval_ms: u64,
    epoch: u64,
    next_due_ms: u64,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<PeriodicTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a periodic task whose first firing is one interval after `now_ms`.
    /// Arming a kind that is already armed replaces it.
    pub fn arm(&mut self, kind: TaskKind, interval_ms: u64, epoch: u64, now_ms: u64) {
        let interval_ms = interval_ms.max(1);
        self.tasks.retain(|t| t.kind != kind);
        self.tasks.push(PeriodicTask {
            kind,
            interval_ms,
            epoch,
            next_due_ms: now_ms + interval_ms,
        });
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_armed(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns every firing due at or before `now_ms`, oldest first.
    ///
    /// A caller that polls late gets one firing per elapsed interval.
    pub fn poll(&mut self, now_ms: u64) -> Vec<Firing> {
        let mut due = Vec::new();
        for task in &mut self.tasks {
            while task.next_due_ms <= now_ms {
                due.push(Firing {
                    kind: task.kind,
                    epoch: task.epoch,
                    due_ms: task.next_due_ms,
                });
                task.next_due_ms += task.interval_ms;
            }
        }
        // stable: ties keep arm order
        due.sort_by_key(|f| f.due_ms);
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_before_first_interval() {
        let mut s = Scheduler::new();
        s.arm(TaskKind::Countdown, 1000, 1, 0);
        assert!(s.poll(999).is_empty());
        assert_eq!(s.poll(1000).len(), 1);
    }

    #[test]
    fn test_late_poll_catches_up() {
        let mut s = Scheduler::new();
        s.arm(TaskKind::Countdown, 1000, 3, 0);
        let firings = s.poll(3500);
        assert_eq!(firings.len(), 3);
        assert!(firings.iter().all(|f| f.epoch == 3));
        assert_eq!(
            firings.iter().map(|f| f.due_ms).collect::<Vec<_>>(),
            vec![1000, 2000, 3000]
        );
        assert!(s.poll(3999).is_empty());
    }

    #[test]
    fn test_firings_are_interleaved_chronologically() {
        let mut s = Scheduler::new();
        s.arm(TaskKind::Countdown, COUNTDOWN_INTERVAL_MS, 1, 0);
        s.arm(TaskKind::Spawn, SPAWN_INTERVAL_MS, 1, 0);
        let kinds: Vec<TaskKind> = s.poll(2400).into_iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TaskKind::Spawn,     // 800
                TaskKind::Countdown, // 1000
                TaskKind::Spawn,     // 1600
                TaskKind::Countdown, // 2000
                TaskKind::Spawn,     // 2400
            ]
        );
    }

    #[test]
    fn test_cancel_all_stops_everything() {
        let mut s = Scheduler::new();
        s.arm(TaskKind::Countdown, 1000, 1, 0);
        s.arm(TaskKind::Spawn, 800, 1, 0);
        s.cancel_all();
        assert!(s.is_idle());
        assert!(s.poll(10_000).is_empty());
    }

    #[test]
    fn test_rearm_replaces_previous_epoch() {
        let mut s = Scheduler::new();
        s.arm(TaskKind::Countdown, 1000, 1, 0);
        s.arm(TaskKind::Countdown, 1000, 2, 500);
        let firings = s.poll(1500);
        assert_eq!(firings.len(), 1);
        assert_eq!(firings[0].epoch, 2);
        assert!(s.is_armed(TaskKind::Countdown));
        assert!(!s.is_armed(TaskKind::Spawn));
    }
}
