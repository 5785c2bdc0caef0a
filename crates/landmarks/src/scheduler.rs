//! Debounce/escalation scheduler for rescans
//!
//! Two tiers:
//! - While notifications arrive slower than `threshold` per `window`, each one
//!   is handled immediately (the quick path).
//! - Once the threshold is reached the scheduler arms a single deferred
//!   rescan. Each further notification pushes the deadline out by
//!   `quiet_period`, but never past `max_wait` after arming, so pages that
//!   never go quiet still get rescanned.
//!
//! The scheduler only keeps time; the engine decides what "rescan" means.
//! Time is passed in so the state machine can be driven by tokio's clock.

use tokio::time::Instant;

use crate::config::SchedulerConfig;

/// What to do with a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run the quick action now
    Immediate,
    /// A consolidated rescan is pending until `deadline`
    Deferred { deadline: Instant },
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    since: Instant,
    deadline: Instant,
}

#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    window_start: Option<Instant>,
    count: u32,
    armed: Option<Armed>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            window_start: None,
            count: 0,
            armed: None,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Record one incoming notification
    pub fn notify(&mut self, now: Instant) -> Schedule {
        if let Some(armed) = self.armed.as_mut() {
            // Last notification wins: the quiet period restarts from now
            armed.deadline = (now + self.config.quiet_period).min(armed.since + self.config.max_wait);
            return Schedule::Deferred {
                deadline: armed.deadline,
            };
        }

        match self.window_start {
            Some(start) if now.saturating_duration_since(start) < self.config.window => {
                self.count += 1;
            }
            _ => {
                self.window_start = Some(now);
                self.count = 1;
            }
        }

        if self.count < self.config.threshold {
            return Schedule::Immediate;
        }

        let deadline = now + self.config.quiet_period.min(self.config.max_wait);
        tracing::debug!(
            "[Scheduler] {} notifications within {:?}, deferring rescan",
            self.count,
            self.config.window
        );
        self.armed = Some(Armed {
            since: now,
            deadline,
        });
        Schedule::Deferred { deadline }
    }

    /// Deadline of the pending rescan, if one is armed
    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|a| a.deadline)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Consume the pending rescan if its deadline has passed
    ///
    /// Returns `true` exactly once per armed period; the caller then runs the
    /// slow action. The rate counter starts over afterwards.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.armed {
            Some(armed) if now >= armed.deadline => {
                tracing::debug!(
                    "[Scheduler] Deferred rescan due after {:?}",
                    now.saturating_duration_since(armed.since)
                );
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Forget the rate history and any pending rescan
    pub fn reset(&mut self) {
        self.armed = None;
        self.window_start = None;
        self.count = 0;
    }
}
