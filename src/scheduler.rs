//! Game-loop coordinator: independent periodic activities over a monotonic
//! clock.
//!
//! Each opponent's motion tick and the score clock get their own re-arming
//! deadline, so activities fire in whatever relative order their periods
//! dictate — there is no global tick barrier.  The scheduler only decides
//! *when* things happen; the state transitions themselves live in
//! [`crate::compute`].

use std::time::{Duration, Instant};

use crate::entities::SessionConfig;

/// One schedulable unit of work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    /// Advance the opponent in this roster slot.
    Opponent(usize),
    /// Advance the score clock.
    Score,
}

#[derive(Clone, Debug)]
struct Deadline {
    activity: Activity,
    period: Duration,
    next: Instant,
}

/// Deadline table for one session.  Dropping it (or calling [`cancel`])
/// stops every activity for good — nothing keeps firing after the logical
/// game has ended.
///
/// [`cancel`]: Scheduler::cancel
#[derive(Clone, Debug)]
pub struct Scheduler {
    deadlines: Vec<Deadline>,
}

impl Scheduler {
    pub fn new(config: &SessionConfig, now: Instant) -> Self {
        let mut deadlines = Vec::with_capacity(config.opponents.len() + 1);
        // A zero period would spin forever in `due`; floor it at 1 ms.
        let tick = Duration::from_millis(config.tick_interval_ms.max(1));
        for slot in 0..config.opponents.len() {
            deadlines.push(Deadline {
                activity: Activity::Opponent(slot),
                period: tick,
                next: now + tick,
            });
        }
        let score = Duration::from_millis(config.score_interval_ms.max(1));
        deadlines.push(Deadline {
            activity: Activity::Score,
            period: score,
            next: now + score,
        });
        Scheduler { deadlines }
    }

    /// Every activity whose deadline has passed by `now`.
    ///
    /// Deadlines re-arm by whole periods from the previous deadline, so a
    /// late poll fires each missed tick exactly once instead of drifting.
    pub fn due(&mut self, now: Instant) -> Vec<Activity> {
        let mut fired = Vec::new();
        for deadline in &mut self.deadlines {
            while deadline.next <= now {
                fired.push(deadline.activity);
                deadline.next += deadline.period;
            }
        }
        fired
    }

    /// Earliest pending deadline, for precise sleeping.  `None` once
    /// cancelled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().map(|d| d.next).min()
    }

    /// Permanently stop all activities; `due` never fires again.
    pub fn cancel(&mut self) {
        self.deadlines.clear();
    }

    pub fn is_cancelled(&self) -> bool {
        self.deadlines.is_empty()
    }
}
