use std::time::{Duration, Instant};

/// Signal that the search deadline has passed. Not an error: the engine
/// unwinds normally and keeps the best fully-completed result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut;

/// Wall-clock deadline for one top-level move decision.
///
/// The deadline is the caller's budget minus a safety margin, so the search
/// can unwind its recursion (undoing applied moves) and return before the
/// caller's own clock runs out. Consulted at every node entry, not only
/// between deepening iterations.
#[derive(Debug, Clone, Copy)]
pub struct TimeManager {
    deadline: Instant,
}

impl TimeManager {
    pub fn start(budget: Duration, margin: Duration) -> Self {
        TimeManager {
            deadline: Instant::now() + budget.saturating_sub(margin),
        }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Cheap poll for use with `?` inside the recursion.
    pub fn check(&self) -> Result<(), TimedOut> {
        if self.expired() {
            Err(TimedOut)
        } else {
            Ok(())
        }
    }
}
