use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const DEFAULT_RESET_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    Idle,
    Exporting,
}

impl ExportState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportState::Idle => "idle",
            ExportState::Exporting => "exporting",
        }
    }
}

/// Handle for one armed reset timer. Only the most recently issued ticket
/// can bring the indicator back to idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTicket {
    generation: u64,
    delay: Duration,
}

impl ResetTicket {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Transient "backup saved" flag: `Idle -> Exporting -> Idle`.
///
/// Triggering while already exporting re-arms the timer, so the flag stays
/// up for a full delay after the latest export and earlier timers become
/// stale.
#[derive(Debug, Clone)]
pub struct ExportIndicator {
    state: ExportState,
    delay: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl Default for ExportIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_DELAY)
    }
}

impl ExportIndicator {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: ExportState::Idle,
            delay,
            deadline: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn trigger(&mut self, now: Instant) -> ResetTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state = ExportState::Exporting;
        self.deadline = Some(now + self.delay);
        ResetTicket {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Fire the timer behind `ticket`. Returns false for stale tickets.
    pub fn expire(&mut self, ticket: ResetTicket) -> bool {
        if ticket.generation != self.generation || self.state == ExportState::Idle {
            return false;
        }
        self.reset();
        true
    }

    /// Deadline-driven variant of [`expire`](Self::expire) for callers
    /// without a timer task.
    pub fn poll(&mut self, now: Instant) -> ExportState {
        match self.deadline {
            Some(deadline) if now >= deadline => self.reset(),
            _ => {}
        }
        self.state
    }

    fn reset(&mut self) {
        self.state = ExportState::Idle;
        self.deadline = None;
        tracing::debug!("export indicator back to idle");
    }
}
