#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use std::time::{Duration, Instant};

use crate::game::{GRAVITY_PERIOD_MS, SOFT_DROP_PERIOD_MS};

/// Wall time since the session started. Every scheduler below is polled with
/// this value once per frame.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    started: Instant,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-period gravity scheduler.
///
/// The first call to [`GameClock::advance`] only records a baseline. After
/// that, each call reports at most one due tick and moves the baseline by
/// exactly one period, so a frame that arrives late is caught up by the
/// following frames instead of being skipped.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    period: Duration,
    last_tick: Option<Duration>,
}

impl GameClock {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_tick: None,
        }
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[must_use]
    pub fn last_tick(&self) -> Option<Duration> {
        self.last_tick
    }

    pub fn advance(&mut self, now: Duration) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if now >= last + self.period => {
                self.last_tick = Some(last + self.period);
                true
            }
            Some(_) => false,
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(GRAVITY_PERIOD_MS))
    }
}

/// Rate limit for the held soft-drop key. Unlike [`GameClock`] it fires on
/// the first poll and re-arms from the moment it fired.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SoftDropTimer {
    period: Duration,
    last_fired: Option<Duration>,
}

impl SoftDropTimer {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_fired: None,
        }
    }

    pub fn ready(&mut self, now: Duration) -> bool {
        let due = match self.last_fired {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.period,
        };
        if due {
            self.last_fired = Some(now);
        }
        due
    }
}

impl Default for SoftDropTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(SOFT_DROP_PERIOD_MS))
    }
}
