//! Turn clock: how long the current turn has run and how long is left.

use chrono::{DateTime, Duration, Utc};

use crate::core::config::MangalaConfig;
use crate::core::state::Room;

/// Countdown for a turn that started at a fixed instant.
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use mangala::turn::TurnClock;
///
/// let start = Utc.timestamp_opt(1_000, 0).unwrap();
/// let clock = TurnClock::new(start, Duration::seconds(60));
///
/// let now = start + Duration::seconds(45);
/// assert_eq!(clock.remaining(now), Duration::seconds(15));
/// assert!(!clock.is_expired(now));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnClock {
    started: DateTime<Utc>,
    timeout: Duration,
}

impl TurnClock {
    #[must_use]
    pub fn new(started: DateTime<Utc>, timeout: Duration) -> Self {
        Self { started, timeout }
    }

    /// Clock for the room's current turn, if a turn has started.
    #[must_use]
    pub fn for_room(room: &Room, config: &MangalaConfig) -> Option<Self> {
        room.move_start_timestamp
            .map(|started| Self::new(started, config.turn_timeout))
    }

    #[must_use]
    pub fn started(&self) -> DateTime<Utc> {
        self.started
    }

    #[must_use]
    pub fn deadline(&self) -> DateTime<Utc> {
        self.started + self.timeout
    }

    /// Time since the turn started; zero if `now` is before the start.
    #[must_use]
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started).max(Duration::zero())
    }

    /// Time left; zero once expired.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.timeout - self.elapsed(now)).max(Duration::zero())
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.elapsed(now) >= self.timeout
    }

    /// Fraction of the turn used, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: DateTime<Utc>) -> f64 {
        let total = self.timeout.num_milliseconds();
        if total <= 0 {
            return 1.0;
        }
        let used = self.elapsed(now).num_milliseconds() as f64 / total as f64;
        used.clamp(0.0, 1.0)
    }
}
