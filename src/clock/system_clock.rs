use time::OffsetDateTime;

use crate::clock::Clock;

/// A [`Clock`] implementation backed by the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
