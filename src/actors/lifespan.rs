//! Timed self-destruction.

use crate::config::LifespanConfig;
use crate::motion::{seconds, Countdown};
use std::time::Duration;

/// Expires once `lifespan` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifespan {
    countdown: Countdown,
    reported: bool,
}

impl Lifespan {
    pub fn new(config: &LifespanConfig) -> Self {
        Self {
            countdown: Countdown::new(seconds(config.lifespan)),
            reported: false,
        }
    }

    /// Advance by `dt`; returns `true` on the tick the lifespan runs out and
    /// never again.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.reported {
            return false;
        }
        self.reported = self.countdown.tick(dt);
        self.reported
    }

    pub fn is_expired(&self) -> bool {
        self.countdown.is_expired()
    }

    pub fn remaining(&self) -> Duration {
        self.countdown.remaining()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_exactly_once() {
        let mut lifespan = Lifespan::new(&LifespanConfig { lifespan: 1.0 });
        let dt = Duration::from_millis(400);

        assert!(!lifespan.tick(dt));
        assert!(!lifespan.tick(dt));
        assert!(lifespan.tick(dt));
        assert!(lifespan.is_expired());
        assert!(!lifespan.tick(dt));
    }

    #[test]
    fn remaining_counts_down() {
        let mut lifespan = Lifespan::new(&LifespanConfig { lifespan: 2.0 });
        lifespan.tick(Duration::from_millis(500));
        assert_eq!(lifespan.remaining(), Duration::from_millis(1500));
    }
}
