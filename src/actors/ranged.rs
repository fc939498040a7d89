//! Throwing projectiles on a fixed cadence.

use crate::config::RangedConfig;
use crate::host::Facing;
use crate::motion::{seconds, Countdown};
use glam::Vec2;
use std::time::Duration;

/// A projectile the host should spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Launch {
    pub spawn: Vec2,
    /// Impulse to apply to the projectile's body
    pub impulse: Vec2,
    pub facing: Facing,
}

/// Signals an attack on the first tick and then every
/// `time_between_attacks`. The host plays the attack and calls
/// [`launch`](Self::launch) at the release frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RangedAttacker {
    interval: Duration,
    throw_force: f32,
    offset: Vec2,
    next: Option<Countdown>,
}

impl RangedAttacker {
    pub fn new(config: &RangedConfig) -> Self {
        Self {
            interval: seconds(config.time_between_attacks),
            throw_force: config.throw_force,
            offset: config.offset,
            next: None,
        }
    }

    /// Advance by `dt`; returns `true` when an attack should start.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let due = match &mut self.next {
            None => true,
            Some(countdown) => countdown.tick(dt),
        };
        if due {
            self.next = Some(Countdown::new(self.interval));
        }
        due
    }

    /// Projectile thrown from `position` by an attacker facing `facing`.
    pub fn launch(&self, position: Vec2, facing: Facing) -> Launch {
        Launch {
            spawn: position + facing.mirror(self.offset),
            impulse: facing.forward() * self.throw_force,
            facing,
        }
    }
}
