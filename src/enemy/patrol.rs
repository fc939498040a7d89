//! Walking a waypoint route.

use super::EnemyKind;
use crate::config::PatrolConfig;
use crate::core::{BaseState, HasKind, SimpleState};
use crate::host::{Facing, Host};
use crate::machine::Context;
use crate::motion::{move_towards, Countdown};
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Moving,
    Waiting(Countdown),
}

/// Moves between waypoints, pausing at each one.
///
/// The route either loops back to its first waypoint or, with `pingpong`,
/// reverses direction at either end. Leaving the state drops any wait in
/// progress; entering it again heads for the same waypoint as before.
#[derive(Clone, Debug)]
pub struct PatrolState {
    route: Vec<Vec2>,
    speed: f32,
    wait: Duration,
    pingpong: bool,
    current: Option<usize>,
    direction: isize,
    phase: Phase,
}

impl PatrolState {
    pub fn new(config: &PatrolConfig) -> Self {
        Self {
            route: config.route.clone(),
            speed: config.speed,
            wait: config.wait(),
            pingpong: config.pingpong,
            current: None,
            direction: 1,
            phase: Phase::Moving,
        }
    }

    /// Index of the waypoint being walked to or waited at.
    pub fn current_waypoint(&self) -> Option<usize> {
        self.current
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.phase, Phase::Waiting(_))
    }

    pub fn route(&self) -> &[Vec2] {
        &self.route
    }

    fn select_next<H: Host>(&mut self, host: &mut H) {
        let count = self.route.len() as isize;
        if count == 0 {
            return;
        }

        let next = match self.current {
            None => 0,
            Some(index) => (index as isize + self.direction).rem_euclid(count),
        };
        if self.pingpong {
            if next <= 0 {
                self.direction = 1;
            } else if next + 1 >= count {
                self.direction = -1;
            }
        }

        let index = next as usize;
        self.current = Some(index);
        host.set_facing(Facing::toward(host.position(), self.route[index]));
        tracing::trace!(waypoint = index, "patrol heading to next waypoint");
    }
}

impl HasKind<EnemyKind> for PatrolState {
    const KIND: EnemyKind = EnemyKind::Patrol;
}

impl<H: Host + 'static> BaseState<EnemyKind, H> for PatrolState {
    fn on_update_state(&mut self, ctx: &mut Context<'_, EnemyKind, H>) {
        let Some(index) = self.current else {
            return;
        };
        let dt = ctx.delta();

        match self.phase {
            Phase::Moving => {
                let waypoint = self.route[index];
                let host = ctx.host_mut();
                let step = self.speed * dt.as_secs_f32();
                let position = move_towards(host.position(), waypoint, step);
                host.set_position(position);
                if position == waypoint {
                    self.phase = Phase::Waiting(Countdown::new(self.wait));
                }
            }
            Phase::Waiting(mut countdown) => {
                if countdown.tick(dt) {
                    self.select_next(ctx.host_mut());
                    self.phase = Phase::Moving;
                } else {
                    self.phase = Phase::Waiting(countdown);
                }
            }
        }
    }

    fn on_exit_state(&mut self, _ctx: &mut Context<'_, EnemyKind, H>) {
        self.phase = Phase::Moving;
    }
}

impl<H: Host + 'static> SimpleState<EnemyKind, H> for PatrolState {
    fn on_enter_state(&mut self, ctx: &mut Context<'_, EnemyKind, H>) {
        if self.current.is_none() {
            self.select_next(ctx.host_mut());
        }
        self.phase = Phase::Moving;
    }
}
