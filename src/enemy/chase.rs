//! Following the player.

use super::{AttackState, EnemyKind, PatrolState};
use crate::config::ChaseConfig;
use crate::core::{BaseState, DataState, HasKind, TargetTransform, TransformTargetState};
use crate::host::{ContactTag, Host, HostEvent, TargetId};
use crate::machine::Context;
use crate::motion::move_towards;
use std::mem;
use std::time::Duration;

/// Moves toward the held target and hands over to [`AttackState`] once
/// within `attack_distance`.
///
/// Sensor contacts drive the state whether or not it is active: the player
/// entering the sensor (re)enters Chase with the player as target, the
/// player leaving it re-enters Chase without a target and schedules the
/// return to [`PatrolState`]. Regaining contact before the delay runs out
/// cancels that return.
#[derive(Clone, Debug)]
pub struct ChaseState {
    target: Option<TargetId>,
    sensor_radius: f32,
    speed: f32,
    attack_distance: f32,
    lose_target_delay: Duration,
    contact_lost: bool,
}

impl ChaseState {
    pub fn new(config: &ChaseConfig) -> Self {
        Self {
            target: None,
            sensor_radius: config.sensor_radius,
            speed: config.chase_speed,
            attack_distance: config.attack_distance,
            lose_target_delay: config.lose_target_wait(),
            contact_lost: false,
        }
    }

    /// Radius the host should give the enemy's detection volume.
    pub fn sensor_radius(&self) -> f32 {
        self.sensor_radius
    }
}

impl HasKind<EnemyKind> for ChaseState {
    const KIND: EnemyKind = EnemyKind::Chase;
}

impl<H: Host + 'static> BaseState<EnemyKind, H> for ChaseState {
    fn on_update_state(&mut self, ctx: &mut Context<'_, EnemyKind, H>) {
        let Some(target) = self.target_position(ctx.host()) else {
            return;
        };

        let step = self.speed * ctx.delta_secs();
        let host = ctx.host_mut();
        let position = move_towards(host.position(), target, step);
        host.set_position(position);

        if position.distance(target) <= self.attack_distance {
            self.change_target_state::<AttackState>(ctx, None);
        }
    }

    fn on_event(&mut self, event: &HostEvent, ctx: &mut Context<'_, EnemyKind, H>) {
        match event {
            HostEvent::TriggerEnter(contact) if contact.tag == ContactTag::PlayerSensor => {
                let cancelled = ctx.cancel_owned();
                tracing::debug!(player = %contact.target, cancelled, "chase acquired target");
                self.contact_lost = false;
                self.reset_state(ctx, Some(contact.target));
            }
            HostEvent::TriggerExit(contact) if contact.tag == ContactTag::PlayerSensor => {
                self.contact_lost = true;
                self.reset_state(ctx, None);
            }
            _ => {}
        }
    }
}

impl<H: Host + 'static> DataState<EnemyKind, H, TargetTransform> for ChaseState {
    fn on_enter_state(&mut self, data: TargetTransform, ctx: &mut Context<'_, EnemyKind, H>) {
        self.target = data.target;
        if mem::take(&mut self.contact_lost) {
            self.target = None;
            ctx.schedule_change::<PatrolState>(self.lose_target_delay, false);
            tracing::debug!(delay = ?self.lose_target_delay, "chase lost target");
        }
    }
}

impl<H: Host + 'static> TransformTargetState<EnemyKind, H> for ChaseState {
    fn target(&self) -> Option<TargetId> {
        self.target
    }

    fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }
}
