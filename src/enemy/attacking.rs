//! The lunge itself.

use super::{ChaseState, EnemyKind};
use crate::config::AttackingConfig;
use crate::core::{BaseState, DataState, HasKind, TargetTransform, TransformTargetState};
use crate::host::{Host, TargetId};
use crate::machine::Context;
use crate::motion::move_towards;
use glam::Vec2;

/// Dashes to where the target stood on entry, walks back to the starting
/// point, then resumes chasing.
///
/// The destination is fixed on entry. When the target cannot be located the
/// destination is the starting point, so the lunge ends immediately.
#[derive(Clone, Debug)]
pub struct AttackingState {
    target: Option<TargetId>,
    speed: f32,
    source: Vec2,
    destination: Vec2,
}

impl AttackingState {
    pub fn new(config: &AttackingConfig) -> Self {
        Self {
            target: None,
            speed: config.attack_speed,
            source: Vec2::ZERO,
            destination: Vec2::ZERO,
        }
    }

    /// Point the lunge started from.
    pub fn source(&self) -> Vec2 {
        self.source
    }

    /// Point currently moved toward.
    pub fn destination(&self) -> Vec2 {
        self.destination
    }
}

impl HasKind<EnemyKind> for AttackingState {
    const KIND: EnemyKind = EnemyKind::Attacking;
}

impl<H: Host + 'static> BaseState<EnemyKind, H> for AttackingState {
    fn on_update_state(&mut self, ctx: &mut Context<'_, EnemyKind, H>) {
        let step = self.speed * ctx.delta_secs();
        let host = ctx.host_mut();
        let position = move_towards(host.position(), self.destination, step);
        host.set_position(position);

        if position == self.destination {
            if self.destination != self.source {
                self.destination = self.source;
            } else {
                self.change_target_state::<ChaseState>(ctx, None);
            }
        }
    }
}

impl<H: Host + 'static> DataState<EnemyKind, H, TargetTransform> for AttackingState {
    fn on_enter_state(&mut self, data: TargetTransform, ctx: &mut Context<'_, EnemyKind, H>) {
        self.target = data.target;
        self.source = ctx.host().position();
        self.destination = self.target_position(ctx.host()).unwrap_or(self.source);
        tracing::trace!(source = ?self.source, destination = ?self.destination, "lunge");
    }
}

impl<H: Host + 'static> TransformTargetState<EnemyKind, H> for AttackingState {
    fn target(&self) -> Option<TargetId> {
        self.target
    }

    fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }
}
