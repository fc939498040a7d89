//! Winding up between lunges.

use super::{AttackingState, EnemyKind};
use crate::config::AttackConfig;
use crate::core::{BaseState, DataState, HasKind, TargetTransform, TransformTargetState};
use crate::host::{Host, TargetId};
use crate::machine::Context;
use crate::motion::seconds;
use std::time::Duration;

/// Holds position until `time_between_attacks` has passed since entry, then
/// lunges at the held target through [`AttackingState`].
#[derive(Clone, Debug)]
pub struct AttackState {
    target: Option<TargetId>,
    time_between_attacks: Duration,
    elapsed: Duration,
}

impl AttackState {
    pub fn new(config: &AttackConfig) -> Self {
        Self {
            target: None,
            time_between_attacks: seconds(config.time_between_attacks),
            elapsed: Duration::ZERO,
        }
    }

    /// Time spent winding up since entry.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl HasKind<EnemyKind> for AttackState {
    const KIND: EnemyKind = EnemyKind::Attack;
}

impl<H: Host + 'static> BaseState<EnemyKind, H> for AttackState {
    fn on_update_state(&mut self, ctx: &mut Context<'_, EnemyKind, H>) {
        self.elapsed += ctx.delta();
        if self.elapsed > self.time_between_attacks {
            self.elapsed = Duration::ZERO;
            self.change_target_state::<AttackingState>(ctx, None);
        }
    }
}

impl<H: Host + 'static> DataState<EnemyKind, H, TargetTransform> for AttackState {
    fn on_enter_state(&mut self, data: TargetTransform, _ctx: &mut Context<'_, EnemyKind, H>) {
        self.target = data.target;
        self.elapsed = Duration::ZERO;
    }
}

impl<H: Host + 'static> TransformTargetState<EnemyKind, H> for AttackState {
    fn target(&self) -> Option<TargetId> {
        self.target
    }

    fn set_target(&mut self, target: Option<TargetId>) {
        self.target = target;
    }
}
