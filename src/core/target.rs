//! States whose payload is a target.
//!
//! [`TransformTargetState`] follows a live entity through
//! [`Host::locate`], [`PointTargetState`] holds a fixed point. Both keep the
//! last payload they were entered with and use it whenever a transition
//! helper is called without an explicit target.

use super::kind::{HasKind, Kind};
use super::state::DataState;
use crate::host::{Host, TargetId};
use crate::machine::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Payload referring to a tracked entity; `None` when there is nothing to
/// follow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetTransform {
    pub target: Option<TargetId>,
}

impl TargetTransform {
    pub fn new(target: TargetId) -> Self {
        Self {
            target: Some(target),
        }
    }

    pub fn none() -> Self {
        Self { target: None }
    }
}

/// Payload holding a raw point in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPoint {
    pub target: Vec2,
}

impl TargetPoint {
    pub fn new(target: Vec2) -> Self {
        Self { target }
    }
}

/// A typed-entry state that follows a [`TargetId`].
///
/// Implementors store the held target and call [`capture`](Self::capture)
/// from their enter hook.
pub trait TransformTargetState<K, H>: DataState<K, H, TargetTransform> + HasKind<K> + Sized
where
    K: Kind,
    H: Host + 'static,
{
    fn target(&self) -> Option<TargetId>;

    fn set_target(&mut self, target: Option<TargetId>);

    /// Store the payload's target as the held target.
    fn capture(&mut self, data: TargetTransform) {
        self.set_target(data.target);
    }

    /// Current position of the held target, if it still exists.
    fn target_position(&self, host: &H) -> Option<Vec2> {
        self.target().and_then(|target| host.locate(target))
    }

    /// Request a transition to `T`, passing `target` or, when `None`, the
    /// held target.
    fn change_target_state<T>(&self, ctx: &mut Context<'_, K, H>, target: Option<TargetId>)
    where
        T: DataState<K, H, TargetTransform> + HasKind<K>,
    {
        let data = TargetTransform {
            target: target.or(self.target()),
        };
        ctx.change_state_with::<T, TargetTransform>(data, false);
    }

    /// Request a transition to the point-target state `T`.
    ///
    /// Without an explicit `point` the held target's current position is
    /// used. Returns `false`, requesting nothing, when neither is available.
    fn change_point_state<T>(&self, ctx: &mut Context<'_, K, H>, point: Option<Vec2>) -> bool
    where
        T: DataState<K, H, TargetPoint> + HasKind<K>,
    {
        let resolved = point.or_else(|| self.target_position(ctx.host()));
        match resolved {
            Some(target) => {
                ctx.change_state_with::<T, TargetPoint>(TargetPoint { target }, false);
                true
            }
            None => {
                tracing::warn!(
                    kind = ctx.kind().name(),
                    tracked = ?self.target(),
                    "no point to hand over; transition skipped"
                );
                false
            }
        }
    }

    /// Exit and enter this state again, with `target` or the held target.
    fn reset_state(&self, ctx: &mut Context<'_, K, H>, target: Option<TargetId>) {
        let data = TargetTransform {
            target: target.or(self.target()),
        };
        ctx.reenter_with::<Self, TargetTransform>(data);
    }
}

/// A typed-entry state that moves relative to a fixed point.
pub trait PointTargetState<K, H>: DataState<K, H, TargetPoint> + HasKind<K> + Sized
where
    K: Kind,
    H: 'static,
{
    fn point(&self) -> Vec2;

    fn set_point(&mut self, point: Vec2);

    fn capture(&mut self, data: TargetPoint) {
        self.set_point(data.target);
    }

    /// Request a transition to `T` with `point` or the held point.
    fn change_point_state<T>(&self, ctx: &mut Context<'_, K, H>, point: Option<Vec2>)
    where
        T: DataState<K, H, TargetPoint> + HasKind<K>,
    {
        let data = TargetPoint {
            target: point.unwrap_or(self.point()),
        };
        ctx.change_state_with::<T, TargetPoint>(data, false);
    }

    fn reset_state(&self, ctx: &mut Context<'_, K, H>, point: Option<Vec2>) {
        let data = TargetPoint {
            target: point.unwrap_or(self.point()),
        };
        ctx.reenter_with::<Self, TargetPoint>(data);
    }
}
