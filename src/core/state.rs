//! State contracts.
//!
//! Every state supports an update hook (once per tick while active) and an
//! exit hook (once when it stops being active, before the next state's
//! enter hook). Entry comes in two flavors: [`SimpleState`] enters without
//! arguments, [`DataState`] enters with a typed payload supplied by whoever
//! requested the transition.

use super::kind::Kind;
use crate::host::HostEvent;
use crate::machine::Context;
use std::any::Any;

/// Type-erased access used by the machine to reach concrete state types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Hooks shared by every state.
///
/// `K` is the kind type of the owning machine, `H` the host the machine
/// drives. All hooks default to doing nothing.
pub trait BaseState<K: Kind, H>: AsAny + 'static {
    /// Called once per tick while this state is active.
    fn on_update_state(&mut self, _ctx: &mut Context<'_, K, H>) {}

    /// Called exactly once when this state stops being active.
    fn on_exit_state(&mut self, _ctx: &mut Context<'_, K, H>) {}

    /// Called for every host event, whether or not this state is active.
    fn on_event(&mut self, _event: &HostEvent, _ctx: &mut Context<'_, K, H>) {}
}

/// A state entered without a payload.
pub trait SimpleState<K: Kind, H>: BaseState<K, H> {
    fn on_enter_state(&mut self, _ctx: &mut Context<'_, K, H>) {}
}

/// A state entered with a payload of type `D`.
pub trait DataState<K: Kind, H, D>: BaseState<K, H> {
    fn on_enter_state(&mut self, _data: D, _ctx: &mut Context<'_, K, H>) {}
}

pub(crate) fn downcast_ref<K: Kind, H: 'static, T: 'static>(
    state: &dyn BaseState<K, H>,
) -> Option<&T> {
    state.as_any().downcast_ref::<T>()
}

pub(crate) fn downcast_mut<K: Kind, H: 'static, T: 'static>(
    state: &mut dyn BaseState<K, H>,
) -> Option<&mut T> {
    state.as_any_mut().downcast_mut::<T>()
}
