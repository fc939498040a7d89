//! The view a hook gets of its machine and host.

use super::scheduler::{Scheduler, TaskId};
use super::state_machine::{Request, StateMachine};
use crate::core::{DataState, HasKind, Kind, SimpleState};
use std::time::Duration;

/// Passed to every state hook.
///
/// Transitions requested through a context are not applied immediately:
/// they fill a single pending slot that the machine applies once the
/// running hook, and the transition it is part of, have completed. A later
/// request replaces an earlier one, so the last request wins.
pub struct Context<'a, K: Kind, H> {
    host: &'a mut H,
    kind: K,
    dt: Duration,
    tick: u64,
    pending: &'a mut Option<Request<K, H>>,
    scheduler: &'a mut Scheduler<K, H>,
}

impl<'a, K: Kind, H: 'static> Context<'a, K, H> {
    pub(crate) fn new(
        host: &'a mut H,
        kind: K,
        dt: Duration,
        tick: u64,
        pending: &'a mut Option<Request<K, H>>,
        scheduler: &'a mut Scheduler<K, H>,
    ) -> Self {
        Self {
            host,
            kind,
            dt,
            tick,
            pending,
            scheduler,
        }
    }

    /// The host entity the machine drives.
    pub fn host(&self) -> &H {
        self.host
    }

    /// Mutable access to the host entity.
    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// Kind of the state whose hook is running.
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Length of the current tick; zero outside of `update`.
    pub fn delta(&self) -> Duration {
        self.dt
    }

    /// [`delta`](Self::delta) in seconds.
    pub fn delta_secs(&self) -> f32 {
        self.dt.as_secs_f32()
    }

    /// Number of `update` calls the machine has run.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Request a transition to the stateless-entry state `T`.
    ///
    /// If `T` is not registered the request is a no-op, unless `force` is
    /// set, in which case the machine ends up with no active state.
    pub fn change_state<T>(&mut self, force: bool)
    where
        T: SimpleState<K, H> + HasKind<K>,
    {
        self.request(Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
            machine.apply_simple::<T>(host, force)
        }));
    }

    /// Request a transition to the typed-entry state `T`, delivering `payload`.
    pub fn change_state_with<T, D>(&mut self, payload: D, force: bool)
    where
        T: DataState<K, H, D> + HasKind<K>,
        D: 'static,
    {
        self.request(Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
            machine.apply_data::<T, D>(host, T::KIND, payload, force)
        }));
    }

    /// Request a transition by kind value; only stateless-entry states can be
    /// entered this way.
    pub fn change_kind(&mut self, kind: K, force: bool) {
        self.request(Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
            machine.apply_kind(host, kind, force)
        }));
    }

    /// Request that the machine end up with no active state.
    pub fn deactivate(&mut self) {
        self.request(Box::new(|machine: &mut StateMachine<K, H>, host: &mut H| {
            machine.apply_deactivate(host)
        }));
    }

    /// Exit and enter the hooked state again. `T` must be the hooked state's
    /// own type.
    pub fn reenter<T>(&mut self)
    where
        T: SimpleState<K, H>,
    {
        let kind = self.kind;
        self.request(Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
            machine.apply_simple_at::<T>(host, kind, true)
        }));
    }

    /// Exit and enter the hooked state again with a fresh payload. `T` must
    /// be the hooked state's own type.
    pub fn reenter_with<T, D>(&mut self, payload: D)
    where
        T: DataState<K, H, D>,
        D: 'static,
    {
        let kind = self.kind;
        self.request(Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
            machine.apply_data::<T, D>(host, kind, payload, true)
        }));
    }

    /// After `delay`, transition to the stateless-entry state `T`.
    ///
    /// The continuation is owned by the hooked state: it is cancelled when
    /// that state exits or calls [`cancel_owned`](Self::cancel_owned).
    pub fn schedule_change<T>(&mut self, delay: Duration, force: bool) -> TaskId
    where
        T: SimpleState<K, H> + HasKind<K>,
    {
        self.scheduler.schedule(
            self.kind,
            delay,
            Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
                machine.apply_simple::<T>(host, force)
            }),
        )
    }

    /// After `delay`, transition to the typed-entry state `T` with `payload`.
    pub fn schedule_change_with<T, D>(
        &mut self,
        delay: Duration,
        payload: D,
        force: bool,
    ) -> TaskId
    where
        T: DataState<K, H, D> + HasKind<K>,
        D: 'static,
    {
        self.scheduler.schedule(
            self.kind,
            delay,
            Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
                machine.apply_data::<T, D>(host, T::KIND, payload, force)
            }),
        )
    }

    /// After `delay`, transition to `kind` (stateless entry).
    pub fn schedule_change_kind(&mut self, delay: Duration, kind: K, force: bool) -> TaskId {
        self.scheduler.schedule(
            self.kind,
            delay,
            Box::new(move |machine: &mut StateMachine<K, H>, host: &mut H| {
                machine.apply_kind(host, kind, force)
            }),
        )
    }

    /// After `delay`, run `continuation` with the machine and host.
    ///
    /// The continuation runs between hooks, so it may call any public
    /// machine method. It is owned by the hooked state like every other
    /// scheduled task.
    pub fn schedule<F>(&mut self, delay: Duration, continuation: F) -> TaskId
    where
        F: FnOnce(&mut StateMachine<K, H>, &mut H) + 'static,
    {
        self.scheduler.schedule(self.kind, delay, Box::new(continuation))
    }

    /// Cancel one continuation; returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.scheduler.cancel(task)
    }

    /// Cancel every continuation owned by the hooked state.
    pub fn cancel_owned(&mut self) -> usize {
        self.scheduler.cancel_owned(self.kind)
    }

    /// Continuations currently owned by the hooked state.
    pub fn owned_tasks(&self) -> usize {
        self.scheduler.owned_by(self.kind)
    }

    fn request(&mut self, request: Request<K, H>) {
        if self.pending.is_some() {
            tracing::trace!(kind = self.kind.name(), "replacing pending transition request");
        }
        *self.pending = Some(request);
    }
}

impl<K: Kind, H> std::fmt::Debug for Context<'_, K, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("kind", &self.kind)
            .field("dt", &self.dt)
            .field("tick", &self.tick)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}
