//! State machine that owns a host's states and runs their hooks.

use super::context::Context;
use super::scheduler::Scheduler;
use crate::core::state::{downcast_mut, downcast_ref};
use crate::core::{
    BaseState, DataState, HasKind, Kind, SimpleState, TransitionHistory, TransitionRecord,
};
use crate::host::HostEvent;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// A deferred transition, applied by the machine outside of any hook.
pub(crate) type Request<K, H> = Box<dyn FnOnce(&mut StateMachine<K, H>, &mut H)>;

/// Runs the enter hook of the state being entered.
type Enter<K, H> = Box<dyn FnOnce(&mut dyn BaseState<K, H>, &mut Context<'_, K, H>)>;

/// Enter hook of a stateless-entry state, captured at registration.
pub(crate) type SimpleEnter<K, H> = fn(&mut dyn BaseState<K, H>, &mut Context<'_, K, H>);

pub(crate) struct Slot<K: Kind, H> {
    pub(crate) kind: K,
    pub(crate) state: Box<dyn BaseState<K, H>>,
    pub(crate) enter: Option<SimpleEnter<K, H>>,
}

pub(crate) fn enter_simple<K, H, T>(state: &mut dyn BaseState<K, H>, ctx: &mut Context<'_, K, H>)
where
    K: Kind,
    H: 'static,
    T: SimpleState<K, H>,
{
    match downcast_mut::<K, H, T>(state) {
        Some(state) => <T as SimpleState<K, H>>::on_enter_state(state, ctx),
        None => tracing::warn!(
            kind = ctx.kind().name(),
            "registered state does not match the requested type; enter hook skipped"
        ),
    }
}

/// Finite state machine for one host.
///
/// States are registered up front through
/// [`StateMachineBuilder`](crate::builder::StateMachineBuilder) and indexed
/// by [`Kind`]. At most one of them is active at a time. A transition runs
/// the exit hook of the active state to completion, swaps the active state,
/// then runs the enter hook of the new one.
pub struct StateMachine<K: Kind, H> {
    slots: Vec<Slot<K, H>>,
    index: HashMap<K, usize>,
    initial: Option<K>,
    current: Option<usize>,
    started: bool,
    pending: Option<Request<K, H>>,
    scheduler: Scheduler<K, H>,
    history: TransitionHistory<K>,
    max_chained: usize,
    tick: u64,
    dt: Duration,
}

impl<K: Kind, H: 'static> StateMachine<K, H> {
    pub(crate) fn from_parts(
        slots: Vec<Slot<K, H>>,
        initial: Option<K>,
        max_chained: usize,
        history_capacity: usize,
    ) -> Self {
        let index = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| (slot.kind, index))
            .collect();
        Self {
            slots,
            index,
            initial,
            current: None,
            started: false,
            pending: None,
            scheduler: Scheduler::new(),
            history: TransitionHistory::with_capacity(history_capacity),
            max_chained,
            tick: 0,
            dt: Duration::ZERO,
        }
    }

    /// Enter the initial kind, once.
    ///
    /// The machine starts inactive when no initial kind is configured, when
    /// it is not registered, or when it needs a payload to be entered.
    /// Called implicitly by the first `update` or `notify`.
    pub fn start(&mut self, host: &mut H) {
        if self.started {
            return;
        }
        self.started = true;

        if let Some(kind) = self.initial {
            if self.enters_without_payload(kind) {
                self.apply_kind(host, kind, false);
            } else {
                tracing::debug!(
                    kind = kind.name(),
                    "initial kind is not a registered stateless-entry state; starting inactive"
                );
            }
        }
        self.drain(host);
    }

    /// Advance one tick: run due continuations, then the active update hook.
    ///
    /// On the first call the machine starts before the scheduler advances,
    /// so continuations scheduled by the initial enter hook already count
    /// this tick's `dt`. Continuations scheduled during an update hook start
    /// counting on the next tick.
    pub fn update(&mut self, host: &mut H, dt: Duration) {
        self.start(host);
        self.tick += 1;
        self.dt = dt;

        for task in self.scheduler.advance(dt) {
            if let Some(request) = self.scheduler.take(task) {
                request(self, host);
                self.drain(host);
            }
        }

        if let Some(index) = self.current {
            let slot = &mut self.slots[index];
            let mut ctx = Context::new(
                host,
                slot.kind,
                dt,
                self.tick,
                &mut self.pending,
                &mut self.scheduler,
            );
            slot.state.on_update_state(&mut ctx);
        }
        self.drain(host);
        self.dt = Duration::ZERO;
    }

    /// Deliver a host event to every registered state, in registration order.
    pub fn notify(&mut self, host: &mut H, event: &HostEvent) {
        self.start(host);
        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            let mut ctx = Context::new(
                host,
                slot.kind,
                Duration::ZERO,
                self.tick,
                &mut self.pending,
                &mut self.scheduler,
            );
            slot.state.on_event(event, &mut ctx);
            self.drain(host);
        }
    }

    /// Transition to the stateless-entry state `T`.
    ///
    /// When `T` is not registered, nothing happens unless `force` is set, in
    /// which case the active state is exited and nothing replaces it.
    pub fn change_state<T>(&mut self, host: &mut H, force: bool)
    where
        T: SimpleState<K, H> + HasKind<K>,
    {
        self.started = true;
        self.apply_simple::<T>(host, force);
        self.drain(host);
    }

    /// Transition to the typed-entry state `T`, handing it `payload`.
    pub fn change_state_with<T, D>(&mut self, host: &mut H, payload: D, force: bool)
    where
        T: DataState<K, H, D> + HasKind<K>,
        D: 'static,
    {
        self.started = true;
        self.apply_data::<T, D>(host, T::KIND, payload, force);
        self.drain(host);
    }

    /// Transition by kind value. Kinds registered as typed-entry states count
    /// as missing here since there is no payload to give them.
    pub fn change_kind(&mut self, host: &mut H, kind: K, force: bool) {
        self.started = true;
        self.apply_kind(host, kind, force);
        self.drain(host);
    }

    /// Exit the active state, leaving the machine inactive.
    pub fn deactivate(&mut self, host: &mut H) {
        self.started = true;
        self.apply_deactivate(host);
        self.drain(host);
    }

    /// Kind of the active state; `None` when inactive.
    pub fn current_kind(&self) -> Option<K> {
        self.current.map(|index| self.slots[index].kind)
    }

    /// Whether some state is active.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Whether the machine has started, explicitly or through a transition.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Kind entered on start, as configured.
    pub fn initial_kind(&self) -> Option<K> {
        self.initial
    }

    /// Whether a state is registered under `kind`.
    pub fn contains(&self, kind: K) -> bool {
        self.index.contains_key(&kind)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.slots.iter().map(|slot| slot.kind)
    }

    /// Whether `kind` is registered and can be entered without a payload.
    pub fn enters_without_payload(&self, kind: K) -> bool {
        self.index
            .get(&kind)
            .is_some_and(|&index| self.slots[index].enter.is_some())
    }

    /// The registered state of type `T`.
    pub fn state<T>(&self) -> Option<&T>
    where
        T: BaseState<K, H> + HasKind<K>,
    {
        let index = *self.index.get(&T::KIND)?;
        downcast_ref::<K, H, T>(&*self.slots[index].state)
    }

    /// Mutable access to the registered state of type `T`.
    pub fn state_mut<T>(&mut self) -> Option<&mut T>
    where
        T: BaseState<K, H> + HasKind<K>,
    {
        let index = *self.index.get(&T::KIND)?;
        downcast_mut::<K, H, T>(&mut *self.slots[index].state)
    }

    /// The active state, if it is of type `T`.
    pub fn current<T>(&self) -> Option<&T>
    where
        T: BaseState<K, H>,
    {
        let index = self.current?;
        downcast_ref::<K, H, T>(&*self.slots[index].state)
    }

    /// Transitions recorded so far, oldest first.
    pub fn history(&self) -> &TransitionHistory<K> {
        &self.history
    }

    /// Number of `update` calls so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Scheduled continuations that have not fired or been cancelled.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub(crate) fn apply_simple<T>(&mut self, host: &mut H, force: bool)
    where
        T: SimpleState<K, H> + HasKind<K>,
    {
        self.apply_simple_at::<T>(host, T::KIND, force);
    }

    pub(crate) fn apply_simple_at<T>(&mut self, host: &mut H, kind: K, force: bool)
    where
        T: SimpleState<K, H>,
    {
        match self.slot_of::<T>(kind) {
            Some(index) => {
                let enter: Enter<K, H> = Box::new(enter_simple::<K, H, T>);
                self.transition(host, Some((index, enter)), false);
            }
            None => self.missing(host, kind, force),
        }
    }

    pub(crate) fn apply_data<T, D>(&mut self, host: &mut H, kind: K, payload: D, force: bool)
    where
        T: DataState<K, H, D>,
        D: 'static,
    {
        match self.slot_of::<T>(kind) {
            Some(index) => {
                let enter: Enter<K, H> = Box::new(
                    move |state: &mut dyn BaseState<K, H>, ctx: &mut Context<'_, K, H>| {
                        match downcast_mut::<K, H, T>(state) {
                            Some(state) => {
                                <T as DataState<K, H, D>>::on_enter_state(state, payload, ctx)
                            }
                            None => tracing::warn!(
                                kind = ctx.kind().name(),
                                "registered state does not match the requested type; \
                                 enter hook skipped"
                            ),
                        }
                    },
                );
                self.transition(host, Some((index, enter)), true);
            }
            None => self.missing(host, kind, force),
        }
    }

    pub(crate) fn apply_kind(&mut self, host: &mut H, kind: K, force: bool) {
        let target = self
            .index
            .get(&kind)
            .and_then(|&index| self.slots[index].enter.map(|enter| (index, enter)));
        match target {
            Some((index, enter)) => {
                let enter: Enter<K, H> = Box::new(enter);
                self.transition(host, Some((index, enter)), false);
            }
            None => self.missing(host, kind, force),
        }
    }

    pub(crate) fn apply_deactivate(&mut self, host: &mut H) {
        if self.current.is_some() {
            self.transition(host, None, false);
        }
    }

    /// Index of the slot registered under `kind`, provided it holds a `T`.
    /// A slot of another type counts as missing.
    fn slot_of<T: 'static>(&self, kind: K) -> Option<usize> {
        let index = self.index.get(&kind).copied()?;
        if downcast_ref::<K, H, T>(&*self.slots[index].state).is_some() {
            Some(index)
        } else {
            tracing::warn!(
                kind = kind.name(),
                requested = std::any::type_name::<T>(),
                "registered state does not match the requested type; treated as missing"
            );
            None
        }
    }

    fn missing(&mut self, host: &mut H, kind: K, force: bool) {
        if force {
            tracing::debug!(kind = kind.name(), "forced transition to missing kind; deactivating");
            self.apply_deactivate(host);
        } else {
            tracing::trace!(kind = kind.name(), "transition to missing kind ignored");
        }
    }

    fn transition(&mut self, host: &mut H, next: Option<(usize, Enter<K, H>)>, with_payload: bool) {
        let from = self.current.take();
        if let Some(index) = from {
            let slot = &mut self.slots[index];
            let mut ctx = Context::new(
                host,
                slot.kind,
                self.dt,
                self.tick,
                &mut self.pending,
                &mut self.scheduler,
            );
            slot.state.on_exit_state(&mut ctx);
            self.scheduler.cancel_owned(slot.kind);
        }

        let (to, enter) = match next {
            Some((index, enter)) => (Some(index), Some(enter)),
            None => (None, None),
        };
        self.current = to;

        let from_kind = from.map(|index| self.slots[index].kind);
        let to_kind = to.map(|index| self.slots[index].kind);
        tracing::debug!(
            from = from_kind.map(|kind| kind.name()),
            to = to_kind.map(|kind| kind.name()),
            tick = self.tick,
            with_payload,
            "state transition"
        );
        self.history.record(TransitionRecord {
            from: from_kind,
            to: to_kind,
            tick: self.tick,
            with_payload,
        });

        if let (Some(index), Some(enter)) = (to, enter) {
            let slot = &mut self.slots[index];
            let mut ctx = Context::new(
                host,
                slot.kind,
                self.dt,
                self.tick,
                &mut self.pending,
                &mut self.scheduler,
            );
            enter(&mut *slot.state, &mut ctx);
        }
    }

    /// Apply transitions requested from hooks until none is left.
    fn drain(&mut self, host: &mut H) {
        let mut chained = 0;
        while let Some(request) = self.pending.take() {
            if chained >= self.max_chained {
                tracing::warn!(
                    limit = self.max_chained,
                    current = self.current_kind().map(|kind| kind.name()),
                    "too many chained transitions; dropping request"
                );
                break;
            }
            chained += 1;
            request(self, host);
        }
    }
}

impl<K: Kind, H> fmt::Debug for StateMachine<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("kinds", &self.slots.iter().map(|slot| slot.kind).collect::<Vec<_>>())
            .field("current", &self.current.map(|index| self.slots[index].kind))
            .field("initial", &self.initial)
            .field("started", &self.started)
            .field("tick", &self.tick)
            .field("pending_tasks", &self.scheduler.len())
            .finish()
    }
}
