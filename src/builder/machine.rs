//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{
    ConfigError, MachineConfig, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_CHAINED_TRANSITIONS,
};
use crate::core::{BaseState, HasKind, Kind, SimpleState};
use crate::machine::{enter_simple, SimpleEnter, Slot, StateMachine};

/// Builder for constructing state machines with a fluent API.
pub struct StateMachineBuilder<K: Kind, H> {
    slots: Vec<Slot<K, H>>,
    initial: Option<K>,
    max_chained: usize,
    history_capacity: usize,
}

impl<K: Kind, H: 'static> StateMachineBuilder<K, H> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            initial: None,
            max_chained: DEFAULT_MAX_CHAINED_TRANSITIONS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Register a state entered without a payload.
    pub fn simple<T>(mut self, state: T) -> Self
    where
        T: SimpleState<K, H> + HasKind<K>,
    {
        let enter: SimpleEnter<K, H> = enter_simple::<K, H, T>;
        self.slots.push(Slot {
            kind: T::KIND,
            state: Box::new(state),
            enter: Some(enter),
        });
        self
    }

    /// Register a state entered with a payload.
    ///
    /// Such a state is only reachable through typed transitions; it cannot
    /// be the initial state or the target of a transition by kind.
    pub fn data<T>(mut self, state: T) -> Self
    where
        T: BaseState<K, H> + HasKind<K>,
    {
        self.slots.push(Slot {
            kind: T::KIND,
            state: Box::new(state),
            enter: None,
        });
        self
    }

    /// Set the kind entered when the machine starts.
    pub fn initial(mut self, kind: K) -> Self {
        self.initial = Some(kind);
        self
    }

    /// Cap on transitions requested by hooks in a single chain.
    pub fn max_chained_transitions(mut self, limit: usize) -> Self {
        self.max_chained = limit;
        self
    }

    /// Number of transition records kept; zero disables the history.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Apply a machine configuration.
    /// Returns an error if the configured initial state names no kind.
    pub fn config(mut self, config: &MachineConfig) -> Result<Self, ConfigError> {
        if let Some(kind) = config.initial_kind::<K>()? {
            self.initial = Some(kind);
        }
        self.max_chained = config.max_chained_transitions;
        self.history_capacity = config.history_capacity;
        Ok(self)
    }

    /// Build the state machine.
    /// Returns an error if no state was registered or a kind was registered twice.
    pub fn build(self) -> Result<StateMachine<K, H>, BuildError> {
        if self.slots.is_empty() {
            return Err(BuildError::NoStates);
        }

        for (index, slot) in self.slots.iter().enumerate() {
            if self.slots[..index].iter().any(|other| other.kind == slot.kind) {
                return Err(BuildError::DuplicateKind {
                    kind: slot.kind.name().to_string(),
                });
            }
        }

        tracing::debug!(
            states = self.slots.len(),
            initial = self.initial.map(|kind| kind.name()),
            "built state machine"
        );
        Ok(StateMachine::from_parts(
            self.slots,
            self.initial,
            self.max_chained,
            self.history_capacity,
        ))
    }
}

impl<K: Kind, H: 'static> Default for StateMachineBuilder<K, H> {
    fn default() -> Self {
        Self::new()
    }
}
