//! Transition history tracking.
//!
//! Every transition a machine performs is recorded as a
//! [`TransitionRecord`]. The history is bounded: once `capacity` records are
//! held, the oldest one is dropped for each new record. A capacity of zero
//! disables recording.

use super::kind::Kind;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single transition.
///
/// `None` on either side stands for "no active state".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<K: Kind> {
    /// The kind that was active before the transition
    pub from: Option<K>,
    /// The kind that became active
    pub to: Option<K>,
    /// Tick counter of the machine when the transition happened
    pub tick: u64,
    /// Whether the entered state received a payload
    pub with_payload: bool,
}

/// Bounded, ordered history of transitions.
///
/// # Example
///
/// ```rust
/// use gambit::core::{TransitionHistory, TransitionRecord};
/// use gambit::kind_enum;
///
/// kind_enum! {
///     enum Phase {
///         One,
///         Two,
///     }
/// }
///
/// let mut history = TransitionHistory::with_capacity(8);
/// history.record(TransitionRecord {
///     from: None,
///     to: Some(Phase::One),
///     tick: 0,
///     with_payload: false,
/// });
/// history.record(TransitionRecord {
///     from: Some(Phase::One),
///     to: Some(Phase::Two),
///     tick: 3,
///     with_payload: true,
/// });
///
/// assert_eq!(history.get_path(), vec![None, Some(Phase::One), Some(Phase::Two)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionHistory<K: Kind> {
    records: VecDeque<TransitionRecord<K>>,
    capacity: usize,
}

impl<K: Kind> TransitionHistory<K> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, record: TransitionRecord<K>) {
        if self.capacity == 0 {
            return;
        }
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Kinds traversed, oldest first: the `from` side of the first retained
    /// record, then the `to` side of every record.
    pub fn get_path(&self) -> Vec<Option<K>> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }

    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord<K>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<K>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
