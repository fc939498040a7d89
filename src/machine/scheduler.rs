//! Delayed, cancellable transition requests.

use super::state_machine::Request;
use crate::core::Kind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Handle returned when scheduling a continuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct Task<K: Kind, H> {
    id: TaskId,
    owner: K,
    remaining: Duration,
    request: Request<K, H>,
}

/// Pending continuations, each owned by the kind of the state that
/// scheduled it.
pub(crate) struct Scheduler<K: Kind, H> {
    tasks: Vec<Task<K, H>>,
}

impl<K: Kind, H> Scheduler<K, H> {
    pub(crate) fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub(crate) fn schedule(&mut self, owner: K, delay: Duration, request: Request<K, H>) -> TaskId {
        let id = TaskId::new();
        tracing::debug!(task = %id, owner = owner.name(), ?delay, "scheduled continuation");
        self.tasks.push(Task {
            id,
            owner,
            remaining: delay,
            request,
        });
        id
    }

    pub(crate) fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before != self.tasks.len()
    }

    /// Drop every task owned by `owner`; returns how many were dropped.
    pub(crate) fn cancel_owned(&mut self, owner: K) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.owner != owner);
        let cancelled = before - self.tasks.len();
        if cancelled > 0 {
            tracing::debug!(owner = owner.name(), cancelled, "cancelled continuations");
        }
        cancelled
    }

    /// Advance all tasks by `dt` and return the ids of those that came due,
    /// in the order they were scheduled. Due tasks stay queued until taken,
    /// so a cancellation in between still prevents them from running.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<TaskId> {
        let mut due = Vec::new();
        for task in &mut self.tasks {
            task.remaining = task.remaining.saturating_sub(dt);
            if task.remaining.is_zero() {
                due.push(task.id);
            }
        }
        due
    }

    /// Remove a task and hand back its continuation.
    pub(crate) fn take(&mut self, id: TaskId) -> Option<Request<K, H>> {
        let position = self.tasks.iter().position(|task| task.id == id)?;
        let task = self.tasks.remove(position);
        tracing::debug!(task = %task.id, owner = task.owner.name(), "continuation due");
        Some(task.request)
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) fn owned_by(&self, owner: K) -> usize {
        self.tasks.iter().filter(|task| task.owner == owner).count()
    }
}
