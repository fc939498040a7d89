//! Build errors for state machines.

use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No states registered. Call .simple(state) or .data(state) before .build()")]
    NoStates,

    #[error("State kind {kind} registered more than once")]
    DuplicateKind { kind: String },
}
