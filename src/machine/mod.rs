//! The runtime: [`StateMachine`], the [`Context`] handed to hooks, and the
//! scheduler of delayed transitions.

mod context;
mod scheduler;
mod state_machine;

pub use context::Context;
pub use scheduler::TaskId;
pub use state_machine::StateMachine;

pub(crate) use state_machine::{enter_simple, SimpleEnter, Slot};
