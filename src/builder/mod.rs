//! Builder API for state machine construction.
//!
//! States are registered explicitly, one call per state, so the set of
//! kinds a machine can enter is fixed once [`StateMachineBuilder::build`]
//! returns.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
