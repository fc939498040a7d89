//! Core contracts shared by every machine.
//!
//! - [`Kind`] identifies a registered state
//! - [`BaseState`], [`SimpleState`] and [`DataState`] are the hook contracts
//! - [`TransformTargetState`] and [`PointTargetState`] specialize typed entry
//!   for target payloads
//! - [`TransitionHistory`] records what the machine did

mod history;
mod kind;
pub(crate) mod state;
mod target;

pub use history::{TransitionHistory, TransitionRecord};
pub use kind::{HasKind, Kind};
pub use state::{AsAny, BaseState, DataState, SimpleState};
pub use target::{PointTargetState, TargetPoint, TargetTransform, TransformTargetState};
