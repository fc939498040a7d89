//! Gambit: gameplay state machines for 2D action games
//!
//! Gambit keeps gameplay rules out of the engine. Behaviors are states of a
//! [`StateMachine`](machine::StateMachine) that drives a host entity through
//! the [`Host`](host::Host) trait; the engine calls `update` once per frame
//! and forwards trigger callbacks with `notify`.
//!
//! # Core Concepts
//!
//! - **Kind**: stable identifier of a state, usually declared with [`kind_enum!`]
//! - **State**: enter, update and exit hooks; entry either takes no
//!   argument ([`SimpleState`](core::SimpleState)) or a typed payload
//!   ([`DataState`](core::DataState))
//! - **Context**: what a hook sees: the host, the tick delta, transition
//!   requests and delayed, cancellable continuations
//! - **Behaviors**: the enemy AI in [`enemy`] and the actor components in
//!   [`actors`]
//!
//! # Example
//!
//! ```rust
//! use gambit::builder::StateMachineBuilder;
//! use gambit::core::{BaseState, HasKind, SimpleState};
//! use gambit::host::{Body, Host};
//! use gambit::kind_enum;
//! use gambit::machine::Context;
//! use glam::Vec2;
//! use std::time::Duration;
//!
//! kind_enum! {
//!     enum Door {
//!         Closed,
//!         Opening,
//!     }
//! }
//!
//! struct Closed;
//!
//! impl HasKind<Door> for Closed {
//!     const KIND: Door = Door::Closed;
//! }
//!
//! impl BaseState<Door, Body> for Closed {}
//!
//! impl SimpleState<Door, Body> for Closed {
//!     fn on_enter_state(&mut self, ctx: &mut Context<'_, Door, Body>) {
//!         ctx.schedule_change::<Opening>(Duration::from_secs(1), false);
//!     }
//! }
//!
//! struct Opening;
//!
//! impl HasKind<Door> for Opening {
//!     const KIND: Door = Door::Opening;
//! }
//!
//! impl BaseState<Door, Body> for Opening {
//!     fn on_update_state(&mut self, ctx: &mut Context<'_, Door, Body>) {
//!         let lifted = ctx.host().position() + Vec2::new(0.0, ctx.delta_secs());
//!         ctx.host_mut().set_position(lifted);
//!     }
//! }
//!
//! impl SimpleState<Door, Body> for Opening {}
//!
//! let mut machine = StateMachineBuilder::new()
//!     .simple(Closed)
//!     .simple(Opening)
//!     .initial(Door::Closed)
//!     .build()
//!     .unwrap();
//! let mut door = Body::new(Vec2::ZERO);
//!
//! // The first update enters Closed, the second fires the delayed change
//! // and runs one update of Opening.
//! for _ in 0..2 {
//!     machine.update(&mut door, Duration::from_millis(500));
//! }
//!
//! assert_eq!(machine.current_kind(), Some(Door::Opening));
//! assert_eq!(door.position, Vec2::new(0.0, 0.5));
//! ```

pub mod actors;
pub mod builder;
pub mod config;
pub mod core;
pub mod enemy;
pub mod host;
pub mod machine;
pub mod motion;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder};
pub use core::{BaseState, DataState, HasKind, Kind, SimpleState};
pub use machine::{Context, StateMachine};
