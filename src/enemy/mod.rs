//! Enemy AI: patrol a route, chase the player on sight, attack in range.
//!
//! ```text
//!  Patrol --sensor enter--> Chase --in range--> Attack --wind-up--> Attacking
//!    ^                        |  ^                                     |
//!    +--- lose_target_delay --+  +------------ lunge done -------------+
//! ```
//!
//! # Example
//!
//! ```rust
//! use gambit::config::EnemyConfig;
//! use gambit::enemy::{enemy_machine, EnemyKind};
//! use gambit::host::{Body, Contact, ContactTag, HostEvent, TargetId};
//! use glam::Vec2;
//! use std::time::Duration;
//!
//! let mut config = EnemyConfig::default();
//! config.patrol.route = vec![Vec2::ZERO, Vec2::new(4.0, 0.0)];
//!
//! let mut body = Body::new(Vec2::ZERO);
//! let mut machine = enemy_machine::<Body>(&config).unwrap();
//! machine.update(&mut body, Duration::from_millis(16));
//! assert_eq!(machine.current_kind(), Some(EnemyKind::Patrol));
//!
//! let player = TargetId(1);
//! body.place_target(player, Vec2::new(10.0, 0.0));
//! let seen = HostEvent::TriggerEnter(Contact::new(ContactTag::PlayerSensor, player));
//! machine.notify(&mut body, &seen);
//! assert_eq!(machine.current_kind(), Some(EnemyKind::Chase));
//! ```

mod attack;
mod attacking;
mod chase;
mod patrol;

pub use attack::AttackState;
pub use attacking::AttackingState;
pub use chase::ChaseState;
pub use patrol::PatrolState;

use crate::builder::{BuildError, StateMachineBuilder};
use crate::config::{self, ConfigError, EnemyConfig};
use crate::host::Host;
use crate::kind_enum;
use crate::machine::StateMachine;
use thiserror::Error;

kind_enum! {
    /// States of an enemy machine.
    pub enum EnemyKind {
        Patrol,
        Chase,
        Attack,
        Attacking,
    }
}

/// Errors that can occur when setting up an enemy.
#[derive(Debug, Error)]
pub enum EnemyError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Validate `config` and build an enemy machine with all four states.
pub fn enemy_machine<H: Host + 'static>(
    config: &EnemyConfig,
) -> Result<StateMachine<EnemyKind, H>, EnemyError> {
    config::check(config)?;

    let machine = StateMachineBuilder::new()
        .simple(PatrolState::new(&config.patrol))
        .data(ChaseState::new(&config.chase))
        .data(AttackState::new(&config.attack))
        .data(AttackingState::new(&config.attacking))
        .config(&config.machine)?
        .build()?;
    Ok(machine)
}
