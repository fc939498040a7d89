//! Small gameplay components that run on ticks and trigger events rather
//! than on a state machine.

mod contact;
mod health;
mod lifespan;
mod player;
mod ranged;

pub use contact::{ContactDamage, ContactOutcome};
pub use health::{HealthRegistry, HealthStatus, HealthSystem};
pub use lifespan::Lifespan;
pub use player::{JumpBudget, MeleeAttack, Player, PlayerSignal};
pub use ranged::{Launch, RangedAttacker};
