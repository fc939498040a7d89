//! Hit points.

use crate::config::HealthConfig;
use crate::host::TargetId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of applying damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Alive,
    /// Health dropped below zero; the host should remove the entity
    Destroyed,
}

/// Health pool that starts full and is destroyed once it drops strictly
/// below zero. Reaching exactly zero still counts as alive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthSystem {
    max_health: f32,
    current: f32,
}

impl HealthSystem {
    pub fn new(config: &HealthConfig) -> Self {
        Self {
            max_health: config.max_health,
            current: config.max_health,
        }
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn status(&self) -> HealthStatus {
        if self.current < 0.0 {
            HealthStatus::Destroyed
        } else {
            HealthStatus::Alive
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.status() == HealthStatus::Destroyed
    }

    /// Subtract `amount`. Damage to a destroyed pool is ignored.
    pub fn apply_damage(&mut self, amount: f32) -> HealthStatus {
        if self.is_destroyed() {
            return HealthStatus::Destroyed;
        }
        self.current -= amount;
        let status = self.status();
        tracing::trace!(amount, current = self.current, ?status, "damage applied");
        status
    }
}

/// Where actors look up the health of the entity on the other side of a
/// contact or inside an attack area.
pub trait HealthRegistry {
    fn health_mut(&mut self, target: TargetId) -> Option<&mut HealthSystem>;
}

impl HealthRegistry for HashMap<TargetId, HealthSystem> {
    fn health_mut(&mut self, target: TargetId) -> Option<&mut HealthSystem> {
        self.get_mut(&target)
    }
}
