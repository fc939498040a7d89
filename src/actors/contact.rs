//! Damage dealt by touching the player.

use super::health::{HealthRegistry, HealthStatus};
use crate::config::ContactDamageConfig;
use crate::host::{ContactTag, HostEvent};

/// What a contact did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Not the player's hitbox, or nothing with health behind it
    Ignored,
    Damaged {
        target: HealthStatus,
        /// The damaging object should destroy itself
        destroy_self: bool,
    },
}

/// Hurts the player on trigger-enter with the player's hitbox.
#[derive(Clone, Debug, PartialEq)]
pub struct ContactDamage {
    damage: f32,
    destroy_on_touch: bool,
}

impl ContactDamage {
    pub fn new(config: &ContactDamageConfig) -> Self {
        Self {
            damage: config.damage,
            destroy_on_touch: config.destroy_on_touch,
        }
    }

    pub fn on_event<R>(&self, event: &HostEvent, registry: &mut R) -> ContactOutcome
    where
        R: HealthRegistry,
    {
        let HostEvent::TriggerEnter(contact) = event else {
            return ContactOutcome::Ignored;
        };
        if contact.tag != ContactTag::PlayerHitbox {
            return ContactOutcome::Ignored;
        }
        let Some(health) = registry.health_mut(contact.target) else {
            return ContactOutcome::Ignored;
        };

        let target = health.apply_damage(self.damage);
        tracing::debug!(
            entity = %contact.target,
            damage = self.damage,
            status = ?target,
            "contact damage"
        );
        ContactOutcome::Damaged {
            target,
            destroy_self: self.destroy_on_touch,
        }
    }
}
