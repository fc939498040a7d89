//! Player-side rules: jump budget with coyote time, facing, melee hits.

use super::health::{HealthRegistry, HealthStatus};
use crate::config::PlayerConfig;
use crate::host::{ContactTag, Facing, HostEvent, TargetId};
use crate::motion::{seconds, Countdown};
use glam::Vec2;
use std::time::Duration;

/// Jumps available between landings.
///
/// Landing refills the budget. Walking off a ledge starts the coyote
/// countdown: jumping before it runs out costs the usual one jump, letting
/// it run out costs one jump on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JumpBudget {
    max_jumps: u32,
    coyote_time: Duration,
    jumps_left: u32,
    coyote: Option<Countdown>,
}

impl JumpBudget {
    pub fn new(max_jumps: u32, coyote_time: Duration) -> Self {
        Self {
            max_jumps,
            coyote_time,
            jumps_left: 0,
            coyote: None,
        }
    }

    pub fn jumps_left(&self) -> u32 {
        self.jumps_left
    }

    pub fn land(&mut self) {
        self.jumps_left = self.max_jumps;
        self.coyote = None;
    }

    pub fn leave_ground(&mut self) {
        self.coyote = Some(Countdown::new(self.coyote_time));
    }

    pub fn tick(&mut self, dt: Duration) {
        let expired = self.coyote.as_mut().is_some_and(|coyote| coyote.tick(dt));
        if expired {
            self.coyote = None;
            self.jumps_left = self.jumps_left.saturating_sub(1);
            tracing::trace!(jumps_left = self.jumps_left, "coyote time over");
        }
    }

    /// Consume a jump if one is left.
    pub fn try_jump(&mut self) -> bool {
        if self.jumps_left == 0 {
            return false;
        }
        self.jumps_left -= 1;
        true
    }
}

/// Circular melee area in front of the attacker.
#[derive(Clone, Debug, PartialEq)]
pub struct MeleeAttack {
    offset: Vec2,
    radius: f32,
    damage: f32,
}

impl MeleeAttack {
    pub fn new(offset: Vec2, radius: f32, damage: f32) -> Self {
        Self {
            offset,
            radius,
            damage,
        }
    }

    /// Center of the attack area.
    pub fn area_center(&self, position: Vec2, facing: Facing) -> Vec2 {
        position + facing.mirror(self.offset)
    }

    /// Damage every candidate inside the area, except `attacker` itself.
    ///
    /// `candidates` are the positions of entities that may be hit; those
    /// without an entry in `registry` are skipped.
    pub fn hit<R, I>(
        &self,
        attacker: TargetId,
        position: Vec2,
        facing: Facing,
        candidates: I,
        registry: &mut R,
    ) -> Vec<(TargetId, HealthStatus)>
    where
        R: HealthRegistry,
        I: IntoIterator<Item = (TargetId, Vec2)>,
    {
        let center = self.area_center(position, facing);
        candidates
            .into_iter()
            .filter(|&(target, at)| target != attacker && at.distance(center) <= self.radius)
            .filter_map(|(target, _)| {
                let health = registry.health_mut(target)?;
                Some((target, health.apply_damage(self.damage)))
            })
            .collect()
    }
}

/// Something the host should react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSignal {
    ReachedGoal,
}

/// The player's gameplay rules, minus physics and input.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub jumps: JumpBudget,
    pub melee: MeleeAttack,
    facing: Facing,
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            jumps: JumpBudget::new(config.max_jumps, seconds(config.coyote_time)),
            melee: MeleeAttack::new(
                config.attack_offset,
                config.attack_radius,
                config.attack_damage,
            ),
            facing: Facing::default(),
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Turn according to the horizontal input axis; an idle axis keeps the
    /// current facing.
    pub fn steer(&mut self, axis: f32) -> Facing {
        if let Some(facing) = Facing::from_axis(axis) {
            self.facing = facing;
        }
        self.facing
    }

    pub fn tick(&mut self, dt: Duration) {
        self.jumps.tick(dt);
    }

    /// Feed a trigger callback of the player's feet or body.
    pub fn on_event(&mut self, event: &HostEvent) -> Option<PlayerSignal> {
        match event {
            HostEvent::TriggerEnter(contact) => match contact.tag {
                ContactTag::Ground => {
                    self.jumps.land();
                    None
                }
                ContactTag::Finish => Some(PlayerSignal::ReachedGoal),
                _ => None,
            },
            HostEvent::TriggerExit(contact) if contact.tag == ContactTag::Ground => {
                self.jumps.leave_ground();
                None
            }
            HostEvent::TriggerExit(_) => None,
        }
    }

    /// Apply the melee hit at the release frame of the attack.
    pub fn attack_hit<R, I>(
        &self,
        me: TargetId,
        position: Vec2,
        candidates: I,
        registry: &mut R,
    ) -> Vec<(TargetId, HealthStatus)>
    where
        R: HealthRegistry,
        I: IntoIterator<Item = (TargetId, Vec2)>,
    {
        self.melee.hit(me, position, self.facing, candidates, registry)
    }
}
