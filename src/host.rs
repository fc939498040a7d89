//! The host entity a machine drives.
//!
//! States never own positions or query physics themselves. They reach the
//! engine-side entity through the [`Host`] trait, which is passed into every
//! hook, and they receive trigger-volume callbacks as [`HostEvent`] values.
//! [`Body`] is a plain in-memory host for headless simulation and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Handle of another entity a state can track (the player, usually).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Horizontal facing of a 2D actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Facing needed to look from `from` toward `to`.
    ///
    /// Anything not strictly to the right counts as left.
    pub fn toward(from: Vec2, to: Vec2) -> Self {
        if from.x < to.x {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Facing selected by a horizontal input axis; `None` when idle.
    pub fn from_axis(axis: f32) -> Option<Self> {
        if axis > 0.0 {
            Some(Self::Right)
        } else if axis < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }

    /// `1.0` facing right, `-1.0` facing left.
    pub fn sign(self) -> f32 {
        match self {
            Self::Right => 1.0,
            Self::Left => -1.0,
        }
    }

    /// Unit vector pointing forward.
    pub fn forward(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    /// Mirror a local offset horizontally for this facing.
    pub fn mirror(self, offset: Vec2) -> Vec2 {
        Vec2::new(offset.x * self.sign(), offset.y)
    }
}

/// What the host entity exposes to states.
pub trait Host {
    fn position(&self) -> Vec2;

    fn set_position(&mut self, position: Vec2);

    fn set_facing(&mut self, facing: Facing);

    /// Current position of a tracked entity, `None` once it no longer exists.
    fn locate(&self, target: TargetId) -> Option<Vec2>;
}

/// Tag carried by the collider on the other side of a contact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactTag {
    /// The player's wide detection volume
    PlayerSensor,
    /// The player's body collider
    PlayerHitbox,
    /// Walkable floor under an actor's feet
    Ground,
    /// The level goal
    Finish,
    Other(String),
}

/// The other side of a trigger contact.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub tag: ContactTag,
    pub target: TargetId,
}

impl Contact {
    pub fn new(tag: ContactTag, target: TargetId) -> Self {
        Self { tag, target }
    }
}

/// Callbacks forwarded from the host's physics layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEvent {
    TriggerEnter(Contact),
    TriggerExit(Contact),
}

impl HostEvent {
    pub fn contact(&self) -> &Contact {
        match self {
            Self::TriggerEnter(contact) | Self::TriggerExit(contact) => contact,
        }
    }
}

/// In-memory host: a position, a facing, and the positions of tracked
/// entities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub facing: Facing,
    targets: HashMap<TargetId, Vec2>,
}

impl Body {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Insert or move a tracked entity.
    pub fn place_target(&mut self, target: TargetId, position: Vec2) {
        self.targets.insert(target, position);
    }

    pub fn remove_target(&mut self, target: TargetId) -> Option<Vec2> {
        self.targets.remove(&target)
    }
}

impl Host for Body {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    fn locate(&self, target: TargetId) -> Option<Vec2> {
        self.targets.get(&target).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_toward_looks_right_only_when_strictly_right() {
        assert_eq!(Facing::toward(Vec2::ZERO, Vec2::new(1.0, 0.0)), Facing::Right);
        assert_eq!(Facing::toward(Vec2::ZERO, Vec2::new(-1.0, 0.0)), Facing::Left);
        assert_eq!(Facing::toward(Vec2::ZERO, Vec2::new(0.0, 4.0)), Facing::Left);
    }

    #[test]
    fn facing_from_axis() {
        assert_eq!(Facing::from_axis(0.5), Some(Facing::Right));
        assert_eq!(Facing::from_axis(-1.0), Some(Facing::Left));
        assert_eq!(Facing::from_axis(0.0), None);
    }

    #[test]
    fn mirror_flips_horizontal_offset() {
        let offset = Vec2::new(0.5, 1.0);
        assert_eq!(Facing::Right.mirror(offset), Vec2::new(0.5, 1.0));
        assert_eq!(Facing::Left.mirror(offset), Vec2::new(-0.5, 1.0));
        assert_eq!(Facing::Left.forward(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn body_tracks_targets() {
        let mut body = Body::new(Vec2::new(1.0, 2.0));
        let player = TargetId(7);

        assert_eq!(body.locate(player), None);
        body.place_target(player, Vec2::new(4.0, 2.0));
        assert_eq!(body.locate(player), Some(Vec2::new(4.0, 2.0)));
        body.remove_target(player);
        assert_eq!(body.locate(player), None);
    }

    #[test]
    fn event_exposes_contact() {
        let contact = Contact::new(ContactTag::PlayerSensor, TargetId(1));
        let event = HostEvent::TriggerExit(contact.clone());
        assert_eq!(event.contact(), &contact);
    }
}
