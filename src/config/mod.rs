//! Tunable parameters for machines, behaviors and actors.
//!
//! Every section deserializes from JSON with defaults for missing fields,
//! and implements [`Validate`] so that a document with several bad values
//! reports all of them at once. Vectors are `[x, y]` arrays.
//!
//! ```rust
//! use gambit::config::{self, PatrolConfig};
//!
//! let patrol: PatrolConfig =
//!     config::from_json(r#"{ "route": [[0, 0], [4, 0]], "speed": 2.0 }"#).unwrap();
//! assert_eq!(patrol.route.len(), 2);
//! assert_eq!(patrol.wait_time, 1.0);
//! ```

pub mod error;
pub mod validation;

pub use error::{ConfigError, ConfigViolation};
pub use validation::{Check, Validate};

use crate::core::Kind;
use crate::motion::seconds;
use glam::Vec2;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use validation::{all, at_least_one, finite_points, non_negative, positive};

pub const DEFAULT_MAX_CHAINED_TRANSITIONS: usize = 16;
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Parse a configuration section and validate it.
pub fn from_json<T>(json: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Validate,
{
    let config: T = serde_json::from_str(json)?;
    check(&config)?;
    Ok(config)
}

/// Validate an already constructed section.
pub fn check<T: Validate>(config: &T) -> Result<(), ConfigError> {
    match config.validate() {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => {
            let violations: Vec<ConfigViolation> = errors.iter().cloned().collect();
            tracing::debug!(count = violations.len(), "configuration rejected");
            Err(ConfigError::Invalid(violations))
        }
    }
}

/// Machine-level settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Name of the kind entered on start; `None` starts inactive
    pub initial_state: Option<String>,
    /// Cap on hook-requested transitions applied in one chain
    pub max_chained_transitions: usize,
    /// Number of transition records kept
    pub history_capacity: usize,
}

impl MachineConfig {
    /// Resolve the configured initial state name to a kind.
    pub fn initial_kind<K: Kind>(&self) -> Result<Option<K>, ConfigError> {
        match &self.initial_state {
            None => Ok(None),
            Some(name) => K::from_name(name)
                .map(Some)
                .ok_or_else(|| ConfigError::UnknownKind { name: name.clone() }),
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            initial_state: None,
            max_chained_transitions: DEFAULT_MAX_CHAINED_TRANSITIONS,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl Validate for MachineConfig {
    fn validate(&self) -> Check {
        at_least_one("machine.max_chained_transitions", self.max_chained_transitions)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolConfig {
    /// Waypoints in world space, visited in order
    pub route: Vec<Vec2>,
    pub speed: f32,
    /// Seconds spent at each waypoint
    pub wait_time: f32,
    /// Reverse at either end instead of looping back to the first waypoint
    pub pingpong: bool,
}

impl PatrolConfig {
    pub fn wait(&self) -> Duration {
        seconds(self.wait_time)
    }
}

impl Default for PatrolConfig {
    fn default() -> Self {
        Self {
            route: Vec::new(),
            speed: 2.0,
            wait_time: 1.0,
            pingpong: false,
        }
    }
}

impl Validate for PatrolConfig {
    fn validate(&self) -> Check {
        all(vec![
            finite_points("patrol.route", &self.route),
            positive("patrol.speed", self.speed),
            non_negative("patrol.wait_time", self.wait_time),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Radius of the detection volume the host attaches to the enemy
    pub sensor_radius: f32,
    pub chase_speed: f32,
    /// Distance at or under which the chase turns into an attack
    pub attack_distance: f32,
    /// Seconds to wait after losing the target before patrolling again
    pub lose_target_delay: f32,
}

impl ChaseConfig {
    pub fn lose_target_wait(&self) -> Duration {
        seconds(self.lose_target_delay)
    }
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            sensor_radius: 5.0,
            chase_speed: 3.0,
            attack_distance: 1.5,
            lose_target_delay: 2.0,
        }
    }
}

impl Validate for ChaseConfig {
    fn validate(&self) -> Check {
        all(vec![
            positive("chase.sensor_radius", self.sensor_radius),
            positive("chase.chase_speed", self.chase_speed),
            non_negative("chase.attack_distance", self.attack_distance),
            non_negative("chase.lose_target_delay", self.lose_target_delay),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Seconds of wind-up before each lunge
    pub time_between_attacks: f32,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            time_between_attacks: 1.0,
        }
    }
}

impl Validate for AttackConfig {
    fn validate(&self) -> Check {
        non_negative("attack.time_between_attacks", self.time_between_attacks)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackingConfig {
    pub attack_speed: f32,
}

impl Default for AttackingConfig {
    fn default() -> Self {
        Self { attack_speed: 8.0 }
    }
}

impl Validate for AttackingConfig {
    fn validate(&self) -> Check {
        positive("attacking.attack_speed", self.attack_speed)
    }
}

/// Everything an enemy machine needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub machine: MachineConfig,
    pub patrol: PatrolConfig,
    pub chase: ChaseConfig,
    pub attack: AttackConfig,
    pub attacking: AttackingConfig,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            machine: MachineConfig {
                initial_state: Some("Patrol".to_string()),
                ..MachineConfig::default()
            },
            patrol: PatrolConfig::default(),
            chase: ChaseConfig::default(),
            attack: AttackConfig::default(),
            attacking: AttackingConfig::default(),
        }
    }
}

impl Validate for EnemyConfig {
    fn validate(&self) -> Check {
        all(vec![
            self.machine.validate(),
            self.patrol.validate(),
            self.chase.validate(),
            self.attack.validate(),
            self.attacking.validate(),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max_health: f32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { max_health: 10.0 }
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Check {
        non_negative("health.max_health", self.max_health)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDamageConfig {
    /// Whether the damaging object destroys itself after a hit
    pub destroy_on_touch: bool,
    pub damage: f32,
}

impl Default for ContactDamageConfig {
    fn default() -> Self {
        Self {
            destroy_on_touch: false,
            damage: 1.0,
        }
    }
}

impl Validate for ContactDamageConfig {
    fn validate(&self) -> Check {
        non_negative("contact_damage.damage", self.damage)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedConfig {
    pub time_between_attacks: f32,
    /// Impulse given to each projectile along the facing direction
    pub throw_force: f32,
    /// Projectile spawn offset for a right-facing attacker
    pub offset: Vec2,
}

impl Default for RangedConfig {
    fn default() -> Self {
        Self {
            time_between_attacks: 2.0,
            throw_force: 5.0,
            offset: Vec2::new(0.5, 0.0),
        }
    }
}

impl Validate for RangedConfig {
    fn validate(&self) -> Check {
        all(vec![
            positive("ranged.time_between_attacks", self.time_between_attacks),
            non_negative("ranged.throw_force", self.throw_force),
            finite_points("ranged.offset", &[self.offset]),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifespanConfig {
    pub lifespan: f32,
}

impl Default for LifespanConfig {
    fn default() -> Self {
        Self { lifespan: 3.0 }
    }
}

impl Validate for LifespanConfig {
    fn validate(&self) -> Check {
        non_negative("lifespan.lifespan", self.lifespan)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_jumps: u32,
    /// Seconds after leaving the ground during which no jump is lost
    pub coyote_time: f32,
    /// Melee area center for a right-facing player
    pub attack_offset: Vec2,
    pub attack_radius: f32,
    pub attack_damage: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_jumps: 2,
            coyote_time: 0.1,
            attack_offset: Vec2::new(0.5, 0.0),
            attack_radius: 0.5,
            attack_damage: 1.0,
        }
    }
}

impl Validate for PlayerConfig {
    fn validate(&self) -> Check {
        all(vec![
            non_negative("player.coyote_time", self.coyote_time),
            finite_points("player.attack_offset", &[self.attack_offset]),
            non_negative("player.attack_radius", self.attack_radius),
            non_negative("player.attack_damage", self.attack_damage),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind_enum;

    kind_enum! {
        enum TestKind {
            Patrol,
            Chase,
        }
    }

    #[test]
    fn missing_fields_take_defaults() {
        let chase: ChaseConfig = from_json(r#"{ "chase_speed": 4.0 }"#).unwrap();

        assert_eq!(chase.chase_speed, 4.0);
        assert_eq!(chase.lose_target_delay, 2.0);
        assert_eq!(chase.lose_target_wait(), Duration::from_secs(2));
    }

    #[test]
    fn enemy_config_defaults_to_patrol() {
        let config: EnemyConfig = from_json("{}").unwrap();

        assert_eq!(config.machine.initial_kind::<TestKind>().unwrap(), Some(TestKind::Patrol));
        assert!(config.patrol.route.is_empty());
    }

    #[test]
    fn route_parses_from_pairs() {
        let patrol: PatrolConfig =
            from_json(r#"{ "route": [[0, 0], [4, 0], [4, 2.5]], "pingpong": true }"#).unwrap();

        assert_eq!(patrol.route[2], Vec2::new(4.0, 2.5));
        assert!(patrol.pingpong);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let result: Result<PatrolConfig, _> = from_json(r#"{ "speed": "fast" }"#);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_reports_every_violation() {
        let json = r#"{
            "machine": { "max_chained_transitions": 0 },
            "patrol": { "speed": -1.0, "wait_time": -2.0 },
            "attacking": { "attack_speed": 0.0 }
        }"#;

        let result: Result<EnemyConfig, _> = from_json(json);

        match result {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(violations.len(), 4);
                assert!(violations.contains(&ConfigViolation::ZeroLimit {
                    field: "machine.max_chained_transitions"
                }));
                assert!(violations.contains(&ConfigViolation::NotPositive {
                    field: "patrol.speed",
                    value: -1.0
                }));
                assert!(violations.contains(&ConfigViolation::NegativeOrNonFinite {
                    field: "patrol.wait_time",
                    value: -2.0
                }));
                assert!(violations.contains(&ConfigViolation::NotPositive {
                    field: "attacking.attack_speed",
                    value: 0.0
                }));
            }
            other => panic!("Expected invalid configuration, got {other:?}"),
        }
    }

    #[test]
    fn unknown_initial_state_is_reported() {
        let config = MachineConfig {
            initial_state: Some("Sleep".to_string()),
            ..MachineConfig::default()
        };

        let result = config.initial_kind::<TestKind>();

        assert!(matches!(result, Err(ConfigError::UnknownKind { ref name }) if name == "Sleep"));
    }

    #[test]
    fn invalid_error_message_counts_violations() {
        let error = check(&PlayerConfig {
            coyote_time: -1.0,
            attack_radius: f32::NAN,
            ..PlayerConfig::default()
        })
        .unwrap_err();

        assert_eq!(error.to_string(), "Invalid configuration (2 violations)");
    }
}
