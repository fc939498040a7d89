//! Point-in-time snapshots of a machine.
//!
//! A snapshot captures what can be observed from outside a machine: the
//! registered kinds, the active kind, counters and the transition history.
//! State internals stay opaque. Snapshots are meant for save-game metadata,
//! debugging overlays and replay diffs.

use crate::core::{Kind, TransitionHistory};
use crate::machine::StateMachine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable view of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<K: Kind> {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: Uuid,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Kinds in registration order
    pub registered: Vec<K>,

    pub initial: Option<K>,

    /// Active kind; `None` when inactive
    pub current: Option<K>,

    pub started: bool,

    /// Number of ticks run
    pub tick: u64,

    /// Continuations not yet fired or cancelled
    pub pending_tasks: usize,

    pub history: TransitionHistory<K>,
}

impl<K: Kind> MachineSnapshot<K> {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.check_version()
    }

    fn check_version(self) -> Result<Self, SnapshotError> {
        if self.version == SNAPSHOT_VERSION {
            Ok(self)
        } else {
            Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            })
        }
    }
}

impl<K: Kind, H: 'static> StateMachine<K, H> {
    /// Capture the observable state of this machine.
    pub fn snapshot(&self) -> MachineSnapshot<K> {
        MachineSnapshot {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4(),
            taken_at: Utc::now(),
            registered: self.kinds().collect(),
            initial: self.initial_kind(),
            current: self.current_kind(),
            started: self.is_started(),
            tick: self.ticks(),
            pending_tasks: self.pending_tasks(),
            history: self.history().clone(),
        }
    }
}
