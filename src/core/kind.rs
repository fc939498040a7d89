//! Stable identifiers for state variants.
//!
//! A machine indexes its registered states by [`Kind`]. Kinds are plain
//! values (usually fieldless enums generated with [`kind_enum!`](crate::kind_enum)),
//! so they can be named in configuration files, logged, and serialized.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a state variant.
///
/// # Example
///
/// ```rust
/// use gambit::core::Kind;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum GuardKind {
///     Idle,
///     Alert,
/// }
///
/// impl Kind for GuardKind {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Alert => "Alert",
///         }
///     }
///
///     fn from_name(name: &str) -> Option<Self> {
///         match name {
///             "Idle" => Some(Self::Idle),
///             "Alert" => Some(Self::Alert),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(GuardKind::from_name("Alert"), Some(GuardKind::Alert));
/// assert_eq!(GuardKind::Idle.name(), "Idle");
/// ```
pub trait Kind:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + 'static
{
    /// Name used in logs and configuration files.
    fn name(&self) -> &'static str;

    /// Resolve a kind from its configured name.
    fn from_name(name: &str) -> Option<Self>;
}

/// Associates a concrete state type with the kind it is registered under.
pub trait HasKind<K: Kind> {
    const KIND: K;
}
