//! Macros for ergonomic state machine construction.

/// Generate a fieldless enum implementing [`Kind`](crate::core::Kind).
///
/// Variant names double as the names used in configuration files. The enum
/// also gets an `ALL` constant listing its variants in declaration order.
///
/// # Example
///
/// ```
/// use gambit::core::Kind;
/// use gambit::kind_enum;
///
/// kind_enum! {
///     pub enum TurretKind {
///         Idle,
///         Tracking,
///         Firing,
///     }
/// }
///
/// assert_eq!(TurretKind::Tracking.name(), "Tracking");
/// assert_eq!(TurretKind::from_name("Firing"), Some(TurretKind::Firing));
/// assert_eq!(TurretKind::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! kind_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::Kind for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Kind;

    kind_enum! {
        enum TestKind {
            Patrol,
            Chase,
            Attack,
        }
    }

    #[test]
    fn kind_enum_macro_generates_trait() {
        assert_eq!(TestKind::Patrol.name(), "Patrol");
        assert_eq!(TestKind::from_name("Chase"), Some(TestKind::Chase));
        assert_eq!(TestKind::from_name("chase"), None);
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(
            TestKind::ALL,
            &[TestKind::Patrol, TestKind::Chase, TestKind::Attack]
        );
        for kind in TestKind::ALL {
            assert_eq!(TestKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn kind_enum_supports_visibility() {
        kind_enum! {
            /// Doc comments pass through.
            pub enum PublicKind {
                A,
                B,
            }
        }

        assert_eq!(PublicKind::B.name(), "B");
    }

    #[test]
    fn kind_enum_serializes_by_variant_name() {
        let json = serde_json::to_string(&TestKind::Attack).unwrap();
        assert_eq!(json, "\"Attack\"");
    }
}
