//! Range checks that accumulate every violation.

use super::error::ConfigViolation;
use glam::Vec2;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

/// Implemented by configuration sections that can be range-checked.
pub trait Validate {
    /// Check every field, reporting ALL violations rather than the first.
    fn validate(&self) -> Check;
}

pub(crate) fn all(checks: Vec<Check>) -> Check {
    Validation::all_vec(checks).map(|_| ())
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Check {
    if value.is_finite() && value >= 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NegativeOrNonFinite { field, value })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Check {
    if value.is_finite() && value > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NotPositive { field, value })
    }
}

pub(crate) fn finite_points(field: &'static str, points: &[Vec2]) -> Check {
    if points.iter().all(|point| point.is_finite()) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NonFinitePoint { field })
    }
}

pub(crate) fn at_least_one(field: &'static str, value: usize) -> Check {
    if value >= 1 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::ZeroLimit { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checks_accept_valid_values() {
        let result = all(vec![
            non_negative("wait", 0.0),
            positive("speed", 2.5),
            finite_points("route", &[Vec2::ZERO, Vec2::new(4.0, 1.0)]),
            at_least_one("jumps", 2),
        ]);

        assert!(result.is_success());
    }

    #[test]
    fn all_accumulates_every_failure() {
        let result = all(vec![
            non_negative("wait", -1.0),
            positive("speed", 0.0),
            positive("radius", 1.0),
            finite_points("route", &[Vec2::new(f32::NAN, 0.0)]),
        ]);

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ConfigViolation::NegativeOrNonFinite { field: "wait", .. }
                )));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::NotPositive { field: "speed", .. })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::NonFinitePoint { field: "route" })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn infinity_is_rejected() {
        assert!(non_negative("lifespan", f32::INFINITY).is_failure());
        assert!(positive("speed", f32::NAN).is_failure());
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(at_least_one("max_chained_transitions", 0).is_failure());
    }
}
