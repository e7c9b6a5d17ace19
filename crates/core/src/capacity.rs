//! Capacity arithmetic for binding a request to a shift.
//!
//! Limits are soft: exceeding one yields a [`CapacityWarning`] that travels
//! with a successful result instead of an error.

use serde::Serialize;

use crate::error::CoreError;

/// Hard limits of a driver's vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverCapacity {
    pub max_seats: i32,
    pub max_checked: i32,
    pub max_carry_on: i32,
}

/// Load already bound to a shift, aggregated from the bridge tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftLoad {
    pub bound_requests: i64,
    pub staff: i64,
    pub checked_bags: i64,
    pub carry_on_bags: i64,
}

/// Totals the shift would carry after adding one more request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProspectiveTotals {
    pub seats: i64,
    pub checked_bags: i64,
    pub carry_on_bags: i64,
}

/// Advisory attached to a successful assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityWarning {
    CapacityOverload,
}

impl CapacityWarning {
    pub fn as_str(self) -> &'static str {
        match self {
            CapacityWarning::CapacityOverload => "capacity_overload",
        }
    }
}

impl std::fmt::Display for CapacityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DriverCapacity {
    /// Reject negative limits. Zero is allowed (e.g. no trunk space).
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("max_seats", self.max_seats),
            ("max_checked", self.max_checked),
            ("max_carry_on", self.max_carry_on),
        ];
        for (name, value) in fields {
            if value < 0 {
                return Err(CoreError::Validation(format!(
                    "{name} must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl ShiftLoad {
    /// Add one rider with the given bags. The rider takes a seat next to
    /// everyone already bound plus the staff.
    pub fn with_request(&self, checked_bags: i32, carry_on_bags: i32) -> ProspectiveTotals {
        ProspectiveTotals {
            seats: self.bound_requests + 1 + self.staff,
            checked_bags: self.checked_bags + i64::from(checked_bags),
            carry_on_bags: self.carry_on_bags + i64::from(carry_on_bags),
        }
    }
}

impl ProspectiveTotals {
    /// `Some(CapacityOverload)` if any total exceeds its limit.
    pub fn check(&self, capacity: &DriverCapacity) -> Option<CapacityWarning> {
        let over = self.seats > i64::from(capacity.max_seats)
            || self.checked_bags > i64::from(capacity.max_checked)
            || self.carry_on_bags > i64::from(capacity.max_carry_on);
        over.then_some(CapacityWarning::CapacityOverload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: DriverCapacity = DriverCapacity {
        max_seats: 1,
        max_checked: 1,
        max_carry_on: 1,
    };

    #[test]
    fn staff_takes_a_seat() {
        let load = ShiftLoad {
            staff: 1,
            ..ShiftLoad::default()
        };
        let totals = load.with_request(1, 1);
        assert_eq!(totals.seats, 2);
        assert_eq!(totals.check(&TINY), Some(CapacityWarning::CapacityOverload));
    }

    #[test]
    fn empty_shift_empty_bags_fits() {
        let totals = ShiftLoad::default().with_request(0, 0);
        assert_eq!(totals.seats, 1);
        assert_eq!(totals.check(&TINY), None);
    }

    #[test]
    fn exactly_at_limit_is_not_overload() {
        let totals = ShiftLoad::default().with_request(1, 1);
        assert_eq!(totals.check(&TINY), None);
    }

    #[test]
    fn checked_bags_alone_trigger_overload() {
        let load = ShiftLoad {
            bound_requests: 0,
            staff: 0,
            checked_bags: 1,
            carry_on_bags: 0,
        };
        let totals = load.with_request(0, 0);
        assert_eq!(totals.checked_bags, 1);
        assert_eq!(totals.check(&TINY), None);
        assert_eq!(
            load.with_request(1, 0).check(&TINY),
            Some(CapacityWarning::CapacityOverload)
        );
    }

    #[test]
    fn carry_on_bags_alone_trigger_overload() {
        let roomy = DriverCapacity {
            max_seats: 6,
            max_checked: 6,
            max_carry_on: 2,
        };
        let load = ShiftLoad {
            bound_requests: 2,
            staff: 0,
            checked_bags: 2,
            carry_on_bags: 2,
        };
        assert_eq!(
            load.with_request(0, 1).check(&roomy),
            Some(CapacityWarning::CapacityOverload)
        );
    }

    #[test]
    fn negative_limit_is_rejected() {
        let bad = DriverCapacity {
            max_seats: 4,
            max_checked: -1,
            max_carry_on: 0,
        };
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("max_checked"));
        assert!(TINY.validate().is_ok());
    }

    #[test]
    fn warning_serializes_as_snake_case() {
        assert_eq!(CapacityWarning::CapacityOverload.as_str(), "capacity_overload");
        assert_eq!(CapacityWarning::CapacityOverload.to_string(), "capacity_overload");
    }
}
