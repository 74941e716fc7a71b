//! Damage amounts.

use std::fmt;

use crate::error::{ValueError, ensure_finite, ensure_non_negative};

/// Non-negative integer damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Damage {
    value: u32,
}

impl Damage {
    pub const ZERO: Self = Self { value: 0 };

    /// Creates damage from a possibly fractional amount, rounded to the
    /// nearest integer.
    pub fn new(value: f64) -> Result<Self, ValueError> {
        let value = ensure_non_negative("value", value)?;
        Ok(Self {
            value: value.round() as u32,
        })
    }

    /// Creates damage from an integer amount.
    pub const fn flat(value: u32) -> Self {
        Self { value }
    }

    /// Percentage-of-current-health damage, rounded up.
    ///
    /// Rounding up guarantees at least 1 damage whenever `current_hp > 0` and
    /// `percentage > 0`, so percentage weapons always make progress.
    pub fn from_percentage(current_hp: u32, percentage: f64) -> Result<Self, ValueError> {
        let percentage = ensure_finite("percentage", percentage)?;
        if !(0.0..=1.0).contains(&percentage) {
            return Err(ValueError::PercentageOutOfRange { value: percentage });
        }

        // products within float noise of an integer are not rounded up
        let raw = f64::from(current_hp) * percentage;
        let nearest = raw.round();
        let value = if nearest >= 1.0 && (raw - nearest).abs() <= nearest * 1e-6 {
            nearest
        } else {
            raw.ceil()
        };
        Ok(Self {
            value: value as u32,
        })
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn is_zero(&self) -> bool {
        self.value == 0
    }

    /// Scales the damage, rounding to the nearest integer and clamping at zero.
    pub fn multiply(&self, factor: f64) -> Result<Self, ValueError> {
        let factor = ensure_finite("factor", factor)?;
        let scaled = (f64::from(self.value) * factor).round().max(0.0);
        Ok(Self {
            value: scaled as u32,
        })
    }

    /// Adds a (possibly negative) bonus, clamping at zero.
    pub fn with_bonus(&self, bonus: f64) -> Result<Self, ValueError> {
        let bonus = ensure_finite("bonus", bonus)?;
        let total = (f64::from(self.value) + bonus).round().max(0.0);
        Ok(Self {
            value: total as u32,
        })
    }
}

impl fmt::Display for Damage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_damage_is_never_zero_against_living_targets() {
        for hp in [1u32, 2, 3, 7, 10, 99] {
            for pct in [0.0001, 0.01, 0.1, 0.5, 0.7, 1.0] {
                let damage = Damage::from_percentage(hp, pct).unwrap();
                assert!(damage.value() >= 1, "hp={hp} pct={pct}");
            }
        }
    }

    #[test]
    fn percentage_rounds_up() {
        assert_eq!(Damage::from_percentage(6, 0.10).unwrap().value(), 1);
        assert_eq!(Damage::from_percentage(10, 0.5).unwrap().value(), 5);
        assert_eq!(Damage::from_percentage(3, 0.7).unwrap().value(), 3);
        assert_eq!(Damage::from_percentage(0, 0.7).unwrap().value(), 0);
    }

    #[test]
    fn float_noise_does_not_round_up_whole_products() {
        assert_eq!(Damage::from_percentage(10, 0.1).unwrap().value(), 1);
        assert_eq!(Damage::from_percentage(10, 0.1 + 0.2).unwrap().value(), 3);
        assert_eq!(Damage::from_percentage(10, f64::from(0.1f32)).unwrap().value(), 1);
        assert_eq!(Damage::from_percentage(1, 1e-7).unwrap().value(), 1);
    }

    #[test]
    fn percentage_outside_unit_range_is_rejected() {
        assert_eq!(
            Damage::from_percentage(10, 1.5),
            Err(ValueError::PercentageOutOfRange { value: 1.5 })
        );
        assert!(Damage::from_percentage(10, -0.1).is_err());
        assert!(Damage::from_percentage(10, f64::NAN).unwrap_err().is_type_error());
    }

    #[test]
    fn combinators_clamp_at_zero() {
        let damage = Damage::flat(2);
        assert_eq!(damage.multiply(0.8).unwrap().value(), 2);
        assert_eq!(damage.multiply(-3.0).unwrap(), Damage::ZERO);
        assert_eq!(damage.with_bonus(3.0).unwrap().value(), 5);
        assert_eq!(damage.with_bonus(-10.0).unwrap(), Damage::ZERO);
        assert!(damage.multiply(f64::INFINITY).is_err());
    }

    #[test]
    fn new_rounds_and_rejects_negative() {
        assert_eq!(Damage::new(1.6).unwrap().value(), 2);
        assert_eq!(Damage::new(1.28).unwrap().value(), 1);
        assert!(Damage::new(-0.5).unwrap_err().is_range_error());
    }
}
