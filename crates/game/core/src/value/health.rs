//! Hit points.

use std::fmt;

use crate::error::{ValueError, ensure_non_negative, ensure_positive};

use super::Damage;

/// Integer hit-point pool with `0 <= current <= max` and `max > 0`.
///
/// Every operation returns a new value; a `Health` handed to another system is
/// never changed behind its back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    /// Creates a health pool, rounding both values to integers.
    ///
    /// `current` above `max` is clamped down to `max`.
    pub fn new(current: f64, max: f64) -> Result<Self, ValueError> {
        let current = ensure_non_negative("current", current)?.round();
        let max = ensure_positive("max", max)?.round();
        // 0.4 rounds to zero
        if max < 1.0 {
            return Err(ValueError::NotPositive { field: "max", value: max });
        }

        let max = max as u32;
        Ok(Self {
            current: (current as u32).min(max),
            max,
        })
    }

    /// Creates a full pool.
    pub fn full(max: f64) -> Result<Self, ValueError> {
        Self::new(max, max)
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_dead(&self) -> bool {
        self.current == 0
    }

    pub const fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub const fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Fraction of health remaining in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        f64::from(self.current) / f64::from(self.max)
    }

    /// Returns the pool after taking `damage`, saturating at zero.
    #[must_use]
    pub fn take_damage(&self, damage: Damage) -> Self {
        Self {
            current: self.current.saturating_sub(damage.value()),
            max: self.max,
        }
    }

    /// Returns the pool after healing `amount`, clamped at `max`.
    pub fn heal(&self, amount: f64) -> Result<Self, ValueError> {
        let amount = ensure_non_negative("amount", amount)?.round() as u32;
        Ok(Self {
            current: self.current.saturating_add(amount).min(self.max),
            max: self.max,
        })
    }

    /// Changes the maximum while keeping the same relative fullness.
    ///
    /// A pool at 5/10 rescaled to 20 becomes 10/20.
    pub fn set_max(&self, new_max: f64) -> Result<Self, ValueError> {
        let ratio = self.ratio();
        let rescaled = Self::full(new_max)?;
        let current = (ratio * f64::from(rescaled.max)).round() as u32;
        Ok(Self {
            current: current.min(rescaled.max),
            max: rescaled.max,
        })
    }
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
