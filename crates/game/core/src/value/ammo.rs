//! Magazine contents.

use std::fmt;

use crate::error::{ValueError, ensure_non_negative, ensure_positive};

/// Rounds in the magazine, with `0 <= current <= max` and `max > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ammo {
    current: u32,
    max: u32,
}

impl Ammo {
    pub const DEFAULT_CAPACITY: u32 = 6;

    pub fn new(current: f64, max: f64) -> Result<Self, ValueError> {
        let current = ensure_non_negative("current", current)?.round();
        let max = ensure_positive("max", max)?.round();
        if max < 1.0 {
            return Err(ValueError::NotPositive { field: "max", value: max });
        }

        let max = max as u32;
        Ok(Self {
            current: (current as u32).min(max),
            max,
        })
    }

    /// A full magazine of `max` rounds.
    pub fn full(max: u32) -> Result<Self, ValueError> {
        Self::new(f64::from(max), f64::from(max))
    }

    pub const fn current(&self) -> u32 {
        self.current
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub const fn is_full(&self) -> bool {
        self.current == self.max
    }

    pub const fn can_shoot(&self) -> bool {
        self.current > 0
    }

    /// Draws one round.
    pub fn consume(&self) -> Result<Self, ValueError> {
        self.consume_multiple(1)
    }

    /// Draws `count` rounds at once.
    pub fn consume_multiple(&self, count: u32) -> Result<Self, ValueError> {
        if count > self.current {
            return Err(ValueError::AmmoExhausted {
                requested: count,
                available: self.current,
            });
        }
        Ok(Self {
            current: self.current - count,
            max: self.max,
        })
    }

    #[must_use]
    pub const fn reload(&self) -> Self {
        Self {
            current: self.max,
            max: self.max,
        }
    }

    /// Changes capacity; rounds above the new capacity are dropped.
    pub fn set_max(&self, new_max: f64) -> Result<Self, ValueError> {
        let resized = Self::new(f64::from(self.current), new_max)?;
        Ok(resized)
    }

    /// Grows capacity by `bonus`; the extra rounds are loaded immediately.
    #[must_use]
    pub fn add_max_bonus(&self, bonus: u32) -> Self {
        Self {
            current: self.current.saturating_add(bonus),
            max: self.max.saturating_add(bonus),
        }
    }
}

impl Default for Ammo {
    fn default() -> Self {
        Self {
            current: Self::DEFAULT_CAPACITY,
            max: Self::DEFAULT_CAPACITY,
        }
    }
}

impl fmt::Display for Ammo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
