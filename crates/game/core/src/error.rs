//! Common error infrastructure for combat-core.
//!
//! This module provides the shared severity classification and the
//! [`GameError`] trait implemented by every error type in the crate, plus the
//! [`ValueError`] raised by value-object constructors.
//!
//! # Design Principles
//!
//! - **Fail fast**: invalid numeric input (NaN, infinity, negative amounts,
//!   non-positive maxima) is a programmer error and is reported immediately.
//! - **No exceptions for control flow**: rejected shots and ignored buff
//!   triggers are ordinary return values, never errors.
//! - **Severity Classification**: errors are categorized for recovery strategies.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions that may succeed on retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: NaN health, negative damage, percentage above 100%
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised when constructing or transforming value objects
/// (`Health`, `Damage`, `Ammo`, `CollisionBox`).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// Input was NaN or infinite.
    #[error("{field} must be a finite number (got {value})")]
    NotFinite {
        /// Name of the offending argument.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Input was negative where only non-negative values are allowed.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    /// Input was zero or negative where a strictly positive value is required.
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    /// Percentage outside the closed range `[0, 1]`.
    #[error("percentage must be within [0, 1] (got {value})")]
    PercentageOutOfRange { value: f64 },

    /// Tried to draw more rounds than the magazine holds.
    #[error("cannot consume {requested} round(s), only {available} available")]
    AmmoExhausted { requested: u32, available: u32 },
}

impl ValueError {
    /// Returns true for the "type" class of failures (non-numeric input).
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::NotFinite { .. })
    }

    /// Returns true for the "range" class of failures.
    pub const fn is_range_error(&self) -> bool {
        !self.is_type_error()
    }
}

impl GameError for ValueError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFinite { .. } => "VALUE_NOT_FINITE",
            Self::Negative { .. } => "VALUE_NEGATIVE",
            Self::NotPositive { .. } => "VALUE_NOT_POSITIVE",
            Self::PercentageOutOfRange { .. } => "VALUE_PERCENTAGE_OUT_OF_RANGE",
            Self::AmmoExhausted { .. } => "VALUE_AMMO_EXHAUSTED",
        }
    }
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, ValueError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValueError::NotFinite { field, value })
    }
}

/// Finite and `>= 0`.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, ValueError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValueError::Negative { field, value });
    }
    Ok(value)
}

/// Finite and `> 0`.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64, ValueError> {
    let value = ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValueError::NotPositive { field, value });
    }
    Ok(value)
}
