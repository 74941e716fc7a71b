//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the combat core and scenario setup so clients can
//! bubble them up with consistent context.
use combat_core::{ErrorSeverity, GameError, ValueError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("scenario {scenario:?} targets enemy #{index}, but only {spawned} enemies were spawned")]
    UnknownTarget {
        scenario: String,
        index: u32,
        spawned: usize,
    },

    #[error("enemy id space exhausted")]
    EnemyIdsExhausted,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Value(error) => error.severity(),
            Self::UnknownTarget { .. } => ErrorSeverity::Validation,
            Self::EnemyIdsExhausted => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Value(error) => error.error_code(),
            Self::UnknownTarget { .. } => "RUNTIME_UNKNOWN_TARGET",
            Self::EnemyIdsExhausted => "RUNTIME_ENEMY_IDS_EXHAUSTED",
        }
    }
}
