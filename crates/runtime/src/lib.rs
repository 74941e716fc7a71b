//! Runtime orchestration for the frame-driven combat simulation.
//!
//! This crate wires the combat core to a game-time event queue, owns the
//! entity storage and upgrade state, and plays back scripted scenarios.
//! Consumers embed [`CombatSession`] to drive frames, or [`ScenarioRunner`]
//! for headless playback.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the per-frame driver
//! - [`api`] exposes the error types downstream clients interact with
//! - [`events`] provides the deferred event queue with per-kind subscribers
//! - [`scenario`] replays content-crate scenarios and collects totals
pub mod api;
pub mod events;
pub mod scenario;
pub mod session;

pub use api::{Result, RuntimeError};
pub use events::EventQueue;
pub use scenario::{DeathRecord, RunSummary, ScenarioRunner};
pub use session::{CombatSession, TickReport};
