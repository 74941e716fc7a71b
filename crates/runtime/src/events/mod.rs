//! Game-time event delivery.
//!
//! The combat core publishes into an [`EventQueue`]; the session drains it
//! every tick and routes the events the core itself consumes.

mod queue;

pub use queue::EventQueue;
