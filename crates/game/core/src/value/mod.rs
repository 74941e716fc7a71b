//! Immutable numeric value objects.
//!
//! Constructors validate their input and round to integers where the domain is
//! integral; every "mutating" operation returns a fresh value.
mod ammo;
mod damage;
mod geometry;
mod health;

pub use ammo::Ammo;
pub use damage::Damage;
pub use geometry::{CollisionBox, Vector2};
pub use health::Health;
