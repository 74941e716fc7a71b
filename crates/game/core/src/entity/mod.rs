//! Runtime bullet and enemy state.
//!
//! Entities are owned by the caller (a scene, a pool, a test) and lent to the
//! combat core as slices each frame; the core never creates or drops them.
mod bullet;
mod enemy;
mod pool;

pub use bullet::{Bullet, BulletId, BulletKind, BulletSpawn};
pub use enemy::{
    DamageReport, Enemy, EnemyCategory, EnemyId, EnemyKind, Flash, Knockback, SlowDebuff,
};
pub use pool::BulletPool;
