//! Reusable bullet storage.

use super::{Bullet, BulletId, BulletSpawn};

/// Grow-only bullet arena that recycles inactive slots.
///
/// Slot order is stable, so iteration follows creation order of the slots.
#[derive(Clone, Debug, Default)]
pub struct BulletPool {
    bullets: Vec<Bullet>,
}

impl BulletPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocates `capacity` inactive slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let bullets = (0..capacity)
            .map(|index| Bullet::new(BulletId(index as u32)))
            .collect();
        Self { bullets }
    }

    /// Activates a bullet in the first free slot, growing the pool if needed.
    pub fn spawn(&mut self, spawn: BulletSpawn) -> BulletId {
        let index = match self.bullets.iter().position(|bullet| !bullet.active) {
            Some(index) => index,
            None => {
                let id = BulletId(self.bullets.len() as u32);
                self.bullets.push(Bullet::new(id));
                self.bullets.len() - 1
            }
        };

        let bullet = &mut self.bullets[index];
        bullet.spawn(spawn);
        bullet.id
    }

    pub fn get(&self, id: BulletId) -> Option<&Bullet> {
        self.bullets.get(id.0 as usize)
    }

    pub fn as_slice(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn as_mut_slice(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Bullet> {
        self.bullets.iter().filter(|bullet| bullet.active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    /// Total slots, active or not.
    pub fn capacity(&self) -> usize {
        self.bullets.len()
    }

    /// Deactivates every bullet (e.g. between waves).
    pub fn clear(&mut self) {
        self.bullets.iter_mut().for_each(Bullet::reset);
    }
}
