//! Overlap tests and target search.

use std::collections::HashSet;

use crate::entity::{Enemy, EnemyId};
use crate::value::{CollisionBox, Vector2};

/// Center-anchored AABB overlap.
///
/// The test is strict: boxes whose edges merely touch do not collide, so two
/// entities parked side by side never register phantom hits.
pub fn check_aabb_collision(
    pos_a: Vector2,
    box_a: CollisionBox,
    pos_b: Vector2,
    box_b: CollisionBox,
) -> bool {
    let dx = (pos_a.x - pos_b.x).abs();
    let dy = (pos_a.y - pos_b.y).abs();
    dx < (box_a.width() + box_b.width()) / 2.0 && dy < (box_a.height() + box_b.height()) / 2.0
}

/// Index of the active enemy closest to `origin`.
///
/// Enemies in `exclude` are skipped. With `max_range`, candidates farther
/// than the range (inclusive bound) are ignored. On exact distance ties the
/// earlier enemy in the slice wins.
pub fn find_nearest_enemy(
    enemies: &[Enemy],
    origin: Vector2,
    max_range: Option<f32>,
    exclude: &HashSet<EnemyId>,
) -> Option<usize> {
    let mut nearest: Option<(usize, f32)> = None;

    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.is_active() || exclude.contains(&enemy.id) {
            continue;
        }

        let distance = origin.distance(enemy.position);
        if max_range.is_some_and(|range| distance > range) {
            continue;
        }

        if nearest.is_none_or(|(_, best)| distance < best) {
            nearest = Some((index, distance));
        }
    }

    nearest.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EnemyKind;
    use crate::value::{Damage, Health};

    fn square(size: f32) -> CollisionBox {
        CollisionBox::new(size, size).unwrap()
    }

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy::new(
            EnemyId(id),
            EnemyKind::Ghost,
            Health::full(1.0).unwrap(),
            Vector2::new(x, y),
            square(48.0),
            0.0,
        )
    }

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Vector2::new(0.0, 0.0);
        // (16 + 48) / 2 = 32
        assert!(!check_aabb_collision(a, square(16.0), Vector2::new(32.0, 0.0), square(48.0)));
        assert!(!check_aabb_collision(a, square(16.0), Vector2::new(0.0, -32.0), square(48.0)));
        assert!(check_aabb_collision(a, square(16.0), Vector2::new(31.9, 0.0), square(48.0)));
    }

    #[test]
    fn both_axes_must_overlap() {
        let a = Vector2::new(0.0, 0.0);
        assert!(!check_aabb_collision(a, square(10.0), Vector2::new(5.0, 50.0), square(10.0)));
        assert!(check_aabb_collision(a, square(10.0), Vector2::new(5.0, 5.0), square(10.0)));
    }

    #[test]
    fn nearest_respects_range_and_exclusions() {
        let mut enemies = vec![
            enemy_at(1, 100.0, 0.0),
            enemy_at(2, 50.0, 0.0),
            enemy_at(3, 400.0, 0.0),
        ];
        let none = HashSet::new();
        assert_eq!(find_nearest_enemy(&enemies, Vector2::ZERO, None, &none), Some(1));

        let exclude: HashSet<_> = [EnemyId(2)].into_iter().collect();
        assert_eq!(find_nearest_enemy(&enemies, Vector2::ZERO, None, &exclude), Some(0));

        let far: HashSet<_> = [EnemyId(1), EnemyId(2)].into_iter().collect();
        assert_eq!(find_nearest_enemy(&enemies, Vector2::ZERO, Some(300.0), &far), None);

        enemies[1].take_damage(Damage::flat(1));
        assert_eq!(find_nearest_enemy(&enemies, Vector2::ZERO, None, &none), Some(0));
    }

    #[test]
    fn ties_go_to_the_first_enemy() {
        let enemies = vec![enemy_at(1, 0.0, 10.0), enemy_at(2, 10.0, 0.0)];
        assert_eq!(
            find_nearest_enemy(&enemies, Vector2::ZERO, Some(10.0), &HashSet::new()),
            Some(0)
        );
    }
}
