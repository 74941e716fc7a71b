use crate::combat::context::HitContext;
use crate::entity::Bullet;
use crate::value::Vector2;

use super::{CollisionHandler, HitOutcome, NormalHandler};

/// Spread bullet.
///
/// The spread happens at shoot time (see [`spread_directions`]); on impact
/// each pellet behaves like a plain bullet.
#[derive(Clone, Copy, Debug, Default)]
pub struct BubbleTeaHandler;

impl CollisionHandler for BubbleTeaHandler {
    fn name(&self) -> &'static str {
        "bubble_tea"
    }

    fn on_hit(
        &self,
        bullet: &mut Bullet,
        target: usize,
        ctx: &mut HitContext<'_, '_>,
    ) -> HitOutcome {
        NormalHandler.on_hit(bullet, target, ctx)
    }
}

/// Unit directions for `count` pellets fanned symmetrically around `aim`,
/// `angle_degrees` apart. A zero-length aim fires to the right.
pub fn spread_directions(aim: Vector2, count: u32, angle_degrees: f32) -> Vec<Vector2> {
    let mut aim = aim.normalized();
    if aim == Vector2::ZERO {
        aim = Vector2::RIGHT;
    }

    let count = count.max(1);
    let step = angle_degrees.to_radians();
    let center = (count - 1) as f32 / 2.0;
    (0..count)
        .map(|index| aim.rotated((index as f32 - center) * step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_way_spread_is_symmetric() {
        let directions = spread_directions(Vector2::RIGHT, 3, 15.0);
        assert_eq!(directions.len(), 3);
        assert!((directions[1].x - 1.0).abs() < 1e-6);
        assert!(directions[1].y.abs() < 1e-6);
        assert!((directions[0].y + directions[2].y).abs() < 1e-6);
        assert!((directions[2].y - 15f32.to_radians().sin()).abs() < 1e-5);
    }

    #[test]
    fn single_pellet_keeps_aim() {
        let directions = spread_directions(Vector2::new(0.0, 2.0), 1, 15.0);
        assert_eq!(directions.len(), 1);
        assert!((directions[0].y - 1.0).abs() < 1e-6);
    }
}
