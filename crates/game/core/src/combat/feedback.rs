//! Post-damage feedback shared by every bullet kind.

use crate::entity::BulletKind;

use super::context::HitContext;

/// Applies the standard hit reaction to the enemy at `target`: flash tint,
/// knockback, screen shake and a hit visual at the enemy's position.
///
/// The four always go together; chain attacks call this once per enemy hit.
pub fn apply_hit_feedback(ctx: &mut HitContext<'_, '_>, target: usize, kind: BulletKind) {
    let tuning = &ctx.config.feedback;
    let feedback = tuning.for_kind(kind);
    let knockback = tuning.knockback_velocity();
    let knockback_duration = tuning.knockback_duration;

    let Some(enemy) = ctx.enemies.get_mut(target) else {
        return;
    };
    enemy.apply_flash(feedback.flash_color, feedback.flash_duration);
    enemy.apply_knockback(knockback, knockback_duration);
    let position = enemy.position;

    if let Some(effects) = ctx.effects() {
        effects.trigger_screen_shake(feedback.shake_magnitude, feedback.shake_duration);
        effects.create_hit_effect(position, kind);
    }
}
