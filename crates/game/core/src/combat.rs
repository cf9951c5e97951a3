//! Damage application and mortality.
//!
//! Every HP-reducing effect in the game (melee, lightning, fireball) funnels
//! through [`take_damage`] so the 0-HP transition fires its death side
//! effects exactly once. The behavior slot doubles as the liveness flag:
//! once it is cleared here it is never restored.

use crate::log::{MessageLog, MessageTone};
use crate::state::{ActorEntity, RenderPriority, Rgb};

/// Display color corpses are drawn with.
const CORPSE_COLOR: Rgb = Rgb(191, 0, 0);

/// Applies `amount` damage to `target`, clamping HP at zero and firing death
/// exactly once on the transition to 0. Returns true if the target died now.
///
/// Non-positive amounts are ignored; the caller reports a harmless hit.
pub fn take_damage(target: &mut ActorEntity, amount: i32, log: &mut MessageLog) -> bool {
    if amount <= 0 {
        return false;
    }
    target.fighter.set_hp(target.fighter.hp() - amount);
    if target.fighter.hp() == 0 && target.is_alive() {
        die(target, log);
        return true;
    }
    false
}

/// Restores up to `amount` HP. Returns how much was actually recovered.
/// Healing never revives: a dead actor recovers nothing.
pub fn heal(target: &mut ActorEntity, amount: i32) -> i32 {
    if !target.is_alive() || amount <= 0 {
        return 0;
    }
    let before = target.fighter.hp();
    target.fighter.set_hp(before + amount);
    target.fighter.hp() - before
}

/// Death side effects: the actor stops acting permanently, stops blocking
/// movement, and becomes a corpse marker for the renderer.
fn die(actor: &mut ActorEntity, log: &mut MessageLog) {
    let (text, tone) = if actor.is_player() {
        ("You died!".to_string(), MessageTone::PlayerDeath)
    } else {
        (format!("{} is dead!", actor.name), MessageTone::EnemyDeath)
    };

    actor.behavior = None;
    actor.blocks_movement = false;
    actor.glyph = '%';
    actor.color = CORPSE_COLOR;
    actor.render_priority = RenderPriority::Corpse;
    actor.name = format!("remains of {}", actor.name);

    log.add(text, tone);
}
