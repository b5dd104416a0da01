//! Melee and contact damage resolution.

use crate::config::SimConfig;
use crate::entities::{DamageOutcome, Enemy, EnemyKind, Player, Rect};

/// An enemy died to a melee hit; loot should appear where it stood.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LootSpawn {
    pub x: f64,
    pub y: f64,
    pub kind: EnemyKind,
}

/// The area a player's swing covers: a box in front of the player, on the
/// side they face.
pub fn melee_hitbox(attacker: &Player, config: &SimConfig) -> Rect {
    let (cx, cy) = attacker.rect.center();
    let offset = if attacker.facing_right {
        config.hitbox_offset
    } else {
        -config.hitbox_offset
    };
    Rect::from_center(cx + offset, cy, config.hitbox_width, config.hitbox_height)
}

/// Resolve one swing against every enemy.  Any number of enemies can be hit;
/// each lethal hit yields one `LootSpawn`.  Dead enemies are left in place for
/// the caller to compact away.
pub fn resolve_player_attack(
    attacker: &Player,
    enemies: &mut [Enemy],
    now: u64,
    config: &SimConfig,
) -> Vec<LootSpawn> {
    let hitbox = melee_hitbox(attacker, config);
    let damage = attacker.attack_damage();

    enemies
        .iter_mut()
        .filter(|e| !e.is_dead() && e.rect.intersects(&hitbox))
        .filter_map(|enemy| match enemy.take_damage(damage, now) {
            DamageOutcome::Died => {
                let (x, y) = enemy.rect.center();
                Some(LootSpawn { x, y, kind: enemy.kind })
            }
            DamageOutcome::Hurt | DamageOutcome::AlreadyDead => None,
        })
        .collect()
}

/// Body contact: overlapping a living enemy hurts a vulnerable player.
/// Returns whether damage was applied.
pub fn resolve_enemy_contact(enemy: &Enemy, player: &mut Player, now: u64, config: &SimConfig) -> bool {
    if enemy.is_dead() || !player.is_alive() || !enemy.rect.intersects(&player.rect) {
        return false;
    }
    player.take_damage(enemy.damage, now, config)
}
