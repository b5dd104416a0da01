use zombie_coop::combat::*;
use zombie_coop::config::SimConfig;
use zombie_coop::entities::*;
use zombie_coop::shop::Weapon;

fn config() -> SimConfig {
    SimConfig::default()
}

/// Player 1 with its top-left at (100, 100): centre (125, 125), facing right.
fn make_player() -> Player {
    Player::new(PlayerId::One, 100.0, 100.0, &config())
}

fn zombie_centered(cx: f64, cy: f64, health: u32) -> Enemy {
    Enemy {
        kind: EnemyKind::Ordinary(OrdinaryKind::Runner),
        rect: Rect::from_center(cx, cy, 50.0, 50.0),
        health,
        max_health: health,
        damage: 7,
        speed: 1.2,
        facing_right: true,
        state: EnemyState::Idle,
        attack_range: 50.0,
        attacking: false,
        last_attack_at: None,
        last_hit_at: None,
    }
}

// ── Hit-box ───────────────────────────────────────────────────────────────────

#[test]
fn hitbox_sits_in_front_when_facing_right() {
    let p = make_player();
    // centre (125 + 40, 125), 80×60
    assert_eq!(melee_hitbox(&p, &config()), Rect::new(125.0, 95.0, 80.0, 60.0));
}

#[test]
fn hitbox_flips_when_facing_left() {
    let mut p = make_player();
    p.facing_right = false;
    assert_eq!(melee_hitbox(&p, &config()), Rect::new(45.0, 95.0, 80.0, 60.0));
}

// ── Player attack ─────────────────────────────────────────────────────────────

#[test]
fn swing_hits_every_enemy_in_front() {
    let p = make_player();
    let mut enemies = vec![
        zombie_centered(180.0, 125.0, 100),
        zombie_centered(200.0, 140.0, 100),
        zombie_centered(40.0, 125.0, 100), // behind the player
    ];
    let drops = resolve_player_attack(&p, &mut enemies, 1000, &config());
    assert!(drops.is_empty());
    assert_eq!(enemies[0].health, 90);
    assert_eq!(enemies[1].health, 90);
    assert_eq!(enemies[2].health, 100);
}

#[test]
fn lethal_swing_drops_loot_at_enemy_centre() {
    let p = make_player();
    let mut enemies = vec![zombie_centered(180.0, 125.0, 10)];
    let drops = resolve_player_attack(&p, &mut enemies, 1000, &config());
    assert_eq!(drops.len(), 1);
    assert_eq!((drops[0].x, drops[0].y), (180.0, 125.0));
    assert_eq!(drops[0].kind, EnemyKind::Ordinary(OrdinaryKind::Runner));
    assert!(enemies[0].is_dead());
}

#[test]
fn dead_enemy_never_drops_twice() {
    let p = make_player();
    let mut enemies = vec![zombie_centered(180.0, 125.0, 10)];
    assert_eq!(resolve_player_attack(&p, &mut enemies, 1000, &config()).len(), 1);
    assert!(resolve_player_attack(&p, &mut enemies, 1600, &config()).is_empty());
    assert_eq!(enemies[0].health, 0);
}

#[test]
fn swing_uses_weapon_damage() {
    let mut p = make_player();
    p.equip(Weapon::new("Chainsaw", 1500, 40));
    let mut enemies = vec![zombie_centered(180.0, 125.0, 100)];
    resolve_player_attack(&p, &mut enemies, 1000, &config());
    assert_eq!(enemies[0].health, 60);
}

#[test]
fn swing_does_not_touch_attacker() {
    let p = make_player();
    let before = p.clone();
    let mut enemies = vec![zombie_centered(180.0, 125.0, 10)];
    resolve_player_attack(&p, &mut enemies, 1000, &config());
    assert_eq!(p, before);
}

// ── Contact damage ────────────────────────────────────────────────────────────

#[test]
fn overlap_hurts_vulnerable_player() {
    let c = config();
    let mut p = make_player();
    let z = zombie_centered(150.0, 125.0, 100);
    assert!(resolve_enemy_contact(&z, &mut p, 1000, &c));
    assert_eq!(p.health, 93);
    assert!(p.invulnerable);
}

#[test]
fn overlap_ignored_while_invulnerable() {
    let c = config();
    let mut p = make_player();
    let z = zombie_centered(150.0, 125.0, 100);
    resolve_enemy_contact(&z, &mut p, 1000, &c);
    assert!(!resolve_enemy_contact(&z, &mut p, 1500, &c));
    assert_eq!(p.health, 93);
}

#[test]
fn no_contact_without_overlap() {
    let c = config();
    let mut p = make_player();
    // Edges touch at x = 150 but do not overlap
    let z = zombie_centered(175.0, 125.0, 100);
    assert!(!resolve_enemy_contact(&z, &mut p, 1000, &c));
    assert_eq!(p.health, 100);
}

#[test]
fn dead_enemy_deals_no_contact_damage() {
    let c = config();
    let mut p = make_player();
    let mut z = zombie_centered(150.0, 125.0, 5);
    z.take_damage(5, 900);
    assert!(!resolve_enemy_contact(&z, &mut p, 1000, &c));
    assert_eq!(p.health, 100);
}
