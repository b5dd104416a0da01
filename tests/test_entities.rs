use zombie_coop::config::SimConfig;
use zombie_coop::entities::*;
use zombie_coop::shop::Weapon;

fn config() -> SimConfig {
    SimConfig::default()
}

fn make_player() -> Player {
    // rect (200, 300) 50×50, health 100, damage 10, speed 5
    Player::new(PlayerId::One, 200.0, 300.0, &config())
}

fn make_zombie(health: u32) -> Enemy {
    Enemy {
        kind: EnemyKind::Ordinary(OrdinaryKind::Walker),
        rect: Rect::new(0.0, 0.0, 50.0, 50.0),
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

fn held(f: impl FnOnce(&mut PlayerIntent)) -> PlayerIntent {
    let mut intent = PlayerIntent::default();
    f(&mut intent);
    intent
}

// ── Player damage & invulnerability ───────────────────────────────────────────

#[test]
fn invulnerability_window_ignores_follow_up_hits() {
    let c = config();
    let mut p = make_player();
    assert!(p.take_damage(10, 1000, &c));
    assert_eq!(p.health, 90);
    assert!(p.invulnerable);

    // Inside the 1000 ms window: fully ignored
    assert!(!p.take_damage(10, 1001, &c));
    assert!(!p.take_damage(10, 1999, &c));
    assert_eq!(p.health, 90);

    // Window has run its course
    assert!(p.take_damage(10, 2000, &c));
    assert_eq!(p.health, 80);
}

#[test]
fn player_health_clamps_at_zero() {
    let c = config();
    let mut p = make_player();
    p.take_damage(250, 0, &c);
    assert_eq!(p.health, 0);
    assert!(!p.is_alive());
}

#[test]
fn dead_player_takes_no_damage() {
    let c = config();
    let mut p = make_player();
    p.health = 0;
    assert!(!p.take_damage(5, 5000, &c));
    assert_eq!(p.last_hit_at, None);
}

#[test]
fn invulnerability_expires_on_update() {
    let c = config();
    let mut p = make_player();
    p.take_damage(10, 100, &c);
    p.update(&PlayerIntent::default(), 1099, &c);
    assert!(p.invulnerable);
    p.update(&PlayerIntent::default(), 1100, &c);
    assert!(!p.invulnerable);
    assert!(!p.flicker);
}

#[test]
fn flicker_toggles_every_five_ticks() {
    let c = config();
    let mut p = make_player();
    p.take_damage(10, 0, &c);
    for t in 1..=4 {
        p.update(&PlayerIntent::default(), t * 16, &c);
        assert!(!p.flicker, "tick {t}");
    }
    p.update(&PlayerIntent::default(), 80, &c);
    assert!(p.flicker);
    for t in 6..=10 {
        p.update(&PlayerIntent::default(), t * 16, &c);
    }
    assert!(!p.flicker);
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn move_right_by_speed() {
    let c = config();
    let mut p = make_player();
    p.update(&held(|i| i.right = true), 16, &c);
    assert_eq!(p.rect.x, 205.0);
    assert_eq!(p.rect.y, 300.0);
    assert!(p.facing_right);
    assert!(p.moving);
}

#[test]
fn move_left_turns_player() {
    let c = config();
    let mut p = make_player();
    p.update(&held(|i| i.left = true), 16, &c);
    assert_eq!(p.rect.x, 195.0);
    assert!(!p.facing_right);
}

#[test]
fn diagonal_is_not_normalised() {
    let c = config();
    let mut p = make_player();
    p.update(
        &held(|i| {
            i.up = true;
            i.right = true;
        }),
        16,
        &c,
    );
    // Full speed on both axes
    assert_eq!((p.rect.x, p.rect.y), (205.0, 295.0));
}

#[test]
fn movement_clamps_to_playfield() {
    let c = config();
    let mut p = make_player();
    p.rect.x = 2.0;
    p.rect.y = 548.0; // 600 - 50 = 550 is the lowest legal y
    p.update(
        &held(|i| {
            i.left = true;
            i.down = true;
        }),
        16,
        &c,
    );
    assert_eq!((p.rect.x, p.rect.y), (0.0, 550.0));
}

#[test]
fn dead_player_does_not_move_or_attack() {
    let c = config();
    let mut p = make_player();
    p.health = 0;
    let fired = p.update(
        &held(|i| {
            i.right = true;
            i.attack = true;
        }),
        1000,
        &c,
    );
    assert!(!fired);
    assert_eq!(p.rect.x, 200.0);
}

// ── Player attack timing ─────────────────────────────────────────────────────

#[test]
fn attack_fires_on_press_then_needs_release() {
    let c = config();
    let mut p = make_player();
    let attack = held(|i| i.attack = true);

    assert!(p.update(&attack, 1000, &c));
    assert!(p.attacking);
    // Still held: no second swing even after the cooldown
    assert!(!p.update(&attack, 1600, &c));
}

#[test]
fn attack_respects_cooldown() {
    let c = config();
    let mut p = make_player();
    let attack = held(|i| i.attack = true);
    let idle = PlayerIntent::default();

    assert!(p.update(&attack, 1000, &c));
    p.update(&idle, 1200, &c);
    // 300 ms after the swing: on cooldown
    assert!(!p.update(&attack, 1300, &c));
    p.update(&idle, 1400, &c);
    // 500 ms after the swing: ready
    assert!(p.update(&attack, 1500, &c));
}

#[test]
fn attack_window_lasts_200ms() {
    let c = config();
    let mut p = make_player();
    let attack = held(|i| i.attack = true);

    p.update(&attack, 1000, &c);
    p.update(&attack, 1199, &c);
    assert!(p.attacking);
    p.update(&attack, 1200, &c);
    assert!(!p.attacking);
}

#[test]
fn weapon_replaces_base_damage() {
    let mut p = make_player();
    assert_eq!(p.attack_damage(), 10);
    p.equip(Weapon::new("Machete", 750, 25));
    assert_eq!(p.attack_damage(), 25);
}

// ── Enemy damage ──────────────────────────────────────────────────────────────

#[test]
fn enemy_death_is_reported_once() {
    let mut z = make_zombie(20);
    assert_eq!(z.take_damage(15, 10), DamageOutcome::Hurt);
    assert_eq!(z.health, 5);
    assert_eq!(z.take_damage(15, 20), DamageOutcome::Died);
    assert_eq!(z.health, 0);
    assert_eq!(z.state, EnemyState::Dead);

    // Further hits change nothing
    assert_eq!(z.take_damage(15, 30), DamageOutcome::AlreadyDead);
    assert_eq!(z.health, 0);
    assert_eq!(z.last_hit_at, Some(20));
}

#[test]
fn enemy_health_ratio() {
    let mut z = make_zombie(100);
    z.take_damage(25, 0);
    assert_eq!(z.health_ratio(), 0.75);
}

// ── Coins ─────────────────────────────────────────────────────────────────────

#[test]
fn coin_expires_after_lifetime() {
    let c = config();
    let mut coin = Coin::new(100.0, 100.0, 1, &c);
    assert_eq!(coin.value, 150);
    assert_eq!(coin.rect, Rect::new(85.0, 85.0, 30.0, 30.0));
    assert!(coin.tick(9_999));
    assert!(!coin.tick(1));
}

#[test]
fn coin_tiers_map_to_values() {
    let c = config();
    assert_eq!(Coin::new(0.0, 0.0, 2, &c).value, 100);
    assert_eq!(Coin::new(0.0, 0.0, 3, &c).value, 50);
    assert_eq!(Coin::new(0.0, 0.0, 0, &c).value, 50);
}

// ── Tags ──────────────────────────────────────────────────────────────────────

#[test]
fn boss_tag() {
    assert!(EnemyKind::Boss(BossKind::Overlord).is_boss());
    assert!(!EnemyKind::Ordinary(OrdinaryKind::Crawler).is_boss());
    assert_eq!(PlayerId::One.index(), 0);
    assert_eq!(PlayerId::Two.index(), 1);
}
