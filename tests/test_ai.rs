use zombie_coop::ai::EnemyOutcome;
use zombie_coop::config::SimConfig;
use zombie_coop::entities::*;
use zombie_coop::targeting::select_target;

fn config() -> SimConfig {
    SimConfig::default()
}

/// Players with the given centres.
fn players_at(p1: (f64, f64), p2: (f64, f64)) -> [Player; 2] {
    let c = config();
    [
        Player::new(PlayerId::One, p1.0 - 25.0, p1.1 - 25.0, &c),
        Player::new(PlayerId::Two, p2.0 - 25.0, p2.1 - 25.0, &c),
    ]
}

fn zombie_centered(cx: f64, cy: f64) -> Enemy {
    Enemy {
        kind: EnemyKind::Ordinary(OrdinaryKind::Walker),
        rect: Rect::from_center(cx, cy, 50.0, 50.0),
        health: 100,
        max_health: 100,
        damage: 7,
        speed: 2.0,
        facing_right: true,
        state: EnemyState::Idle,
        attack_range: 50.0,
        attacking: false,
        last_attack_at: None,
        last_hit_at: None,
    }
}

// ── Targeting ─────────────────────────────────────────────────────────────────

#[test]
fn targets_nearer_player() {
    let players = players_at((100.0, 100.0), (400.0, 100.0));
    let t = select_target((300.0, 100.0), &players).unwrap();
    assert_eq!(t.player, PlayerId::Two);
    assert_eq!(t.distance, 100.0);
    assert_eq!((t.dx, t.dy), (100.0, 0.0));
}

#[test]
fn equal_distance_goes_to_player_one() {
    let players = players_at((100.0, 100.0), (300.0, 100.0));
    let t = select_target((200.0, 100.0), &players).unwrap();
    assert_eq!(t.player, PlayerId::One);
}

#[test]
fn dead_players_are_not_targeted() {
    let mut players = players_at((100.0, 100.0), (700.0, 500.0));
    players[0].health = 0;
    let t = select_target((110.0, 100.0), &players).unwrap();
    assert_eq!(t.player, PlayerId::Two);

    players[1].health = 0;
    assert!(select_target((110.0, 100.0), &players).is_none());
}

// ── Chasing ───────────────────────────────────────────────────────────────────

#[test]
fn walks_toward_target_at_speed() {
    let c = config();
    let players = players_at((100.0, 100.0), (780.0, 20.0));
    // 3-4-5 triangle: target is 300 left, 400 up
    let mut z = zombie_centered(400.0, 500.0);
    let out = z.update(&players, 1000, &c);
    assert_eq!(out, EnemyOutcome::Hold);
    assert_eq!(z.state, EnemyState::Walking);
    assert!(!z.facing_right);
    let (cx, cy) = z.rect.center();
    assert!((cx - (400.0 - 1.2)).abs() < 1e-9);
    assert!((cy - (500.0 - 1.6)).abs() < 1e-9);
}

#[test]
fn faces_target_side() {
    let c = config();
    let players = players_at((600.0, 100.0), (700.0, 500.0));
    let mut z = zombie_centered(100.0, 100.0);
    z.update(&players, 1000, &c);
    assert!(z.facing_right);
}

// ── Attacking ─────────────────────────────────────────────────────────────────

#[test]
fn close_swing_strikes_at_activation() {
    let c = config();
    let players = players_at((100.0, 100.0), (700.0, 500.0));
    // 30 px away: inside 0.8 × 50
    let mut z = zombie_centered(130.0, 100.0);
    let out = z.update(&players, 1000, &c);
    assert_eq!(out, EnemyOutcome::Strike { target: PlayerId::One, damage: 7 });
    assert_eq!(z.state, EnemyState::Attacking);
    // No movement while in range
    assert_eq!(z.rect.center(), (130.0, 100.0));
}

#[test]
fn edge_of_range_swing_misses() {
    let c = config();
    let players = players_at((100.0, 100.0), (700.0, 500.0));
    // 45 px: in range (≤ 50) but not inside 40
    let mut z = zombie_centered(145.0, 100.0);
    let out = z.update(&players, 1000, &c);
    assert_eq!(out, EnemyOutcome::Hold);
    assert_eq!(z.state, EnemyState::Attacking);
}

#[test]
fn no_strike_on_invulnerable_target() {
    let c = config();
    let mut players = players_at((100.0, 100.0), (700.0, 500.0));
    players[0].take_damage(1, 900, &c);
    let mut z = zombie_centered(130.0, 100.0);
    assert_eq!(z.update(&players, 1000, &c), EnemyOutcome::Hold);
    assert!(z.attacking);
}

#[test]
fn swing_window_and_cooldown() {
    let c = config();
    let players = players_at((100.0, 100.0), (700.0, 500.0));
    let mut z = zombie_centered(130.0, 100.0);

    assert!(matches!(z.update(&players, 1000, &c), EnemyOutcome::Strike { .. }));
    // Busy for 500 ms; damage is not repeated during the window
    assert_eq!(z.update(&players, 1250, &c), EnemyOutcome::Hold);
    assert_eq!(z.state, EnemyState::Attacking);

    assert_eq!(z.update(&players, 1500, &c), EnemyOutcome::Hold);
    assert_eq!(z.state, EnemyState::Idle);

    // Cooldown is 1000 ms from the previous swing
    assert_eq!(z.update(&players, 1999, &c), EnemyOutcome::Hold);
    assert!(!z.attacking);
    assert!(matches!(z.update(&players, 2000, &c), EnemyOutcome::Strike { .. }));
}

#[test]
fn boss_reaches_further() {
    let c = config();
    let players = players_at((100.0, 100.0), (700.0, 500.0));
    let mut boss = zombie_centered(155.0, 100.0);
    boss.kind = EnemyKind::Boss(BossKind::Butcher);
    boss.attack_range = 70.0;
    boss.damage = 30;
    // 55 px: inside 0.8 × 70 = 56
    assert_eq!(
        boss.update(&players, 1000, &c),
        EnemyOutcome::Strike { target: PlayerId::One, damage: 30 }
    );
}

#[test]
fn dead_enemy_asks_for_removal() {
    let c = config();
    let players = players_at((100.0, 100.0), (700.0, 500.0));
    let mut z = zombie_centered(130.0, 100.0);
    z.take_damage(500, 900);
    assert_eq!(z.update(&players, 1000, &c), EnemyOutcome::Remove);
    assert_eq!(z.rect.center(), (130.0, 100.0));
}

#[test]
fn idles_when_nobody_is_alive() {
    let c = config();
    let mut players = players_at((100.0, 100.0), (700.0, 500.0));
    players[0].health = 0;
    players[1].health = 0;
    let mut z = zombie_centered(400.0, 300.0);
    assert_eq!(z.update(&players, 1000, &c), EnemyOutcome::Hold);
    assert_eq!(z.state, EnemyState::Idle);
    assert_eq!(z.rect.center(), (400.0, 300.0));
}
