//! Wave pacing and enemy construction.
//!
//! All randomness comes through the injected `rng`, so a seeded generator
//! gives a reproducible wave.

use rand::Rng;
use tracing::debug;

use crate::config::SimConfig;
use crate::entities::{Enemy, EnemyKind, EnemyState, OrdinaryKind, Rect};
use crate::stage::StageState;

// ── Stat tables ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub health: u32,
    pub damage: u32,
    pub speed: f64,
}

pub fn ordinary_stats(stage: u32) -> EnemyStats {
    EnemyStats {
        health: 80 + 20 * stage,
        damage: 5 + 2 * stage,
        speed: 1.0 + 0.2 * f64::from(stage),
    }
}

/// Bosses scale harder than ordinary enemies but run the same AI.
pub fn boss_stats(stage: u32) -> EnemyStats {
    EnemyStats {
        health: 300 + 50 * stage,
        damage: 20 + 5 * stage,
        speed: 1.5 + 0.1 * f64::from(stage),
    }
}

// ── Placement ────────────────────────────────────────────────────────────────

/// A top-left corner `margin` pixels outside a random playfield edge.  Along
/// the edge the coordinate is uniform in `inset ..= span - inset`.
pub fn perimeter_position(margin: f64, inset: f64, config: &SimConfig, rng: &mut impl Rng) -> (f64, f64) {
    let (w, h) = (config.screen_width, config.screen_height);
    match rng.gen_range(0..4) {
        0 => (along_edge(w, inset, rng), -margin),
        1 => (w + margin, along_edge(h, inset, rng)),
        2 => (along_edge(w, inset, rng), h + margin),
        _ => (-margin, along_edge(h, inset, rng)),
    }
}

/// Inset is capped at half the span so the range is never empty.
fn along_edge(span: f64, inset: f64, rng: &mut impl Rng) -> f64 {
    let inset = inset.min(span / 2.0);
    rng.gen_range(inset..=span - inset)
}

fn build_enemy(kind: EnemyKind, stage: u32, config: &SimConfig, rng: &mut impl Rng) -> Enemy {
    let (stats, size, range, (x, y)) = match kind {
        EnemyKind::Ordinary(_) => (
            ordinary_stats(stage),
            config.enemy_size,
            config.enemy_attack_range,
            perimeter_position(config.enemy_spawn_margin, 0.0, config, rng),
        ),
        EnemyKind::Boss(_) => (
            boss_stats(stage),
            config.boss_size,
            config.boss_attack_range,
            perimeter_position(config.boss_spawn_margin, config.boss_spawn_margin, config, rng),
        ),
    };
    Enemy {
        kind,
        rect: Rect::new(x, y, size, size),
        health: stats.health,
        max_health: stats.health,
        damage: stats.damage,
        speed: stats.speed,
        facing_right: true,
        state: EnemyState::Idle,
        attack_range: range,
        attacking: false,
        last_attack_at: None,
        last_hit_at: None,
    }
}

// ── Director ─────────────────────────────────────────────────────────────────

/// Spawn the next enemy of the current stage, or nothing if the budget is
/// spent.  On a boss stage the last budget slot is the boss.
pub fn spawn_enemy(stage: &mut StageState, config: &SimConfig, rng: &mut impl Rng) -> Option<Enemy> {
    if stage.budget_spent() {
        return None;
    }

    let boss_slot = stage.spawned + 1 == stage.budget;
    let kind = match stage.boss {
        Some(boss) if boss_slot && !stage.boss_spawned => EnemyKind::Boss(boss),
        _ => EnemyKind::Ordinary(random_ordinary(rng)),
    };

    let enemy = build_enemy(kind, stage.stage, config, rng);
    stage.spawned += 1;
    if kind.is_boss() {
        stage.boss_spawned = true;
    }
    debug!(
        stage = stage.stage,
        spawned = stage.spawned,
        budget = stage.budget,
        ?kind,
        x = enemy.rect.x,
        y = enemy.rect.y,
        "enemy spawned"
    );
    Some(enemy)
}

/// Accumulate `dt_ms` on the pacing timer and spawn when the interval is
/// reached.  The timer only resets when a spawn actually happens.
pub fn advance_spawner(
    stage: &mut StageState,
    dt_ms: u64,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<Enemy> {
    stage.spawn_timer_ms += dt_ms;
    if stage.spawn_timer_ms < stage.spawn_interval_ms || stage.budget_spent() {
        return None;
    }
    stage.spawn_timer_ms = 0;
    spawn_enemy(stage, config, rng)
}

fn random_ordinary(rng: &mut impl Rng) -> OrdinaryKind {
    OrdinaryKind::ALL[rng.gen_range(0..OrdinaryKind::ALL.len())]
}

