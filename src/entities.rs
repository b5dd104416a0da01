//! Game entity types: plain data plus the small state transitions each
//! entity owns (damage intake, cooldown bookkeeping).  Cross-entity rules
//! live in `combat`, `ai`, `spawn` and `world`.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::shop::Weapon;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in playfield pixels, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Rect { x, y, w, h }
    }

    pub fn from_center(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Rect::new(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }

    /// Move (never resize) the rectangle so it lies inside `0..width, 0..height`.
    /// A rectangle larger than the area is centred on that axis.
    pub fn clamp_within(&mut self, width: f64, height: f64) {
        self.x = clamp_axis(self.x, self.w, width);
        self.y = clamp_axis(self.y, self.h, height);
    }
}

fn clamp_axis(pos: f64, size: f64, span: f64) -> f64 {
    if size >= span {
        (span - size) / 2.0
    } else {
        pos.clamp(0.0, span - size)
    }
}

/// `true` once at least `span_ms` has passed since `stamp`, or if `stamp` was never set.
pub fn has_elapsed(stamp: Option<u64>, now: u64, span_ms: u64) -> bool {
    stamp.map_or(true, |t| now.saturating_sub(t) >= span_ms)
}

// ── Tags ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

/// Ordinary zombie variants.  They share stats; only the look differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrdinaryKind {
    Walker,
    Runner,
    Crawler,
}

impl OrdinaryKind {
    pub const ALL: [OrdinaryKind; 3] = [OrdinaryKind::Walker, OrdinaryKind::Runner, OrdinaryKind::Crawler];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    Butcher,
    Abomination,
    Overlord,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Ordinary(OrdinaryKind),
    Boss(BossKind),
}

impl EnemyKind {
    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::Boss(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Idle,
    Walking,
    Attacking,
    Dead,
}

/// Result of handing damage to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The enemy was already dead; nothing changed.
    AlreadyDead,
    Hurt,
    /// This hit was the lethal one.  Reported exactly once per enemy.
    Died,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Menu,
    Playing,
    StageTransition,
    GameOver,
    Victory,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held intents for one player during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub rect: Rect,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub speed: f64,
    pub facing_right: bool,
    pub coins: u32,
    pub weapon: Option<Weapon>,
    /// Inside the post-swing attack window.
    pub attacking: bool,
    pub last_attack_at: Option<u64>,
    pub invulnerable: bool,
    pub last_hit_at: Option<u64>,
    /// Presentation toggle while invulnerable: drawn only when `true`.
    pub flicker: bool,
    pub flicker_ticks: u32,
    /// Attack intent seen last frame, for edge detection.
    pub attack_held: bool,
    /// Moved during the last update.
    pub moving: bool,
}

impl Player {
    pub fn new(id: PlayerId, x: f64, y: f64, config: &SimConfig) -> Self {
        Player {
            id,
            rect: Rect::new(x, y, config.player_size, config.player_size),
            health: config.player_health,
            max_health: config.player_health,
            damage: config.player_damage,
            speed: config.player_speed,
            facing_right: true,
            coins: 0,
            weapon: None,
            attacking: false,
            last_attack_at: None,
            invulnerable: false,
            last_hit_at: None,
            flicker: false,
            flicker_ticks: 0,
            attack_held: false,
            moving: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_vulnerable(&self, now: u64, config: &SimConfig) -> bool {
        self.is_alive() && has_elapsed(self.last_hit_at, now, config.invulnerability_ms)
    }

    /// Damage dealt by this player's melee swing.  An equipped weapon replaces
    /// the base damage.
    pub fn attack_damage(&self) -> u32 {
        self.weapon.as_ref().map_or(self.damage, |w| w.damage)
    }

    pub fn equip(&mut self, weapon: Weapon) {
        self.weapon = Some(weapon);
    }

    /// Apply `amount` unless the player is dead or invulnerable.  Returns
    /// whether the hit landed.  A landed hit starts a fresh invulnerability window.
    pub fn take_damage(&mut self, amount: u32, now: u64, config: &SimConfig) -> bool {
        if !self.is_vulnerable(now, config) {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.invulnerable = true;
        self.last_hit_at = Some(now);
        self.flicker = false;
        self.flicker_ticks = 0;
        true
    }

    /// Advance one update: expire timers, move, and maybe start a swing.
    /// Returns `true` when an attack was activated this update; the caller
    /// resolves the melee hit exactly once in that case.
    pub fn update(&mut self, intent: &PlayerIntent, now: u64, config: &SimConfig) -> bool {
        if self.invulnerable && has_elapsed(self.last_hit_at, now, config.invulnerability_ms) {
            self.invulnerable = false;
            self.flicker = false;
            self.flicker_ticks = 0;
        }
        if self.invulnerable {
            self.flicker_ticks += 1;
            if self.flicker_ticks >= config.flicker_period_ticks {
                self.flicker = !self.flicker;
                self.flicker_ticks = 0;
            }
        }

        let newly_pressed = intent.attack && !self.attack_held;
        self.attack_held = intent.attack;

        if !self.is_alive() {
            self.moving = false;
            self.attacking = false;
            return false;
        }

        // Axes are independent, so diagonals are faster on purpose.
        let mut moved = false;
        if intent.left {
            self.rect.x -= self.speed;
            self.facing_right = false;
            moved = true;
        }
        if intent.right {
            self.rect.x += self.speed;
            self.facing_right = true;
            moved = true;
        }
        if intent.up {
            self.rect.y -= self.speed;
            moved = true;
        }
        if intent.down {
            self.rect.y += self.speed;
            moved = true;
        }
        self.moving = moved;
        self.rect.clamp_within(config.screen_width, config.screen_height);

        let mut activated = false;
        if newly_pressed
            && !self.attacking
            && has_elapsed(self.last_attack_at, now, config.player_attack_cooldown_ms)
        {
            self.attacking = true;
            self.last_attack_at = Some(now);
            activated = true;
        }

        if self.attacking && has_elapsed(self.last_attack_at, now, config.player_attack_window_ms) {
            self.attacking = false;
        }

        activated
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub rect: Rect,
    pub health: u32,
    pub max_health: u32,
    pub damage: u32,
    pub speed: f64,
    pub facing_right: bool,
    pub state: EnemyState,
    pub attack_range: f64,
    pub attacking: bool,
    pub last_attack_at: Option<u64>,
    pub last_hit_at: Option<u64>,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.state == EnemyState::Dead
    }

    pub fn health_ratio(&self) -> f64 {
        if self.max_health == 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }

    pub fn take_damage(&mut self, amount: u32, now: u64) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::AlreadyDead;
        }
        self.health = self.health.saturating_sub(amount);
        self.last_hit_at = Some(now);
        if self.health == 0 {
            self.state = EnemyState::Dead;
            self.attacking = false;
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt
        }
    }
}

// ── Loot ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    pub tier: u8,
    pub value: u32,
    pub remaining_ms: u64,
}

impl Coin {
    pub fn new(cx: f64, cy: f64, tier: u8, config: &SimConfig) -> Self {
        Coin {
            rect: Rect::from_center(cx, cy, config.coin_size, config.coin_size),
            tier,
            value: coin_value(tier),
            remaining_ms: config.coin_lifetime_ms,
        }
    }

    /// Count down the lifetime.  Returns `false` once the coin has expired.
    pub fn tick(&mut self, dt_ms: u64) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(dt_ms);
        self.remaining_ms > 0
    }
}

pub fn coin_value(tier: u8) -> u32 {
    match tier {
        1 => 150,
        2 => 100,
        _ => 50,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn clamp_keeps_size() {
        let mut r = Rect::new(790.0, -20.0, 50.0, 50.0);
        r.clamp_within(800.0, 600.0);
        assert_eq!(r, Rect::new(750.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn coin_values_by_tier() {
        assert_eq!(coin_value(1), 150);
        assert_eq!(coin_value(2), 100);
        assert_eq!(coin_value(3), 50);
        assert_eq!(coin_value(9), 50);
    }

    #[test]
    fn never_stamped_counts_as_elapsed() {
        assert!(has_elapsed(None, 0, 500));
        assert!(!has_elapsed(Some(100), 599, 500));
        assert!(has_elapsed(Some(100), 600, 500));
    }
}
