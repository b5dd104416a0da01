//! Types crossing the boundary between the simulation and its front end:
//! per-frame input, per-frame events, and the draw list.

use crate::config::SimConfig;
use crate::entities::{
    has_elapsed, Enemy, EnemyKind, EnemyState, GameStatus, Player, PlayerId, PlayerIntent, Rect,
};

// ── Input ─────────────────────────────────────────────────────────────────────

/// Everything the input layer sampled for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub players: [PlayerIntent; 2],
}

impl FrameInput {
    pub fn idle() -> Self {
        FrameInput::default()
    }

    pub fn with(player: PlayerId, intent: PlayerIntent) -> Self {
        let mut input = FrameInput::default();
        input.players[player.index()] = intent;
        input
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Something notable that happened during one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    EnemySpawned { kind: EnemyKind },
    EnemyKilled { kind: EnemyKind, by: PlayerId },
    PlayerHit { player: PlayerId, damage: u32, health: u32 },
    CoinDropped { value: u32 },
    CoinCollected { player: PlayerId, value: u32 },
    CoinExpired { value: u32 },
    StageCleared { next_stage: u32 },
    StageStarted { stage: u32 },
    GameOver,
    Victory,
}

// ── Draw list ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualState {
    Idle,
    Walking,
    Attacking,
    Hurt,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Player(PlayerId),
    Enemy(EnemyKind),
    Coin { tier: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawRequest {
    pub sprite: SpriteKind,
    pub bounds: Rect,
    pub facing_right: bool,
    pub visual: VisualState,
    /// Enemies only: remaining health in `0.0..=1.0`.
    pub health_ratio: Option<f64>,
    /// `false` on the "off" half of the invulnerability flicker.
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerHud {
    pub id: PlayerId,
    pub health: u32,
    pub max_health: u32,
    pub coins: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub status: GameStatus,
    pub stage: u32,
    pub boss_stage: bool,
    pub players: [PlayerHud; 2],
    /// Coins first, then enemies, then players: back to front.
    pub sprites: Vec<DrawRequest>,
}

// ── Visual mapping ────────────────────────────────────────────────────────────

pub fn player_visual(player: &Player) -> VisualState {
    if !player.is_alive() {
        VisualState::Dead
    } else if player.attacking {
        VisualState::Attacking
    } else if player.invulnerable {
        VisualState::Hurt
    } else if player.moving {
        VisualState::Walking
    } else {
        VisualState::Idle
    }
}

pub fn enemy_visual(enemy: &Enemy, now: u64, config: &SimConfig) -> VisualState {
    match enemy.state {
        EnemyState::Dead => VisualState::Dead,
        _ if !has_elapsed(enemy.last_hit_at, now, config.hurt_flash_ms) => VisualState::Hurt,
        EnemyState::Attacking => VisualState::Attacking,
        EnemyState::Walking => VisualState::Walking,
        EnemyState::Idle => VisualState::Idle,
    }
}

pub fn player_sprite(player: &Player) -> DrawRequest {
    DrawRequest {
        sprite: SpriteKind::Player(player.id),
        bounds: player.rect,
        facing_right: player.facing_right,
        visual: player_visual(player),
        health_ratio: None,
        visible: !player.invulnerable || player.flicker,
    }
}

pub fn enemy_sprite(enemy: &Enemy, now: u64, config: &SimConfig) -> DrawRequest {
    DrawRequest {
        sprite: SpriteKind::Enemy(enemy.kind),
        bounds: enemy.rect,
        facing_right: enemy.facing_right,
        visual: enemy_visual(enemy, now, config),
        health_ratio: Some(enemy.health_ratio()),
        visible: true,
    }
}
