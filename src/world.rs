//! The simulation aggregate and its per-frame tick.
//!
//! `WorldSimulation` owns every piece of mutable game state.  One call to
//! [`WorldSimulation::tick`] advances the clock by the frame delta and runs,
//! in order: players, enemies (AI and contact damage), loot, spawning, the
//! game-over check and the stage-clear check.  Entities never point at each
//! other; everything cross-entity goes through indices here.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::ai::EnemyOutcome;
use crate::combat::{resolve_enemy_contact, resolve_player_attack};
use crate::config::{ConfigError, SimConfig};
use crate::entities::{Coin, Enemy, GameStatus, Player, PlayerId};
use crate::frame::{
    enemy_sprite, player_sprite, DrawRequest, FrameInput, PlayerHud, RenderFrame, SimEvent, SpriteKind,
    VisualState,
};
use crate::shop::{self, ShopError, Weapon};
use crate::spawn::advance_spawner;
use crate::stage::{StageCheck, StageState};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode simulation snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode simulation snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("snapshot carries an invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSimulation {
    pub config: SimConfig,
    pub status: GameStatus,
    /// Milliseconds of simulated time since construction.  Sampled once per tick.
    pub clock_ms: u64,
    pub frame: u64,
    pub players: [Player; 2],
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub stage: StageState,
}

fn starting_players(config: &SimConfig) -> [Player; 2] {
    let y = config.screen_height / 2.0;
    [
        Player::new(PlayerId::One, config.screen_width / 4.0, y, config),
        Player::new(PlayerId::Two, 3.0 * config.screen_width / 4.0, y, config),
    ]
}

impl WorldSimulation {
    /// A fresh simulation sitting on the menu.  `config` is trusted as given;
    /// configs from outside the process go through [`SimConfig::from_json_str`]
    /// or [`SimConfig::load`], which validate.
    pub fn new(config: SimConfig) -> Self {
        let players = starting_players(&config);
        let stage = StageState::new(&config);
        WorldSimulation {
            config,
            status: GameStatus::Menu,
            clock_ms: 0,
            frame: 0,
            players,
            enemies: Vec::new(),
            coins: Vec::new(),
            stage,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn is_boss_stage(&self, stage: u32) -> bool {
        self.config.boss_for(stage).is_some()
    }

    /// Begin a run from the menu, or restart after it ended.  All per-run
    /// state is rebuilt; the clock keeps running.  No-op mid-run.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Menu | GameStatus::GameOver | GameStatus::Victory => {}
            GameStatus::Playing | GameStatus::StageTransition => return false,
        }
        self.players = starting_players(&self.config);
        self.enemies.clear();
        self.coins.clear();
        self.stage = StageState::new(&self.config);
        self.status = GameStatus::Playing;
        info!(clock_ms = self.clock_ms, "run started");
        true
    }

    // ── Per-frame tick ───────────────────────────────────────────────────────

    /// Advance the simulation by one frame of `dt_ms` milliseconds.  All
    /// randomness comes through `rng` so callers control determinism.
    pub fn tick(&mut self, input: &FrameInput, dt_ms: u64, rng: &mut impl Rng) -> Vec<SimEvent> {
        self.clock_ms += dt_ms;
        self.frame += 1;
        let now = self.clock_ms;
        let mut events = Vec::new();

        match self.status {
            GameStatus::Playing => self.tick_playing(input, dt_ms, now, rng, &mut events),
            GameStatus::StageTransition => {
                if self.stage.finish_transition(now, &self.config) {
                    self.status = GameStatus::Playing;
                    info!(
                        stage = self.stage.stage,
                        spawn_interval_ms = self.stage.spawn_interval_ms,
                        "stage started"
                    );
                    events.push(SimEvent::StageStarted { stage: self.stage.stage });
                }
            }
            GameStatus::Menu | GameStatus::GameOver | GameStatus::Victory => {}
        }

        events
    }

    fn tick_playing(
        &mut self,
        input: &FrameInput,
        dt_ms: u64,
        now: u64,
        rng: &mut impl Rng,
        events: &mut Vec<SimEvent>,
    ) {
        let config = &self.config;

        // ── 1. Players: movement, timers, melee ──────────────────────────────
        for (player, intent) in self.players.iter_mut().zip(input.players.iter()) {
            if !player.update(intent, now, config) {
                continue;
            }
            for drop in resolve_player_attack(player, &mut self.enemies, now, config) {
                let coin = Coin::new(drop.x, drop.y, config.loot_tier, config);
                debug!(by = ?player.id, kind = ?drop.kind, coin = coin.value, "enemy killed");
                events.push(SimEvent::EnemyKilled { kind: drop.kind, by: player.id });
                events.push(SimEvent::CoinDropped { value: coin.value });
                self.coins.push(coin);
            }
        }

        // ── 2. Enemies: AI, swings, body contact ─────────────────────────────
        for enemy in self.enemies.iter_mut() {
            match enemy.update(&self.players, now, config) {
                EnemyOutcome::Remove => continue,
                EnemyOutcome::Strike { target, damage } => {
                    let victim = &mut self.players[target.index()];
                    if victim.take_damage(damage, now, config) {
                        events.push(SimEvent::PlayerHit {
                            player: target,
                            damage,
                            health: victim.health,
                        });
                    }
                }
                EnemyOutcome::Hold => {}
            }
            for player in self.players.iter_mut() {
                if resolve_enemy_contact(enemy, player, now, config) {
                    events.push(SimEvent::PlayerHit {
                        player: player.id,
                        damage: enemy.damage,
                        health: player.health,
                    });
                }
            }
        }
        self.enemies.retain(|e| !e.is_dead());

        // ── 3. Loot: pickup first, then expiry ───────────────────────────────
        let players = &mut self.players;
        self.coins.retain_mut(|coin| {
            if let Some(player) = players
                .iter_mut()
                .find(|p| p.is_alive() && p.rect.intersects(&coin.rect))
            {
                player.coins += coin.value;
                debug!(player = ?player.id, value = coin.value, total = player.coins, "coin collected");
                events.push(SimEvent::CoinCollected { player: player.id, value: coin.value });
                return false;
            }
            if coin.tick(dt_ms) {
                return true;
            }
            debug!(value = coin.value, "coin expired");
            events.push(SimEvent::CoinExpired { value: coin.value });
            false
        });

        // ── 4. Spawning ──────────────────────────────────────────────────────
        if let Some(enemy) = advance_spawner(&mut self.stage, dt_ms, config, rng) {
            events.push(SimEvent::EnemySpawned { kind: enemy.kind });
            self.enemies.push(enemy);
        }

        // ── 5. Game over ─────────────────────────────────────────────────────
        if self.players.iter().all(|p| !p.is_alive()) {
            self.status = GameStatus::GameOver;
            info!(stage = self.stage.stage, frame = self.frame, "game over");
            events.push(SimEvent::GameOver);
            return;
        }

        // ── 6. Stage clear ───────────────────────────────────────────────────
        match self.stage.check_completion(self.enemies.len(), now, config) {
            StageCheck::InProgress => {}
            StageCheck::Advanced(next_stage) => {
                self.status = GameStatus::StageTransition;
                info!(
                    next_stage,
                    boss_stage = self.stage.is_boss_stage(),
                    "stage cleared"
                );
                events.push(SimEvent::StageCleared { next_stage });
            }
            StageCheck::Completed => {
                self.status = GameStatus::Victory;
                info!(stage = self.stage.stage, frame = self.frame, "final stage cleared");
                events.push(SimEvent::Victory);
            }
        }
    }

    // ── Shop ─────────────────────────────────────────────────────────────────

    pub fn purchase_weapon(&mut self, player: PlayerId, index: usize) -> Result<Weapon, ShopError> {
        shop::purchase(&mut self.players[player.index()], &self.config.weapons, index).cloned()
    }

    // ── Presentation ─────────────────────────────────────────────────────────

    pub fn render_frame(&self) -> RenderFrame {
        let now = self.clock_ms;
        let mut sprites: Vec<DrawRequest> =
            Vec::with_capacity(self.coins.len() + self.enemies.len() + self.players.len());

        sprites.extend(self.coins.iter().map(|coin| DrawRequest {
            sprite: SpriteKind::Coin { tier: coin.tier },
            bounds: coin.rect,
            facing_right: true,
            visual: VisualState::Idle,
            health_ratio: None,
            visible: true,
        }));
        sprites.extend(self.enemies.iter().map(|e| enemy_sprite(e, now, &self.config)));
        sprites.extend(self.players.iter().map(player_sprite));

        let hud = |p: &Player| PlayerHud {
            id: p.id,
            health: p.health,
            max_health: p.max_health,
            coins: p.coins,
        };

        RenderFrame {
            status: self.status,
            stage: self.stage.stage,
            boss_stage: self.stage.is_boss_stage(),
            players: [hud(&self.players[0]), hud(&self.players[1])],
            sprites,
        }
    }

    // ── Snapshot ─────────────────────────────────────────────────────────────

    /// Serialize the whole simulation at a frame boundary.
    pub fn to_snapshot_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(SnapshotError::Encode)
    }

    /// Restore a snapshot.  The embedded config is validated like a config file.
    pub fn from_snapshot_json(raw: &str) -> Result<Self, SnapshotError> {
        let world: WorldSimulation = serde_json::from_str(raw).map_err(SnapshotError::Decode)?;
        world.config.validate()?;
        Ok(world)
    }
}
