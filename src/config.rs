//! Static tuning for one simulation.
//!
//! Every field has a default matching the stock game, and `#[serde(default)]`
//! lets a JSON file override only the values it names.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::BossKind;
use crate::shop::{Weapon, SHOP_SLOTS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── Playfield ─────────────────────────────────────────────────────────────
    pub screen_width: f64,
    pub screen_height: f64,

    // ── Stages ────────────────────────────────────────────────────────────────
    /// Enemies to spawn per stage, indexed by `stage - 1`.  Includes the boss.
    pub stage_budgets: Vec<u32>,
    /// Stages whose last spawn slot is a boss.
    pub stage_bosses: BTreeMap<u32, BossKind>,
    pub max_stages: u32,
    pub stage_transition_ms: u64,

    // ── Players ───────────────────────────────────────────────────────────────
    pub player_health: u32,
    pub player_damage: u32,
    pub player_speed: f64,
    pub player_size: f64,
    pub invulnerability_ms: u64,
    /// Update ticks between flicker toggles while invulnerable.
    pub flicker_period_ticks: u32,
    pub player_attack_cooldown_ms: u64,
    pub player_attack_window_ms: u64,
    pub hitbox_width: f64,
    pub hitbox_height: f64,
    pub hitbox_offset: f64,

    // ── Enemies ───────────────────────────────────────────────────────────────
    pub enemy_attack_cooldown_ms: u64,
    pub enemy_attack_window_ms: u64,
    /// Fraction of the attack range inside which a swing actually lands.
    pub enemy_strike_ratio: f64,
    pub enemy_attack_range: f64,
    pub boss_attack_range: f64,
    pub enemy_size: f64,
    pub boss_size: f64,
    pub enemy_spawn_margin: f64,
    pub boss_spawn_margin: f64,
    pub hurt_flash_ms: u64,

    // ── Spawn pacing ──────────────────────────────────────────────────────────
    pub spawn_interval_ms: u64,
    pub spawn_interval_step_ms: u64,
    pub spawn_interval_floor_ms: u64,

    // ── Loot ──────────────────────────────────────────────────────────────────
    pub coin_lifetime_ms: u64,
    pub coin_size: f64,
    pub loot_tier: u8,

    // ── Shop ──────────────────────────────────────────────────────────────────
    pub weapons: Vec<Weapon>,
}

impl Default for SimConfig {
    fn default() -> Self {
        let stage_bosses = BTreeMap::from([
            (2, BossKind::Butcher),
            (3, BossKind::Abomination),
            (5, BossKind::Overlord),
        ]);
        SimConfig {
            screen_width: 800.0,
            screen_height: 600.0,
            stage_budgets: vec![5, 9, 14, 20, 24],
            stage_bosses,
            max_stages: 5,
            stage_transition_ms: 2000,
            player_health: 100,
            player_damage: 10,
            player_speed: 5.0,
            player_size: 50.0,
            invulnerability_ms: 1000,
            flicker_period_ticks: 5,
            player_attack_cooldown_ms: 500,
            player_attack_window_ms: 200,
            hitbox_width: 80.0,
            hitbox_height: 60.0,
            hitbox_offset: 40.0,
            enemy_attack_cooldown_ms: 1000,
            enemy_attack_window_ms: 500,
            enemy_strike_ratio: 0.8,
            enemy_attack_range: 50.0,
            boss_attack_range: 70.0,
            enemy_size: 50.0,
            boss_size: 75.0,
            enemy_spawn_margin: 50.0,
            boss_spawn_margin: 100.0,
            hurt_flash_ms: 200,
            spawn_interval_ms: 2000,
            spawn_interval_step_ms: 300,
            spawn_interval_floor_ms: 500,
            coin_lifetime_ms: 10_000,
            coin_size: 30.0,
            loot_tier: 1,
            weapons: Weapon::default_catalog(),
        }
    }
}

impl SimConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "screen must have positive size, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.max_stages == 0 {
            return Err(ConfigError::Invalid("max_stages must be at least 1".into()));
        }
        if (self.stage_budgets.len() as u32) < self.max_stages {
            return Err(ConfigError::Invalid(format!(
                "{} stages configured but only {} budgets given",
                self.max_stages,
                self.stage_budgets.len()
            )));
        }
        if let Some(stage) = self
            .stage_bosses
            .keys()
            .find(|&&stage| stage == 0 || stage > self.max_stages)
        {
            return Err(ConfigError::Invalid(format!(
                "boss configured for stage {stage}, outside 1..={}",
                self.max_stages
            )));
        }
        if let Some((stage, _)) = self
            .stage_bosses
            .keys()
            .map(|&stage| (stage, self.budget_for(stage)))
            .find(|&(_, budget)| budget == 0)
        {
            return Err(ConfigError::Invalid(format!(
                "boss stage {stage} needs a budget of at least 1"
            )));
        }
        if self.boss_spawn_margin * 2.0 > self.screen_width.min(self.screen_height) {
            return Err(ConfigError::Invalid(
                "boss_spawn_margin leaves no room on the playfield".into(),
            ));
        }
        if self.weapons.len() > SHOP_SLOTS {
            return Err(ConfigError::Invalid(format!(
                "{} weapons configured but the shop has {SHOP_SLOTS} slots",
                self.weapons.len()
            )));
        }
        if self.flicker_period_ticks == 0 {
            return Err(ConfigError::Invalid("flicker_period_ticks must be at least 1".into()));
        }
        Ok(())
    }

    /// Spawn budget of `stage` (1-based); zero for stages past the table.
    pub fn budget_for(&self, stage: u32) -> u32 {
        stage
            .checked_sub(1)
            .and_then(|i| self.stage_budgets.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn boss_for(&self, stage: u32) -> Option<BossKind> {
        self.stage_bosses.get(&stage).copied()
    }

    /// Spawn interval in effect while `stage` is being played.
    pub fn spawn_interval_for(&self, stage: u32) -> u64 {
        let reduction = self.spawn_interval_step_ms * u64::from(stage.saturating_sub(1));
        self.spawn_interval_ms
            .saturating_sub(reduction)
            .max(self.spawn_interval_floor_ms)
    }
}
