//! Stage bookkeeping: spawn budget, pacing timer and the clear barrier.

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::entities::BossKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageState {
    /// 1-based stage number.
    pub stage: u32,
    pub spawned: u32,
    pub budget: u32,
    pub boss: Option<BossKind>,
    pub boss_spawned: bool,
    pub spawn_timer_ms: u64,
    pub spawn_interval_ms: u64,
    pub transition_started_at: Option<u64>,
}

/// Result of the once-per-frame completion check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageCheck {
    /// Enemies remain alive or unspawned.
    InProgress,
    /// The stage was cleared and the given stage is next.
    Advanced(u32),
    /// The final stage was cleared.
    Completed,
}

impl StageState {
    pub fn new(config: &SimConfig) -> Self {
        StageState {
            stage: 1,
            spawned: 0,
            budget: config.budget_for(1),
            boss: config.boss_for(1),
            boss_spawned: false,
            spawn_timer_ms: 0,
            spawn_interval_ms: config.spawn_interval_for(1),
            transition_started_at: None,
        }
    }

    pub fn budget_spent(&self) -> bool {
        self.spawned >= self.budget
    }

    pub fn is_boss_stage(&self) -> bool {
        self.boss.is_some()
    }

    /// Clear barrier: nobody left alive and nothing left to spawn.  On every
    /// stage but the last this advances the stage and starts the transition
    /// dwell at `now`.
    pub fn check_completion(&mut self, live_enemies: usize, now: u64, config: &SimConfig) -> StageCheck {
        if live_enemies > 0 || !self.budget_spent() {
            return StageCheck::InProgress;
        }
        if self.stage >= config.max_stages {
            return StageCheck::Completed;
        }
        self.stage += 1;
        self.spawned = 0;
        self.budget = config.budget_for(self.stage);
        self.boss = config.boss_for(self.stage);
        self.boss_spawned = false;
        self.transition_started_at = Some(now);
        StageCheck::Advanced(self.stage)
    }

    /// `true` once the transition dwell has run its course; the faster spawn
    /// interval for the new stage takes effect at that point.
    pub fn finish_transition(&mut self, now: u64, config: &SimConfig) -> bool {
        let Some(started) = self.transition_started_at else {
            return true;
        };
        if now.saturating_sub(started) < config.stage_transition_ms {
            return false;
        }
        self.transition_started_at = None;
        self.spawn_interval_ms = config.spawn_interval_for(self.stage);
        true
    }
}
