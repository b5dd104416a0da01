//! Enemy behaviour: chase the nearest player, stop at attack range and swing
//! on a cooldown.

use crate::config::SimConfig;
use crate::entities::{has_elapsed, Enemy, EnemyState, Player, PlayerId};
use crate::targeting::{direction, select_target};

/// What the orchestrator must do after an enemy update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyOutcome {
    /// Nothing beyond the enemy's own state changed.
    Hold,
    /// A swing connected at activation; apply `damage` to `target`.
    Strike { target: PlayerId, damage: u32 },
    /// The enemy is dead and may be dropped from the live set.
    Remove,
}

impl Enemy {
    pub fn update(&mut self, players: &[Player; 2], now: u64, config: &SimConfig) -> EnemyOutcome {
        if self.is_dead() {
            return EnemyOutcome::Remove;
        }

        let mut outcome = EnemyOutcome::Hold;
        let mut moved = false;

        if let Some(target) = select_target(self.rect.center(), players) {
            self.facing_right = target.dx > 0.0;

            if target.distance <= self.attack_range {
                if !self.attacking
                    && has_elapsed(self.last_attack_at, now, config.enemy_attack_cooldown_ms)
                {
                    self.attacking = true;
                    self.last_attack_at = Some(now);

                    let victim = &players[target.player.index()];
                    if target.distance < self.attack_range * config.enemy_strike_ratio
                        && victim.is_vulnerable(now, config)
                    {
                        outcome = EnemyOutcome::Strike {
                            target: target.player,
                            damage: self.damage,
                        };
                    }
                }
            } else {
                let (ux, uy) = direction(target.dx, target.dy);
                self.rect.x += ux * self.speed;
                self.rect.y += uy * self.speed;
                moved = true;
            }
        }

        if self.attacking && has_elapsed(self.last_attack_at, now, config.enemy_attack_window_ms) {
            self.attacking = false;
        }

        self.state = if self.attacking {
            EnemyState::Attacking
        } else if moved {
            EnemyState::Walking
        } else {
            EnemyState::Idle
        };

        outcome
    }
}
