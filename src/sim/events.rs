//! Events raised during a single tick
//!
//! Cleared at the start of every tick. Audio and HUD feedback read them after
//! the tick returns; the progression tracker consumes the kill events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{EnemyKind, PowerUpKind};
use super::weapon::WeaponId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { weapon: WeaponId, pellets: u32 },
    EnemyHit { pos: Vec2, damage: f32 },
    EnemyKilled { kind: EnemyKind, pos: Vec2 },
    PlayerDamaged { amount: f32 },
    PowerUpCollected { kind: PowerUpKind },
    BossSpawned { wave: u32 },
    WaveCleared { wave: u32 },
    LevelUp { level: u32 },
    PlayerDefeated,
}
