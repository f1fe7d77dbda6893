//! Read-only views handed to the renderer and HUD

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Enemy, Explosion, GamePhase, GameState, Particle, Player, PowerUp, Projectile};
use super::weapon::WeaponId;

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderState {
    pub time_ms: f64,
    pub phase: GamePhase,
    pub arena: Vec2,
    pub player: Player,
    pub aim: Vec2,
    pub weapon: WeaponId,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
}

/// Scalar stats for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiStats {
    pub health: f32,
    pub max_health: f32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub score: u64,
    pub wave: u32,
    pub level: u32,
    pub weapon_name: String,
    pub caliber: String,
    pub game_over: bool,
}

impl GameState {
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            time_ms: self.time_ms,
            phase: self.phase,
            arena: self.arena,
            player: self.player.clone(),
            aim: self.aim,
            weapon: self.player.weapon,
            enemies: self.entities.enemies.clone(),
            projectiles: self.entities.projectiles.clone(),
            particles: self.entities.particles.clone(),
            power_ups: self.entities.power_ups.clone(),
            explosions: self.entities.explosions.clone(),
        }
    }

    pub fn ui_stats(&self) -> UiStats {
        let weapon = self.catalog.get(self.player.weapon);
        UiStats {
            health: self.player.health.max(0.0),
            max_health: self.player.max_health,
            ammo: self.player.ammo,
            max_ammo: weapon.max_ammo,
            score: self.progression.score,
            wave: self.progression.wave,
            level: self.player.level,
            weapon_name: weapon.name.to_string(),
            caliber: weapon.caliber.to_string(),
            game_over: self.is_game_over(),
        }
    }
}
