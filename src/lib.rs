//! Dead Wave - A top-down zombie survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, combat, spawning, progression)
//! - `settings`: Runtime configuration loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, the reference frame for all speeds)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default play area dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_START_HEALTH: f32 = 100.0;
    pub const PLAYER_START_SPEED: f32 = 3.0;
    /// Ceiling for the speed power-up (level-ups may exceed it)
    pub const PLAYER_MAX_SPEED: f32 = 5.0;

    /// Projectile radius (all weapons)
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    /// Distance outside the visible bounds where enemies appear
    pub const SPAWN_MARGIN: f32 = 20.0;
}

/// Number of reference frames covered by `dt` seconds
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt / consts::SIM_DT
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Angle from `from` toward `to` (radians, atan2 convention)
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}
