//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entities)
//! - No rendering or platform dependencies

pub mod combat;
pub mod events;
pub mod progression;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use combat::MuzzleFlash;
pub use events::GameEvent;
pub use snapshot::{RenderState, UiStats};
pub use state::{
    Enemy, EnemyKind, EntityStore, Explosion, GamePhase, GameState, Particle, Player, PowerUp,
    PowerUpKind, Progression, Projectile,
};
pub use tick::{TickInput, tick};
pub use weapon::{DamageModifier, WeaponCatalog, WeaponDef, WeaponId};
