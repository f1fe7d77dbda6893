//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; subsystems borrow it
//! mutably for the duration of their step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::weapon::{WeaponCatalog, WeaponId};
use crate::Settings;
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player defeated; only `restart` leaves this phase
    GameOver,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    /// Pixels per reference frame
    pub speed: f32,
    pub weapon: WeaponId,
    pub ammo: u32,
    /// Simulation time of the last accepted shot
    #[serde(default)]
    pub last_shot_ms: Option<f64>,
    pub experience: f32,
    pub level: u32,
}

impl Player {
    pub fn new(pos: Vec2, catalog: &WeaponCatalog) -> Self {
        let weapon = WeaponId::default();
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: PLAYER_START_HEALTH,
            max_health: PLAYER_START_HEALTH,
            speed: PLAYER_START_SPEED,
            weapon,
            ammo: catalog.get(weapon).max_ammo,
            last_shot_ms: None,
            experience: 0.0,
            level: 1,
        }
    }

    /// Restore health, capped at max
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Apply damage, floored at zero. Returns true if the player is down.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.health <= 0.0
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Fast,
    Tank,
    Boss,
}

impl EnemyKind {
    pub fn radius(&self) -> f32 {
        match self {
            EnemyKind::Normal => 12.0,
            EnemyKind::Fast => 10.0,
            EnemyKind::Tank => 18.0,
            EnemyKind::Boss => 25.0,
        }
    }

    /// Starting health on the given wave
    pub fn health_for_wave(&self, wave: u32) -> f32 {
        match self {
            EnemyKind::Normal => (2 + wave / 3) as f32,
            EnemyKind::Fast => 1.0,
            EnemyKind::Tank => (5 + wave / 2) as f32,
            EnemyKind::Boss => (15 + wave) as f32,
        }
    }

    /// Pixels per reference frame on the given wave
    pub fn speed_for_wave(&self, wave: u32) -> f32 {
        let w = wave as f32;
        match self {
            EnemyKind::Normal => 0.5 + w * 0.1,
            EnemyKind::Fast => 1.2 + w * 0.15,
            EnemyKind::Tank | EnemyKind::Boss => 0.3 + w * 0.05,
        }
    }

    /// Damage dealt to the player per tick of contact
    pub fn contact_damage(&self) -> f32 {
        match self {
            EnemyKind::Normal => 2.0,
            EnemyKind::Fast => 1.0,
            EnemyKind::Tank => 4.0,
            EnemyKind::Boss => 8.0,
        }
    }

    pub fn score_value(&self) -> u64 {
        match self {
            EnemyKind::Normal => 10,
            EnemyKind::Fast => 15,
            EnemyKind::Tank => 25,
            EnemyKind::Boss => 100,
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            EnemyKind::Normal => 0x4d7a2e,
            EnemyKind::Fast => 0xff4444,
            EnemyKind::Tank => 0x444444,
            EnemyKind::Boss => 0x8b0000,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    pub health: f32,
    pub max_health: f32,
    pub speed: f32,
    /// Boss only: time of the last charge (spawn time before the first)
    #[serde(default)]
    pub last_attack_ms: Option<f64>,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, wave: u32, now_ms: f64) -> Self {
        let health = kind.health_for_wave(wave);
        Self {
            id,
            kind,
            pos,
            radius: kind.radius(),
            health,
            max_health: health,
            speed: kind.speed_for_wave(wave),
            last_attack_ms: (kind == EnemyKind::Boss).then_some(now_ms),
        }
    }

    /// Apply damage, floored at zero. Returns true if the enemy is dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.health = (self.health - amount).max(0.0);
        self.is_dead()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// A bullet or shotgun pellet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub weapon: WeaponId,
    pub color: u32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining ticks
    pub life: i32,
    pub color: u32,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Health,
    Ammo,
    Weapon,
    Speed,
    Damage,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Ammo,
        PowerUpKind::Weapon,
        PowerUpKind::Speed,
        PowerUpKind::Damage,
    ];

    pub fn color(&self) -> u32 {
        match self {
            PowerUpKind::Health => 0x00ff00,
            PowerUpKind::Ammo => 0xffff00,
            PowerUpKind::Weapon => 0xff00ff,
            PowerUpKind::Speed => 0x00ffff,
            PowerUpKind::Damage => 0xff0000,
        }
    }

    /// HUD glyph
    pub fn icon(&self) -> char {
        match self {
            PowerUpKind::Health => '+',
            PowerUpKind::Ammo => 'A',
            PowerUpKind::Weapon => 'W',
            PowerUpKind::Speed => 'S',
            PowerUpKind::Damage => 'D',
        }
    }
}

/// Base pickup radius; the live radius pulses around it
pub const POWER_UP_RADIUS: f32 = 8.0;
/// Unclaimed power-ups vanish after 10 seconds
pub const POWER_UP_LIFE_TICKS: i32 = 600;

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Remaining ticks
    pub life: i32,
}

/// An expanding blast ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    /// Remaining ticks
    pub life: i32,
    /// Damage per tick to enemies inside `radius` (0 = cosmetic)
    pub damage: f32,
}

/// Wave and score bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub score: u64,
    pub wave: u32,
    pub kills_this_wave: u32,
    pub kills_required: u32,
    /// A boss has been spawned this wave cycle
    pub boss_spawned: bool,
    pub total_kills: u64,
}

/// Kills needed to clear wave 1
pub const BASE_KILLS_PER_WAVE: u32 = 5;

impl Default for Progression {
    fn default() -> Self {
        Self {
            score: 0,
            wave: 1,
            kills_this_wave: 0,
            kills_required: BASE_KILLS_PER_WAVE,
            boss_spawned: false,
            total_kills: 0,
        }
    }
}

/// Owns every transient entity collection
#[derive(Debug, Clone)]
pub struct EntityStore {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    /// Particle budget from settings; extra particles are dropped
    pub max_particles: usize,
    next_id: u32,
}

impl EntityStore {
    pub fn new(max_particles: usize) -> Self {
        Self {
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            explosions: Vec::new(),
            max_particles,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() < self.max_particles {
            self.particles.push(particle);
        }
    }

    pub fn add_explosion(&mut self, pos: Vec2, max_radius: f32, life: i32, damage: f32) -> u32 {
        let id = self.next_entity_id();
        self.explosions.push(Explosion {
            id,
            pos,
            radius: 0.0,
            max_radius,
            life,
            damage,
        });
        id
    }

    /// Remove and return every enemy matching `pred`, preserving order of the rest
    pub fn remove_enemies_where<F>(&mut self, mut pred: F) -> Vec<Enemy>
    where
        F: FnMut(&Enemy) -> bool,
    {
        let mut removed = Vec::new();
        self.enemies.retain(|e| {
            if pred(e) {
                removed.push(e.clone());
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn boss_alive(&self) -> bool {
        self.enemies.iter().any(|e| e.kind == EnemyKind::Boss)
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.power_ups.clear();
        self.explosions.clear();
        self.next_id = 1;
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation clock (monotonic, advanced by the tick)
    pub time_ms: f64,
    pub time_ticks: u64,
    /// Play area size; the area spans (0,0)..arena
    pub arena: Vec2,
    pub player: Player,
    /// Last aim point received from input (for rendering the weapon)
    pub aim: Vec2,
    pub catalog: WeaponCatalog,
    pub entities: EntityStore,
    pub progression: Progression,
    /// Deadline for the next spawn evaluation
    pub next_spawn_ms: f64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let arena = Vec2::new(settings.arena_width, settings.arena_height);
        let catalog = WeaponCatalog::new();
        let player = Player::new(arena * 0.5, &catalog);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            time_ms: 0.0,
            time_ticks: 0,
            arena,
            player,
            aim: arena * 0.5,
            catalog,
            entities: EntityStore::new(settings.max_particles()),
            progression: Progression::default(),
            next_spawn_ms: super::spawn::spawn_interval_ms(1),
            events: Vec::new(),
        }
    }

    /// Reset everything to the initial state of this seed
    ///
    /// Pending damage modifiers are discarded along with the rest.
    pub fn restart(&mut self) {
        log::info!(
            "Restarting (previous run: wave {}, score {})",
            self.progression.wave,
            self.progression.score
        );
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Running;
        self.time_ms = 0.0;
        self.time_ticks = 0;
        self.catalog.clear_modifiers();
        self.player = Player::new(self.arena * 0.5, &self.catalog);
        self.aim = self.arena * 0.5;
        self.entities.clear();
        self.progression = Progression::default();
        self.next_spawn_ms = super::spawn::spawn_interval_ms(1);
        self.events.clear();
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True if `pos` lies inside the play area (edges inclusive)
    pub fn in_arena(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.arena.x && pos.y >= 0.0 && pos.y <= self.arena.y
    }

    /// Scatter `count` particles from `pos` with velocity components in ±`max_speed`
    pub fn spawn_particles(&mut self, pos: Vec2, count: usize, max_speed: f32, life: i32, color: u32) {
        for _ in 0..count {
            if self.entities.particles.len() >= self.entities.max_particles {
                return;
            }
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 2.0 * max_speed,
                (self.rng.random::<f32>() - 0.5) * 2.0 * max_speed,
            );
            self.entities.push_particle(Particle {
                pos,
                vel,
                life,
                color,
            });
        }
    }

    pub fn blood_splash(&mut self, pos: Vec2) {
        self.spawn_particles(pos, 8, 3.0, 20, 0xff0000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7, &Settings::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.weapon, WeaponId::Pistol);
        assert_eq!(state.player.ammo, 15);
        assert_eq!(state.progression.wave, 1);
        assert_eq!(state.progression.kills_required, 5);
    }

    #[test]
    fn test_enemy_health_floors_at_zero() {
        let mut enemy = Enemy::new(1, EnemyKind::Fast, Vec2::ZERO, 1, 0.0);
        assert!(enemy.take_damage(25.0));
        assert_eq!(enemy.health, 0.0);

        let mut tank = Enemy::new(2, EnemyKind::Tank, Vec2::ZERO, 4, 0.0);
        assert_eq!(tank.health, 7.0);
        assert!(!tank.take_damage(3.0));
        assert_eq!(tank.health, 4.0);
    }

    #[test]
    fn test_stats_scale_with_wave() {
        for kind in [EnemyKind::Normal, EnemyKind::Fast, EnemyKind::Tank, EnemyKind::Boss] {
            assert!(kind.speed_for_wave(10) > kind.speed_for_wave(1));
            assert!(kind.health_for_wave(10) >= kind.health_for_wave(1));
        }
        assert!(Enemy::new(1, EnemyKind::Boss, Vec2::ZERO, 5, 42.0).last_attack_ms == Some(42.0));
        assert!(Enemy::new(1, EnemyKind::Tank, Vec2::ZERO, 5, 42.0).last_attack_ms.is_none());
    }

    #[test]
    fn test_particle_budget() {
        let mut state = GameState::new(1, &Settings::default());
        state.entities.max_particles = 10;
        state.spawn_particles(Vec2::ZERO, 25, 3.0, 20, 0);
        assert_eq!(state.entities.particles.len(), 10);
    }

    #[test]
    fn test_remove_enemies_where() {
        let mut store = EntityStore::new(0);
        for kind in [EnemyKind::Normal, EnemyKind::Boss, EnemyKind::Fast] {
            let id = store.next_entity_id();
            store.enemies.push(Enemy::new(id, kind, Vec2::ZERO, 5, 0.0));
        }
        assert!(store.boss_alive());
        let removed = store.remove_enemies_where(|e| e.kind == EnemyKind::Boss);
        assert_eq!(removed.len(), 1);
        assert!(!store.boss_alive());
        assert_eq!(store.enemies.len(), 2);
    }

    #[test]
    fn test_player_heal_caps() {
        let catalog = WeaponCatalog::new();
        let mut player = Player::new(Vec2::ZERO, &catalog);
        player.take_damage(10.0);
        player.heal(30.0);
        assert_eq!(player.health, player.max_health);
        assert!(player.take_damage(500.0));
        assert_eq!(player.health, 0.0);
    }
}
