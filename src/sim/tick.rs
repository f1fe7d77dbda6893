//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation in a fixed order:
//! movement, enemies, contact, projectiles, hits, explosions, particles,
//! power-ups, progression, spawning.

use glam::Vec2;

use super::combat;
use super::events::GameEvent;
use super::progression;
use super::spawn;
use super::state::{GamePhase, GameState, POWER_UP_RADIUS};
use crate::frames;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent; longer than 1 is clamped to unit length
    pub movement: Vec2,
    /// Aim point in world coordinates (keeps the previous aim when `None`)
    pub aim: Option<Vec2>,
    /// Fire the current weapon
    pub fire: bool,
    /// Refill the magazine
    pub reload: bool,
    /// Cycle to the next weapon
    pub switch_weapon: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Particle velocity retained per tick
const PARTICLE_DRAG: f32 = 0.98;

/// Autopilot keeps at least this far from the nearest enemy
const AUTOPILOT_SAFE_DISTANCE: f32 = 150.0;

/// Advance the game state by one timestep of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Don't tick once the run is over
    if state.phase == GamePhase::GameOver {
        return;
    }
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return;
    }

    state.events.clear();
    state.time_ticks += 1;
    state.time_ms += dt as f64 * 1000.0;

    let expired = state.catalog.prune_expired(state.time_ms);
    if expired > 0 {
        log::debug!("{} damage boost(s) expired", expired);
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    if let Some(aim) = input.aim {
        state.aim = aim;
    }
    move_player(state, input.movement, dt);

    if input.switch_weapon {
        combat::switch_weapon(state);
    }
    if input.reload {
        combat::reload(state);
    }
    if input.fire {
        let aim = state.aim;
        combat::fire(state, aim);
    }

    combat::advance_enemies(state, dt);
    if combat::resolve_enemy_contact(state) {
        log::info!(
            "Game over on wave {} with score {}",
            state.progression.wave,
            state.progression.score
        );
        return;
    }

    combat::advance_projectiles(state, dt);
    combat::resolve_projectile_hits(state);

    combat::advance_explosions(state);
    combat::resolve_explosion_damage(state);
    combat::expire_explosions(state);

    decay_particles(state, dt);
    update_power_ups(state);

    progression::process_kills(state);
    spawn::run_spawn_timer(state);
}

/// Move the player along the intent vector, kept inside the arena
fn move_player(state: &mut GameState, movement: Vec2, dt: f32) {
    let player = &mut state.player;
    let step = movement.clamp_length_max(1.0) * player.speed * frames(dt);
    let min = Vec2::splat(player.radius);
    let max = (state.arena - Vec2::splat(player.radius)).max(min);
    player.pos = (player.pos + step).clamp(min, max);
}

fn decay_particles(state: &mut GameState, dt: f32) {
    let step = frames(dt);
    for particle in state.entities.particles.iter_mut() {
        particle.pos += particle.vel * step;
        particle.vel *= PARTICLE_DRAG;
        particle.life -= 1;
    }
    state.entities.particles.retain(|p| p.life > 0);
}

/// Age power-ups, pulse their radius, and collect the ones the player touches
fn update_power_ups(state: &mut GameState) {
    let pulse = POWER_UP_RADIUS + (state.time_ms * 0.01).sin() as f32 * 2.0;
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let mut collected = Vec::new();
    state.entities.power_ups.retain_mut(|p| {
        p.life -= 1;
        p.radius = pulse;
        if combat::circles_overlap(player_pos, player_radius, p.pos, p.radius) {
            collected.push((p.kind, p.pos));
            return false;
        }
        p.life > 0
    });

    for (kind, pos) in collected {
        progression::apply_power_up(state, kind);
        state.spawn_particles(pos, 15, 4.0, 30, kind.color());
        state.events.push(GameEvent::PowerUpCollected { kind });
    }
}

/// Fill in input for idle/demo mode
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player_pos = state.player.pos;

    let nearest_enemy = state.entities.enemies.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player_pos)
            .partial_cmp(&b.pos.distance_squared(player_pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(enemy) = nearest_enemy else {
        // Nothing to shoot: top up and drift back to the middle
        input.reload = state.player.ammo < state.catalog.get(state.player.weapon).max_ammo;
        input.movement = (state.arena * 0.5 - player_pos) * 0.01;
        return;
    };

    input.aim = Some(enemy.pos);
    input.fire = state.player.ammo > 0;
    input.reload = state.player.ammo == 0;

    let distance = enemy.pos.distance(player_pos);
    if distance < AUTOPILOT_SAFE_DISTANCE {
        input.movement = (player_pos - enemy.pos).normalize_or_zero();
    } else if let Some(power_up) = state.entities.power_ups.iter().min_by(|a, b| {
        a.pos
            .distance_squared(player_pos)
            .partial_cmp(&b.pos.distance_squared(player_pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        input.movement = (power_up.pos - player_pos).normalize_or_zero();
    }
}
