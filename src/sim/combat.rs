//! Firing, projectile motion, and every damage interaction
//!
//! All overlap tests are circle-circle: two bodies touch when the distance
//! between centers is strictly less than the sum of their radii.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::state::{EnemyKind, GamePhase, GameState, Projectile};
use super::weapon::WeaponId;
use crate::consts::PROJECTILE_RADIUS;
use crate::{angle_to, direction, frames};

/// Boss charge cadence and reach
pub const BOSS_CHARGE_INTERVAL_MS: f64 = 3000.0;
pub const BOSS_CHARGE_DISTANCE: f32 = 50.0;

/// Blast left behind by a boss charge
const CHARGE_BLAST_RADIUS: f32 = 60.0;
const CHARGE_BLAST_LIFE: i32 = 20;
const CHARGE_BLAST_DAMAGE: f32 = 5.0;

/// Cosmetic blasts scattered around a dead boss
const BOSS_DEATH_BLASTS: usize = 5;
const BOSS_DEATH_SCATTER: f32 = 60.0;
const BOSS_DEATH_BLAST_RADIUS: f32 = 40.0;
const BOSS_DEATH_BLAST_LIFE: i32 = 25;

/// Visual result of an accepted shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MuzzleFlash {
    pub pos: Vec2,
    pub angle: f32,
    pub color: u32,
}

/// Circle overlap test
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Fire the player's current weapon toward `aim`
///
/// Returns `None` (and changes nothing) when the magazine is empty or the
/// weapon is still cooling down.
pub fn fire(state: &mut GameState, aim: Vec2) -> Option<MuzzleFlash> {
    let now = state.time_ms;
    let weapon = state.catalog.effective(state.player.weapon, now);

    if state.player.ammo == 0 {
        return None;
    }
    if let Some(last) = state.player.last_shot_ms {
        if now - last < weapon.fire_rate_ms {
            return None;
        }
    }

    state.player.last_shot_ms = Some(now);
    state.player.ammo -= 1;

    let origin = state.player.pos;
    let base_angle = angle_to(origin, aim);

    for _ in 0..weapon.pellets {
        let deviation = (state.rng.random::<f32>() - 0.5) * weapon.spread;
        let id = state.entities.next_entity_id();
        state.entities.projectiles.push(Projectile {
            id,
            pos: origin,
            vel: direction(base_angle + deviation) * weapon.projectile_speed,
            radius: PROJECTILE_RADIUS,
            damage: weapon.damage,
            weapon: weapon.id,
            color: weapon.color,
        });
    }

    let flash = MuzzleFlash {
        pos: origin + direction(base_angle) * 20.0,
        angle: base_angle,
        color: weapon.color,
    };
    state.spawn_particles(flash.pos, 8, 3.0, 15, flash.color);
    state.events.push(GameEvent::ShotFired {
        weapon: weapon.id,
        pellets: weapon.pellets,
    });

    Some(flash)
}

/// Refill the magazine of the current weapon
pub fn reload(state: &mut GameState) {
    state.player.ammo = state.catalog.get(state.player.weapon).max_ammo;
}

/// Cycle to the next weapon, keeping as much ammo as the new magazine holds
pub fn switch_weapon(state: &mut GameState) {
    let next = state.catalog.next_id(state.player.weapon);
    state.player.weapon = next;
    state.player.ammo = state.player.ammo.min(state.catalog.get(next).max_ammo);
}

/// Equip a weapon by its textual id
///
/// Unknown names keep the current weapon. Returns true if the weapon changed.
pub fn select_weapon(state: &mut GameState, name: &str) -> bool {
    let Some(id) = WeaponId::from_str(name) else {
        log::warn!("Unknown weapon '{}', keeping {}", name, state.player.weapon.as_str());
        return false;
    };
    if id == state.player.weapon {
        return false;
    }
    state.player.weapon = id;
    state.player.ammo = state.player.ammo.min(state.catalog.get(id).max_ammo);
    true
}

/// Move every projectile and drop the ones that left the play area
pub fn advance_projectiles(state: &mut GameState, dt: f32) {
    let step = frames(dt);
    let arena = state.arena;
    state.entities.projectiles.retain_mut(|p| {
        p.pos += p.vel * step;
        p.pos.x >= 0.0 && p.pos.x <= arena.x && p.pos.y >= 0.0 && p.pos.y <= arena.y
    });
}

/// Walk enemies toward the player; bosses charge on their cadence
pub fn advance_enemies(state: &mut GameState, dt: f32) {
    let step = frames(dt);
    let now = state.time_ms;
    let target = state.player.pos;
    let mut blasts = Vec::new();

    for enemy in state.entities.enemies.iter_mut() {
        let heading = direction(angle_to(enemy.pos, target));
        enemy.pos += heading * enemy.speed * step;

        if enemy.kind != EnemyKind::Boss {
            continue;
        }
        let last = enemy.last_attack_ms.unwrap_or(now);
        if now - last >= BOSS_CHARGE_INTERVAL_MS {
            enemy.last_attack_ms = Some(now);
            let charge = direction(angle_to(enemy.pos, target));
            enemy.pos += charge * BOSS_CHARGE_DISTANCE;
            blasts.push(enemy.pos);
        }
    }

    for pos in blasts {
        state
            .entities
            .add_explosion(pos, CHARGE_BLAST_RADIUS, CHARGE_BLAST_LIFE, CHARGE_BLAST_DAMAGE);
    }
}

/// Apply contact damage from every enemy touching the player
///
/// Returns true if the player was defeated; the phase is already `GameOver`
/// and the caller must stop the tick.
pub fn resolve_enemy_contact(state: &mut GameState) -> bool {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let touching: Vec<f32> = state
        .entities
        .enemies
        .iter()
        .filter(|e| circles_overlap(player_pos, player_radius, e.pos, e.radius))
        .map(|e| e.kind.contact_damage())
        .collect();

    for amount in touching {
        let down = state.player.take_damage(amount);
        state.events.push(GameEvent::PlayerDamaged { amount });
        state.blood_splash(player_pos);
        if down {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::PlayerDefeated);
            return true;
        }
    }
    false
}

/// Test projectiles against enemies; each projectile hits at most one enemy
///
/// Dead enemies are removed and reported as kill events. Returns the number
/// of kills.
pub fn resolve_projectile_hits(state: &mut GameState) -> usize {
    let mut hits: Vec<(Vec2, f32)> = Vec::new();
    let entities = &mut state.entities;
    let enemies = &mut entities.enemies;

    entities.projectiles.retain(|p| {
        for enemy in enemies.iter_mut() {
            // Killed earlier this tick; already gone as far as hits are concerned
            if enemy.is_dead() {
                continue;
            }
            if circles_overlap(p.pos, p.radius, enemy.pos, enemy.radius) {
                enemy.take_damage(p.damage);
                hits.push((enemy.pos, p.damage));
                return false;
            }
        }
        true
    });

    for (pos, damage) in hits {
        state.events.push(GameEvent::EnemyHit { pos, damage });
        state.blood_splash(pos);
    }

    reap_dead_enemies(state)
}

/// Grow every explosion and count down its life
pub fn advance_explosions(state: &mut GameState) {
    for explosion in state.entities.explosions.iter_mut() {
        if explosion.life > 0 {
            let growth = explosion.max_radius / explosion.life as f32;
            explosion.radius = (explosion.radius + growth).min(explosion.max_radius);
        }
        explosion.life -= 1;
    }
}

/// Damage enemies inside live, damaging explosions
///
/// Applied every tick an explosion exists, so lingering in a blast hurts
/// repeatedly. Returns the number of kills.
pub fn resolve_explosion_damage(state: &mut GameState) -> usize {
    let mut splashes = Vec::new();
    let entities = &mut state.entities;
    for explosion in entities.explosions.iter().filter(|x| x.damage > 0.0) {
        for enemy in entities.enemies.iter_mut() {
            if enemy.is_dead() {
                continue;
            }
            if enemy.pos.distance(explosion.pos) < explosion.radius {
                enemy.take_damage(explosion.damage);
                splashes.push(enemy.pos);
            }
        }
    }

    for pos in splashes {
        state.blood_splash(pos);
    }

    reap_dead_enemies(state)
}

/// Drop explosions whose life ran out
pub fn expire_explosions(state: &mut GameState) {
    state.entities.explosions.retain(|x| x.life > 0);
}

/// Remove every enemy at zero health and raise a kill event for each
fn reap_dead_enemies(state: &mut GameState) -> usize {
    let dead = state.entities.remove_enemies_where(|e| e.is_dead());
    for enemy in &dead {
        state.events.push(GameEvent::EnemyKilled {
            kind: enemy.kind,
            pos: enemy.pos,
        });
        if enemy.kind == EnemyKind::Boss {
            for _ in 0..BOSS_DEATH_BLASTS {
                let offset = Vec2::new(
                    (state.rng.random::<f32>() - 0.5) * BOSS_DEATH_SCATTER,
                    (state.rng.random::<f32>() - 0.5) * BOSS_DEATH_SCATTER,
                );
                state.entities.add_explosion(
                    enemy.pos + offset,
                    BOSS_DEATH_BLAST_RADIUS,
                    BOSS_DEATH_BLAST_LIFE,
                    0.0,
                );
            }
        }
    }
    dead.len()
}
