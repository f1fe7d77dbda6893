//! Score, experience, waves, levels, and power-up effects

use glam::Vec2;
use rand::Rng;

use super::combat;
use super::events::GameEvent;
use super::spawn;
use super::state::{EnemyKind, GameState, PowerUpKind};
use super::weapon::{DAMAGE_BOOST_AMOUNT, DAMAGE_BOOST_DURATION_MS};
use crate::consts::PLAYER_MAX_SPEED;

/// Chance that a kill drops a power-up
pub const POWER_UP_DROP_CHANCE: f64 = 0.15;
/// Extra kills required by each successive wave
pub const KILLS_PER_WAVE_INCREMENT: u32 = 3;
/// Health restored when a wave is cleared
pub const WAVE_CLEAR_HEAL: f32 = 20.0;
/// Experience needed per level (threshold = level * step)
pub const LEVEL_XP_STEP: f32 = 50.0;
pub const LEVEL_UP_MAX_HEALTH: f32 = 10.0;
pub const LEVEL_UP_SPEED: f32 = 0.1;

pub const HEALTH_POWER_UP: f32 = 30.0;
pub const SPEED_POWER_UP: f32 = 0.5;

/// Apply all bookkeeping for one kill
pub fn on_kill(state: &mut GameState, kind: EnemyKind, pos: Vec2) {
    let points = kind.score_value();
    state.progression.score += points;
    state.player.experience += points as f32 / 10.0;

    if state.rng.random_bool(POWER_UP_DROP_CHANCE) {
        spawn::spawn_power_up(state, pos);
    }

    if kind == EnemyKind::Boss {
        state.progression.boss_spawned = false;
    }

    state.progression.kills_this_wave += 1;
    state.progression.total_kills += 1;
    check_wave_complete(state);
}

/// Advance to the next wave if enough kills were made
pub fn check_wave_complete(state: &mut GameState) -> bool {
    let progression = &mut state.progression;
    if progression.kills_this_wave < progression.kills_required {
        return false;
    }

    let cleared = progression.wave;
    progression.wave += 1;
    progression.kills_this_wave = 0;
    progression.kills_required += KILLS_PER_WAVE_INCREMENT;
    progression.boss_spawned = false;

    state.player.heal(WAVE_CLEAR_HEAL);
    combat::reload(state);
    state.events.push(GameEvent::WaveCleared { wave: cleared });
    log::info!(
        "Wave {} cleared, wave {} needs {} kills",
        cleared,
        state.progression.wave,
        state.progression.kills_required
    );
    true
}

/// Level up as many times as experience allows; returns levels gained
pub fn check_level_up(state: &mut GameState) -> u32 {
    let mut gained = 0;
    while state.player.experience >= state.player.level as f32 * LEVEL_XP_STEP {
        let player = &mut state.player;
        player.level += 1;
        player.max_health += LEVEL_UP_MAX_HEALTH;
        player.health = player.max_health;
        player.speed += LEVEL_UP_SPEED;
        gained += 1;
        state.events.push(GameEvent::LevelUp {
            level: state.player.level,
        });
        log::info!("Level up: {}", state.player.level);
    }
    gained
}

/// Consume this tick's kill events, then re-check levels
pub fn process_kills(state: &mut GameState) {
    let kills: Vec<(EnemyKind, Vec2)> = state
        .events
        .iter()
        .filter_map(|e| match *e {
            GameEvent::EnemyKilled { kind, pos } => Some((kind, pos)),
            _ => None,
        })
        .collect();

    for (kind, pos) in kills {
        on_kill(state, kind, pos);
    }
    check_level_up(state);
}

/// Apply a collected power-up's effect
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health => state.player.heal(HEALTH_POWER_UP),
        PowerUpKind::Ammo => combat::reload(state),
        PowerUpKind::Weapon => combat::switch_weapon(state),
        PowerUpKind::Speed => {
            // Never slows a player already past the cap from level-ups
            let boosted = (state.player.speed + SPEED_POWER_UP).min(PLAYER_MAX_SPEED);
            state.player.speed = state.player.speed.max(boosted);
        }
        PowerUpKind::Damage => {
            state
                .catalog
                .apply_damage_boost(DAMAGE_BOOST_AMOUNT, state.time_ms, DAMAGE_BOOST_DURATION_MS);
        }
    }
    log::debug!("Power-up collected: {:?}", kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::weapon::WeaponId;

    fn new_state() -> GameState {
        GameState::new(777, &Settings::default())
    }

    #[test]
    fn test_fast_kill_scores() {
        let mut state = new_state();
        on_kill(&mut state, EnemyKind::Fast, Vec2::new(50.0, 50.0));
        assert_eq!(state.progression.score, 15);
        assert!((state.player.experience - 1.5).abs() < 1e-6);
        assert_eq!(state.progression.kills_this_wave, 1);
    }

    #[test]
    fn test_score_tiers() {
        assert_eq!(EnemyKind::Boss.score_value(), 100);
        assert_eq!(EnemyKind::Tank.score_value(), 25);
        assert_eq!(EnemyKind::Fast.score_value(), 15);
        assert_eq!(EnemyKind::Normal.score_value(), 10);
    }

    #[test]
    fn test_wave_transition() {
        let mut state = new_state();
        state.progression.kills_this_wave = state.progression.kills_required - 1;
        state.player.health = 50.0;
        state.player.ammo = 2;
        state.progression.boss_spawned = true;

        on_kill(&mut state, EnemyKind::Normal, Vec2::ZERO);

        assert_eq!(state.progression.wave, 2);
        assert_eq!(state.progression.kills_this_wave, 0);
        assert_eq!(state.progression.kills_required, 8);
        assert_eq!(state.player.health, 70.0);
        assert_eq!(state.player.ammo, 15);
        assert!(!state.progression.boss_spawned);
        assert!(state.events.contains(&GameEvent::WaveCleared { wave: 1 }));
    }

    #[test]
    fn test_wave_heal_is_capped() {
        let mut state = new_state();
        state.progression.kills_this_wave = 4;
        state.player.health = 95.0;
        on_kill(&mut state, EnemyKind::Normal, Vec2::ZERO);
        assert_eq!(state.player.health, 100.0);
    }

    #[test]
    fn test_level_up_cascades() {
        let mut state = new_state();
        state.player.health = 10.0;
        state.player.experience = 160.0;
        // Thresholds: 50 (lvl1), 100 (lvl2), 150 (lvl3), 200 (lvl4)
        assert_eq!(check_level_up(&mut state), 3);
        assert_eq!(state.player.level, 4);
        assert_eq!(state.player.max_health, 130.0);
        assert_eq!(state.player.health, 130.0);
        assert!((state.player.speed - 3.3).abs() < 1e-5);
        assert_eq!(check_level_up(&mut state), 0);
    }

    #[test]
    fn test_power_up_effects() {
        let mut state = new_state();
        state.player.health = 50.0;
        apply_power_up(&mut state, PowerUpKind::Health);
        assert_eq!(state.player.health, 80.0);
        apply_power_up(&mut state, PowerUpKind::Health);
        assert_eq!(state.player.health, 100.0);

        state.player.ammo = 1;
        apply_power_up(&mut state, PowerUpKind::Ammo);
        assert_eq!(state.player.ammo, 15);

        apply_power_up(&mut state, PowerUpKind::Weapon);
        assert_eq!(state.player.weapon, WeaponId::Shotgun);
        assert_eq!(state.player.ammo, 8);

        for _ in 0..10 {
            apply_power_up(&mut state, PowerUpKind::Speed);
        }
        assert_eq!(state.player.speed, PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_speed_power_up_keeps_level_bonus() {
        let mut state = new_state();
        state.player.speed = 5.3;
        apply_power_up(&mut state, PowerUpKind::Speed);
        assert_eq!(state.player.speed, 5.3);

        state.player.speed = 4.8;
        apply_power_up(&mut state, PowerUpKind::Speed);
        assert_eq!(state.player.speed, PLAYER_MAX_SPEED);
    }

    #[test]
    fn test_damage_power_up_round_trip() {
        let mut state = new_state();
        let base = state.catalog.get(WeaponId::Pistol).damage;

        state.time_ms = 1_000.0;
        apply_power_up(&mut state, PowerUpKind::Damage);
        assert_eq!(state.catalog.effective_damage(WeaponId::Pistol, 1_000.0), base + 1.0);

        state.time_ms = 6_000.0;
        apply_power_up(&mut state, PowerUpKind::Damage);
        assert_eq!(state.catalog.effective_damage(WeaponId::Pistol, 6_000.0), base + 2.0);
        assert_eq!(state.catalog.effective_damage(WeaponId::Pistol, 11_000.0), base + 1.0);
        assert_eq!(state.catalog.effective_damage(WeaponId::Pistol, 16_000.0), base);
    }

    #[test]
    fn test_process_kills_reads_events() {
        let mut state = new_state();
        state.events.push(GameEvent::EnemyKilled {
            kind: EnemyKind::Boss,
            pos: Vec2::ZERO,
        });
        state.events.push(GameEvent::EnemyKilled {
            kind: EnemyKind::Tank,
            pos: Vec2::ZERO,
        });
        state.progression.boss_spawned = true;
        process_kills(&mut state);
        assert_eq!(state.progression.score, 125);
        assert!(!state.progression.boss_spawned);
        // 12.5 experience is not enough for level 2
        assert_eq!(state.player.level, 1);
    }
}
