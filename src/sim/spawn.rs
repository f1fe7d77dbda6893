//! Enemy and power-up spawning
//!
//! Cadence is a deadline on the simulation clock (`next_spawn_ms`) checked
//! once per tick, so spawning never interleaves with other updates.

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::state::{
    Enemy, EnemyKind, GameState, POWER_UP_LIFE_TICKS, POWER_UP_RADIUS, PowerUp, PowerUpKind,
};
use crate::consts::SPAWN_MARGIN;

/// Bosses appear on every wave divisible by this
pub const BOSS_WAVE_INTERVAL: u32 = 5;
/// Spawn period on wave 1; later waves divide it by the wave number
pub const BASE_SPAWN_INTERVAL_MS: f64 = 2000.0;

/// Time between spawn attempts on the given wave
pub fn spawn_interval_ms(wave: u32) -> f64 {
    BASE_SPAWN_INTERVAL_MS / wave.max(1) as f64
}

/// Maximum simultaneous enemies on the given wave
pub fn enemy_cap(wave: u32) -> usize {
    wave as usize * 3 + 5
}

/// Pick a point just outside one of the four edges
pub fn spawn_position<R: Rng>(rng: &mut R, arena: Vec2) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(rng.random::<f32>() * arena.x, -SPAWN_MARGIN),
        1 => Vec2::new(arena.x + SPAWN_MARGIN, rng.random::<f32>() * arena.y),
        2 => Vec2::new(rng.random::<f32>() * arena.x, arena.y + SPAWN_MARGIN),
        _ => Vec2::new(-SPAWN_MARGIN, rng.random::<f32>() * arena.y),
    }
}

/// Map a uniform roll in [0, 1) to a regular enemy type (70/20/10)
pub fn enemy_kind_for_roll(roll: f32) -> EnemyKind {
    if roll < 0.7 {
        EnemyKind::Normal
    } else if roll < 0.9 {
        EnemyKind::Fast
    } else {
        EnemyKind::Tank
    }
}

/// True if a boss may spawn right now
pub fn boss_due(state: &GameState) -> bool {
    state.progression.wave % BOSS_WAVE_INTERVAL == 0
        && !state.progression.boss_spawned
        && !state.entities.boss_alive()
}

/// Evaluate one spawn attempt
///
/// Returns the new enemy's id, or `None` if the wave's cap is already met.
pub fn try_spawn_enemy(state: &mut GameState) -> Option<u32> {
    let wave = state.progression.wave;
    let cap = enemy_cap(wave);
    if state.entities.enemies.len() >= cap {
        log::debug!("Spawn skipped: {} enemies at cap {}", state.entities.enemies.len(), cap);
        return None;
    }

    let pos = spawn_position(&mut state.rng, state.arena);
    let kind = if boss_due(state) {
        state.progression.boss_spawned = true;
        state.events.push(GameEvent::BossSpawned { wave });
        log::info!("Boss incoming on wave {}", wave);
        EnemyKind::Boss
    } else {
        enemy_kind_for_roll(state.rng.random::<f32>())
    };

    let id = state.entities.next_entity_id();
    state
        .entities
        .enemies
        .push(Enemy::new(id, kind, pos, wave, state.time_ms));
    Some(id)
}

/// Drop a random power-up at `pos`
pub fn spawn_power_up(state: &mut GameState, pos: Vec2) -> PowerUpKind {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let id = state.entities.next_entity_id();
    state.entities.power_ups.push(PowerUp {
        id,
        kind,
        pos,
        radius: POWER_UP_RADIUS,
        life: POWER_UP_LIFE_TICKS,
    });
    kind
}

/// Run every spawn attempt whose deadline has passed
pub fn run_spawn_timer(state: &mut GameState) {
    while state.time_ms >= state.next_spawn_ms {
        try_spawn_enemy(state);
        state.next_spawn_ms += spawn_interval_ms(state.progression.wave);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    fn new_state() -> GameState {
        GameState::new(4242, &Settings::default())
    }

    #[test]
    fn test_kind_thresholds() {
        assert_eq!(enemy_kind_for_roll(0.0), EnemyKind::Normal);
        assert_eq!(enemy_kind_for_roll(0.69), EnemyKind::Normal);
        assert_eq!(enemy_kind_for_roll(0.7), EnemyKind::Fast);
        assert_eq!(enemy_kind_for_roll(0.89), EnemyKind::Fast);
        assert_eq!(enemy_kind_for_roll(0.9), EnemyKind::Tank);
        assert_eq!(enemy_kind_for_roll(0.999), EnemyKind::Tank);
    }

    #[test]
    fn test_spawn_positions_are_off_screen() {
        let mut state = new_state();
        for _ in 0..200 {
            let pos = spawn_position(&mut state.rng, state.arena);
            assert!(!state.in_arena(pos), "spawned inside arena at {:?}", pos);
        }
    }

    #[test]
    fn test_boss_exclusivity() {
        let mut state = new_state();
        state.progression.wave = 5;
        assert!(!state.progression.boss_spawned);

        try_spawn_enemy(&mut state);
        assert_eq!(state.entities.enemies[0].kind, EnemyKind::Boss);
        assert!(state.progression.boss_spawned);

        try_spawn_enemy(&mut state);
        let bosses = state
            .entities
            .enemies
            .iter()
            .filter(|e| e.kind == EnemyKind::Boss)
            .count();
        assert_eq!(bosses, 1);
        assert_eq!(state.entities.enemies.len(), 2);
    }

    #[test]
    fn test_live_boss_blocks_new_boss_even_if_flag_cleared() {
        let mut state = new_state();
        state.progression.wave = 10;
        try_spawn_enemy(&mut state);
        state.progression.boss_spawned = false;
        try_spawn_enemy(&mut state);
        assert_ne!(state.entities.enemies[1].kind, EnemyKind::Boss);
    }

    #[test]
    fn test_no_boss_off_cycle() {
        let mut state = new_state();
        state.progression.wave = 4;
        for _ in 0..17 {
            try_spawn_enemy(&mut state);
        }
        assert!(!state.entities.boss_alive());
    }

    #[test]
    fn test_cap_blocks_spawn() {
        let mut state = new_state();
        for _ in 0..enemy_cap(1) {
            assert!(try_spawn_enemy(&mut state).is_some());
        }
        assert!(try_spawn_enemy(&mut state).is_none());
        assert_eq!(state.entities.enemies.len(), 8);
    }

    #[test]
    fn test_interval_shrinks_with_wave() {
        assert_eq!(spawn_interval_ms(1), 2000.0);
        assert_eq!(spawn_interval_ms(4), 500.0);
        assert!(spawn_interval_ms(10) < spawn_interval_ms(9));
    }

    #[test]
    fn test_spawn_timer_catches_up() {
        let mut state = new_state();
        state.time_ms = 1999.0;
        run_spawn_timer(&mut state);
        assert!(state.entities.enemies.is_empty());

        state.time_ms = 6000.0;
        run_spawn_timer(&mut state);
        assert_eq!(state.entities.enemies.len(), 3);
        assert_eq!(state.next_spawn_ms, 8000.0);
    }

    #[test]
    fn test_power_up_drop() {
        let mut state = new_state();
        let kind = spawn_power_up(&mut state, Vec2::new(10.0, 20.0));
        let p = &state.entities.power_ups[0];
        assert_eq!(p.kind, kind);
        assert_eq!(p.pos, Vec2::new(10.0, 20.0));
        assert_eq!(p.life, POWER_UP_LIFE_TICKS);
    }
}
