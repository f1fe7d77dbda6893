//! Dead Wave headless runner
//!
//! Runs one session on the fixed timestep with the autopilot driving and
//! prints the final HUD stats as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use dead_wave::Settings;
    use dead_wave::consts::SIM_DT;
    use dead_wave::sim::{GameEvent, GameState, TickInput, combat, tick};

    env_logger::init();
    log::info!("Dead Wave (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(Path::new(&path)),
        None => Settings::default(),
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {}, quality {}", seed, settings.quality.as_str());

    let mut state = GameState::new(seed, &settings);
    if let Some(name) = &settings.weapon {
        if combat::select_weapon(&mut state, name) {
            combat::reload(&mut state);
        }
    }
    let input = TickInput {
        idle_mode: settings.autopilot,
        ..Default::default()
    };

    while !state.is_game_over() && state.time_ticks < settings.max_ticks {
        tick(&mut state, &input, SIM_DT);
        for event in &state.events {
            match event {
                GameEvent::BossSpawned { wave } => {
                    log::info!("Boss on wave {} at {:.1}s", wave, state.time_ms / 1000.0);
                }
                GameEvent::PowerUpCollected { kind } => {
                    log::debug!("Picked up [{}]", kind.icon());
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Finished after {} ticks: wave {}, score {}, {} kills",
        state.time_ticks,
        state.progression.wave,
        state.progression.score,
        state.progression.total_kills
    );

    match serde_json::to_string_pretty(&state.ui_stats()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize stats: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on wasm; the host drives `tick` itself
}
