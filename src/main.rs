//! Nova Strike headless entry point
//!
//! Runs an autopilot session against the simulation core and logs what
//! happens. Usage: `nova-strike [settings.json] [--quality low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use nova_strike::achievements::AchievementBook;
#[cfg(not(target_arch = "wasm32"))]
use nova_strike::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
#[cfg(not(target_arch = "wasm32"))]
use nova_strike::Settings;

/// Display refresh the demo pretends to run at
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f64 = 1000.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Nova Strike (headless) starting...");

    let mut settings_path = None;
    let mut quality = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--quality" => quality = args.next(),
            _ => settings_path = Some(PathBuf::from(arg)),
        }
    }

    let mut settings = Settings::load_or_default(settings_path.as_deref());
    if let Some(name) = quality {
        if let Err(err) = settings.set_quality(&name) {
            log::warn!("{err}; keeping {}", settings.quality.as_str());
        }
    }
    log::info!(
        "Quality: {} ({} particles max)",
        settings.quality.as_str(),
        settings.max_particles()
    );

    let mut state = GameState::from_settings(&settings);
    let mut book = AchievementBook::new();

    let mut input = TickInput {
        start: true,
        idle_mode: true,
        ..Default::default()
    };

    let mut now = 0.0;
    for _ in 0..settings.demo_ticks {
        now += FRAME_MS;
        let report = tick(&mut state, &input, now);
        input.start = false;

        for event in &report.events {
            match event {
                GameEvent::AchievementUnlocked(id) => {
                    if let Some(achievement) = book.unlock(*id) {
                        println!("🏆 {} - {}", achievement.title, achievement.description);
                    }
                }
                GameEvent::LevelUp(level) => println!("Level {level}"),
                GameEvent::GameOver(stats) => {
                    println!(
                        "Game over: score {} at level {}, {} kills",
                        stats.score, stats.level, stats.enemies_killed
                    );
                }
                GameEvent::Sound(cue) => log::trace!("sound: {cue:?}"),
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    if log::log_enabled!(log::Level::Debug) {
        match serde_json::to_string(&state.snapshot()) {
            Ok(json) => log::debug!("Final frame: {json}"),
            Err(err) => log::error!("Could not encode final frame: {err}"),
        }
    }

    let stats = state.stats();
    log::info!(
        "Session ended after {} ticks ({} achievements)",
        state.time_ticks,
        book.unlocked_count()
    );
    match serde_json::to_string_pretty(&stats) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not encode final stats: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives `tick` directly
}
