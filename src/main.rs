//! Hand Hoop entry point
//!
//! Headless runner: replays a recorded hand trace (or the built-in scripted
//! throw) through one round and prints the outcome as JSON.
//!
//! Usage: `hand-hoop [TRACE.json] [SETTINGS.json]`

use std::path::PathBuf;
use std::process::ExitCode;

use hand_hoop::Settings;
use hand_hoop::audio::{AudioManager, LogBackend};
use hand_hoop::replay::{Trace, replay};

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let trace_path = args.next().map(PathBuf::from);
    let settings_path = args.next().map(PathBuf::from);

    let settings = settings_path
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    log::info!(
        "Hand Hoop starting (preset {}, seed {})",
        settings.preset.as_str(),
        settings.seed
    );

    let trace = match trace_path {
        Some(path) => match Trace::load(&path) {
            Ok(trace) => trace,
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("No trace given - running the scripted throw");
            Trace::scripted_throw()
        }
    };

    let mut audio = AudioManager::from_settings(LogBackend, &settings);
    let summary = replay(&trace, &settings, &mut audio);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to encode summary: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
