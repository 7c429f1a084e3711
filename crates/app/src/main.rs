//! Headless city generation runner.
//!
//! Configured through the environment:
//! - `CITYGEN_RADIUS`: city radius in km (default 10)
//! - `CITYGEN_SEED`: u64 seed; unset means a fresh entropy seed per run
//! - `CITYGEN_PARAMS`: path to a JSON `LayoutParams` override file
//!
//! Generates one city at startup, logs its summary as JSON and exits.

use bevy::log::LogPlugin;
use bevy::prelude::*;

use citygen::generation::DEFAULT_RADIUS;
use citygen::{City, CityGenPlugin, CityGenRequest, LayoutParams};

fn main() -> AppExit {
    let (request, params) = match read_env_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("citygen: {message}");
            return AppExit::error();
        }
    };

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(request)
        .insert_resource(params)
        .add_plugins(CityGenPlugin)
        .add_systems(Update, report_and_exit);

    app.run()
}

fn read_env_config() -> Result<(CityGenRequest, LayoutParams), String> {
    let radius = match std::env::var("CITYGEN_RADIUS") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid CITYGEN_RADIUS '{raw}': {e}"))?,
        Err(_) => DEFAULT_RADIUS,
    };

    let seed = match std::env::var("CITYGEN_SEED") {
        Ok(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid CITYGEN_SEED '{raw}': {e}"))?,
        ),
        Err(_) => None,
    };

    let params = match std::env::var("CITYGEN_PARAMS") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read params file {path}: {e}"))?;
            LayoutParams::from_json_str(&json).map_err(|e| format!("{path}: {e}"))?
        }
        Err(_) => LayoutParams::default(),
    };

    Ok((CityGenRequest { radius, seed }, params))
}

/// Runs on the first update, after the startup generation.
fn report_and_exit(city: Option<Res<City>>, mut exit: EventWriter<AppExit>) {
    match city {
        Some(city) => {
            info!("{}", city.summary().to_json());
            exit.send(AppExit::Success);
        }
        None => {
            error!("No city was generated");
            exit.send(AppExit::error());
        }
    }
}
