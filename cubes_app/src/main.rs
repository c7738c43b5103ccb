//! Gravity cubes demo application
//!
//! Hosts two independent scenes of tumbling cubes, pumps their physics at a
//! fixed timestep, and sweeps a synthesized device orientation through the
//! gravity mapping.

mod host;
mod population;

use std::path::Path;
use std::thread;
use std::time::Duration;

use tilt_engine::prelude::*;

use host::{ConsoleSurface, FixedProbe, SceneHost, SweepOrientation};
use population::GravityCubes;

/// Optional configuration file next to the binary
const CONFIG_PATH: &str = "tiltbox.toml";

/// How long the headless demo runs
const RUN_SECONDS: f32 = 10.0;

fn load_config() -> SceneConfig {
    if Path::new(CONFIG_PATH).exists() {
        match SceneConfig::from_file(CONFIG_PATH) {
            Ok(config) => {
                log::info!("loaded configuration from {}", CONFIG_PATH);
                return config;
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", CONFIG_PATH, e);
            }
        }
    }
    SceneConfig::default()
}

fn build_host(config: &SceneConfig) -> Result<SceneHost, host::HostError> {
    let mut host = SceneHost::new();

    // Primary scene carries the orientation-driven gravity
    let mut sweep = SweepOrientation::new(0.02);
    let orientation: Option<Box<dyn OrientationSource>> = match sweep.subscribe() {
        Ok(()) => Some(Box::new(sweep)),
        Err(e) => {
            log::warn!("orientation unavailable, gravity stays vertical: {}", e);
            None
        }
    };

    let mut context = SceneContext::new(
        Box::new(FixedProbe::new(1280, 720)),
        Box::new(ConsoleSurface::new("canvas-scene")),
    );
    if let Some(orientation) = orientation {
        context = context.with_orientation(orientation);
    }
    host.create_scene("canvas-scene", context, Box::new(GravityCubes), config.clone())?;

    // Secondary scene falls under plain vertical gravity
    let context = SceneContext::new(
        Box::new(FixedProbe::new(960, 540)),
        Box::new(ConsoleSurface::new("canvas-scene2")),
    );
    host.create_scene("canvas-scene2", context, Box::new(GravityCubes), config.clone())?;

    Ok(host)
}

fn run() -> Result<(), host::HostError> {
    let config = load_config();
    log::info!(
        "{} cubes per scene, body size {:.0}, fixed dt {:.4}s",
        config.initial_bodies,
        config.body_size,
        config.fixed_timestep
    );

    let mut host = build_host(&config)?;
    let mut timer = Timer::new();

    while timer.total_time() < RUN_SECONDS {
        timer.update();
        host.pump_all(timer.delta_time())?;
        host.update_all()?;
        thread::sleep(Duration::from_millis(16));
    }

    log::info!(
        "demo finished after {} frames in {:.1}s",
        timer.frame_count(),
        timer.total_time()
    );
    host.destroy_all();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting gravity cubes demo");
    run()?;
    Ok(())
}
