//! Soho Runtime - headless scene runner
//!
//! Stages the scene composite in memory, runs the scene script setup, then
//! drives the frame loop: scripted clicks are delivered at the start of
//! their frame, pointer dispatch and oscillation run every frame.

mod runtime_config;

use runtime_config::{RuntimeConfig, RuntimeError};
use soho_scene::MemoryScene;
use soho_script::{stage_scene, SceneScript};
use std::time::{Duration, Instant};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), RuntimeError> {
    let config = RuntimeConfig::load()?;
    let settings = &config.runtime;

    let mut scene = stage_scene(&config.scene)?;
    let mut script = SceneScript::setup(&mut scene, &config.scene)?;
    log::info!("Running {} frames", settings.frames);

    let start = Instant::now();
    let mut fired_total = 0;

    for frame in 0..settings.frames {
        for click in settings.clicks_at(frame) {
            match script.ray_to(&scene, &click.trigger) {
                Ok(ray) => {
                    log::info!("Frame {}: click '{}'", frame, click.trigger);
                    script.pointer_events_mut().click(ray);
                }
                Err(e) => log::warn!("Frame {}: cannot click '{}': {}", frame, click.trigger, e),
            }
        }

        let time = if settings.wall_clock {
            start.elapsed().as_secs_f64()
        } else {
            frame as f64 * settings.frame_delta
        };

        match script.update(&mut scene, time) {
            Ok(fired) => fired_total += fired,
            Err(e) => log::error!("Frame {}: {}", frame, e),
        }

        if settings.wall_clock {
            std::thread::sleep(Duration::from_secs_f64(settings.frame_delta.max(0.0)));
        }
    }

    log::info!(
        "Done: {} activations over {} frames ({:?})",
        fired_total,
        settings.frames,
        script
    );

    if settings.print_scene {
        print_scene(&scene)?;
    }
    Ok(())
}

fn print_scene(scene: &MemoryScene) -> Result<(), RuntimeError> {
    let records: Vec<_> = scene.records().collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
