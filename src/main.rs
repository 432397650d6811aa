use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use shoal::{init_logging, DriverSettings, MemoryHost, MemorySprite, PathDriver, SceneParams};

/// Headless playback of a path scene
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON scene file with `directional` and `group` actor records
    #[arg(short, long)]
    params: PathBuf,
    /// JSON driver settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,
    /// Seconds of scene time to simulate
    #[arg(long, default_value_t = 10.0)]
    seconds: f32,
    /// Ticks per second; defaults to the settings' tick rate
    #[arg(short, long)]
    rate: Option<f32>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn load_settings(args: &Args) -> Result<DriverSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            DriverSettings::from_json(&json)?
        }
        None => DriverSettings::default(),
    };
    if let Some(rate) = args.rate {
        settings.tick_rate = rate;
        settings.validate()?;
    }
    Ok(settings)
}

fn populate(host: &mut MemoryHost, driver: &mut PathDriver, scene: SceneParams) -> usize {
    for (actor, presentation) in scene.handles() {
        host.insert_actor(actor);
        host.insert_sprite(presentation, MemorySprite::default());
    }
    let mut added = 0;
    for params in scene.directional {
        let actor = params.common.actor;
        match driver.add_directional(host, params) {
            Ok(()) => added += 1,
            Err(err) => warn!("skipping directional actor {actor}: {err}"),
        }
    }
    for params in scene.group {
        let actor = params.common.actor;
        match driver.add_group(host, params) {
            Ok(()) => added += 1,
            Err(err) => warn!("skipping group actor {actor}: {err}"),
        }
    }
    added
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = load_settings(&args)?;
    let json = fs::read_to_string(&args.params)
        .with_context(|| format!("reading scene from {}", args.params.display()))?;
    let scene = SceneParams::from_json(&json).context("parsing scene")?;

    let mut host = MemoryHost::new();
    let mut driver = PathDriver::new(settings);
    let added = populate(&mut host, &mut driver, scene);
    info!("simulating {added} actors for {}s at {} Hz", args.seconds, settings.tick_rate);

    let dt = 1.0 / settings.tick_rate;
    let mut now = 0.0_f32;
    while now < args.seconds && !driver.is_empty() {
        now += dt;
        let summary = driver.tick(&mut host, dt);
        for actor in driver.actors() {
            if let Some(sprite) = host.sprite(actor.state().presentation()) {
                debug!(
                    "t={now:.3} actor {} at ({:.2}, {:.2}) heading {:.3} opacity {:.2}",
                    actor.handle(),
                    sprite.position.x,
                    sprite.position.y,
                    sprite.rotation,
                    sprite.opacity
                );
            }
        }
        for actor in &summary.finished {
            info!("t={now:.3} actor {actor} finished its path");
        }
        for actor in summary.detached.iter().chain(&summary.failed) {
            warn!("t={now:.3} actor {actor} dropped");
        }
    }
    info!("{} actors still swimming after {now:.3}s", driver.len());
    Ok(())
}
