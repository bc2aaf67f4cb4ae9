use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{load_pointer_script, load_settings, Args, FlockRunner, RunOptions};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Flock driver starting...");

    let settings = load_settings(&args).context("Failed to load settings")?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut runner = FlockRunner::new(&settings, seed).context("Failed to initialize flock")?;
    runner.set_attractor(args.attractor);
    if let Some(path) = &args.pointer_script {
        let updates = load_pointer_script(path)?;
        log::info!("Loaded {} pointer updates", updates.len());
        runner.schedule(updates);
    }

    let options = RunOptions {
        steps: args.steps,
        fps: settings.fps,
        snapshot_every: args.snapshot_every,
        outline: args.outline,
    };

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            log::info!("Writing frames to {}", path.display());
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let status = runner.run(&options, &mut out).context("Simulation error")?;

    log::info!(
        "Finished: {} boids, {} steps, {} fps, attractor {}",
        status.boid_count,
        status.steps,
        status.fps,
        if status.attractor_active { "on" } else { "off" }
    );
    log::debug!("Final status: {}", serde_json::to_string(&status)?);

    Ok(())
}
