//! Headless driver for the flock simulation.
//!
//! Stands in for a render loop: it steps the flock at a fixed cadence,
//! feeds it pointer updates and streams every frame as a line of JSON.

use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use flock_core::FlockSimulation;
use flock_shared::{AttractorUpdate, FlockSettings, FlockStatus, FrameSnapshot, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Headless boids flock driver", long_about = None)]
pub struct Args {
    /// JSON settings file; the flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of boids
    #[arg(short = 'n', long)]
    pub agents: Option<usize>,

    /// Field width
    #[arg(long)]
    pub width: Option<f32>,

    /// Field height
    #[arg(long)]
    pub height: Option<f32>,

    /// Number of steps to run
    #[arg(short, long, default_value_t = 100)]
    pub steps: u64,

    /// RNG seed for initial positions (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Steps per second, 0 runs as fast as possible
    #[arg(long)]
    pub fps: Option<u32>,

    /// Attractor position as `x,y`
    #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
    pub attractor: Option<Position>,

    /// Weight of the pull toward the attractor (0 disables it)
    #[arg(long)]
    pub tracking_weight: Option<f32>,

    /// Use the legacy perception-cone test (raw angle bounds)
    #[arg(long)]
    pub legacy_cone: bool,

    /// JSON lines of attractor updates, e.g. {"at_step":10,"position":{"x":0,"y":0}}
    #[arg(long)]
    pub pointer_script: Option<PathBuf>,

    /// Write frames here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit one frame every N steps
    #[arg(long, default_value_t = 1)]
    pub snapshot_every: u64,

    /// Include arrow outlines in each agent snapshot
    #[arg(long)]
    pub outline: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Parse `x,y` into a position.
pub fn parse_point(value: &str) -> Result<Position, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", value))?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("bad x coordinate `{}`: {}", x, e))?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("bad y coordinate `{}`: {}", y, e))?;
    Ok(Position::new(x, y))
}

/// Settings from the optional config file with command-line overrides applied.
pub fn load_settings(args: &Args) -> Result<FlockSettings> {
    let mut settings = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid settings in {}", path.display()))?
        }
        None => FlockSettings::default(),
    };

    if let Some(agents) = args.agents {
        settings.boid_count = agents;
    }
    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(fps) = args.fps {
        settings.fps = fps;
    }
    if let Some(weight) = args.tracking_weight {
        settings.tracking_weight = weight;
    }
    if args.legacy_cone {
        settings.legacy_cone = true;
    }

    Ok(settings)
}

/// Read a pointer script, one `AttractorUpdate` per line, ordered by step.
pub fn load_pointer_script(path: &Path) -> Result<Vec<AttractorUpdate>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pointer script {}", path.display()))?;

    let mut updates = Vec::new();
    for (line_number, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let update: AttractorUpdate = serde_json::from_str(line).with_context(|| {
            format!("Invalid pointer update on line {} of {}", line_number + 1, path.display())
        })?;
        updates.push(update);
    }
    updates.sort_by_key(|update| update.at_step);

    Ok(updates)
}

/// How a run paces itself and what it writes.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub steps: u64,
    pub fps: u32,
    pub snapshot_every: u64,
    pub outline: bool,
}

pub struct FlockRunner {
    flock: FlockSimulation,
    pointer_updates: VecDeque<AttractorUpdate>,
}

impl FlockRunner {
    pub fn new(settings: &FlockSettings, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let flock = FlockSimulation::new(
            settings.width,
            settings.height,
            settings.boid_count,
            settings.to_config(),
            &mut rng,
        )
        .context("Invalid flock settings")?;

        log::info!(
            "Created flock of {} boids on a {}x{} field (seed {})",
            settings.boid_count,
            settings.width,
            settings.height,
            seed
        );

        Ok(Self {
            flock,
            pointer_updates: VecDeque::new(),
        })
    }

    pub fn set_attractor(&mut self, position: Option<Position>) {
        self.flock.set_attractor(position.map(Into::into));
    }

    pub fn schedule(&mut self, updates: Vec<AttractorUpdate>) {
        self.pointer_updates.extend(updates);
    }

    pub fn flock(&self) -> &FlockSimulation {
        &self.flock
    }

    fn apply_pointer_updates(&mut self) {
        while let Some(update) = self.pointer_updates.front() {
            if update.at_step > self.flock.step_count() {
                break;
            }
            let position = update.position;
            self.pointer_updates.pop_front();
            log::debug!(
                "Step {}: attractor -> {:?}",
                self.flock.step_count(),
                position
            );
            self.set_attractor(position);
        }
    }

    fn write_frame<W: Write>(&self, out: &mut W, outline: bool) -> Result<()> {
        let frame = FrameSnapshot::capture(&self.flock, outline);
        serde_json::to_writer(&mut *out, &frame).context("Failed to encode frame")?;
        writeln!(out).context("Failed to write frame")?;
        Ok(())
    }

    pub fn run<W: Write>(&mut self, options: &RunOptions, out: &mut W) -> Result<FlockStatus> {
        if options.snapshot_every == 0 {
            anyhow::bail!("--snapshot-every must be at least 1");
        }

        let frame_time =
            (options.fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(options.fps)));
        let report_every = (options.steps / 10).max(1);
        let started = Instant::now();

        log::info!("Running {} steps...", options.steps);

        for _ in 0..options.steps {
            let frame_started = Instant::now();

            self.apply_pointer_updates();
            self.flock.step();

            let step = self.flock.step_count();
            if step % options.snapshot_every == 0 {
                self.write_frame(out, options.outline)?;
            }
            if step % report_every == 0 {
                log::info!("Step {}/{}", step, options.steps);
            }

            if let Some(frame_time) = frame_time {
                thread::sleep(frame_time.saturating_sub(frame_started.elapsed()));
            }
        }

        out.flush().context("Failed to flush output")?;

        let elapsed = started.elapsed().as_secs_f64();
        let fps = if elapsed > 0.0 {
            (options.steps as f64 / elapsed).round() as u32
        } else {
            0
        };

        Ok(FlockStatus {
            boid_count: self.flock.len(),
            steps: self.flock.step_count(),
            fps,
            attractor_active: self.flock.attractor().is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("1.5,-2"), Ok(Position::new(1.5, -2.0)));
        assert_eq!(parse_point(" 3 , 4 "), Ok(Position::new(3.0, 4.0)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let args = Args::parse_from([
            "flock-cli",
            "--agents",
            "12",
            "--width",
            "320",
            "--fps",
            "0",
            "--attractor",
            "-5,7",
            "--tracking-weight",
            "0.1",
            "--legacy-cone",
        ]);

        let settings = load_settings(&args).unwrap();

        assert_eq!(settings.boid_count, 12);
        assert_eq!(settings.width, 320.0);
        assert_eq!(settings.height, 600.0);
        assert_eq!(settings.fps, 0);
        assert_eq!(settings.tracking_weight, 0.1);
        assert!(settings.legacy_cone);
        assert_eq!(args.attractor, Some(Position::new(-5.0, 7.0)));
        assert_eq!(args.steps, 100);
    }

    #[test]
    fn test_runner_rejects_zero_snapshot_interval() {
        let settings = FlockSettings {
            boid_count: 3,
            ..Default::default()
        };
        let mut runner = FlockRunner::new(&settings, 1).unwrap();
        let options = RunOptions {
            steps: 1,
            fps: 0,
            snapshot_every: 0,
            outline: false,
        };

        assert!(runner.run(&options, &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_runner_rejects_invalid_settings() {
        let settings = FlockSettings {
            width: -1.0,
            ..Default::default()
        };
        assert!(FlockRunner::new(&settings, 1).is_err());
    }
}
