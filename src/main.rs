//! Headless driver
//!
//! Runs a simulation at a fixed 60 Hz frame delta and logs progress.
//!
//! Usage: `lifestamp [--width N] [--height N] [--frames N] [--speed R] [--threads N] [--seed empty|glider|random]`

use anyhow::Context;
use clap::Parser;
use lifestamp::prelude::*;
use log::info;
use std::time::Instant;

const FRAME_DELTA: f32 = 1.0 / 60.0;
const REPORT_INTERVAL: u64 = 60;

#[derive(Parser, Debug)]
#[command(name = "lifestamp")]
#[command(about = "Run a toroidal Game of Life with blueprint stamping, headless")]
struct Args {
    /// Grid width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Number of 60 Hz frames to run
    #[arg(long, default_value = "600")]
    frames: u64,

    /// Speed ratio in [0, 1]; 0 freezes the grid
    #[arg(long)]
    speed: Option<f32>,

    /// Worker threads for the update pool
    #[arg(long)]
    threads: Option<usize>,

    /// Initial grid contents
    #[arg(long, value_parser = ["empty", "glider", "random"], ignore_case = true)]
    seed: Option<String>,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        let width = self.width.unwrap_or(config.width);
        let height = self.height.unwrap_or(config.height);
        config = config.with_size(width, height);
        if let Some(speed) = self.speed {
            config = config.with_speed(speed);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if let Some(seed) = &self.seed {
            config = config.with_seed(seed_pattern(seed));
        }
        config
    }
}

fn seed_pattern(name: &str) -> SeedPattern {
    match name.to_ascii_lowercase().as_str() {
        "glider" => SeedPattern::Glider,
        "random" => SeedPattern::Random {
            density: 0.3,
            seed: 0x5EED_1234_ABCD_EF01,
        },
        _ => SeedPattern::Empty,
    }
}

/// Queue a handful of builtin blueprints spread over the grid
fn stamp_showcase(sim: &LifeSimulation) {
    let queue = sim.stamp_queue();
    let catalog = sim.catalog();
    let (w, h) = (sim.topology().width(), sim.topology().height());

    let mut orientation = Orientation::default();
    for (name, origin) in [
        ("Glider", (w / 4, h / 4)),
        ("Glider", (3 * w / 4, h / 4)),
        ("Lightweight Spaceship", (w / 2, h / 2)),
        ("R-pentomino", (w / 4, 3 * h / 4)),
        ("Gosper Gun", (w / 2, 3 * h / 4)),
    ] {
        if let Some(id) = catalog.find(name) {
            queue.push(StampEvent::new(id, orientation, origin));
            orientation = orientation.next();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let frames = args.frames;
    let mut sim = LifeSimulation::new(args.config(), BlueprintCatalog::builtin())
        .context("failed to create simulation")?;
    sim.initialize();
    stamp_showcase(&sim);

    let start = Instant::now();
    for frame in 1..=frames {
        sim.update(FRAME_DELTA);

        if frame % REPORT_INTERVAL == 0 {
            let metrics = sim.performance().metrics();
            info!(
                "frame {frame}: generation {}, population {}, {:.3} ms/tick",
                sim.generation(),
                sim.population(),
                metrics.tick_time_ms
            );
        }
    }

    info!(
        "Ran {} frames ({} generations) in {:.2?}; final population {}",
        frames,
        sim.generation(),
        start.elapsed(),
        sim.population()
    );
    sim.cleanup();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_simulation_config() {
        let args = Args::try_parse_from(["lifestamp"]).unwrap();
        let config = args.config();
        let default = SimulationConfig::default();
        assert_eq!(args.frames, 600);
        assert_eq!((config.width, config.height), (default.width, default.height));
        assert_eq!(config.speed, default.speed);
        assert_eq!(config.seed, SeedPattern::Empty);
    }

    #[test]
    fn test_flags_build_config() {
        let args = Args::try_parse_from([
            "lifestamp", "--width", "64", "--height", "32", "--frames", "10", "--speed", "1",
            "--threads", "3", "--seed", "Glider",
        ])
        .unwrap();
        let config = args.config();
        assert_eq!((config.width, config.height), (64, 32));
        assert_eq!(args.frames, 10);
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.threads, Some(3));
        assert_eq!(config.seed, SeedPattern::Glider);
    }

    #[test]
    fn test_bad_flags_are_rejected() {
        assert!(Args::try_parse_from(["lifestamp", "--seed", "acorn"]).is_err());
        assert!(Args::try_parse_from(["lifestamp", "--width", "wide"]).is_err());
        assert!(Args::try_parse_from(["lifestamp", "--bogus"]).is_err());
    }
}
