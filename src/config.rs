//! Simulation configuration
//!
//! Built with chained `with_*` calls on top of sensible defaults:
//!
//! ```
//! use lifestamp::config::{SeedPattern, SimulationConfig};
//!
//! let config = SimulationConfig::new()
//!     .with_size(64, 48)
//!     .with_speed(0.75)
//!     .with_seed(SeedPattern::Glider);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Result, SimulationError};

/// Slowest tick interval in seconds, used at speed 0+
pub const DEFAULT_SLOW_TICK: f32 = 0.5;
/// Fastest tick interval in seconds, used at speed 1
pub const DEFAULT_FAST_TICK: f32 = 0.016;

/// Grids smaller than this run the transition on the calling thread
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Cell pattern written into freshly allocated buffers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SeedPattern {
    /// All cells dead
    #[default]
    Empty,
    /// A single glider in the bottom-left corner
    Glider,
    /// Each cell alive with probability `density`, reproducible from `seed`
    Random { density: f64, seed: u64 },
}

/// Configuration for [`LifeSimulation`](crate::simulation::life::LifeSimulation)
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub width: i32,
    pub height: i32,
    pub slow_tick: f32,
    pub fast_tick: f32,
    /// Initial speed ratio in `[0, 1]`
    pub speed: f32,
    pub seed: SeedPattern,
    /// Worker threads for the transition; `None` uses one per logical CPU
    pub threads: Option<usize>,
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            slow_tick: DEFAULT_SLOW_TICK,
            fast_tick: DEFAULT_FAST_TICK,
            speed: 0.5,
            seed: SeedPattern::Empty,
            threads: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Tick interval bounds in seconds, slowest first
    pub fn with_tick_bounds(mut self, slow: f32, fast: f32) -> Self {
        self.slow_tick = slow;
        self.fast_tick = fast;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_seed(mut self, seed: SeedPattern) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    pub fn with_parallel_threshold(mut self, cells: usize) -> Self {
        self.parallel_threshold = cells;
        self
    }

    /// Worker count after applying the CPU-count default
    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SimulationError::InvalidDimensions {
                width: self.width as i64,
                height: self.height as i64,
            });
        }
        validate_tick_bounds(self.slow_tick, self.fast_tick)?;
        if !self.speed.is_finite() {
            return Err(SimulationError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}

pub(crate) fn validate_tick_bounds(slow: f32, fast: f32) -> Result<()> {
    let valid = slow.is_finite() && fast.is_finite() && fast > 0.0 && slow >= fast;
    if valid {
        Ok(())
    } else {
        Err(SimulationError::InvalidTickBounds { slow, fast })
    }
}
