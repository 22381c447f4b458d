//! # Lifestamp Prelude
//!
//! Commonly used types in one import:
//!
//! ```rust
//! use lifestamp::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let mut sim = LifeSimulation::new(
//!         SimulationConfig::new().with_size(32, 32).with_speed(1.0),
//!         BlueprintCatalog::builtin(),
//!     )?;
//!     sim.initialize();
//!
//!     let glider = sim.catalog().find("Glider").unwrap_or(0);
//!     sim.enqueue_stamp(glider, Orientation::Deg90, (10, 10));
//!     sim.update(0.1);
//!     Ok(())
//! }
//! ```

// Re-export simulation framework
pub use crate::simulation::{
    ControlSurface, LifeSimulation, Simulation, SimulationScheduler, TickReport,
};

// Re-export grid and blueprint types
pub use crate::blueprint::{BlueprintCatalog, BlueprintRecord, Orientation, StampEvent, StampQueue};
pub use crate::grid::{Color, GridTopology};

pub use crate::config::{SeedPattern, SimulationConfig};
pub use crate::error::SimulationError;

// Re-export performance monitoring
pub use crate::performance::{PerformanceMetrics, PerformanceMonitor};
