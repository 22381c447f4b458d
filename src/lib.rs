// src/lib.rs
//! Lifestamp
//!
//! A toroidal Game of Life engine with live blueprint stamping, a fixed-tick
//! scheduler and a render-ready colour buffer.

pub mod blueprint;
pub mod config;
pub mod error;
pub mod grid;
pub mod performance;
pub mod prelude;
pub mod simulation;

// Re-export main types for convenience
pub use error::{Result, SimulationError};
pub use simulation::LifeSimulation;

/// Creates a simulation with the default configuration and builtin blueprints
pub fn default() -> Result<LifeSimulation> {
    LifeSimulation::new(
        config::SimulationConfig::default(),
        blueprint::BlueprintCatalog::builtin(),
    )
}
