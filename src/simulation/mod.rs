//! Simulation system
//!
//! The simulation root, its per-tick update engine, the fixed-tick scheduler
//! that paces it, and the reset controller that reallocates it.

pub mod controls;
pub mod engine;
pub mod life;
pub mod reset;
pub mod scheduler;
pub mod traits;

pub use controls::ControlSurface;
pub use engine::UpdateEngine;
pub use life::{LifeSimulation, TickReport, MAX_TICKS_PER_ADVANCE};
pub use reset::ResetController;
pub use scheduler::{SchedulerState, SimulationScheduler};
pub use traits::Simulation;
