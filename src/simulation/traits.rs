//! Core simulation trait
//!
//! Defines the lifecycle a host loop drives: initialise once, update every
//! frame with the elapsed wall time, pause/resume, and reset.

/// Lifecycle interface for simulations driven by a per-frame host loop
pub trait Simulation {
    /// Initialize the simulation
    ///
    /// Called once before the first update.
    fn initialize(&mut self);

    /// Update simulation state
    ///
    /// Called every frame. The simulation decides how many discrete steps the
    /// elapsed time is worth.
    ///
    /// # Arguments
    /// * `delta_time` - Time elapsed since last update in seconds
    fn update(&mut self, delta_time: f32);

    /// Get simulation name for display
    fn name(&self) -> &str;

    /// Whether simulation is currently running
    fn is_running(&self) -> bool;

    /// Start/pause simulation
    fn set_running(&mut self, running: bool);

    /// Reset simulation to its initial state
    fn reset(&mut self);

    /// Optional: cleanup when the host shuts down
    fn cleanup(&mut self) {}
}
