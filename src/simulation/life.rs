//! Game of Life simulation root
//!
//! Owns the grid, both cell buffers, the blueprint catalog and every service
//! that acts on them. Producers never touch the grid directly: stamp requests
//! go through a [`StampQueue`] handle and speed/resize requests through a
//! [`ControlSurface`] handle, both of which can be cloned onto other threads.

use super::controls::ControlSurface;
use super::engine::UpdateEngine;
use super::reset::ResetController;
use super::scheduler::SimulationScheduler;
use super::traits::Simulation;
use crate::blueprint::{BlueprintCatalog, Orientation, StampEvent, StampQueue};
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::grid::{Cell, Color, GridTopology, StateBuffers};
use crate::performance::PerformanceMonitor;
use log::{debug, error, info, trace, warn};

/// Most ticks one call to [`LifeSimulation::advance`] will run; any further
/// backlog is dropped
pub const MAX_TICKS_PER_ADVANCE: u32 = 240;

/// Summary of one completed tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Generation number after the tick
    pub generation: u64,
    /// Stamp events applied
    pub stamped: usize,
    /// Stamp events dropped as malformed
    pub rejected: usize,
}

/// Toroidal Life grid with live blueprint stamping
pub struct LifeSimulation {
    name: String,
    running: bool,
    topology: GridTopology,
    buffers: StateBuffers,
    catalog: BlueprintCatalog,
    queue: StampQueue,
    controls: ControlSurface,
    scheduler: SimulationScheduler,
    engine: UpdateEngine,
    resetter: ResetController,
    generation: u64,
    monitor: PerformanceMonitor,
}

impl LifeSimulation {
    /// Build a simulation from `config` with an injected blueprint catalog
    pub fn new(config: SimulationConfig, catalog: BlueprintCatalog) -> Result<Self> {
        config.validate()?;

        let resetter = ResetController::new(config.seed);
        let (topology, buffers) = resetter.allocate(config.width, config.height)?;
        let scheduler =
            SimulationScheduler::new(config.slow_tick, config.fast_tick, config.speed)?;
        let engine = UpdateEngine::new(config.resolved_threads(), config.parallel_threshold)?;

        debug!(
            "Created {}x{} simulation with {} blueprints on {} worker threads",
            config.width,
            config.height,
            catalog.len(),
            engine.threads()
        );

        Ok(Self {
            name: "Game of Life".to_string(),
            running: false,
            topology,
            buffers,
            catalog,
            queue: StampQueue::new(),
            controls: ControlSurface::new(),
            scheduler,
            engine,
            resetter,
            generation: 0,
            monitor: PerformanceMonitor::new(),
        })
    }

    /// Handle for enqueueing stamp events from another thread
    pub fn stamp_queue(&self) -> StampQueue {
        self.queue.clone()
    }

    /// Handle for speed and resize requests
    pub fn controls(&self) -> ControlSurface {
        self.controls.clone()
    }

    /// Queue a stamp of blueprint `pattern_id` for the next tick
    pub fn enqueue_stamp(&self, pattern_id: usize, orientation: Orientation, origin: (i32, i32)) {
        self.queue.push(StampEvent::new(pattern_id, orientation, origin));
    }

    /// Advance by `delta_time` seconds, running every tick that falls due
    ///
    /// Pending control requests are applied first. Returns one report per tick,
    /// at most [`MAX_TICKS_PER_ADVANCE`] of them.
    pub fn advance(&mut self, delta_time: f32) -> Vec<TickReport> {
        self.apply_controls();

        let due = self.scheduler.advance(delta_time);
        if due > MAX_TICKS_PER_ADVANCE {
            warn!(
                "Falling behind: {} ticks due, running {} and dropping the rest",
                due, MAX_TICKS_PER_ADVANCE
            );
        }
        (0..due.min(MAX_TICKS_PER_ADVANCE)).map(|_| self.step()).collect()
    }

    /// Run one tick now, regardless of speed or pause state
    pub fn step(&mut self) -> TickReport {
        // events arriving after this point belong to the next tick
        let batch = self.queue.drain();

        self.monitor.begin_tick();
        let outcome = self
            .engine
            .step(&self.topology, &mut self.buffers, &self.catalog, batch);
        self.monitor.end_tick();

        self.generation += 1;
        let report = TickReport {
            generation: self.generation,
            stamped: outcome.stamped,
            rejected: outcome.rejected.len(),
        };
        trace!("Tick complete: {:?}", report);
        report
    }

    /// Replace the grid with a fresh `width` x `height` one
    ///
    /// Pending stamps are discarded and the generation counter restarts.
    /// On error the current grid is kept.
    pub fn reset(&mut self, width: i32, height: i32) -> Result<()> {
        self.resetter.reset(
            width,
            height,
            &mut self.topology,
            &mut self.buffers,
            &self.queue,
        )?;
        self.generation = 0;
        self.scheduler.reset();
        self.monitor.reset();
        Ok(())
    }

    /// Set the speed ratio directly
    pub fn set_speed(&mut self, ratio: f32) -> Result<()> {
        self.scheduler.set_speed(ratio)
    }

    fn apply_controls(&mut self) {
        let pending = self.controls.take();

        if let Some(ratio) = pending.speed {
            if let Err(err) = self.set_speed(ratio) {
                error!("Ignoring speed request: {}", err);
            }
        }
        if let Some((width, height)) = pending.resize {
            if let Err(err) = self.reset(width, height) {
                error!("Ignoring resize request: {}", err);
            }
        }
    }

    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn cells(&self) -> &[Cell] {
        self.buffers.cells()
    }

    /// Colours of the last committed tick
    pub fn colors(&self) -> &[Color] {
        self.buffers.colors()
    }

    pub fn color_bytes(&self) -> &[u8] {
        self.buffers.color_bytes()
    }

    pub fn catalog(&self) -> &BlueprintCatalog {
        &self.catalog
    }

    pub fn scheduler(&self) -> &SimulationScheduler {
        &self.scheduler
    }

    pub fn performance(&self) -> &PerformanceMonitor {
        &self.monitor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.buffers.population()
    }
}

impl Simulation for LifeSimulation {
    fn initialize(&mut self) {
        self.running = true;
        info!(
            "{} initialized: {}x{} grid, {} live cells",
            self.name,
            self.topology.width(),
            self.topology.height(),
            self.population()
        );
    }

    fn update(&mut self, delta_time: f32) {
        if self.running {
            self.advance(delta_time);
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    fn reset(&mut self) {
        let (width, height) = (self.topology.width(), self.topology.height());
        // current dimensions are already known to be valid
        if let Err(err) = LifeSimulation::reset(self, width, height) {
            error!("Reset failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::BlueprintRecord;
    use crate::config::SeedPattern;
    use crate::grid::ALIVE;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn dot_sim(w: i32, h: i32) -> LifeSimulation {
        let catalog = BlueprintCatalog::from_records([BlueprintRecord::new("dot", [(0, 0)])]);
        let config = SimulationConfig::new()
            .with_size(w, h)
            .with_tick_bounds(0.5, 0.1)
            .with_speed(1.0)
            .with_threads(2);
        LifeSimulation::new(config, catalog).unwrap()
    }

    #[test]
    fn test_stamp_enqueued_mid_tick_waits_for_next_tick() {
        let mut sim = dot_sim(10, 10);
        sim.enqueue_stamp(0, Orientation::Deg0, (1, 1));

        // open a tick by hand: take the batch, then a late event arrives
        let batch = sim.queue.drain();
        sim.stamp_queue().enqueue(0, 0, (6, 6));
        sim.engine
            .step(&sim.topology, &mut sim.buffers, &sim.catalog, batch);

        let late = sim.topology.index(6, 6);
        assert_eq!(sim.cells()[sim.topology.index(1, 1)], ALIVE);
        assert_eq!(sim.cells()[late], 0);
        assert_eq!(sim.queue.len(), 1);

        let report = sim.step();
        assert_eq!(report.stamped, 1);
        assert_eq!(sim.cells()[late], ALIVE);
        assert!(sim.queue.is_empty());
    }

    #[test]
    fn test_stamps_from_a_concurrent_producer_wait_for_the_next_tick() {
        // big enough that the step runs the parallel path for a while
        let mut sim = dot_sim(256, 256);
        let queue = sim.stamp_queue();
        let started = Arc::new(Barrier::new(2));
        let finished = Arc::new(AtomicBool::new(false));

        let producer = {
            let started = Arc::clone(&started);
            let finished = Arc::clone(&finished);
            thread::spawn(move || {
                started.wait();
                let mut sent = 0usize;
                loop {
                    queue.enqueue(0, 0, ((sent % 256) as i32, 100));
                    sent += 1;
                    if finished.load(Ordering::Acquire) {
                        return sent;
                    }
                    thread::yield_now();
                }
            })
        };

        let batch = sim.queue.drain();
        started.wait();
        sim.engine
            .step(&sim.topology, &mut sim.buffers, &sim.catalog, batch);
        finished.store(true, Ordering::Release);
        let sent = producer.join().unwrap();

        // nothing the producer sent after the drain landed in this tick
        assert_eq!(sim.population(), 0);
        assert_eq!(sim.queue.len(), sent);

        let report = sim.step();
        assert_eq!(report.stamped, sent);
        assert_eq!(report.rejected, 0);
        assert!(sim.population() > 0);
        assert!(sim.queue.is_empty());
    }

    #[test]
    fn test_huge_delta_runs_a_bounded_number_of_ticks() {
        let mut sim = dot_sim(8, 8);
        let reports = sim.advance(1.0e7);
        assert_eq!(reports.len(), MAX_TICKS_PER_ADVANCE as usize);
        assert_eq!(sim.generation(), u64::from(MAX_TICKS_PER_ADVANCE));

        // the dropped backlog is not paid out later
        assert!(sim.scheduler().accumulated_time() < 0.1);
        assert!(sim.advance(f32::INFINITY).is_empty());
    }

    #[test]
    fn test_paused_simulation_does_not_advance() {
        let mut sim = dot_sim(8, 8);
        sim.set_running(false);
        Simulation::update(&mut sim, 10.0);
        assert_eq!(sim.generation(), 0);

        sim.initialize();
        Simulation::update(&mut sim, 0.25);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_controls_apply_on_next_update() {
        let mut sim = dot_sim(8, 8);
        let controls = sim.controls();
        controls.set_speed(0.0);
        controls.request_resize(5, 5);
        assert_eq!(sim.cells().len(), 64);

        let reports = sim.advance(100.0);

        assert!(reports.is_empty());
        assert_eq!(sim.cells().len(), 25);
        assert_eq!(sim.colors().len(), 25);
        assert!(sim.scheduler().is_frozen());
    }

    #[test]
    fn test_invalid_resize_request_keeps_grid() {
        let mut sim = dot_sim(8, 8);
        sim.controls().request_resize(-1, 8);
        sim.advance(0.0);
        assert_eq!(sim.topology().width(), 8);
        assert!(sim.reset(0, 0).is_err());
        assert_eq!(sim.cells().len(), 64);
    }

    #[test]
    fn test_trait_reset_reseeds_same_size() {
        let config = SimulationConfig::new()
            .with_size(12, 12)
            .with_seed(SeedPattern::Glider)
            .with_threads(1);
        let mut sim = LifeSimulation::new(config, BlueprintCatalog::builtin()).unwrap();
        for _ in 0..4 {
            sim.step();
        }
        assert_eq!(sim.generation(), 4);

        Simulation::reset(&mut sim);

        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.population(), 5);
        assert_eq!(sim.topology().width(), 12);
    }

    #[test]
    fn test_glider_keeps_five_cells_while_travelling() {
        let config = SimulationConfig::new()
            .with_size(16, 16)
            .with_seed(SeedPattern::Glider)
            .with_threads(2)
            .with_parallel_threshold(0);
        let mut sim = LifeSimulation::new(config, BlueprintCatalog::builtin()).unwrap();
        let start = sim.cells().to_vec();

        for _ in 0..4 {
            sim.step();
            assert_eq!(sim.population(), 5);
        }
        // after 4 generations a glider is the same shape shifted diagonally
        assert_ne!(sim.cells(), start.as_slice());
        assert_eq!(sim.performance().metrics().total_ticks, 4);
    }
}
