//! Per-tick update: transition, stamp, publish, colour
//!
//! A tick runs four phases back to back, each finishing before the next starts:
//!
//! 1. **Transition** - every cell's next state is computed from the current
//!    buffer into the shadow buffer. Reads only touch the current buffer and
//!    each row of the shadow buffer has exactly one writer, so rows are handed
//!    to the rayon pool without locks.
//! 2. **Stamp** - the batch of stamp events taken for this tick is applied to
//!    the shadow buffer in FIFO order. Stamping only turns cells on.
//! 3. **Publish** - buffer roles swap; the shadow buffer becomes current.
//! 4. **Colour** - colours are re-derived from the newly committed states.

use crate::blueprint::{BlueprintCatalog, StampEvent};
use crate::error::{Result, SimulationError};
use crate::grid::{Cell, GridTopology, StateBuffers, ALIVE};
use log::{trace, warn};
use rayon::prelude::*;

/// Life rule: born or surviving when `n == 3`, or when `previous + n == 3`
///
/// The second branch is what keeps a live cell with two neighbors alive.
#[inline]
pub fn next_state(previous: Cell, neighbors: u8) -> Cell {
    (neighbors == 3 || previous + neighbors == 3) as Cell
}

/// What a single tick did with its stamp batch
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StampOutcome {
    /// Events applied to the grid
    pub stamped: usize,
    /// Events dropped, with the reason
    pub rejected: Vec<(StampEvent, SimulationError)>,
}

/// Runs the tick phases on a dedicated worker pool
pub struct UpdateEngine {
    pool: rayon::ThreadPool,
    parallel_threshold: usize,
}

impl UpdateEngine {
    /// Create an engine with `threads` workers
    ///
    /// Grids with fewer than `parallel_threshold` cells are updated on the
    /// calling thread.
    pub fn new(threads: usize, parallel_threshold: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|i| format!("lifestamp-worker-{i}"))
            .build()?;
        Ok(Self {
            pool,
            parallel_threshold,
        })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run one full tick with the given stamp batch
    pub fn step(
        &self,
        topology: &GridTopology,
        buffers: &mut StateBuffers,
        catalog: &BlueprintCatalog,
        batch: Vec<StampEvent>,
    ) -> StampOutcome {
        debug_assert_eq!(buffers.len(), topology.len());

        self.transition(topology, buffers);
        let outcome = stamp(topology, buffers.shadow_mut(), catalog, batch);
        buffers.publish();
        self.pool.install(|| buffers.derive_colors());

        outcome
    }

    /// Compute the next generation into the shadow buffer
    pub fn transition(&self, topology: &GridTopology, buffers: &mut StateBuffers) {
        let width = topology.width() as usize;
        let (previous, shadow) = buffers.split();

        if topology.len() < self.parallel_threshold {
            for (y, row) in shadow.chunks_mut(width).enumerate() {
                transition_row(topology, previous, y as i32, row);
            }
        } else {
            self.pool.install(|| {
                shadow
                    .par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(y, row)| transition_row(topology, previous, y as i32, row));
            });
        }
    }
}

fn transition_row(topology: &GridTopology, previous: &[Cell], y: i32, row: &mut [Cell]) {
    for (x, out) in row.iter_mut().enumerate() {
        let x = x as i32;
        let neighbors: u8 = topology
            .neighbors(x, y)
            .iter()
            .map(|&i| previous[i])
            .sum();
        *out = next_state(previous[topology.index(x, y)], neighbors);
    }
}

/// Apply a batch of stamp events to `cells` in order
///
/// Each event is resolved in full before any cell is written, so a rejected
/// event leaves the grid untouched.
pub fn stamp(
    topology: &GridTopology,
    cells: &mut [Cell],
    catalog: &BlueprintCatalog,
    batch: Vec<StampEvent>,
) -> StampOutcome {
    let mut outcome = StampOutcome::default();

    for event in batch {
        let offsets = match catalog.rotate(event.pattern_id, event.orientation) {
            Ok(offsets) => offsets,
            Err(err) => {
                warn!("Dropping stamp event {:?}: {}", event, err);
                outcome.rejected.push((event, err));
                continue;
            }
        };

        let (ox, oy) = (i64::from(event.origin.0), i64::from(event.origin.1));
        for (dx, dy) in offsets {
            cells[topology.wrapped_index_wide(ox + dx, oy + dy)] = ALIVE;
        }
        outcome.stamped += 1;
    }

    if outcome.stamped > 0 || !outcome.rejected.is_empty() {
        trace!(
            "Stamp phase applied {} events, rejected {}",
            outcome.stamped,
            outcome.rejected.len()
        );
    }
    outcome
}
