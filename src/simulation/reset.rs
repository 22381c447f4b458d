//! Grid reset and resize
//!
//! A reset replaces the topology and both buffers wholesale and empties the
//! stamp queue. It needs `&mut` access to everything it replaces, so it can
//! never overlap a tick: whoever holds the simulation finishes the tick before
//! the borrow for the reset can be taken.

use crate::blueprint::StampQueue;
use crate::config::SeedPattern;
use crate::error::Result;
use crate::grid::{Cell, GridTopology, StateBuffers, ALIVE};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Cells of the glider placed by [`SeedPattern::Glider`]
const GLIDER_SEED: [(i32, i32); 5] = [(1, 0), (2, 0), (0, 1), (2, 1), (2, 2)];

/// Reallocates simulation state for a new grid size
#[derive(Clone, Copy, Debug, Default)]
pub struct ResetController {
    seed: SeedPattern,
}

impl ResetController {
    pub fn new(seed: SeedPattern) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> SeedPattern {
        self.seed
    }

    /// Fresh topology and seeded buffers for `width` x `height`
    pub fn allocate(&self, width: i32, height: i32) -> Result<(GridTopology, StateBuffers)> {
        let topology = GridTopology::new(width, height)?;
        let mut buffers = StateBuffers::new(&topology);
        seed_cells(self.seed, &topology, buffers.cells_mut());
        buffers.derive_colors();
        Ok((topology, buffers))
    }

    /// Replace `topology` and `buffers` and empty `queue`
    ///
    /// Dimensions are validated before anything is discarded, so an error
    /// leaves the previous state untouched.
    pub fn reset(
        &self,
        width: i32,
        height: i32,
        topology: &mut GridTopology,
        buffers: &mut StateBuffers,
        queue: &StampQueue,
    ) -> Result<()> {
        let (new_topology, new_buffers) = self.allocate(width, height)?;
        *topology = new_topology;
        *buffers = new_buffers;
        queue.clear();
        info!("Grid reset to {}x{} ({:?} seed)", width, height, self.seed);
        Ok(())
    }
}

/// Write `seed` into freshly cleared `cells`
pub fn seed_cells(seed: SeedPattern, topology: &GridTopology, cells: &mut [Cell]) {
    match seed {
        SeedPattern::Empty => {}
        SeedPattern::Glider => {
            for (x, y) in GLIDER_SEED {
                cells[topology.wrapped_index(x, y)] = ALIVE;
            }
        }
        SeedPattern::Random { density, seed } => {
            let density = if density.is_nan() {
                0.0
            } else {
                density.clamp(0.0, 1.0)
            };
            let mut rng = StdRng::seed_from_u64(seed);
            for cell in cells.iter_mut() {
                *cell = rng.random_bool(density) as Cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;

    #[test]
    fn test_reset_resizes_and_clears_queue() {
        let controller = ResetController::default();
        let (mut topology, mut buffers) = controller.allocate(10, 10).unwrap();
        buffers.cells_mut()[3] = ALIVE;
        let queue = StampQueue::new();
        queue.enqueue(0, 0, (1, 1));

        controller
            .reset(5, 7, &mut topology, &mut buffers, &queue)
            .unwrap();

        assert_eq!((topology.width(), topology.height()), (5, 7));
        assert_eq!(buffers.len(), 35);
        assert_eq!(buffers.colors().len(), 35);
        assert_eq!(buffers.population(), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_invalid_reset_keeps_previous_state() {
        let controller = ResetController::default();
        let (mut topology, mut buffers) = controller.allocate(4, 4).unwrap();
        buffers.cells_mut()[0] = ALIVE;
        let queue = StampQueue::new();
        queue.enqueue(0, 0, (0, 0));

        let err = controller
            .reset(0, 4, &mut topology, &mut buffers, &queue)
            .unwrap_err();

        assert_eq!(
            err,
            SimulationError::InvalidDimensions {
                width: 0,
                height: 4
            }
        );
        assert_eq!(topology.width(), 4);
        assert_eq!(buffers.population(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_glider_seed() {
        let controller = ResetController::new(SeedPattern::Glider);
        let (topology, buffers) = controller.allocate(10, 10).unwrap();
        assert_eq!(buffers.population(), 5);
        // same cells as linear indices 1, 2, w, w + 2, 2w + 2
        for i in [1, 2, 10, 12, 22] {
            assert_eq!(buffers.cells()[i], ALIVE);
        }
        assert_eq!(buffers.colors()[topology.index(1, 0)], crate::grid::Color::WHITE);
    }

    #[test]
    fn test_random_seed_is_reproducible() {
        let seed = SeedPattern::Random {
            density: 0.3,
            seed: 42,
        };
        let (_, a) = ResetController::new(seed).allocate(32, 32).unwrap();
        let (_, b) = ResetController::new(seed).allocate(32, 32).unwrap();
        assert_eq!(a.cells(), b.cells());
        assert!(a.population() > 0 && a.population() < 1024);
    }
}
