//! Double-buffered cell storage and the derived colour buffer
//!
//! Two cell arrays live side by side and trade roles once per tick: the
//! *current* array is what consumers and the next transition read, the
//! *shadow* array is scratch space the transition writes into. Publishing
//! flips a role flag, so no tick ever reallocates or copies.

use super::topology::GridTopology;
use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

/// Binary cell state, 0 (dead) or 1 (alive)
pub type Cell = u8;

pub const DEAD: Cell = 0;
pub const ALIVE: Cell = 1;

/// RGBA colour as uploaded to a texture, one per cell
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Display colour of a committed cell state
    #[inline]
    pub fn from_state(state: Cell) -> Self {
        let v = state as f32;
        Self::new(v, v, v, 1.0)
    }
}

/// Cell arena of two fixed buffers addressed by a role flag, plus colours
pub struct StateBuffers {
    cells: [Vec<Cell>; 2],
    /// Index into `cells` of the current (authoritative) buffer
    current: usize,
    colors: Vec<Color>,
}

impl StateBuffers {
    /// Allocate all-dead buffers sized to `topology`
    pub fn new(topology: &GridTopology) -> Self {
        let len = topology.len();
        Self {
            cells: [vec![DEAD; len], vec![DEAD; len]],
            current: 0,
            colors: vec![Color::BLACK; len],
        }
    }

    pub fn len(&self) -> usize {
        self.cells[self.current].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last committed cell states
    pub fn cells(&self) -> &[Cell] {
        &self.cells[self.current]
    }

    /// Mutable access to the committed states, for seeding between ticks
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells[self.current]
    }

    /// Colours derived from the last committed states
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Colour snapshot as raw bytes, ready for a texture upload
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Split into the read-only current buffer and the writable shadow buffer
    pub fn split(&mut self) -> (&[Cell], &mut [Cell]) {
        let (a, b) = self.cells.split_at_mut(1);
        if self.current == 0 {
            (a[0].as_slice(), b[0].as_mut_slice())
        } else {
            (b[0].as_slice(), a[0].as_mut_slice())
        }
    }

    /// Writable shadow buffer
    pub fn shadow_mut(&mut self) -> &mut [Cell] {
        &mut self.cells[1 - self.current]
    }

    /// Make the shadow buffer the current one
    pub fn publish(&mut self) {
        self.current = 1 - self.current;
    }

    /// Recompute every colour from the committed states
    ///
    /// Runs on the rayon pool the caller is installed in.
    pub fn derive_colors(&mut self) {
        let cells = &self.cells[self.current];
        self.colors
            .par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(color, &state)| *color = Color::from_state(state));
    }

    /// Number of alive cells in the committed buffer
    pub fn population(&self) -> usize {
        self.cells().iter().filter(|&&c| c == ALIVE).count()
    }
}
