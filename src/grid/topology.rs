//! Wrap-around coordinate math for a fixed-size torus

use crate::error::{Result, SimulationError};

/// Neighbor offsets in enumeration order E, W, N, S, NE, NW, SE, SW.
///
/// North is +y, matching the row-major layout where row `y + 1` sits above row `y`.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Dimensions of the toroidal grid
///
/// Immutable once built. A resize replaces the whole value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridTopology {
    width: i32,
    height: i32,
}

impl GridTopology {
    /// Create a topology, rejecting non-positive dimensions
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(SimulationError::InvalidDimensions {
                width: width as i64,
                height: height as i64,
            });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells, `width * height`
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false: a topology has at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row-major linear index of an in-range coordinate
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!((0..self.width).contains(&x) && (0..self.height).contains(&y));
        y as usize * self.width as usize + x as usize
    }

    /// Coordinates of a linear index
    #[inline]
    pub fn coords(&self, index: usize) -> (i32, i32) {
        let width = self.width as usize;
        ((index % width) as i32, (index / width) as i32)
    }

    /// Floored modulo on both axes, so negative inputs land inside the grid
    #[inline]
    pub fn wrap(&self, x: i32, y: i32) -> (i32, i32) {
        (x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    /// Linear index of an arbitrary coordinate after wrapping
    #[inline]
    pub fn wrapped_index(&self, x: i32, y: i32) -> usize {
        let (wx, wy) = self.wrap(x, y);
        self.index(wx, wy)
    }

    /// [`wrapped_index`](Self::wrapped_index) for coordinates outside i32 range
    #[inline]
    pub fn wrapped_index_wide(&self, x: i64, y: i64) -> usize {
        // the remainders are below width and height, so they fit back in i32
        let wx = x.rem_euclid(i64::from(self.width)) as i32;
        let wy = y.rem_euclid(i64::from(self.height)) as i32;
        self.index(wx, wy)
    }

    /// The 8 wrapped neighbor indices of `(x, y)` in E, W, N, S, NE, NW, SE, SW order
    #[inline]
    pub fn neighbors(&self, x: i32, y: i32) -> [usize; 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| self.wrapped_index(x + dx, y + dy))
    }
}
