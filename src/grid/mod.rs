//! Grid topology and cell storage

pub mod buffers;
pub mod topology;

pub use buffers::{Cell, Color, StateBuffers, ALIVE, DEAD};
pub use topology::GridTopology;
