//! Control surface handle
//!
//! UI code holds a [`ControlSurface`] and records speed changes and resize
//! requests on it. The simulation picks them up at the start of its next
//! update; repeated requests before that simply overwrite each other.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Requests waiting for the next update
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PendingControls {
    pub speed: Option<f32>,
    pub resize: Option<(i32, i32)>,
}

/// Cloneable handle for setting speed and requesting resizes
#[derive(Clone, Debug, Default)]
pub struct ControlSurface {
    pending: Arc<Mutex<PendingControls>>,
}

impl ControlSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PendingControls> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Request a new speed ratio in `[0, 1]`
    pub fn set_speed(&self, ratio: f32) {
        self.lock().speed = Some(ratio);
    }

    /// Request a reset to `width` x `height`
    pub fn request_resize(&self, width: i32, height: i32) {
        self.lock().resize = Some((width, height));
    }

    /// Take all pending requests, leaving none behind
    pub fn take(&self) -> PendingControls {
        std::mem::take(&mut *self.lock())
    }
}
