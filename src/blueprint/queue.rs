//! Pending stamp requests
//!
//! The input side appends events while the simulation side drains them once
//! per tick. Draining swaps the whole list out under the lock, so an event is
//! handed to exactly one tick and never lost or duplicated.

use super::catalog::Orientation;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Request to overlay pattern `pattern_id` at `origin`
///
/// `orientation` is kept in raw degrees; it is validated when the event is
/// applied so a malformed request is rejected on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StampEvent {
    pub pattern_id: usize,
    pub orientation: i32,
    pub origin: (i32, i32),
}

impl StampEvent {
    pub fn new(pattern_id: usize, orientation: Orientation, origin: (i32, i32)) -> Self {
        Self {
            pattern_id,
            orientation: orientation.degrees(),
            origin,
        }
    }
}

/// FIFO of stamp events shared between producers and the update step
///
/// Cloning yields another handle onto the same queue.
#[derive(Clone, Debug, Default)]
pub struct StampQueue {
    events: Arc<Mutex<Vec<StampEvent>>>,
}

impl StampQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StampEvent>> {
        // a panicking producer cannot leave a half-pushed event behind
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a request in raw form
    pub fn enqueue(&self, pattern_id: usize, orientation: i32, origin: (i32, i32)) {
        self.push(StampEvent {
            pattern_id,
            orientation,
            origin,
        });
    }

    pub fn push(&self, event: StampEvent) {
        self.lock().push(event);
    }

    /// Take every pending event in FIFO order, leaving the queue empty
    pub fn drain(&self) -> Vec<StampEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_drain_is_fifo_and_empties() {
        let queue = StampQueue::new();
        queue.enqueue(0, 0, (1, 1));
        queue.enqueue(2, 90, (3, 4));
        queue.push(StampEvent::new(1, Orientation::Deg270, (5, 5)));

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[0].origin, (1, 1));
        assert_eq!(drained[1].pattern_id, 2);
        assert_eq!(drained[2].orientation, 270);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_handles_share_one_queue() {
        let queue = StampQueue::new();
        let producer = queue.clone();
        let worker = thread::spawn(move || {
            for i in 0..100 {
                producer.enqueue(0, 0, (i, 0));
            }
        });
        worker.join().unwrap();

        let drained = queue.drain();
        assert_eq!(drained.len(), 100);
        assert!(drained.iter().enumerate().all(|(i, e)| e.origin.0 == i as i32));
    }
}
