//! Rebuild timing history

use super::ring_buffer::RingBuffer;
use std::time::Duration;

/// Rolling history of world rebuild durations.
pub struct ScanTimer {
    history: RingBuffer<Duration>,
}

impl ScanTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: RingBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        self.history.record(elapsed);
    }

    pub fn scans(&self) -> usize {
        self.history.len()
    }

    pub fn last_ms(&self) -> f64 {
        self.history
            .latest()
            .map_or(0.0, |elapsed| elapsed.as_secs_f64() * 1000.0)
    }

    pub fn average_ms(&self) -> f64 {
        self.history.mean().as_secs_f64() * 1000.0
    }

    pub fn range_ms(&self) -> (f64, f64) {
        let (min, max) = self.history.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }
}
