//! Fixed-capacity sample history for rolling averages

use std::time::Duration;

pub struct RingBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
    next: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// A zero capacity is bumped to one so `record` never divides by zero.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    /// Store a sample, overwriting the oldest once full.
    pub fn record(&mut self, sample: T) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.next] = sample;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    /// Most recently recorded sample.
    pub fn latest(&self) -> Option<T> {
        if self.samples.is_empty() {
            return None;
        }
        let index = (self.next + self.capacity - 1) % self.capacity;
        self.samples.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl RingBuffer<Duration> {
    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let sum: Duration = self.samples.iter().sum();
        sum / self.samples.len() as u32
    }

    pub fn min_max(&self) -> (Duration, Duration) {
        let min = self.samples.iter().min().copied().unwrap_or(Duration::ZERO);
        let max = self.samples.iter().max().copied().unwrap_or(Duration::ZERO);
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_mean() {
        let mut buffer = RingBuffer::new(3);
        assert_eq!(buffer.mean(), Duration::ZERO);
        assert_eq!(buffer.latest(), None);

        buffer.record(Duration::from_millis(10));
        buffer.record(Duration::from_millis(20));
        assert_eq!(buffer.mean(), Duration::from_millis(15));

        buffer.record(Duration::from_millis(30));
        buffer.record(Duration::from_millis(40)); // evicts 10
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.mean(), Duration::from_millis(30));
        assert_eq!(buffer.latest(), Some(Duration::from_millis(40)));
        assert_eq!(
            buffer.min_max(),
            (Duration::from_millis(20), Duration::from_millis(40))
        );
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut buffer = RingBuffer::new(0);
        buffer.record(Duration::from_millis(5));
        buffer.record(Duration::from_millis(7));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.latest(), Some(Duration::from_millis(7)));
    }
}
