//! Census Metrics - Timing and counters for world scans
//!
//! Tracks how long rebuilds take and how much they touched, so operators can
//! see whether counting itself has become expensive.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use census_metrics::{Counter, ScanTimer};
//!
//! let mut timer = ScanTimer::new(16); // Keep the last 16 rebuilds
//! let start = std::time::Instant::now();
//! // ... rebuild ...
//! timer.record(start.elapsed());
//! println!("avg rebuild: {:.1} ms", timer.average_ms());
//! ```
//!
//! Without the `metrics` feature every type below is a no-op stub.

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod phase_profiler;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod scan_timer;

#[cfg(feature = "metrics")]
pub use counter::Counter;
#[cfg(feature = "metrics")]
pub use phase_profiler::PhaseProfiler;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use scan_timer::ScanTimer;

// ============================================================================
// Macros for conditional compilation
// ============================================================================

/// Execute code only when the calling crate enables its `metrics` feature
#[macro_export]
macro_rules! metrics {
    ($($tt:tt)*) => {
        #[cfg(feature = "metrics")]
        {
            $($tt)*
        }
    };
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct ScanTimer;

#[cfg(not(feature = "metrics"))]
impl ScanTimer {
    pub fn new(_capacity: usize) -> Self { Self }
    pub fn record(&mut self, _elapsed: std::time::Duration) {}
    pub fn scans(&self) -> usize { 0 }
    pub fn last_ms(&self) -> f64 { 0.0 }
    pub fn average_ms(&self) -> f64 { 0.0 }
    pub fn range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
}

#[cfg(not(feature = "metrics"))]
pub struct RingBuffer<T>(std::marker::PhantomData<T>);

#[cfg(not(feature = "metrics"))]
impl<T> RingBuffer<T> {
    pub fn new(_capacity: usize) -> Self { Self(std::marker::PhantomData) }
    pub fn record(&mut self, _sample: T) {}
    pub fn len(&self) -> usize { 0 }
    pub fn is_empty(&self) -> bool { true }
}

#[cfg(not(feature = "metrics"))]
pub struct Counter;

#[cfg(not(feature = "metrics"))]
impl Counter {
    pub fn new() -> Self { Self }
    pub fn increment(&mut self, _name: &'static str, _value: u64) {}
    pub fn get(&self, _name: &str) -> u64 { 0 }
}

#[cfg(not(feature = "metrics"))]
pub struct PhaseProfiler;

#[cfg(not(feature = "metrics"))]
impl PhaseProfiler {
    pub fn new() -> Self { Self }
    pub fn time_phase<F, R>(&mut self, _name: &'static str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn timing(&self, _name: &str) -> std::time::Duration { std::time::Duration::ZERO }
    pub fn runs(&self, _name: &str) -> u32 { 0 }
    pub fn average_ms(&self, _name: &str) -> f64 { 0.0 }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_api_available_in_every_build() {
        let mut timer = super::ScanTimer::new(8);
        timer.record(std::time::Duration::from_millis(3));
        let mut counters = super::Counter::new();
        counters.increment("regions", 2);
        let mut profiler = super::PhaseProfiler::new();
        let value = profiler.time_phase("count", || 7);
        assert_eq!(value, 7);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_counters_and_phases_accumulate() {
        let mut counters = super::Counter::new();
        counters.increment("regions", 2);
        counters.increment("regions", 3);
        counters.increment("entities", 40);
        assert_eq!(counters.get("regions"), 5);
        assert_eq!(counters.get("missing"), 0);
        let names: Vec<&str> = counters.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["entities", "regions"]);

        let mut profiler = super::PhaseProfiler::new();
        profiler.time_phase("sort", || ());
        profiler.time_phase("sort", || ());
        assert!(profiler.timing("sort") >= std::time::Duration::ZERO);
        assert_eq!(profiler.timing("count"), std::time::Duration::ZERO);
    }
}
