//! Accumulated time per named phase (count, sort, ...)

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy)]
struct PhaseTotals {
    elapsed: Duration,
    runs: u32,
}

pub struct PhaseProfiler {
    phases: BTreeMap<&'static str, PhaseTotals>,
}

impl PhaseProfiler {
    pub fn new() -> Self {
        Self {
            phases: BTreeMap::new(),
        }
    }

    /// Run `f`, adding its wall time to phase `name`.
    pub fn time_phase<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let totals = self.phases.entry(name).or_default();
        totals.elapsed += start.elapsed();
        totals.runs += 1;
        result
    }

    /// Total time spent in `name`.
    pub fn timing(&self, name: &str) -> Duration {
        self.phases
            .get(name)
            .map_or(Duration::ZERO, |totals| totals.elapsed)
    }

    pub fn runs(&self, name: &str) -> u32 {
        self.phases.get(name).map_or(0, |totals| totals.runs)
    }

    /// Mean time per run of `name`, in milliseconds.
    pub fn average_ms(&self, name: &str) -> f64 {
        match self.phases.get(name) {
            Some(totals) if totals.runs > 0 => {
                totals.elapsed.as_secs_f64() * 1000.0 / f64::from(totals.runs)
            }
            _ => 0.0,
        }
    }
}

impl Default for PhaseProfiler {
    fn default() -> Self {
        Self::new()
    }
}
