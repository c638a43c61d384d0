//! Scalar sample accumulator for ad-hoc descriptive statistics.
//!
//! Backs display-only readouts (latencies, confidence values), so the
//! contract is deliberately tolerant: non-finite input is dropped rather
//! than rejected, and queries on an empty store return zero or `None`,
//! never NaN. Samples accumulate unbounded until an explicit [`reset`]
//! or process exit; nothing is persisted.
//!
//! [`reset`]: SampleStore::reset

use serde::Serialize;

/// Unbounded in-process store of floating-point samples.
///
/// Single-threaded access assumed; callers that need sharing wrap it
/// themselves.
#[derive(Debug, Default, Clone)]
pub struct SampleStore {
    samples: Vec<f64>,
}

/// Snapshot of the store's descriptive statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample. NaN and infinities are silently dropped.
    pub fn add(&mut self, value: f64) {
        if value.is_finite() {
            self.samples.push(value);
        }
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    /// Arithmetic mean, `0.0` when the store is empty.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Smallest stored sample, `None` when empty.
    pub fn min(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::min)
    }

    /// Largest stored sample, `None` when empty.
    pub fn max(&self) -> Option<f64> {
        self.samples.iter().copied().reduce(f64::max)
    }

    /// Drop every stored sample.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// One-shot snapshot of all four statistics.
    pub fn summary(&self) -> SampleSummary {
        SampleSummary {
            count: self.count(),
            mean: self.mean(),
            min: self.min(),
            max: self.max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_defaults() {
        let store = SampleStore::new();
        assert_eq!(store.count(), 0);
        assert_eq!(store.mean(), 0.0);
        assert_eq!(store.min(), None);
        assert_eq!(store.max(), None);
    }

    #[test]
    fn test_basic_statistics() {
        let mut store = SampleStore::new();
        store.add(10.0);
        store.add(20.0);
        assert_eq!(store.count(), 2);
        assert_eq!(store.mean(), 15.0);
        assert_eq!(store.min(), Some(10.0));
        assert_eq!(store.max(), Some(20.0));
    }

    #[test]
    fn test_non_finite_values_are_dropped() {
        let mut store = SampleStore::new();
        store.add(f64::NAN);
        store.add(f64::INFINITY);
        store.add(f64::NEG_INFINITY);
        assert_eq!(store.count(), 0);
        store.add(1.5);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = SampleStore::new();
        store.add(3.0);
        store.add(4.0);
        store.reset();
        assert_eq!(store.count(), 0);
        assert_eq!(store.min(), None);
    }

    #[test]
    fn test_summary_snapshot() {
        let mut store = SampleStore::new();
        store.add(2.0);
        store.add(4.0);
        let summary = store.summary();
        assert_eq!(
            summary,
            SampleSummary {
                count: 2,
                mean: 3.0,
                min: Some(2.0),
                max: Some(4.0),
            }
        );
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""count":2"#));
    }

    #[test]
    fn test_negative_samples() {
        let mut store = SampleStore::new();
        store.add(-5.0);
        store.add(5.0);
        assert_eq!(store.mean(), 0.0);
        assert_eq!(store.min(), Some(-5.0));
        assert_eq!(store.max(), Some(5.0));
    }
}
