//! Performance monitoring capability.
//!
//! Components receive an `Arc<dyn PerformanceMonitor>` at construction instead of
//! reaching for a process-wide singleton. The binary decides which sink to wire in.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default number of measurements kept by `RecordingMonitor`.
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Sink for operation timings.
pub trait PerformanceMonitor: Send + Sync {
    /// Records how long an operation took.
    fn record(&self, operation: &'static str, elapsed: Duration);
}

/// Shared handle to a monitor.
pub type SharedMonitor = Arc<dyn PerformanceMonitor>;

/// RAII timer that records its elapsed time when dropped.
///
/// Every exit path of the measured scope is timed, including early `?` returns.
#[must_use = "a measurement records when dropped; bind it to a variable"]
pub struct Measurement<'a> {
    monitor: &'a dyn PerformanceMonitor,
    operation: &'static str,
    started: Instant,
}

impl<'a> Measurement<'a> {
    /// Starts timing `operation`.
    pub fn start(monitor: &'a dyn PerformanceMonitor, operation: &'static str) -> Self {
        Self {
            monitor,
            operation,
            started: Instant::now(),
        }
    }
}

impl Drop for Measurement<'_> {
    fn drop(&mut self) {
        self.monitor.record(self.operation, self.started.elapsed());
    }
}

/// Monitor that emits timings as tracing events.
#[derive(Debug, Clone)]
pub struct TracingMonitor {
    slow_threshold: Duration,
}

impl TracingMonitor {
    /// Creates a monitor that warns above `slow_threshold`.
    #[must_use]
    pub const fn new(slow_threshold: Duration) -> Self {
        Self { slow_threshold }
    }
}

impl Default for TracingMonitor {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl PerformanceMonitor for TracingMonitor {
    fn record(&self, operation: &'static str, elapsed: Duration) {
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        if elapsed >= self.slow_threshold {
            tracing::warn!(operation, elapsed_us, "Slow operation");
        } else {
            tracing::debug!(operation, elapsed_us, "Operation timed");
        }
    }
}

/// Monitor that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl PerformanceMonitor for NoopMonitor {
    fn record(&self, _operation: &'static str, _elapsed: Duration) {}
}

/// A single recorded timing.
#[derive(Debug, Clone, Serialize)]
pub struct OperationMetric {
    /// Operation name.
    pub operation: &'static str,
    /// Elapsed wall-clock time.
    pub elapsed: Duration,
    /// When the measurement finished.
    pub recorded_at: DateTime<Utc>,
}

/// Monitor that keeps a bounded history of timings in memory.
///
/// Once `capacity` is reached the oldest entry is evicted.
#[derive(Debug)]
pub struct RecordingMonitor {
    capacity: usize,
    history: Mutex<VecDeque<OperationMetric>>,
}

impl RecordingMonitor {
    /// Creates a monitor keeping at most `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            history: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_CAPACITY))),
        }
    }

    /// Returns a copy of the recorded history, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<OperationMetric> {
        self.history
            .lock()
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the most recent measurement of an operation.
    #[must_use]
    pub fn last(&self, operation: &str) -> Option<OperationMetric> {
        self.history
            .lock()
            .ok()?
            .iter()
            .rev()
            .find(|m| m.operation == operation)
            .cloned()
    }

    /// Drops all recorded history.
    pub fn clear(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }
}

impl Default for RecordingMonitor {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PerformanceMonitor for RecordingMonitor {
    fn record(&self, operation: &'static str, elapsed: Duration) {
        let Ok(mut history) = self.history.lock() else {
            return;
        };
        if history.len() >= self.capacity {
            history.pop_front();
        }
        history.push_back(OperationMetric {
            operation,
            elapsed,
            recorded_at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_records_on_drop() {
        let monitor = RecordingMonitor::default();
        {
            let _m = Measurement::start(&monitor, "analyze_variance");
        }
        let history = monitor.snapshot();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].operation, "analyze_variance");
    }

    #[test]
    fn test_measurement_records_on_early_return() {
        fn fails(monitor: &dyn PerformanceMonitor) -> Result<(), &'static str> {
            let _m = Measurement::start(monitor, "fails");
            Err::<(), _>("boom")?;
            Ok(())
        }

        let monitor = RecordingMonitor::default();
        assert!(fails(&monitor).is_err());
        assert!(monitor.last("fails").is_some());
    }

    #[test]
    fn test_recording_monitor_evicts_oldest() {
        let monitor = RecordingMonitor::with_capacity(2);
        monitor.record("a", Duration::from_millis(1));
        monitor.record("b", Duration::from_millis(2));
        monitor.record("c", Duration::from_millis(3));

        let ops: Vec<&str> = monitor.snapshot().iter().map(|m| m.operation).collect();
        assert_eq!(ops, vec!["b", "c"]);
    }

    #[test]
    fn test_recording_monitor_clear() {
        let monitor = RecordingMonitor::default();
        monitor.record("a", Duration::ZERO);
        monitor.clear();
        assert!(monitor.snapshot().is_empty());
        assert!(monitor.last("a").is_none());
    }
}
