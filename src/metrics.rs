//! Batch counters and stage timings.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;

/// A point-in-time copy of the batch counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchMetrics {
    /// Posts evaluated.
    pub posts: u64,
    /// Posts with a claim sentence.
    pub claims: u64,
    /// Posts with at least one scientific term.
    pub sciterm_posts: u64,
    /// Posts flagged for category 1.
    pub cat1: u64,
    /// Posts flagged for category 2.
    pub cat2: u64,
    /// Posts flagged for category 3.
    pub cat3: u64,
    /// Posts whose annotation failed and were treated as having no match.
    pub annotation_failures: u64,
    /// Input rows skipped as malformed.
    pub skipped_rows: u64,
    /// Wall time per stage.
    pub stage_timings: HashMap<String, StageTiming>,
}

/// Timing statistics for one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageTiming {
    /// Number of runs.
    pub runs: u64,
    /// Total time across runs (milliseconds).
    pub total_ms: u64,
    /// Longest run (milliseconds).
    pub max_ms: u64,
}

impl StageTiming {
    /// Record one run.
    pub fn record(&mut self, duration_ms: u64) {
        self.runs += 1;
        self.total_ms = self.total_ms.saturating_add(duration_ms);
        self.max_ms = self.max_ms.max(duration_ms);
    }
}

/// Thread-safe batch counters.
pub struct MetricsCollector {
    posts: AtomicU64,
    claims: AtomicU64,
    sciterm_posts: AtomicU64,
    cat1: AtomicU64,
    cat2: AtomicU64,
    cat3: AtomicU64,
    annotation_failures: AtomicU64,
    skipped_rows: AtomicU64,
    stage_timings: RwLock<HashMap<String, StageTiming>>,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create a collector with every counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            posts: AtomicU64::new(0),
            claims: AtomicU64::new(0),
            sciterm_posts: AtomicU64::new(0),
            cat1: AtomicU64::new(0),
            cat2: AtomicU64::new(0),
            cat3: AtomicU64::new(0),
            annotation_failures: AtomicU64::new(0),
            skipped_rows: AtomicU64::new(0),
            stage_timings: RwLock::new(HashMap::new()),
        }
    }

    /// Record a category 1 evaluation.
    pub fn record_cat1(&self, is_claim: bool, has_sciterm: bool) {
        self.posts.fetch_add(1, Ordering::Relaxed);
        if is_claim {
            self.claims.fetch_add(1, Ordering::Relaxed);
        }
        if has_sciterm {
            self.sciterm_posts.fetch_add(1, Ordering::Relaxed);
        }
        if is_claim && has_sciterm {
            self.cat1.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a category 2 evaluation.
    pub fn record_cat2(&self, is_cat2: bool) {
        self.posts.fetch_add(1, Ordering::Relaxed);
        if is_cat2 {
            self.cat2.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a category 3 evaluation.
    pub fn record_cat3(&self, is_cat3: bool) {
        self.posts.fetch_add(1, Ordering::Relaxed);
        if is_cat3 {
            self.cat3.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a post whose annotation failed.
    pub fn record_annotation_failure(&self) {
        self.annotation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record skipped input rows.
    pub fn record_skipped_rows(&self, count: usize) {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        self.skipped_rows.fetch_add(count, Ordering::Relaxed);
    }

    /// Record the duration of one stage run.
    pub fn record_stage_timing(&self, stage: &str, duration: Duration) {
        let duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);

        if let Ok(mut timings) = self.stage_timings.write() {
            timings
                .entry(stage.to_string())
                .or_default()
                .record(duration_ms);
        }
    }

    /// Get a snapshot of the counters.
    #[must_use]
    pub fn snapshot(&self) -> BatchMetrics {
        let stage_timings = self
            .stage_timings
            .read()
            .map(|t| t.clone())
            .unwrap_or_default();

        BatchMetrics {
            posts: self.posts.load(Ordering::Relaxed),
            claims: self.claims.load(Ordering::Relaxed),
            sciterm_posts: self.sciterm_posts.load(Ordering::Relaxed),
            cat1: self.cat1.load(Ordering::Relaxed),
            cat2: self.cat2.load(Ordering::Relaxed),
            cat3: self.cat3.load(Ordering::Relaxed),
            annotation_failures: self.annotation_failures.load(Ordering::Relaxed),
            skipped_rows: self.skipped_rows.load(Ordering::Relaxed),
            stage_timings,
        }
    }

    /// Reset every counter to zero.
    pub fn reset(&self) {
        for counter in [
            &self.posts,
            &self.claims,
            &self.sciterm_posts,
            &self.cat1,
            &self.cat2,
            &self.cat3,
            &self.annotation_failures,
            &self.skipped_rows,
        ] {
            counter.store(0, Ordering::Relaxed);
        }

        if let Ok(mut timings) = self.stage_timings.write() {
            timings.clear();
        }
    }
}

/// A guard that records a stage timing when dropped.
pub struct TimingGuard<'a> {
    collector: &'a MetricsCollector,
    stage: String,
    start: Instant,
}

impl<'a> TimingGuard<'a> {
    /// Start timing `stage`.
    #[must_use]
    pub fn new(collector: &'a MetricsCollector, stage: impl Into<String>) -> Self {
        Self {
            collector,
            stage: stage.into(),
            start: Instant::now(),
        }
    }
}

impl Drop for TimingGuard<'_> {
    fn drop(&mut self) {
        self.collector
            .record_stage_timing(&self.stage, self.start.elapsed());
    }
}

/// Extension trait for timing a stage with a guard.
pub trait TimedOperation {
    /// Start timing a stage.
    fn time_stage(&self, stage: impl Into<String>) -> TimingGuard<'_>;
}

impl TimedOperation for MetricsCollector {
    fn time_stage(&self, stage: impl Into<String>) -> TimingGuard<'_> {
        TimingGuard::new(self, stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_cat1_counters() {
        let collector = MetricsCollector::new();
        collector.record_cat1(true, true);
        collector.record_cat1(true, false);
        collector.record_cat1(false, true);
        collector.record_cat1(false, false);

        let metrics = collector.snapshot();
        assert_eq!(metrics.posts, 4);
        assert_eq!(metrics.claims, 2);
        assert_eq!(metrics.sciterm_posts, 2);
        assert_eq!(metrics.cat1, 1);
    }

    #[test]
    fn test_cat2_and_cat3_counters() {
        let collector = MetricsCollector::new();
        collector.record_cat2(true);
        collector.record_cat2(false);
        collector.record_cat3(true);

        let metrics = collector.snapshot();
        assert_eq!(metrics.posts, 3);
        assert_eq!(metrics.cat2, 1);
        assert_eq!(metrics.cat3, 1);
    }

    #[test]
    fn test_failures_and_skips() {
        let collector = MetricsCollector::new();
        collector.record_annotation_failure();
        collector.record_skipped_rows(3);
        collector.record_skipped_rows(0);

        let metrics = collector.snapshot();
        assert_eq!(metrics.annotation_failures, 1);
        assert_eq!(metrics.skipped_rows, 3);
    }

    #[test]
    fn test_stage_timing() {
        let collector = MetricsCollector::new();
        collector.record_stage_timing("cat1", Duration::from_millis(50));
        collector.record_stage_timing("cat1", Duration::from_millis(100));

        let metrics = collector.snapshot();
        let timing = metrics.stage_timings.get("cat1").unwrap();
        assert_eq!(timing.runs, 2);
        assert_eq!(timing.total_ms, 150);
        assert_eq!(timing.max_ms, 100);
    }

    #[test]
    fn test_timing_guard() {
        let collector = MetricsCollector::new();
        {
            let _guard = collector.time_stage("cat3");
            thread::sleep(Duration::from_millis(5));
        }
        let metrics = collector.snapshot();
        assert!(metrics.stage_timings.get("cat3").unwrap().total_ms >= 5);
    }

    #[test]
    fn test_reset() {
        let collector = MetricsCollector::new();
        collector.record_cat1(true, true);
        collector.record_stage_timing("cat1", Duration::from_millis(1));
        collector.reset();
        assert_eq!(collector.snapshot(), BatchMetrics::default());
    }

    #[test]
    fn test_concurrent_access() {
        let collector = Arc::new(MetricsCollector::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = Arc::clone(&collector);
                thread::spawn(move || {
                    for _ in 0..100 {
                        c.record_cat3(true);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(collector.snapshot().cat3, 800);
    }
}
