use std::time::{Duration, Instant};
use tracing::info;

/// Notified once per processed record.
pub(crate) trait ProgressObserver {
    fn advance(&mut self);

    /// Called once after the last record.
    fn finish(&mut self) {}
}

/// Logs throughput at most once per interval.
pub(crate) struct ProgressCounter {
    total: usize,
    processed: usize,
    reports: usize,
    start: Instant,
    last_report: Instant,
    interval: Duration,
}

impl ProgressCounter {
    pub(crate) fn new(total: usize) -> Self {
        Self::with_interval(total, Duration::from_secs(1))
    }

    pub(crate) fn with_interval(total: usize, interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            total,
            processed: 0,
            reports: 0,
            start: now,
            last_report: now,
            interval,
        }
    }

    fn report(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.start).as_secs_f64();
        let percentage = if self.total == 0 {
            100.0
        } else {
            100.0 * self.processed as f64 / self.total as f64
        };
        let rate = if elapsed > 0.0 {
            self.processed as f64 / elapsed
        } else {
            0.0
        };
        info!(
            "Processed {}/{} events ({percentage:.1}%) in {elapsed:.1}s, {rate:.0} events/s",
            self.processed, self.total
        );
        self.reports += 1;
        self.last_report = now;
    }
}

impl ProgressObserver for ProgressCounter {
    fn advance(&mut self) {
        self.processed += 1;
        let now = Instant::now();
        if now.duration_since(self.last_report) >= self.interval {
            self.report(now);
        }
    }

    fn finish(&mut self) {
        self.report(Instant::now());
    }
}
