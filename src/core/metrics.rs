//! Delivery metrics for observability
//!
//! Counters describing how a delivery client is doing: successful and
//! failed deliveries, connection churn and bytes shipped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for delivery observability
///
/// # Example
///
/// ```
/// use rust_log_shipper::DeliveryMetrics;
///
/// let metrics = DeliveryMetrics::new();
///
/// metrics.record_delivered(128);
/// metrics.record_failed();
///
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.bytes_sent(), 128);
/// assert_eq!(metrics.success_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct DeliveryMetrics {
    /// Deliveries that ended in a complete write
    delivered: AtomicU64,

    /// Deliveries that exhausted their retry budget
    failed: AtomicU64,

    /// Connection attempts, successful or not
    connect_attempts: AtomicU64,

    /// Connection attempts that failed
    connect_failures: AtomicU64,

    /// Writes that failed on an established connection
    write_failures: AtomicU64,

    /// Payload bytes written by successful deliveries
    bytes_sent: AtomicU64,
}

impl DeliveryMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            delivered: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            connect_attempts: AtomicU64::new(0),
            connect_failures: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn connect_attempts(&self) -> u64 {
        self.connect_attempts.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn connect_failures(&self) -> u64 {
        self.connect_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Record a completed delivery of `bytes` bytes
    #[inline]
    pub fn record_delivered(&self, bytes: usize) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_failed(&self) -> u64 {
        self.failed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_connect_attempt(&self) -> u64 {
        self.connect_attempts.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_connect_failure(&self) -> u64 {
        self.connect_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of finished deliveries that succeeded (0.0 - 100.0)
    ///
    /// Returns 100.0 if nothing has been delivered or failed yet.
    pub fn success_rate(&self) -> f64 {
        let delivered = self.delivered() as f64;
        let total = delivered + self.failed() as f64;
        if total == 0.0 {
            100.0
        } else {
            (delivered / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.delivered.store(0, Ordering::Relaxed);
        self.failed.store(0, Ordering::Relaxed);
        self.connect_attempts.store(0, Ordering::Relaxed);
        self.connect_failures.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.bytes_sent.store(0, Ordering::Relaxed);
    }
}

impl Default for DeliveryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DeliveryMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            delivered: AtomicU64::new(self.delivered()),
            failed: AtomicU64::new(self.failed()),
            connect_attempts: AtomicU64::new(self.connect_attempts()),
            connect_failures: AtomicU64::new(self.connect_failures()),
            write_failures: AtomicU64::new(self.write_failures()),
            bytes_sent: AtomicU64::new(self.bytes_sent()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = DeliveryMetrics::new();
        assert_eq!(metrics.delivered(), 0);
        assert_eq!(metrics.failed(), 0);
        assert_eq!(metrics.connect_attempts(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.success_rate(), 100.0);
    }

    #[test]
    fn test_metrics_success_rate() {
        let metrics = DeliveryMetrics::new();
        for _ in 0..3 {
            metrics.record_delivered(10);
        }
        metrics.record_failed();

        assert_eq!(metrics.bytes_sent(), 30);
        assert_eq!(metrics.success_rate(), 75.0);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = DeliveryMetrics::new();
        metrics.record_connect_attempt();
        metrics.record_connect_failure();
        metrics.record_write_failure();

        metrics.reset();

        assert_eq!(metrics.connect_attempts(), 0);
        assert_eq!(metrics.connect_failures(), 0);
        assert_eq!(metrics.write_failures(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = DeliveryMetrics::new();
        metrics.record_connect_attempt();

        let snapshot = metrics.clone();
        metrics.record_connect_attempt();

        assert_eq!(snapshot.connect_attempts(), 1);
        assert_eq!(metrics.connect_attempts(), 2);
    }
}
