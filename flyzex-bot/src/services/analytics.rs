//! Event analytics: named counters and timing aggregates, flushed to the log
//! on a fixed interval.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

/// Sink for bot events. Handlers only know this trait; tests use
/// [`NullAnalytics`].
#[async_trait]
pub trait Analytics: Send + Sync {
    async fn record(&self, event: &str);
    async fn record_duration(&self, event: &str, elapsed: Duration);
}

#[derive(Default)]
struct AnalyticsState {
    counters: HashMap<String, u64>,
    timings: HashMap<String, (u64, Duration)>,
}

/// Collects counters in memory and logs a snapshot every flush interval.
pub struct AnalyticsTracker {
    state: Mutex<AnalyticsState>,
    flush_interval: Duration,
}

impl AnalyticsTracker {
    pub fn new(flush_interval_secs: f64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(AnalyticsState::default()),
            flush_interval: Duration::from_secs_f64(flush_interval_secs.max(1.0)),
        })
    }

    /// Spawns the periodic flush task. Dropping the handle on shutdown stops
    /// flushing; a final explicit [`flush`](Self::flush) drains what is left.
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let tracker = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tracker.flush_interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                tracker.flush().await;
            }
        })
    }

    /// Logs and clears the collected counters.
    pub async fn flush(&self) {
        let state = {
            let mut state = self.state.lock().await;
            std::mem::take(&mut *state)
        };
        if state.counters.is_empty() && state.timings.is_empty() {
            return;
        }
        let mut counters: Vec<_> = state.counters.into_iter().collect();
        counters.sort();
        for (event, count) in counters {
            info!(target: "analytics", event = %event, count, "event counter");
        }
        let mut timings: Vec<_> = state.timings.into_iter().collect();
        timings.sort_by(|a, b| a.0.cmp(&b.0));
        for (event, (count, total)) in timings {
            let average_ms = total.as_millis() as f64 / count.max(1) as f64;
            info!(target: "analytics", event = %event, count, average_ms, "event timing");
        }
    }
}

#[async_trait]
impl Analytics for AnalyticsTracker {
    async fn record(&self, event: &str) {
        let mut state = self.state.lock().await;
        *state.counters.entry(event.to_string()).or_default() += 1;
    }

    async fn record_duration(&self, event: &str, elapsed: Duration) {
        let mut state = self.state.lock().await;
        let entry = state.timings.entry(event.to_string()).or_default();
        entry.0 += 1;
        entry.1 += elapsed;
    }
}

/// Discards every event.
pub struct NullAnalytics;

#[async_trait]
impl Analytics for NullAnalytics {
    async fn record(&self, _event: &str) {}
    async fn record_duration(&self, _event: &str, _elapsed: Duration) {}
}
