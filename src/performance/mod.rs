//! # Tick Performance Metrics
//!
//! Tracks how long each simulation tick takes over a rolling window, so a
//! host can show tick throughput next to the grid.
//!
//! ## Usage
//!
//! ```rust
//! use lifestamp::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//!
//! monitor.begin_tick();
//! // ... run a tick ...
//! monitor.end_tick();
//!
//! println!("{:.2} ms/tick", monitor.metrics().tick_time_ms);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Aggregated timings over the current window
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    /// Ticks per second the update step could sustain at the average duration
    pub ticks_per_second: f32,
    /// Average tick duration in milliseconds
    pub tick_time_ms: f32,
    /// Shortest tick in the window
    pub min_tick_time_ms: f32,
    /// Longest tick in the window
    pub max_tick_time_ms: f32,
    /// Ticks recorded since creation or the last reset
    pub total_ticks: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            ticks_per_second: 0.0,
            tick_time_ms: 0.0,
            min_tick_time_ms: f32::MAX,
            max_tick_time_ms: 0.0,
            total_ticks: 0,
        }
    }
}

/// Rolling-window tick timer
#[derive(Debug)]
pub struct PerformanceMonitor {
    /// Ring buffer of recent tick durations
    tick_times: VecDeque<Duration>,
    max_samples: usize,
    tick_start: Option<Instant>,
    current_metrics: PerformanceMetrics,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_window(120)
    }

    /// Monitor averaging over the last `max_samples` ticks
    pub fn with_window(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            tick_times: VecDeque::with_capacity(max_samples),
            max_samples,
            tick_start: None,
            current_metrics: PerformanceMetrics::default(),
        }
    }

    pub fn begin_tick(&mut self) {
        self.tick_start = Some(Instant::now());
    }

    /// Close the tick opened by [`begin_tick`](Self::begin_tick)
    pub fn end_tick(&mut self) {
        if let Some(start) = self.tick_start.take() {
            self.record_tick(start.elapsed());
        }
    }

    /// Add a tick duration sample
    pub fn record_tick(&mut self, duration: Duration) {
        if self.tick_times.len() >= self.max_samples {
            self.tick_times.pop_front();
        }
        self.tick_times.push_back(duration);
        self.current_metrics.total_ticks += 1;
        self.update_metrics();
    }

    fn update_metrics(&mut self) {
        if self.tick_times.is_empty() {
            return;
        }

        let total_time: Duration = self.tick_times.iter().sum();
        let avg_ms = (total_time / self.tick_times.len() as u32).as_secs_f32() * 1000.0;

        self.current_metrics.tick_time_ms = avg_ms;
        self.current_metrics.ticks_per_second = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };

        if let (Some(min), Some(max)) = (self.tick_times.iter().min(), self.tick_times.iter().max())
        {
            self.current_metrics.min_tick_time_ms = min.as_secs_f32() * 1000.0;
            self.current_metrics.max_tick_time_ms = max.as_secs_f32() * 1000.0;
        }
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    /// Tick durations in milliseconds, oldest first
    pub fn tick_time_history(&self) -> Vec<f32> {
        self.tick_times
            .iter()
            .map(|duration| duration.as_secs_f32() * 1000.0)
            .collect()
    }

    pub fn reset(&mut self) {
        self.tick_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.tick_start = None;
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_statistics() {
        let mut monitor = PerformanceMonitor::with_window(3);
        for ms in [2, 4, 6, 8] {
            monitor.record_tick(Duration::from_millis(ms));
        }

        let metrics = monitor.metrics();
        assert_eq!(metrics.total_ticks, 4);
        // window keeps 4, 6, 8
        assert!((metrics.tick_time_ms - 6.0).abs() < 1e-3);
        assert!((metrics.min_tick_time_ms - 4.0).abs() < 1e-3);
        assert!((metrics.max_tick_time_ms - 8.0).abs() < 1e-3);
        assert_eq!(monitor.tick_time_history().len(), 3);
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut monitor = PerformanceMonitor::new();
        monitor.end_tick();
        assert_eq!(monitor.metrics().total_ticks, 0);

        monitor.begin_tick();
        monitor.end_tick();
        assert_eq!(monitor.metrics().total_ticks, 1);

        monitor.reset();
        assert_eq!(monitor.metrics(), &PerformanceMetrics::default());
    }
}
