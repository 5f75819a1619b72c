//! Progress reporting for long matcher runs.
//!
//! Reports are advisory. The matcher calls a [`ProgressObserver`] every
//! `progress_interval` children and once more when it finishes; observers must
//! not influence the result.

use std::fmt;
use std::time::Duration;

/// Snapshot of a matcher run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchProgress {
    /// Children scanned so far.
    pub processed: usize,
    /// Children in the catalog.
    pub total: usize,
    /// `processed / total` as a percentage.
    pub percent: f64,
    pub elapsed: Duration,
    /// Linear extrapolation of the remaining time; `None` until something
    /// has been processed.
    pub eta: Option<Duration>,
}

impl MatchProgress {
    pub fn new(processed: usize, total: usize, elapsed: Duration) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            processed as f64 / total as f64 * 100.0
        };
        Self {
            processed,
            total,
            percent,
            elapsed,
            eta: estimate_remaining(elapsed, percent),
        }
    }
}

impl fmt::Display for MatchProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}, {:.1}%, elapsed: {:.0}s",
            self.processed,
            self.total,
            self.percent,
            self.elapsed.as_secs_f64()
        )?;
        match self.eta {
            Some(eta) => write!(f, ", eta: {:.0}s", eta.as_secs_f64()),
            None => write!(f, ", eta: unknown"),
        }
    }
}

/// Remaining time assuming the rate so far holds.
///
/// `elapsed / percent * (100 - percent)`. Returns `None` when `percent` is
/// not positive, since no rate can be derived yet.
pub fn estimate_remaining(elapsed: Duration, percent: f64) -> Option<Duration> {
    if percent.is_nan() || percent <= 0.0 {
        return None;
    }
    let remaining_percent = (100.0 - percent).max(0.0);
    let secs = elapsed.as_secs_f64() / percent * remaining_percent;
    Duration::try_from_secs_f64(secs).ok()
}

/// Receives progress snapshots from the matcher.
///
/// `Sync` because the parallel matcher reports from worker threads.
pub trait ProgressObserver: Sync {
    fn on_progress(&self, progress: &MatchProgress);

    fn on_finish(&self, progress: &MatchProgress) {
        self.on_progress(progress);
    }
}

/// Discards all reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: &MatchProgress) {}

    fn on_finish(&self, _progress: &MatchProgress) {}
}

/// Emits each report as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_progress(&self, progress: &MatchProgress) {
        tracing::info!(
            processed = progress.processed,
            total = progress.total,
            "{}",
            progress
        );
    }

    fn on_finish(&self, progress: &MatchProgress) {
        tracing::info!(
            processed = progress.processed,
            elapsed_s = progress.elapsed.as_secs_f64(),
            "matching finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eta_none_at_zero_percent() {
        assert_eq!(estimate_remaining(Duration::from_secs(12), 0.0), None);
        assert_eq!(estimate_remaining(Duration::ZERO, 0.0), None);
        assert_eq!(estimate_remaining(Duration::from_secs(1), f64::NAN), None);
    }

    #[test]
    fn test_eta_linear_extrapolation() {
        let eta = estimate_remaining(Duration::from_secs(10), 25.0).unwrap();
        assert!((eta.as_secs_f64() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_eta_zero_when_complete() {
        let eta = estimate_remaining(Duration::from_secs(10), 100.0).unwrap();
        assert_eq!(eta, Duration::ZERO);
    }

    #[test]
    fn test_progress_snapshot() {
        let progress = MatchProgress::new(0, 4000, Duration::from_millis(5));
        assert_eq!(progress.percent, 0.0);
        assert!(progress.eta.is_none());

        let progress = MatchProgress::new(1000, 4000, Duration::from_secs(20));
        assert!((progress.percent - 25.0).abs() < 1e-12);
        assert!((progress.eta.unwrap().as_secs_f64() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_empty_catalog_is_complete() {
        let progress = MatchProgress::new(0, 0, Duration::ZERO);
        assert_eq!(progress.percent, 100.0);
        assert_eq!(progress.eta, Some(Duration::ZERO));
    }

    #[test]
    fn test_progress_display() {
        let progress = MatchProgress::new(1000, 4000, Duration::from_secs(20));
        assert_eq!(progress.to_string(), "1000/4000, 25.0%, elapsed: 20s, eta: 60s");
    }
}
