//! Terminal progress bar for matcher runs

use crater_catalog::matching::{MatchProgress, ProgressObserver};
use indicatif::{ProgressBar, ProgressStyle};

pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {percent}% ({msg})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Self { bar }
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&self, progress: &MatchProgress) {
        self.bar.set_position(progress.processed as u64);
        let eta = match progress.eta {
            Some(eta) => format!("eta {:.0}s", eta.as_secs_f64()),
            None => "eta unknown".to_string(),
        };
        self.bar.set_message(eta);
    }

    fn on_finish(&self, progress: &MatchProgress) {
        self.bar.set_position(progress.processed as u64);
        self.bar.finish_with_message(format!(
            "done in {:.1}s",
            progress.elapsed.as_secs_f64()
        ));
    }
}
