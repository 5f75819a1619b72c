//! Containment matching and correction.
//!
//! - [`matcher`]: first-match assignment of child craters to parent craters
//! - [`corrector`]: re-validate an existing mapping with the inclusive radius rule
//! - [`progress`]: progress snapshots and observers for long matcher runs

pub mod corrector;
pub mod matcher;
pub mod progress;

pub use corrector::{correct, CorrectionReport, Corrector};
pub use matcher::{find_parent, match_craters, MatchOptions, Matcher, DEFAULT_PROGRESS_INTERVAL};
pub use progress::{estimate_remaining, LogProgress, MatchProgress, NoProgress, ProgressObserver};
