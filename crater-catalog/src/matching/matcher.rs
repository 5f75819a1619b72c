//! All-pairs crater containment matching.
//!
//! For each child crater, in catalog order, parents are scanned in catalog
//! order and the **first** parent whose footprint strictly contains the child
//! center claims it. This is a first-match policy, not nearest-center or
//! smallest-parent: with nested or overlapping parents the result depends on
//! parent catalog order.
//!
//! The scan is O(children × parents). The parallel path shards children
//! across the rayon pool and merges per-child results in child order, so it
//! returns exactly what the sequential path returns.

use super::progress::{MatchProgress, NoProgress, ProgressObserver};
use crater_core::{Boundary, Crater, CraterId, OverlapMapping, SphericalBody};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Default number of children between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Body whose radius converts angles to kilometers.
    pub body: SphericalBody,
    /// Report progress every this many children. Zero disables periodic
    /// reports; the final report is always sent.
    pub progress_interval: usize,
    /// Shard children across the rayon thread pool.
    pub parallel: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            body: SphericalBody::MOON,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            parallel: false,
        }
    }
}

/// First parent, in slice order, that strictly contains `child`'s center.
pub fn find_parent<'p>(
    child: &Crater,
    parents: &'p [Crater],
    body: &SphericalBody,
) -> Option<&'p Crater> {
    parents
        .iter()
        .find(|parent| parent.contains_center_of(child, body, Boundary::Exclusive))
}

/// Matches on the Moon with default options and no progress output.
pub fn match_craters(children: &[Crater], parents: &[Crater]) -> OverlapMapping {
    Matcher::default().run(children, parents, &NoProgress)
}

#[derive(Debug, Clone, Default)]
pub struct Matcher {
    options: MatchOptions,
}

impl Matcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Builds the parent → children mapping.
    ///
    /// Each child lands under at most one parent. Children outside every
    /// parent are left out; an empty result is not an error.
    pub fn run(
        &self,
        children: &[Crater],
        parents: &[Crater],
        observer: &dyn ProgressObserver,
    ) -> OverlapMapping {
        tracing::info!(
            children = children.len(),
            parents = parents.len(),
            parallel = self.options.parallel,
            "matching craters on {}",
            self.options.body
        );

        let start = Instant::now();
        let assignments = if self.options.parallel {
            self.assign_parallel(children, parents, observer, start)
        } else {
            self.assign_sequential(children, parents, observer, start)
        };

        let mut mapping = OverlapMapping::new();
        let mut matched = 0usize;
        for (child, parent_id) in children.iter().zip(assignments) {
            if let Some(parent_id) = parent_id {
                mapping.insert(parent_id, child.id.clone());
                matched += 1;
            }
        }

        observer.on_finish(&MatchProgress::new(children.len(), children.len(), start.elapsed()));
        tracing::info!(
            matched,
            unmatched = children.len() - matched,
            parents_with_children = mapping.len(),
            "matching complete"
        );
        mapping
    }

    fn assign_sequential(
        &self,
        children: &[Crater],
        parents: &[Crater],
        observer: &dyn ProgressObserver,
        start: Instant,
    ) -> Vec<Option<CraterId>> {
        let total = children.len();
        children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                let parent_id = self.assign(child, parents);
                self.maybe_report(index + 1, total, observer, start);
                parent_id
            })
            .collect()
    }

    fn assign_parallel(
        &self,
        children: &[Crater],
        parents: &[Crater],
        observer: &dyn ProgressObserver,
        start: Instant,
    ) -> Vec<Option<CraterId>> {
        let total = children.len();
        let processed = AtomicUsize::new(0);
        // indexed collect keeps child order
        children
            .par_iter()
            .map(|child| {
                let parent_id = self.assign(child, parents);
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                self.maybe_report(done, total, observer, start);
                parent_id
            })
            .collect()
    }

    fn assign(&self, child: &Crater, parents: &[Crater]) -> Option<CraterId> {
        find_parent(child, parents, &self.options.body).map(|parent| parent.id.clone())
    }

    fn maybe_report(
        &self,
        processed: usize,
        total: usize,
        observer: &dyn ProgressObserver,
        start: Instant,
    ) {
        let interval = self.options.progress_interval;
        if interval > 0 && processed % interval == 0 && processed < total {
            observer.on_progress(&MatchProgress::new(processed, total, start.elapsed()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn crater(id: i64, lon: f64, lat: f64, diam: f64) -> Crater {
        Crater::new(id, lon, lat, diam).unwrap()
    }

    fn id(n: i64) -> CraterId {
        CraterId::Numeric(n)
    }

    #[derive(Default)]
    struct Recorder {
        reports: Mutex<Vec<usize>>,
        finished: Mutex<Option<usize>>,
    }

    impl ProgressObserver for Recorder {
        fn on_progress(&self, progress: &MatchProgress) {
            self.reports.lock().unwrap().push(progress.processed);
        }

        fn on_finish(&self, progress: &MatchProgress) {
            *self.finished.lock().unwrap() = Some(progress.processed);
        }
    }

    #[test]
    fn test_child_at_parent_center_is_matched() {
        let children = vec![crater(100, 10.0, 0.0, 1.0)];
        let parents = vec![crater(1, 10.0, 0.0, 20.0)];
        let mapping = match_craters(&children, &parents);
        assert!(mapping.contains_pair(&id(1), &id(100)));
    }

    #[test]
    fn test_empty_children_gives_empty_mapping() {
        let parents = vec![crater(1, 10.0, 0.0, 20.0)];
        let mapping = match_craters(&[], &parents);
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_empty_parents_gives_empty_mapping() {
        let children = vec![crater(100, 10.0, 0.0, 1.0)];
        assert!(match_craters(&children, &[]).is_empty());
    }

    #[test]
    fn test_first_parent_in_catalog_order_wins() {
        // child sits halfway between two overlapping parents
        let children = vec![crater(100, 0.0, 0.0, 1.0)];
        let west = crater(1, -0.2, 0.0, 40.0);
        let east = crater(2, 0.2, 0.0, 40.0);

        let mapping = match_craters(&children, &[west.clone(), east.clone()]);
        assert!(mapping.contains_pair(&id(1), &id(100)));
        assert!(!mapping.contains_pair(&id(2), &id(100)));

        let mapping = match_craters(&children, &[east, west]);
        assert!(mapping.contains_pair(&id(2), &id(100)));
        assert!(!mapping.contains_pair(&id(1), &id(100)));
    }

    #[test]
    fn test_each_child_assigned_once() {
        let children: Vec<Crater> = (0..20).map(|i| crater(100 + i, 0.01 * i as f64, 0.0, 1.0)).collect();
        let parents = vec![crater(1, 0.0, 0.0, 60.0), crater(2, 0.1, 0.0, 60.0)];
        let mapping = match_craters(&children, &parents);
        for child in &children {
            assert_eq!(mapping.parents_of(&child.id).count(), 1);
        }
        assert_eq!(mapping.association_count(), children.len());
    }

    #[test]
    fn test_child_outside_all_parents_is_unmatched() {
        let children = vec![crater(100, 45.0, 45.0, 1.0)];
        let parents = vec![crater(1, 0.0, 0.0, 100.0)];
        assert!(match_craters(&children, &parents).is_empty());
    }

    #[test]
    fn test_matching_across_longitude_conventions() {
        // child given in [-180, 180), parent in [0, 360)
        let children = vec![crater(100, -0.1, 0.0, 1.0)];
        let parents = vec![crater(1, 359.95, 0.0, 10.0)];
        let mapping = match_craters(&children, &parents);
        assert!(mapping.contains_pair(&id(1), &id(100)));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let children: Vec<Crater> = (0..500)
            .map(|i| crater(10_000 + i, (i as f64 * 0.73) % 360.0, ((i as f64 * 0.37) % 170.0) - 85.0, 2.0))
            .collect();
        let parents: Vec<Crater> = (0..60)
            .map(|i| crater(i, (i as f64 * 6.1) % 360.0, ((i as f64 * 2.9) % 160.0) - 80.0, 400.0))
            .collect();

        let sequential = Matcher::new(MatchOptions::default()).run(&children, &parents, &NoProgress);
        let parallel = Matcher::new(MatchOptions {
            parallel: true,
            ..MatchOptions::default()
        })
        .run(&children, &parents, &NoProgress);

        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_progress_reports_at_interval() {
        let children: Vec<Crater> = (0..25).map(|i| crater(i, 0.0, 0.0, 1.0)).collect();
        let recorder = Recorder::default();
        let matcher = Matcher::new(MatchOptions {
            progress_interval: 10,
            ..MatchOptions::default()
        });
        matcher.run(&children, &[], &recorder);

        assert_eq!(*recorder.reports.lock().unwrap(), vec![10, 20]);
        assert_eq!(*recorder.finished.lock().unwrap(), Some(25));
    }

    #[test]
    fn test_progress_interval_zero_only_finishes() {
        let children: Vec<Crater> = (0..5).map(|i| crater(i, 0.0, 0.0, 1.0)).collect();
        let recorder = Recorder::default();
        let matcher = Matcher::new(MatchOptions {
            progress_interval: 0,
            ..MatchOptions::default()
        });
        matcher.run(&children, &[], &recorder);

        assert!(recorder.reports.lock().unwrap().is_empty());
        assert_eq!(*recorder.finished.lock().unwrap(), Some(5));
    }

    #[test]
    fn test_custom_body_radius_changes_result() {
        // 0.1° is ~3.0 km on the Moon but ~5.9 km on Mars
        let children = vec![crater(100, 0.1, 0.0, 1.0)];
        let parents = vec![crater(1, 0.0, 0.0, 8.0)];

        let moon = Matcher::default().run(&children, &parents, &NoProgress);
        assert_eq!(moon.association_count(), 1);

        let mars = Matcher::new(MatchOptions {
            body: SphericalBody::MARS,
            ..MatchOptions::default()
        })
        .run(&children, &parents, &NoProgress);
        assert!(mars.is_empty());
    }
}
