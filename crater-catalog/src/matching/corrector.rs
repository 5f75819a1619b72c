//! Re-validation of an existing overlap mapping.
//!
//! Mappings produced by an earlier, faulty pass compared child distances
//! against the parent's full diameter instead of its radius. The corrector
//! recomputes every association against the parent's true geometry and keeps
//! a child only when `distance <= diameter / 2`. Parents left without children
//! are dropped.
//!
//! This is a pure function of (mapping, catalogs), independent of the matcher,
//! and idempotent: correcting a corrected mapping changes nothing. Ids must be
//! unique within each catalog; a repeated id aborts the correction.

use crater_core::{Boundary, Crater, CraterError, CraterId, CraterResult, OverlapMapping, SphericalBody};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Counts describing what a correction pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionReport {
    pub parents_in: usize,
    pub parents_out: usize,
    pub children_in: usize,
    pub children_kept: usize,
    /// Children whose center lies outside the parent radius.
    pub children_outside: usize,
    /// Child ids with no record in the child catalog.
    pub children_missing: usize,
}

impl CorrectionReport {
    pub fn children_dropped(&self) -> usize {
        self.children_outside + self.children_missing
    }

    pub fn parents_dropped(&self) -> usize {
        self.parents_in - self.parents_out
    }
}

impl fmt::Display for CorrectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parents in: {}", self.parents_in)?;
        writeln!(f, "Parents kept: {}", self.parents_out)?;
        writeln!(f, "Children in: {}", self.children_in)?;
        writeln!(f, "Children kept: {}", self.children_kept)?;
        writeln!(f, "Children outside parent radius: {}", self.children_outside)?;
        write!(f, "Children missing from catalog: {}", self.children_missing)
    }
}

/// Corrects `mapping` on the Moon.
///
/// Fails with [`CraterError::DanglingParent`] if a parent id in the mapping has
/// no record in `parents`, and with [`CraterError::DuplicateId`] if either
/// catalog repeats an id.
pub fn correct(
    mapping: &OverlapMapping,
    children: &[Crater],
    parents: &[Crater],
) -> CraterResult<OverlapMapping> {
    Corrector::default()
        .correct_with_report(mapping, children, parents)
        .map(|(corrected, _)| corrected)
}

#[derive(Debug, Clone, Default)]
pub struct Corrector {
    body: SphericalBody,
}

impl Corrector {
    pub fn new(body: SphericalBody) -> Self {
        Self { body }
    }

    pub fn correct(
        &self,
        mapping: &OverlapMapping,
        children: &[Crater],
        parents: &[Crater],
    ) -> CraterResult<OverlapMapping> {
        self.correct_with_report(mapping, children, parents)
            .map(|(corrected, _)| corrected)
    }

    pub fn correct_with_report(
        &self,
        mapping: &OverlapMapping,
        children: &[Crater],
        parents: &[Crater],
    ) -> CraterResult<(OverlapMapping, CorrectionReport)> {
        let parent_index = index_by_id(parents, "parent")?;
        let child_index = index_by_id(children, "child")?;

        let mut corrected = OverlapMapping::new();
        let mut report = CorrectionReport {
            parents_in: mapping.len(),
            children_in: mapping.association_count(),
            ..CorrectionReport::default()
        };

        for (parent_id, child_ids) in mapping {
            let parent = parent_index
                .get(parent_id)
                .ok_or_else(|| CraterError::dangling_parent(parent_id))?;

            let mut kept = BTreeSet::new();
            for child_id in child_ids {
                let Some(child) = child_index.get(child_id) else {
                    tracing::warn!(parent = %parent_id, child = %child_id, "child not in catalog, dropping");
                    report.children_missing += 1;
                    continue;
                };
                if parent.contains_center_of(child, &self.body, Boundary::Inclusive) {
                    kept.insert(child_id.clone());
                } else {
                    report.children_outside += 1;
                }
            }

            report.children_kept += kept.len();
            if kept.is_empty() {
                tracing::debug!(parent = %parent_id, "no children left, dropping parent");
            }
            corrected.set_children(parent_id.clone(), kept);
        }

        report.parents_out = corrected.len();
        tracing::info!(
            parents_in = report.parents_in,
            parents_out = report.parents_out,
            children_dropped = report.children_dropped(),
            "correction complete"
        );
        Ok((corrected, report))
    }
}

/// Indexes a catalog by id. A repeated id is an error.
fn index_by_id<'c>(
    craters: &'c [Crater],
    catalog: &str,
) -> CraterResult<HashMap<&'c CraterId, &'c Crater>> {
    let mut index = HashMap::with_capacity(craters.len());
    for crater in craters {
        if index.insert(&crater.id, crater).is_some() {
            return Err(CraterError::duplicate_id(catalog, &crater.id));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crater_core::distance;

    fn crater(id: i64, lon: f64, lat: f64, diam: f64) -> Crater {
        Crater::new(id, lon, lat, diam).unwrap()
    }

    fn id(n: i64) -> CraterId {
        CraterId::Numeric(n)
    }

    /// Children east of the parent center at the given great-circle distances.
    fn children_at(distances_km: &[f64]) -> Vec<Crater> {
        let km_per_deg = distance(
            crater_core::SurfacePoint::new(0.0, 0.0),
            crater_core::SurfacePoint::new(1.0, 0.0),
        );
        distances_km
            .iter()
            .enumerate()
            .map(|(i, d)| crater(100 + i as i64, d / km_per_deg, 0.0, 0.5))
            .collect()
    }

    #[test]
    fn test_rejects_children_admitted_by_diameter_as_radius() {
        let parents = vec![crater(1, 0.0, 0.0, 10.0)];
        let children = children_at(&[1.0, 4.5, 6.0, 9.5]);
        // a buggy pass compared against the full 10 km diameter
        let buggy: OverlapMapping = children.iter().map(|c| (id(1), c.id.clone())).collect();

        let corrected = correct(&buggy, &children, &parents).unwrap();
        assert!(corrected.contains_pair(&id(1), &id(100)));
        assert!(corrected.contains_pair(&id(1), &id(101)));
        assert!(!corrected.contains_pair(&id(1), &id(102)));
        assert!(!corrected.contains_pair(&id(1), &id(103)));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let parent = crater(1, 0.0, 0.0, 10.0);
        let child = crater(100, 0.5, 0.0, 1.0);
        // diameter chosen so the child sits exactly on the rim
        let on_rim = Crater {
            diameter_km: 2.0 * distance(child.center, parent.center),
            ..parent
        };
        let mapping: OverlapMapping = [(id(1), id(100))].into_iter().collect();

        let corrected = correct(&mapping, &[child.clone()], &[on_rim.clone()]).unwrap();
        assert!(corrected.contains_pair(&id(1), &id(100)));

        // the matcher's strict test rejects the same configuration
        assert!(!on_rim.contains_center_of(&child, &SphericalBody::MOON, Boundary::Exclusive));
    }

    #[test]
    fn test_drops_parent_with_no_children_left() {
        let parents = vec![crater(1, 0.0, 0.0, 10.0), crater(2, 90.0, 0.0, 10.0)];
        let children = vec![crater(100, 0.0, 0.0, 1.0), crater(101, 0.0, 45.0, 1.0)];
        let mapping: OverlapMapping = [(id(1), id(100)), (id(2), id(101))].into_iter().collect();

        let (corrected, report) = Corrector::default()
            .correct_with_report(&mapping, &children, &parents)
            .unwrap();
        assert_eq!(corrected.len(), 1);
        assert!(corrected.children(&id(2)).is_none());
        assert_eq!(report.parents_dropped(), 1);
        assert_eq!(report.children_outside, 1);
    }

    #[test]
    fn test_dangling_parent_is_fatal() {
        let children = vec![crater(100, 0.0, 0.0, 1.0)];
        let parents = vec![crater(1, 0.0, 0.0, 10.0)];
        let mapping: OverlapMapping = [(id(1), id(100)), (id(99), id(100))].into_iter().collect();

        let err = correct(&mapping, &children, &parents).unwrap_err();
        assert_eq!(err, CraterError::DanglingParent { id: "99".to_string() });
    }

    #[test]
    fn test_duplicate_parent_id_is_fatal() {
        // the matcher places the child under the second record with id 7
        let children = vec![crater(100, 50.0, 0.0, 1.0)];
        let parents = vec![crater(7, 0.0, 0.0, 10.0), crater(7, 50.0, 0.0, 10.0)];
        let mapping: OverlapMapping = [(id(7), id(100))].into_iter().collect();

        let err = correct(&mapping, &children, &parents).unwrap_err();
        assert_eq!(
            err,
            CraterError::DuplicateId {
                catalog: "parent".to_string(),
                id: "7".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_child_id_is_fatal() {
        let children = vec![crater(100, 0.0, 0.0, 1.0), crater(100, 0.0, 0.1, 1.0)];
        let parents = vec![crater(1, 0.0, 0.0, 10.0)];
        let mapping: OverlapMapping = [(id(1), id(100))].into_iter().collect();

        let err = correct(&mapping, &children, &parents).unwrap_err();
        assert!(matches!(err, CraterError::DuplicateId { ref catalog, .. } if catalog == "child"));
    }

    #[test]
    fn test_missing_child_is_dropped_and_counted() {
        let children = vec![crater(100, 0.0, 0.0, 1.0)];
        let parents = vec![crater(1, 0.0, 0.0, 10.0)];
        let mapping: OverlapMapping = [(id(1), id(100)), (id(1), id(555))].into_iter().collect();

        let (corrected, report) = Corrector::default()
            .correct_with_report(&mapping, &children, &parents)
            .unwrap();
        assert_eq!(corrected.association_count(), 1);
        assert_eq!(report.children_missing, 1);
        assert_eq!(report.children_kept, 1);
    }

    #[test]
    fn test_correct_is_idempotent() {
        let parents = vec![crater(1, 0.0, 0.0, 10.0), crater(2, 10.0, 10.0, 40.0)];
        let mut children = children_at(&[0.5, 4.0, 5.5, 8.0]);
        children.push(crater(200, 10.1, 10.0, 1.0));
        children.push(crater(201, 11.0, 10.0, 1.0));
        let mapping: OverlapMapping = children
            .iter()
            .map(|c| {
                let parent = match c.id {
                    CraterId::Numeric(n) if n >= 200 => 2,
                    _ => 1,
                };
                (id(parent), c.id.clone())
            })
            .collect();

        let once = correct(&mapping, &children, &parents).unwrap();
        let twice = correct(&once, &children, &parents).unwrap();
        assert_eq!(once, twice);
        assert!(once.association_count() < mapping.association_count());
    }

    #[test]
    fn test_empty_mapping_corrects_to_empty() {
        let corrected = correct(&OverlapMapping::new(), &[], &[]).unwrap();
        assert!(corrected.is_empty());
    }
}
