//! Parent → children overlap mappings.
//!
//! An [`OverlapMapping`] associates each parent crater id with the set of child
//! crater ids found inside it. Keys and sets are ordered, so iteration and
//! serialization are deterministic regardless of insertion order.
//!
//! Serialized with serde as a map from parent id to a list of child ids:
//!
//! ```json
//! {
//!     "1207": ["00-1-000010", "00-1-000011"],
//!     "1301": ["03-1-004411"]
//! }
//! ```

use crate::crater::CraterId;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlapMapping {
    entries: BTreeMap<CraterId, BTreeSet<CraterId>>,
}

impl OverlapMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `child` inside `parent`. Returns `false` if the pair was
    /// already present.
    pub fn insert(&mut self, parent: CraterId, child: CraterId) -> bool {
        self.entries.entry(parent).or_default().insert(child)
    }

    /// Replaces the child set of `parent`. An empty set removes the entry.
    pub fn set_children(&mut self, parent: CraterId, children: BTreeSet<CraterId>) {
        if children.is_empty() {
            self.entries.remove(&parent);
        } else {
            self.entries.insert(parent, children);
        }
    }

    pub fn children(&self, parent: &CraterId) -> Option<&BTreeSet<CraterId>> {
        self.entries.get(parent)
    }

    pub fn contains_pair(&self, parent: &CraterId, child: &CraterId) -> bool {
        self.entries
            .get(parent)
            .is_some_and(|children| children.contains(child))
    }

    /// Parents containing `child`. A raw matcher result yields at most one.
    pub fn parents_of<'a>(&'a self, child: &'a CraterId) -> impl Iterator<Item = &'a CraterId> + 'a {
        self.entries
            .iter()
            .filter(move |(_, children)| children.contains(child))
            .map(|(parent, _)| parent)
    }

    /// Number of parent entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of parent/child associations.
    pub fn association_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CraterId, BTreeSet<CraterId>> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a OverlapMapping {
    type Item = (&'a CraterId, &'a BTreeSet<CraterId>);
    type IntoIter = btree_map::Iter<'a, CraterId, BTreeSet<CraterId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for OverlapMapping {
    type Item = (CraterId, BTreeSet<CraterId>);
    type IntoIter = btree_map::IntoIter<CraterId, BTreeSet<CraterId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(CraterId, CraterId)> for OverlapMapping {
    fn from_iter<I: IntoIterator<Item = (CraterId, CraterId)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (parent, child) in iter {
            mapping.insert(parent, child);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> CraterId {
        CraterId::parse(s).unwrap()
    }

    #[test]
    fn test_insert_has_set_semantics() {
        let mut mapping = OverlapMapping::new();
        assert!(mapping.insert(id("1"), id("a")));
        assert!(!mapping.insert(id("1"), id("a")));
        assert!(mapping.insert(id("1"), id("b")));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.association_count(), 2);
    }

    #[test]
    fn test_set_children_empty_removes_parent() {
        let mut mapping: OverlapMapping = [(id("1"), id("a")), (id("2"), id("b"))].into_iter().collect();
        mapping.set_children(id("1"), BTreeSet::new());
        assert_eq!(mapping.len(), 1);
        assert!(mapping.children(&id("1")).is_none());
    }

    #[test]
    fn test_parents_of() {
        let mapping: OverlapMapping = [(id("1"), id("a")), (id("2"), id("a")), (id("2"), id("b"))]
            .into_iter()
            .collect();
        let parents: Vec<_> = mapping.parents_of(&id("a")).cloned().collect();
        assert_eq!(parents, vec![id("1"), id("2")]);
        assert!(mapping.contains_pair(&id("2"), &id("b")));
        assert!(!mapping.contains_pair(&id("1"), &id("b")));
    }

    #[test]
    fn test_json_shape_uses_text_keys() {
        let mapping: OverlapMapping = [(id("1207"), id("00-1-000010")), (id("1207"), id("5"))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"1207":[5,"00-1-000010"]}"#);

        let back: OverlapMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mapping);
    }
}
