//! Ancestor/descendant reachability between visible classifiers.

use log::{debug, warn};

use trellis_core::{identifier::ClassifierIndex, semantic::VisibleSet};

/// Reachability matrix of containment relationships.
///
/// Built from the direct containment relationships of a visible set plus a
/// bounded number of propagation passes. Every pass extends each known chain
/// by one more level, so chains deeper than `passes + 1` are not fully closed.
/// Layout behavior of existing diagrams depends on this bound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainmentCache {
    size: usize,
    matrix: Vec<bool>,
}

impl ContainmentCache {
    /// Builds the cache from the containment relationships of `set`
    pub fn build(set: &VisibleSet, passes: usize) -> Self {
        let size = set.classifiers().len();
        let mut edges = Vec::new();
        for relationship in set.relationships() {
            if !relationship.kind().is_containment() {
                continue;
            }
            let parent = set.classifier_position(relationship.from_classifier());
            let child = set.classifier_position(relationship.to_classifier());
            match (parent, child) {
                (Some(parent), Some(child)) if parent == child => {
                    warn!(relationship = relationship.id().value(); "Self containment ignored");
                }
                (Some(parent), Some(child)) => edges.push((parent, child)),
                _ => {
                    debug!(relationship = relationship.id().value(); "Containment with invisible end ignored");
                }
            }
        }
        Self::from_edges(size, &edges, passes)
    }

    /// Builds the cache from `(parent, child)` position pairs
    pub fn from_edges(size: usize, edges: &[(usize, usize)], passes: usize) -> Self {
        let mut cache = Self {
            size,
            matrix: vec![false; size * size],
        };
        for &(parent, child) in edges {
            if parent < size && child < size && parent != child {
                cache.matrix[parent * size + child] = true;
            }
        }
        for pass in 0..passes {
            let mut changed = false;
            for &(parent, child) in edges {
                if parent >= size || child >= size || parent == child {
                    continue;
                }
                for ancestor in 0..size {
                    if ancestor != child
                        && cache.matrix[ancestor * size + parent]
                        && !cache.matrix[ancestor * size + child]
                    {
                        cache.matrix[ancestor * size + child] = true;
                        changed = true;
                    }
                }
            }
            if !changed {
                debug!(pass; "Containment cache stable");
                break;
            }
        }
        cache
    }

    /// Number of classifiers covered by the cache
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// True if `ancestor` (transitively) contains `descendant`
    pub fn is_ancestor(&self, ancestor: ClassifierIndex, descendant: ClassifierIndex) -> bool {
        let (a, d) = (ancestor.index(), descendant.index());
        a < self.size && d < self.size && self.matrix[a * self.size + d]
    }

    /// True for the same classifier or an ancestor/descendant pair in either direction
    pub fn is_related(&self, a: ClassifierIndex, b: ClassifierIndex) -> bool {
        a == b || self.is_ancestor(a, b) || self.is_ancestor(b, a)
    }

    /// Descendants of `ancestor` in index order
    pub fn descendants(&self, ancestor: ClassifierIndex) -> impl Iterator<Item = ClassifierIndex> + '_ {
        let a = ancestor.index();
        (0..self.size)
            .filter(move |&d| a < self.size && self.matrix[a * self.size + d])
            .map(ClassifierIndex::new)
    }

    pub fn descendant_count(&self, ancestor: ClassifierIndex) -> usize {
        self.descendants(ancestor).count()
    }
}
