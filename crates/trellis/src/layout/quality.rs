//! Overlap penalties ("debts") between layout candidates and their environment.
//!
//! Every function returns a non-negative value that grows with the overlapped
//! area and is exactly `0.0` when there is no conflict. Debts are only ever
//! compared with each other. Connectors are approximated by their segments
//! drawn as thin rectangles of the configured line width.

use trellis_core::{
    geometry::{Bounds, Connector},
    identifier::ClassifierIndex,
};

use crate::layout::{
    containment::ContainmentCache,
    visible_set::{ClassifierLayout, DiagramLayout, FeatureLayout, RelationshipLayout},
};

/// Weight of area lying outside the diagram's draw area
pub const OUTSIDE_WEIGHT: f64 = 32.0;
/// Weight of overlap with a classifier that is already placed
pub const PLACED_WEIGHT: f64 = 4.0;
/// Weight of overlap with a classifier that may still move
pub const UNPLACED_WEIGHT: f64 = 1.0;

/// Which classifiers a phase has already frozen, and how they nest.
#[derive(Debug, Clone)]
pub struct ProcessingState<'c> {
    placed: Vec<bool>,
    containment: &'c ContainmentCache,
}

impl<'c> ProcessingState<'c> {
    /// State with no classifier placed yet
    pub fn new(containment: &'c ContainmentCache) -> Self {
        Self {
            placed: vec![false; containment.len()],
            containment,
        }
    }

    pub fn mark_placed(&mut self, index: ClassifierIndex) {
        if let Some(placed) = self.placed.get_mut(index.index()) {
            *placed = true;
        }
    }

    pub fn is_placed(&self, index: ClassifierIndex) -> bool {
        self.placed.get(index.index()).copied().unwrap_or(false)
    }

    pub fn containment(&self) -> &'c ContainmentCache {
        self.containment
    }
}

/// Area of a classifier envelope outside the draw area
pub fn debts_class_diag(probe: &Bounds, diagram: &DiagramLayout) -> f64 {
    OUTSIDE_WEIGHT * probe.outside_area(&diagram.draw_area())
}

/// Overlap of two classifier envelopes
pub fn debts_class_class(probe: &Bounds, other: &Bounds) -> f64 {
    probe.intersect_area(other)
}

/// Overlap of two classifier envelopes, weighted by processing state.
///
/// Overlap between ancestor and descendant is free; overlap with a placed
/// classifier weighs [`PLACED_WEIGHT`], with an unplaced one [`UNPLACED_WEIGHT`].
pub fn debts_class_class_in_state(
    state: &ProcessingState<'_>,
    probe_index: ClassifierIndex,
    probe: &Bounds,
    other_index: ClassifierIndex,
    other: &Bounds,
) -> f64 {
    if state.containment().is_related(probe_index, other_index) {
        return 0.0;
    }
    let weight = if state.is_placed(other_index) {
        PLACED_WEIGHT
    } else {
        UNPLACED_WEIGHT
    };
    weight * debts_class_class(probe, other)
}

pub fn debts_feat_diag(probe: &Bounds, diagram: &DiagramLayout) -> f64 {
    OUTSIDE_WEIGHT * probe.outside_area(&diagram.draw_area())
}

/// Overlap of a feature with a classifier it does not belong to
pub fn debts_feat_class(probe: &Bounds, classifier: &ClassifierLayout) -> f64 {
    probe.intersect_area(&classifier.envelope())
}

pub fn debts_feat_feat(probe: &Bounds, other: &FeatureLayout) -> f64 {
    probe.intersect_area(&other.symbol_box())
}

/// Overlap of a feature with a drawn connector
pub fn debts_feat_rel(probe: &Bounds, relationship: &RelationshipLayout, line_width: f64) -> f64 {
    if !relationship.is_drawn() {
        return 0.0;
    }
    relationship.shape().overlap_area(probe, line_width)
}

/// Connector area outside the draw area
pub fn debts_conn_diag(probe: &Connector, diagram: &DiagramLayout, line_width: f64) -> f64 {
    let draw_area = diagram.draw_area();
    OUTSIDE_WEIGHT
        * probe
            .segments()
            .iter()
            .map(|segment| segment.thick_bounds(line_width).outside_area(&draw_area))
            .sum::<f64>()
}

/// Connector area crossing a classifier's symbol
pub fn debts_conn_class(probe: &Connector, classifier: &ClassifierLayout, line_width: f64) -> f64 {
    probe.overlap_area(&classifier.symbol_box(), line_width)
}

pub fn debts_conn_feat(probe: &Connector, feature: &FeatureLayout, line_width: f64) -> f64 {
    probe.overlap_area(&feature.symbol_box(), line_width)
}

/// Area where two drawn connectors cover each other
pub fn debts_conn_conn(probe: &Connector, other: &RelationshipLayout, line_width: f64) -> f64 {
    if !other.is_drawn() {
        return 0.0;
    }
    probe.crossing_area(other.shape(), line_width)
}

pub fn debts_label_diag(probe: &Bounds, diagram: &DiagramLayout) -> f64 {
    OUTSIDE_WEIGHT * probe.outside_area(&diagram.draw_area())
}

/// Overlap of a label with a classifier's envelope, excluding its free space.
///
/// A label floating inside a container's space is not in the way.
pub fn debts_label_class(probe: &Bounds, classifier: &ClassifierLayout) -> f64 {
    let covered = probe.intersect_area(&classifier.envelope());
    let inside = probe.intersect_area(&classifier.envelope().intersect(&classifier.space()));
    (covered - inside).max(0.0)
}

pub fn debts_label_feat(probe: &Bounds, feature: &FeatureLayout) -> f64 {
    probe.intersect_area(&feature.symbol_box()) + probe.intersect_area(&feature.label_box())
}

/// Overlap of a label with a drawn connector and its label
pub fn debts_label_rel(probe: &Bounds, relationship: &RelationshipLayout, line_width: f64) -> f64 {
    if !relationship.is_drawn() {
        return 0.0;
    }
    relationship.shape().overlap_area(probe, line_width)
        + probe.intersect_area(&relationship.label_box())
}
