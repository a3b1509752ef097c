//! Placement of floating labels.
//!
//! Relationship names and the names of ports, pins, interfaces and lifelines
//! float next to the element they belong to. For each label a fixed set of
//! candidate rectangles is generated around its anchor and the candidate with
//! the least debt against everything already in the diagram wins.

use log::{debug, trace};

use trellis_core::geometry::{Bounds, Point, Size};

use crate::{
    config::LayoutConfig,
    layout::{
        composer::Composer,
        quality::{debts_label_class, debts_label_diag, debts_label_feat, debts_label_rel},
        visible_set::LayoutVisibleSet,
    },
};

/// Debt added per candidate index so earlier candidates win ties
const INDEX_PENALTY: f64 = 0.1;

/// Index of the candidate with the least total debt.
///
/// The debt of a candidate is the sum of its debts against the diagram, every
/// classifier, every feature and every relationship, plus `0.1 × index`.
/// Returns `0` for an empty candidate list.
pub fn select_solution(layout: &LayoutVisibleSet<'_>, candidates: &[Bounds], line_width: f64) -> usize {
    let mut best = (0, f64::INFINITY);
    for (index, candidate) in candidates.iter().enumerate() {
        let debts = candidate_debts(layout, candidate, line_width) + INDEX_PENALTY * index as f64;
        trace!(index, debts; "Label candidate scored");
        if debts < best.1 {
            best = (index, debts);
        }
    }
    best.0
}

fn candidate_debts(layout: &LayoutVisibleSet<'_>, candidate: &Bounds, line_width: f64) -> f64 {
    let diagram = debts_label_diag(candidate, layout.diagram());
    let classifiers: f64 = layout
        .classifiers()
        .iter()
        .map(|classifier| debts_label_class(candidate, classifier))
        .sum();
    let features: f64 = layout
        .features()
        .iter()
        .map(|feature| debts_label_feat(candidate, feature))
        .sum();
    let relationships: f64 = layout
        .relationships()
        .iter()
        .map(|relationship| debts_label_rel(candidate, relationship, line_width))
        .sum();
    diagram + classifiers + features + relationships
}

/// Eight label positions around `anchor`, separated from it by `gap`.
///
/// Ordered above, below, right, left, then the four corners clockwise from
/// the top right.
pub fn candidates_around(anchor: &Bounds, size: Size, gap: f64) -> [Bounds; 8] {
    let center = anchor.center();
    let above = anchor.min_y() - gap - size.height() / 2.0;
    let below = anchor.max_y() + gap + size.height() / 2.0;
    let right = anchor.max_x() + gap + size.width() / 2.0;
    let left = anchor.min_x() - gap - size.width() / 2.0;
    [
        Point::new(center.x(), above),
        Point::new(center.x(), below),
        Point::new(right, center.y()),
        Point::new(left, center.y()),
        Point::new(right, above),
        Point::new(right, below),
        Point::new(left, below),
        Point::new(left, above),
    ]
    .map(|point| point.to_bounds(size))
}

/// Places relationship and feature labels.
pub struct LabelLayouter<'c> {
    config: &'c LayoutConfig,
    composer: &'c dyn Composer,
}

impl<'c> LabelLayouter<'c> {
    pub fn new(config: &'c LayoutConfig, composer: &'c dyn Composer) -> Self {
        Self { config, composer }
    }

    /// Places the names of drawn relationships next to their main line
    pub fn layout_relationship_labels(&self, layout: &mut LayoutVisibleSet<'_>) {
        let line_width = self.config.line_width();
        let mut placed = 0;
        for relationship in layout.relationship_indices() {
            layout.relationship_mut(relationship).set_label_box(Bounds::default());
            if !layout.relationship(relationship).is_drawn() {
                continue;
            }
            let size = self
                .composer
                .relationship_label_size(layout.relationship_data(relationship));
            if size.is_zero() {
                continue;
            }
            let anchor = layout
                .relationship(relationship)
                .shape()
                .main_line_middle()
                .to_bounds(Size::new(line_width, line_width));
            let candidates = candidates_around(&anchor, size, self.config.standard_object_border());
            let chosen = select_solution(layout, &candidates, line_width);
            trace!(relationship:% = relationship, chosen; "Relationship label placed");
            layout.relationship_mut(relationship).set_label_box(candidates[chosen]);
            placed += 1;
        }
        debug!(placed; "Relationship labels placed");
    }

    /// Places the names of ports, pins, interfaces and lifelines
    pub fn layout_feature_labels(&self, layout: &mut LayoutVisibleSet<'_>) {
        let line_width = self.config.line_width();
        let mut placed = 0;
        for feature in layout.feature_indices() {
            let data = layout.feature_data(feature);
            if data.kind().is_compartment_entry() {
                continue;
            }
            layout.feature_mut(feature).set_label_box(Bounds::default());
            let size = self.composer.feature_label_size(data);
            if size.is_zero() {
                continue;
            }
            let anchor = layout.feature(feature).symbol_box();
            let candidates = candidates_around(&anchor, size, self.config.standard_object_border());
            let chosen = select_solution(layout, &candidates, line_width);
            trace!(feature:% = feature, chosen; "Feature label placed");
            layout.feature_mut(feature).set_label_box(candidates[chosen]);
            placed += 1;
        }
        debug!(placed; "Feature labels placed");
    }
}
