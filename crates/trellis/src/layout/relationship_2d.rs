//! Connector routing for diagrams without a time axis.
//!
//! Each drawn relationship becomes a three-segment orthogonal [`Connector`].
//! Six candidates are tried: a vertical main line at the source, destination
//! and midpoint x, and a horizontal main line at the source, destination and
//! midpoint y. The cheapest candidate by length plus overlap debt wins.
//! Shorter relationships are routed first so long ones go around them.

use log::{debug, trace};

use trellis_core::{
    geometry::{Bounds, Connector, Point},
    identifier::{ClassifierIndex, FeatureIndex, RelationshipIndex},
    scale::GridKind,
};

use crate::{
    config::LayoutConfig,
    layout::{
        quality::{debts_conn_class, debts_conn_conn, debts_conn_diag, debts_conn_feat},
        sorter::IndexSorter,
        visible_set::{LayoutVisibleSet, Visibility},
    },
};

/// Orientation of a candidate's main line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainLine {
    Vertical,
    Horizontal,
}

/// Where a connector ends: the classifier's symbol or one of its features
#[derive(Debug, Clone, Copy)]
struct End {
    symbol: Bounds,
    feature: Option<Point>,
}

impl End {
    fn center(&self) -> Point {
        self.feature.unwrap_or_else(|| self.symbol.center())
    }

    /// Attachment point for a main line at `coordinate`, facing `toward`
    fn attach(&self, main_line: MainLine, coordinate: f64, toward: Point) -> Point {
        if let Some(point) = self.feature {
            return point;
        }
        let symbol = &self.symbol;
        let center = symbol.center();
        match main_line {
            MainLine::Vertical if (symbol.min_x()..=symbol.max_x()).contains(&coordinate) => {
                let y = if toward.y() >= center.y() { symbol.max_y() } else { symbol.min_y() };
                Point::new(coordinate, y)
            }
            MainLine::Vertical => {
                let x = if coordinate >= center.x() { symbol.max_x() } else { symbol.min_x() };
                Point::new(x, center.y())
            }
            MainLine::Horizontal if (symbol.min_y()..=symbol.max_y()).contains(&coordinate) => {
                let x = if toward.x() >= center.x() { symbol.max_x() } else { symbol.min_x() };
                Point::new(x, coordinate)
            }
            MainLine::Horizontal => {
                let y = if coordinate >= center.y() { symbol.max_y() } else { symbol.min_y() };
                Point::new(center.x(), y)
            }
        }
    }
}

/// Routes relationships of structure and behavior diagrams.
pub struct RelationshipLayouter2d<'c> {
    config: &'c LayoutConfig,
}

impl<'c> RelationshipLayouter2d<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self { config }
    }

    /// Every relationship is drawn, grayed out if either end is.
    ///
    /// Runs before the classifier phases, which may then hide containment
    /// expressed by nesting.
    pub fn init_visibility(&self, layout: &mut LayoutVisibleSet<'_>) {
        for relationship in layout.relationship_indices() {
            let record = layout.relationship(relationship);
            let visibility = if layout.classifier_data(record.from()).is_gray_out()
                || layout.classifier_data(record.to()).is_gray_out()
            {
                Visibility::GrayOut
            } else {
                Visibility::Show
            };
            layout.relationship_mut(relationship).set_visibility(visibility);
        }
    }

    /// Routes all drawn relationships, shortest first.
    ///
    /// Requires classifiers and features to be laid out.
    pub fn layout(&self, layout: &mut LayoutVisibleSet<'_>) {
        if layout.diagram().grid().kind() != GridKind::XY {
            debug!("Diagram has a time axis, relationships left to the time-axis router");
            return;
        }

        let mut sorter = IndexSorter::with_capacity(self.config.limits().relationships);
        for relationship in layout.relationship_indices() {
            if !layout.relationship(relationship).is_drawn() {
                continue;
            }
            let (from, to) = self.ends(layout, relationship);
            let distance = to.center().sub_point(from.center()).manhattan_length();
            sorter.insert_or_warn(relationship.index(), distance);
        }

        let mut routed = Vec::with_capacity(sorter.len());
        for index in sorter.iter() {
            let relationship = RelationshipIndex::new(index);
            let shape = self.route(layout, relationship, &routed);
            layout.relationship_mut(relationship).set_shape(shape);
            routed.push(relationship);
        }
        debug!(routed = routed.len(); "Relationships routed");
    }

    fn ends(&self, layout: &LayoutVisibleSet<'_>, relationship: RelationshipIndex) -> (End, End) {
        let record = layout.relationship(relationship);
        let end = |classifier: ClassifierIndex, feature: Option<FeatureIndex>| End {
            symbol: layout.classifier(classifier).symbol_box(),
            feature: feature.map(|feature| layout.feature(feature).symbol_box().center()),
        };
        (
            end(record.from(), record.from_feature()),
            end(record.to(), record.to_feature()),
        )
    }

    /// Candidate connectors in evaluation order
    fn candidates(&self, from: &End, to: &End, same_end: bool) -> Vec<Connector> {
        if same_end {
            // loop on the right side of the symbol
            let distance = self.config.preferred_object_distance();
            let anchor = from.feature.unwrap_or_else(|| Point::new(from.symbol.max_x(), from.symbol.center().y()));
            return vec![Connector::vertical(
                anchor.add_point(Point::new(0.0, -distance / 2.0)),
                anchor.add_point(Point::new(0.0, distance / 2.0)),
                anchor.x() + distance,
            )];
        }

        let (source, destination) = (from.center(), to.center());
        let middle = source.midpoint(destination);
        let vertical = [source.x(), destination.x(), middle.x()].map(|x| {
            Connector::vertical(
                from.attach(MainLine::Vertical, x, destination),
                to.attach(MainLine::Vertical, x, source),
                x,
            )
        });
        let horizontal = [source.y(), destination.y(), middle.y()].map(|y| {
            Connector::horizontal(
                from.attach(MainLine::Horizontal, y, destination),
                to.attach(MainLine::Horizontal, y, source),
                y,
            )
        });
        vertical.into_iter().chain(horizontal).collect()
    }

    fn route(
        &self,
        layout: &LayoutVisibleSet<'_>,
        relationship: RelationshipIndex,
        routed: &[RelationshipIndex],
    ) -> Connector {
        let record = layout.relationship(relationship);
        let (from, to) = self.ends(layout, relationship);
        let same_end = record.from() == record.to() && record.from_feature() == record.to_feature();

        let mut best = (Connector::default(), f64::INFINITY);
        for (index, candidate) in self.candidates(&from, &to, same_end).into_iter().enumerate() {
            let score = candidate.length() + self.debts(layout, relationship, &candidate, routed);
            trace!(relationship:% = relationship, index, score; "Route candidate scored");
            if score < best.1 {
                best = (candidate, score);
            }
        }
        best.0
    }

    /// Debt of a candidate against everything it may not cross.
    ///
    /// The endpoint classifiers, their ancestors and the endpoints' own
    /// features are exempt.
    fn debts(
        &self,
        layout: &LayoutVisibleSet<'_>,
        relationship: RelationshipIndex,
        candidate: &Connector,
        routed: &[RelationshipIndex],
    ) -> f64 {
        let line_width = self.config.line_width();
        let record = layout.relationship(relationship);
        let containment = layout.containment();
        let is_exempt = |classifier: ClassifierIndex| {
            [record.from(), record.to()].into_iter().any(|end| {
                end == classifier || containment.is_ancestor(classifier, end)
            })
        };

        let classifiers: f64 = layout
            .classifier_indices()
            .filter(|&classifier| !is_exempt(classifier))
            .map(|classifier| debts_conn_class(candidate, layout.classifier(classifier), line_width))
            .sum();
        let features: f64 = layout
            .features()
            .iter()
            .filter(|feature| feature.classifier() != record.from() && feature.classifier() != record.to())
            .map(|feature| debts_conn_feat(candidate, feature, line_width))
            .sum();
        let connectors: f64 = routed
            .iter()
            .map(|&other| debts_conn_conn(candidate, layout.relationship(other), line_width))
            .sum();
        debts_conn_diag(candidate, layout.diagram(), line_width) + classifiers + features + connectors
    }
}
