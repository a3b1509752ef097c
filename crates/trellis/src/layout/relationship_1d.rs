//! Connector routing along the time axis of sequence and timing diagrams.
//!
//! In a scenario diagram every drawn relationship is a message between two
//! lifelines. Its position on the time axis comes from its `list_order`
//! through the grid's time scale; its ends attach to the lifeline bars.
//!
//! ```text
//!   sequence                       timing
//!   ┌───┐     ┌───┐                ┌───┐┌─────────────────
//!   │ A │     │ B │                │ A ││ ─ ─ ─ ┬ ─ ─ ─ ─ ─
//!   └─┬─┘     └─┬─┘                └───┘└───────┼─────────
//!     │  time   │                  ┌───┐┌───────┼─────────
//!     ├────────►│                  │ B ││ ─ ─ ─ ▼ ─ ─ ─ ─ ─
//!     │         │                  └───┘└─────────────────
//! ```

use log::{debug, trace, warn};

use trellis_core::{
    geometry::{Bounds, Connector, Point},
    identifier::RelationshipIndex,
    scale::GridKind,
    semantic::FeatureKind,
};

use crate::{
    config::LayoutConfig,
    layout::visible_set::{LayoutVisibleSet, Visibility},
};

/// Routes relationships of sequence and timing diagrams.
pub struct RelationshipLayouter1d<'c> {
    config: &'c LayoutConfig,
}

impl<'c> RelationshipLayouter1d<'c> {
    pub fn new(config: &'c LayoutConfig) -> Self {
        Self { config }
    }

    /// Sets visibility, time scale and connectors of all relationships.
    ///
    /// Requires classifiers and lifelines to be laid out.
    pub fn layout(&self, layout: &mut LayoutVisibleSet<'_>) {
        let kind = layout.diagram().grid().kind();
        if kind == GridKind::XY {
            debug!("Diagram has no time axis, relationships left unrouted");
            return;
        }
        self.init_visibility(layout);
        self.prepare_time_scale(layout);
        for relationship in layout.relationship_indices() {
            if layout.relationship(relationship).is_drawn() {
                self.route(layout, relationship, kind);
            }
        }
    }

    /// Lifeline-to-lifeline relationships are drawn, everything else is implicit
    pub fn init_visibility(&self, layout: &mut LayoutVisibleSet<'_>) {
        for relationship in layout.relationship_indices() {
            let record = layout.relationship(relationship);
            let is_lifeline = |feature: Option<_>| {
                feature.is_some_and(|feature| layout.feature_data(feature).kind() == FeatureKind::Lifeline)
            };
            let visibility = if !is_lifeline(record.from_feature()) || !is_lifeline(record.to_feature()) {
                Visibility::Implicit
            } else if layout.classifier_data(record.from()).is_gray_out()
                || layout.classifier_data(record.to()).is_gray_out()
            {
                Visibility::GrayOut
            } else {
                Visibility::Show
            };
            trace!(relationship:% = relationship, visibility:? = visibility; "Visibility set");
            layout.relationship_mut(relationship).set_visibility(visibility);
        }
    }

    /// Registers the list orders of drawn relationships on the time scale and
    /// spans it from below the classifier heads to the end of the draw area.
    fn prepare_time_scale(&self, layout: &mut LayoutVisibleSet<'_>) {
        let distance = self.config.preferred_object_distance();
        let border = self.config.standard_object_border();
        let draw_area = layout.diagram().draw_area();
        let kind = layout.diagram().grid().kind();

        let heads = layout
            .classifiers()
            .iter()
            .map(|classifier| classifier.symbol_box())
            .filter(|symbol| !symbol.is_empty());
        let (start, end) = match kind {
            GridKind::TimeX => (
                heads.map(|symbol| symbol.max_x()).fold(draw_area.min_x(), f64::max) + distance,
                draw_area.max_x() - border - distance,
            ),
            _ => (
                heads.map(|symbol| symbol.max_y()).fold(draw_area.min_y(), f64::max) + distance,
                draw_area.max_y() - border - distance,
            ),
        };

        let orders: Vec<i32> = layout
            .relationship_indices()
            .filter(|&relationship| layout.relationship(relationship).is_drawn())
            .map(|relationship| layout.relationship_data(relationship).list_order())
            .collect();
        let Some(scale) = layout.diagram_mut().grid_mut().time_scale_mut() else {
            return;
        };
        for order in orders {
            scale.add_order(order);
        }
        scale.set_range(start, end.max(start));
        debug!(start, end, anchors = scale.orders().len(); "Time scale prepared");
    }

    fn route(&self, layout: &mut LayoutVisibleSet<'_>, relationship: RelationshipIndex, kind: GridKind) {
        let record = *layout.relationship(relationship);
        let (Some(from_feature), Some(to_feature)) = (record.from_feature(), record.to_feature()) else {
            warn!(relationship:% = relationship; "Drawn relationship without lifelines");
            return;
        };
        let data = layout.relationship_data(relationship);
        let Some(time) = layout
            .diagram()
            .grid()
            .time_scale()
            .map(|scale| scale.get_location(data.list_order()))
        else {
            return;
        };
        let from_bar = layout.feature(from_feature).symbol_box();
        let to_bar = layout.feature(to_feature).symbol_box();
        let centered = data.kind().is_call_or_flow();
        let distance = self.config.preferred_object_distance();

        let shape = if from_feature == to_feature {
            self_message(&from_bar, time, distance, centered, kind)
        } else {
            message(&from_bar, &to_bar, time, centered, kind)
        };
        trace!(relationship:% = relationship, time; "Message routed");
        layout.relationship_mut(relationship).set_shape(shape);
    }
}

/// Attachment point on a bar at `time`, on the side facing `toward`
fn attach(bar: &Bounds, time: f64, toward: f64, centered: bool, kind: GridKind) -> Point {
    let side = |min: f64, max: f64, center: f64| {
        if centered {
            center
        } else if toward >= center {
            max
        } else {
            min
        }
    };
    match kind {
        GridKind::TimeX => Point::new(
            time.clamp(bar.min_x(), bar.max_x().max(bar.min_x())),
            side(bar.min_y(), bar.max_y(), bar.center().y()),
        ),
        _ => Point::new(
            side(bar.min_x(), bar.max_x(), bar.center().x()),
            time.clamp(bar.min_y(), bar.max_y().max(bar.min_y())),
        ),
    }
}

/// A straight message from one bar to another
fn message(from_bar: &Bounds, to_bar: &Bounds, time: f64, centered: bool, kind: GridKind) -> Connector {
    match kind {
        GridKind::TimeX => {
            let source = attach(from_bar, time, to_bar.center().y(), centered, kind);
            let destination = attach(to_bar, time, from_bar.center().y(), centered, kind);
            Connector::vertical(source, destination, time)
        }
        _ => {
            let source = attach(from_bar, time, to_bar.center().x(), centered, kind);
            let destination = attach(to_bar, time, from_bar.center().x(), centered, kind);
            Connector::horizontal(source, destination, time)
        }
    }
}

/// A message from a bar to itself, drawn as a rectangular detour
fn self_message(bar: &Bounds, time: f64, distance: f64, centered: bool, kind: GridKind) -> Connector {
    match kind {
        GridKind::TimeX => {
            let y = if centered { bar.center().y() } else { bar.max_y() };
            let start = time.clamp(bar.min_x(), bar.max_x().max(bar.min_x()));
            Connector::horizontal(
                Point::new(start, y),
                Point::new(start + distance / 2.0, y),
                y + distance,
            )
        }
        _ => {
            let x = if centered { bar.center().x() } else { bar.max_x() };
            let start = time.clamp(bar.min_y(), bar.max_y().max(bar.min_y()));
            Connector::vertical(
                Point::new(x, start),
                Point::new(x, start + distance / 2.0),
                x + distance,
            )
        }
    }
}
