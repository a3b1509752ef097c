//! Placement of features relative to their already-sized classifier.
//!
//! Features fall into four groups:
//!
//! - **Lifelines** extend from the classifier to the edge of the draw area in
//!   sequence and timing diagrams and collapse onto the classifier elsewhere.
//! - **Border features** (ports, pins, entry and exit points) sit on one of the
//!   four borders of the classifier's symbol.
//! - **Interfaces** use the same border rule but float outside the symbol.
//! - **Compartment entries** (properties, operations, tagged values) are
//!   stacked inside the classifier's space.
//!
//! Feature positions are a pure function of the classifier's geometry, the
//! kinds involved and the feature's `list_order`.

use log::{debug, trace};

use trellis_core::{
    geometry::{Bounds, Direction, Point, Size},
    identifier::{ClassifierIndex, FeatureIndex},
    semantic::{ClassifierKind, DiagramKind, FeatureKind},
};

use crate::{
    config::LayoutConfig,
    layout::{composer::Composer, visible_set::LayoutVisibleSet},
};

/// Number of compartments of a classifier
const COMPARTMENTS: usize = 3;

/// One side of a classifier's symbol box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Right,
    Top,
    Left,
    Bottom,
}

impl Border {
    /// The border a `list_order` selects and the fraction along that border.
    ///
    /// The signed range is split by sign and then by half-range:
    ///
    /// ```text
    ///   [i32::MIN, MIN/2)  right   walked bottom to top
    ///   [MIN/2, 0)         top     walked right to left
    ///   [0, MAX/2)         left    walked top to bottom
    ///   [MAX/2, i32::MAX]  bottom  walked left to right
    /// ```
    ///
    /// Walking the borders in this order circles the symbol counter-clockwise.
    pub fn from_list_order(list_order: i32) -> (Self, f64) {
        let order = i64::from(list_order);
        let min = i64::from(i32::MIN);
        let max = i64::from(i32::MAX);
        let half_negative = min / 2;
        let half_positive = max / 2 + 1;
        let fraction = |value: i64, start: i64, end: i64| (value - start) as f64 / (end - start) as f64;
        if order < half_negative {
            (Border::Right, fraction(order, min, half_negative))
        } else if order < 0 {
            (Border::Top, fraction(order, half_negative, 0))
        } else if order < half_positive {
            (Border::Left, fraction(order, 0, half_positive))
        } else {
            (Border::Bottom, fraction(order, half_positive, max))
        }
    }

    /// Direction pointing away from the symbol
    pub fn outward(self) -> Direction {
        match self {
            Border::Right => Direction::Right,
            Border::Top => Direction::Up,
            Border::Left => Direction::Left,
            Border::Bottom => Direction::Down,
        }
    }

    /// Point on this border of `symbol` at `fraction` of the walk.
    ///
    /// The point keeps `margin` distance to the corners where possible.
    pub fn point(self, symbol: &Bounds, fraction: f64, margin: f64) -> Point {
        let along = |start: f64, end: f64| {
            let (low, high) = if start <= end { (start, end) } else { (end, start) };
            let value = start + (end - start) * fraction.clamp(0.0, 1.0);
            if high - low > 2.0 * margin {
                value.clamp(low + margin, high - margin)
            } else {
                (low + high) / 2.0
            }
        };
        match self {
            Border::Right => Point::new(symbol.max_x(), along(symbol.max_y(), symbol.min_y())),
            Border::Top => Point::new(along(symbol.max_x(), symbol.min_x()), symbol.min_y()),
            Border::Left => Point::new(symbol.min_x(), along(symbol.min_y(), symbol.max_y())),
            Border::Bottom => Point::new(along(symbol.min_x(), symbol.max_x()), symbol.max_y()),
        }
    }
}

/// Compartment of a compartment entry: properties, operations, then the rest
fn compartment_of(kind: FeatureKind) -> usize {
    match kind {
        FeatureKind::Property => 0,
        FeatureKind::Operation => 1,
        _ => 2,
    }
}

/// Lays out the features of classifiers.
pub struct FeatureLayouter<'c> {
    config: &'c LayoutConfig,
    composer: &'c dyn Composer,
}

impl<'c> FeatureLayouter<'c> {
    pub fn new(config: &'c LayoutConfig, composer: &'c dyn Composer) -> Self {
        Self { config, composer }
    }

    /// Compartment entries of `classifier` in display order.
    fn compartment_entries(&self, layout: &LayoutVisibleSet<'_>, classifier: ClassifierIndex) -> Vec<FeatureIndex> {
        let mut entries: Vec<FeatureIndex> = layout
            .features_of(classifier)
            .filter(|&feature| layout.feature_data(feature).kind().is_compartment_entry())
            .collect();
        entries.sort_by(|&a, &b| {
            let a = layout.feature_data(a);
            let b = layout.feature_data(b);
            compartment_of(a.kind())
                .cmp(&compartment_of(b.kind()))
                .then(a.list_order().cmp(&b.list_order()))
                .then(a.id().cmp(&b.id()))
        });
        entries
    }

    /// Minimum space `classifier` must provide for its compartment entries.
    ///
    /// Width is the widest entry; height is the sum of all entry heights plus
    /// the gaps around the compartments. A classifier without compartment
    /// entries needs no space.
    pub fn calculate_features_bounds(&self, layout: &LayoutVisibleSet<'_>, classifier: ClassifierIndex) -> Size {
        let gap = self.config.standard_object_border();
        let sizes: Vec<Size> = self
            .compartment_entries(layout, classifier)
            .into_iter()
            .map(|feature| self.composer.compartment_entry_size(layout.feature_data(feature)))
            .collect();
        if sizes.is_empty() {
            return Size::default();
        }
        let width = sizes.iter().map(|size| size.width()).fold(0.0, f64::max);
        let height: f64 = sizes.iter().map(|size| size.height()).sum();
        Size::new(
            width + 2.0 * gap,
            height + 2.0 * gap * COMPARTMENTS as f64,
        )
    }

    /// Lays out all features of all classifiers
    pub fn layout_features(&self, layout: &mut LayoutVisibleSet<'_>) {
        for classifier in layout.classifier_indices() {
            self.layout_features_of(layout, classifier);
        }
        debug!(features = layout.feature_count(); "Features laid out");
    }

    /// Lays out all features of one classifier
    pub fn layout_features_of(&self, layout: &mut LayoutVisibleSet<'_>, classifier: ClassifierIndex) {
        let features: Vec<FeatureIndex> = layout.features_of(classifier).collect();
        for feature in features {
            match layout.feature_data(feature).kind() {
                FeatureKind::Lifeline => self.layout_lifeline(layout, feature),
                FeatureKind::ProvidedInterface | FeatureKind::RequiredInterface => {
                    self.layout_interface(layout, feature)
                }
                FeatureKind::Port
                | FeatureKind::InPin
                | FeatureKind::OutPin
                | FeatureKind::EntryPoint
                | FeatureKind::ExitPoint => self.layout_border_feature(layout, feature),
                FeatureKind::Property
                | FeatureKind::Operation
                | FeatureKind::TaggedValue
                | FeatureKind::Unknown => {}
            }
        }
        self.layout_compartments(layout, classifier);
    }

    fn layout_lifeline(&self, layout: &mut LayoutVisibleSet<'_>, feature: FeatureIndex) {
        let classifier = layout.feature(feature).classifier();
        let symbol = layout.classifier(classifier).symbol_box();
        let draw_area = layout.diagram().draw_area();
        let border = self.config.standard_object_border();
        let has_lifeline = layout.classifier_data(classifier).kind().can_have_lifeline();

        let bar = match layout.data().diagram().kind() {
            DiagramKind::Sequence if has_lifeline => {
                let center = symbol.center().x();
                let bottom = (draw_area.max_y() - border).max(symbol.max_y());
                Bounds::from_corners(
                    Point::new(center - border, symbol.max_y()),
                    Point::new(center + border, bottom),
                )
            }
            DiagramKind::Timing if has_lifeline => {
                let right = (draw_area.max_x() - border).max(symbol.max_x());
                Bounds::from_corners(
                    Point::new(symbol.max_x(), symbol.min_y()),
                    Point::new(right, symbol.max_y()),
                )
            }
            _ => symbol,
        };
        trace!(feature:% = feature, bar:? = bar; "Lifeline placed");
        let record = layout.feature_mut(feature);
        record.set_symbol_box(bar);
        record.set_icon_direction(Direction::Center);
    }

    fn layout_border_feature(&self, layout: &mut LayoutVisibleSet<'_>, feature: FeatureIndex) {
        let data = layout.feature_data(feature);
        let classifier = layout.feature(feature).classifier();
        let classifier_kind = layout.classifier_data(classifier).kind();
        let symbol = layout.classifier(classifier).symbol_box();
        let icon = self.config.icon_size();

        let (border, fraction) = Border::from_list_order(data.list_order());
        let on_border = border.point(&symbol, fraction, icon / 2.0);

        let outward_offset = match (classifier_kind, data.kind()) {
            (ClassifierKind::ConstraintBlock, _) => 0.0,
            (_, FeatureKind::EntryPoint | FeatureKind::ExitPoint) => icon / 2.0,
            (kind, _) if kind.is_behavioral() => icon,
            _ => icon / 2.0,
        };
        let center = on_border.add_point(border.outward().unit().scale(outward_offset - icon / 2.0));

        let direction = match data.kind() {
            FeatureKind::InPin => border.outward().opposite(),
            FeatureKind::OutPin => border.outward(),
            _ => Direction::Center,
        };

        trace!(feature:% = feature, border:? = border, direction:? = direction; "Border feature placed");
        let record = layout.feature_mut(feature);
        record.set_symbol_box(center.to_bounds(Size::new(icon, icon)));
        record.set_icon_direction(direction);
    }

    fn layout_interface(&self, layout: &mut LayoutVisibleSet<'_>, feature: FeatureIndex) {
        let data = layout.feature_data(feature);
        let classifier = layout.feature(feature).classifier();
        let symbol = layout.classifier(classifier).symbol_box();
        let icon = self.config.icon_size();

        let (border, fraction) = Border::from_list_order(data.list_order());
        let on_border = border.point(&symbol, fraction, icon / 2.0);
        let distance = 2.0 * self.config.preferred_object_distance() + self.config.standard_object_border();
        let center = on_border.add_point(border.outward().unit().scale(distance));

        let direction = match data.kind() {
            FeatureKind::RequiredInterface => border.outward().opposite(),
            _ => Direction::Center,
        };

        let record = layout.feature_mut(feature);
        record.set_symbol_box(center.to_bounds(Size::new(icon, icon)));
        record.set_icon_direction(direction);
    }

    fn layout_compartments(&self, layout: &mut LayoutVisibleSet<'_>, classifier: ClassifierIndex) {
        let entries = self.compartment_entries(layout, classifier);
        if entries.is_empty() {
            return;
        }
        let space = layout.classifier(classifier).space();
        let gap = self.config.standard_object_border();
        let max_width = (space.width() - 2.0 * gap).max(0.0);

        let mut offset = gap;
        for feature in entries {
            let data = layout.feature_data(feature);
            let size = self.composer.compartment_entry_size(data);
            let compartment = compartment_of(data.kind()) as f64;
            let top = space.min_y() + offset + 2.0 * gap * compartment;
            let entry = Bounds::new(
                space.min_x() + gap,
                top,
                size.width().min(max_width),
                size.height(),
            );
            offset += size.height();

            let record = layout.feature_mut(feature);
            record.set_symbol_box(entry);
            record.set_label_box(Bounds::default());
            record.set_icon_direction(Direction::Center);
        }
    }
}
