//! Positioning and sizing of classifier boxes.
//!
//! The layouter runs five phases, each over the whole visible set before the
//! next one starts:
//!
//! 1. [`estimate_bounds`](ClassifierLayouter::estimate_bounds): default size,
//!    grown to fit compartments, centered on the grid location of the
//!    classifier's `x_order`/`y_order`.
//! 2. [`move_to_avoid_overlaps`](ClassifierLayouter::move_to_avoid_overlaps):
//!    translate classifiers, simplest first, to the cheapest of a few
//!    candidate positions.
//! 3. [`embrace_children`](ClassifierLayouter::embrace_children): grow
//!    containers around their children where this does not create new
//!    conflicts.
//! 4. [`hide_relations_of_embraced_children`](ClassifierLayouter::hide_relations_of_embraced_children):
//!    containment that is visible through nesting is not drawn as a line.
//! 5. [`move_and_embrace_children`](ClassifierLayouter::move_and_embrace_children):
//!    fit containers tightly around their descendants and move the whole
//!    group toward free space.
//!
//! Ancestor/descendant pairs never count as overlapping.

use log::{debug, info, trace, warn};

use trellis_core::{
    geometry::{Bounds, Direction, Insets, Point, Size},
    identifier::{ClassifierIndex, RelationshipIndex},
    scale::GridKind,
};

use crate::{
    config::LayoutConfig,
    layout::{
        composer::Composer,
        containment::ContainmentCache,
        feature::FeatureLayouter,
        quality::{OUTSIDE_WEIGHT, ProcessingState, debts_class_class_in_state},
        sorter::IndexSorter,
        visible_set::{ClassifierLayout, LayoutVisibleSet, Visibility},
    },
};

/// A containment relationship between two distinct, non-cyclic classifiers
#[derive(Debug, Clone, Copy)]
struct ContainmentPair {
    relationship: RelationshipIndex,
    parent: ClassifierIndex,
    child: ClassifierIndex,
}

/// Splits containment relationships into usable pairs and skipped ones.
fn containment_pairs(
    layout: &LayoutVisibleSet<'_>,
    containment: &ContainmentCache,
) -> (Vec<ContainmentPair>, Vec<RelationshipIndex>) {
    let mut pairs = Vec::new();
    let mut skipped = Vec::new();
    for relationship in layout.relationship_indices() {
        if !layout.relationship_data(relationship).kind().is_containment() {
            continue;
        }
        let record = layout.relationship(relationship);
        let (parent, child) = (record.from(), record.to());
        if parent == child || containment.is_ancestor(child, parent) {
            skipped.push(relationship);
        } else {
            pairs.push(ContainmentPair {
                relationship,
                parent,
                child,
            });
        }
    }
    (pairs, skipped)
}

/// Overlap of `probe` with every classifier not related to `index`
fn unrelated_overlap(
    index: ClassifierIndex,
    probe: &Bounds,
    envelopes: &[Bounds],
    containment: &ContainmentCache,
) -> f64 {
    envelopes
        .iter()
        .enumerate()
        .filter(|&(other, _)| !containment.is_related(index, ClassifierIndex::new(other)))
        .map(|(_, envelope)| probe.intersect_area(envelope))
        .sum()
}

/// Region in which the center of a box of `size` keeps the box inside `free`
fn center_region(free: &Bounds, size: Size) -> Bounds {
    Bounds::from_corners(
        Point::new(free.min_x() + size.width() / 2.0, free.min_y() + size.height() / 2.0),
        Point::new(free.max_x() - size.width() / 2.0, free.max_y() - size.height() / 2.0),
    )
}

/// Runs the classifier phases.
pub struct ClassifierLayouter<'c> {
    config: &'c LayoutConfig,
    composer: &'c dyn Composer,
}

impl<'c> ClassifierLayouter<'c> {
    pub fn new(config: &'c LayoutConfig, composer: &'c dyn Composer) -> Self {
        Self { config, composer }
    }

    /// Runs all phases in order.
    ///
    /// Hiding of embraced containment is repeated after the last phase, which
    /// may have completed a nesting the third phase had to reject.
    pub fn layout(&self, layout: &mut LayoutVisibleSet<'_>) {
        info!(classifiers = layout.classifier_count(); "Laying out classifiers");
        self.estimate_bounds(layout);
        self.move_to_avoid_overlaps(layout);
        self.embrace_children(layout);
        self.hide_relations_of_embraced_children(layout);
        self.move_and_embrace_children(layout);
        self.hide_relations_of_embraced_children(layout);
    }

    fn gap(&self) -> f64 {
        self.config.preferred_object_distance()
    }

    fn register_grid_orders(&self, layout: &mut LayoutVisibleSet<'_>) {
        let data = layout.data();
        let grid = layout.diagram_mut().grid_mut();
        let kind = grid.kind();
        for classifier in data.classifiers() {
            if kind != GridKind::TimeX {
                grid.x_scale_mut().add_order(classifier.x_order());
            }
            if kind != GridKind::TimeY {
                grid.y_scale_mut().add_order(classifier.y_order());
            }
        }
    }

    /// Phase 1: size every classifier and center it on its grid location.
    ///
    /// In sequence diagrams classifiers form a head row at the top of the
    /// draw area; in timing diagrams a head column at its left.
    pub fn estimate_bounds(&self, layout: &mut LayoutVisibleSet<'_>) {
        self.register_grid_orders(layout);
        let features = FeatureLayouter::new(self.config, self.composer);
        let default_size = self.config.default_classifier_size();
        let draw_area = layout.diagram().draw_area();
        let distance = self.gap();

        for classifier in layout.classifier_indices() {
            let data = layout.classifier_data(classifier);
            let shows_children = layout.containment().descendant_count(classifier) > 0;
            let envelope = Bounds::new_from_center(Point::default(), default_size);
            let mut composed = self
                .composer
                .compose_around_envelope(data, envelope, shows_children);

            let needed = features.calculate_features_bounds(layout, classifier);
            let space = composed.space();
            if needed.width() > space.width() || needed.height() > space.height() {
                let grown = Bounds::new_from_center(space.center(), space.to_size().max(needed));
                trace!(classifier:% = classifier, needed:? = needed; "Space grown for compartments");
                composed = self.composer.compose_around_space(data, grown, shows_children);
            }

            let symbol = composed.symbol_box();
            let grid = layout.diagram().grid();
            let target = match grid.kind() {
                GridKind::XY => grid.get_location(data.x_order(), data.y_order()),
                GridKind::TimeY => Point::new(
                    grid.x_scale().get_location(data.x_order()),
                    draw_area.min_y() + distance + symbol.height() / 2.0,
                ),
                GridKind::TimeX => Point::new(
                    draw_area.min_x() + distance + symbol.width() / 2.0,
                    grid.y_scale().get_location(data.y_order()),
                ),
            };
            let offset = target.sub_point(symbol.center());
            layout.set_classifier(classifier, composed.translate(offset));
        }
        debug!(classifiers = layout.classifier_count(); "Bounds estimated");
    }

    /// Processing weight of a classifier; simpler classifiers have lower weight
    fn simpleness(
        &self,
        index: ClassifierIndex,
        layout: &LayoutVisibleSet<'_>,
        envelopes: &[Bounds],
        containment: &ContainmentCache,
        draw_area: &Bounds,
    ) -> f64 {
        let envelope = envelopes[index.index()];
        let area = envelope.area();
        let mut weight = 16.0 * envelope.outside_area(draw_area)
            - 16.0 * area
            - unrelated_overlap(index, &envelope, envelopes, containment)
            - layout.classifier(index).space().area();
        if containment.descendant_count(index) > 0 {
            weight += 32.0 * area;
        }
        weight
    }

    /// Phase 2: translate classifiers to reduce overlaps.
    ///
    /// Classifiers are processed in ascending simpleness. Each one chooses the
    /// cheapest of: staying, being pushed back into the draw area, the
    /// smallest shift up, down, left or right that clears all already placed
    /// classifiers, and the nearest free slot in its neighborhood. A
    /// classifier sticking out of the draw area also tries being pushed back
    /// in and then shifted clear of every unrelated classifier. A candidate
    /// is only eligible if it does not increase the classifier's overlap with
    /// unrelated classifiers, so the total overlap never grows.
    ///
    /// Returns the offset applied to each classifier.
    pub fn move_to_avoid_overlaps(&self, layout: &mut LayoutVisibleSet<'_>) -> Vec<Point> {
        let containment = layout.containment().clone();
        let draw_area = layout.diagram().draw_area();
        let kind = layout.diagram().grid().kind();
        let mut envelopes: Vec<Bounds> = layout.classifiers().iter().map(ClassifierLayout::envelope).collect();
        let mut offsets = vec![Point::default(); envelopes.len()];

        let mut sorter = IndexSorter::with_capacity(self.config.limits().classifiers);
        for classifier in layout.classifier_indices() {
            let weight = self.simpleness(classifier, layout, &envelopes, &containment, &draw_area);
            sorter.insert_or_warn(classifier.index(), weight);
        }

        let mut state = ProcessingState::new(&containment);
        let mut moved = 0;
        for index in sorter.iter() {
            let classifier = ClassifierIndex::new(index);
            let offset = self.best_offset(classifier, &envelopes, &state, &draw_area, kind);
            if !offset.is_zero() {
                let shifted = layout.classifier(classifier).translate(offset);
                layout.set_classifier(classifier, shifted);
                envelopes[index] = shifted.envelope();
                moved += 1;
            }
            offsets[index] = offset;
            state.mark_placed(classifier);
        }
        debug!(moved; "Overlaps avoided");
        offsets
    }

    fn best_offset(
        &self,
        classifier: ClassifierIndex,
        envelopes: &[Bounds],
        state: &ProcessingState<'_>,
        draw_area: &Bounds,
        kind: GridKind,
    ) -> Point {
        let containment = state.containment();
        let current = envelopes[classifier.index()];
        let current_overlap = unrelated_overlap(classifier, &current, envelopes, containment);
        let obstacles: Vec<Bounds> = envelopes
            .iter()
            .enumerate()
            .map(|(index, envelope)| (ClassifierIndex::new(index), envelope))
            .filter(|&(other, _)| state.is_placed(other) && !containment.is_related(classifier, other))
            .map(|(_, envelope)| *envelope)
            .collect();

        let mut candidates = vec![
            Point::default(),
            current.offset_into(draw_area),
            self.shift_clear(&current, &obstacles, Direction::Up),
            self.shift_clear(&current, &obstacles, Direction::Down),
            self.shift_clear(&current, &obstacles, Direction::Left),
            self.shift_clear(&current, &obstacles, Direction::Right),
        ];
        if kind == GridKind::XY {
            if let Some(offset) = self.anchored_offset(&current, &obstacles, draw_area) {
                candidates.push(offset);
            }
        }

        // back inside the draw area, then clear of every unrelated classifier
        let inside = current.offset_into(draw_area);
        if !inside.is_zero() {
            let corrected = current.translate(inside);
            let strangers: Vec<Bounds> = envelopes
                .iter()
                .enumerate()
                .filter(|&(other, _)| !containment.is_related(classifier, ClassifierIndex::new(other)))
                .map(|(_, envelope)| *envelope)
                .collect();
            for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
                candidates.push(inside.add_point(self.shift_clear(&corrected, &strangers, direction)));
            }
        }

        let mut best = (Point::default(), f64::INFINITY);
        for candidate in candidates {
            // scenario heads stay on their row or column
            let candidate = match kind {
                GridKind::XY => candidate,
                GridKind::TimeY => candidate.with_y(0.0),
                GridKind::TimeX => candidate.with_x(0.0),
            };
            let moved = current.translate(candidate);
            if unrelated_overlap(classifier, &moved, envelopes, containment) > current_overlap {
                trace!(classifier:% = classifier, candidate:? = candidate; "Candidate increases overlap");
                continue;
            }
            let overlap: f64 = envelopes
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != classifier.index())
                .map(|(other, envelope)| {
                    debts_class_class_in_state(state, classifier, &moved, ClassifierIndex::new(other), envelope)
                })
                .sum();
            let score = candidate.manhattan_length() + OUTSIDE_WEIGHT * moved.outside_area(draw_area) + overlap;
            if score < best.1 {
                best = (candidate, score);
            }
        }
        trace!(classifier:% = classifier, offset:? = best.0, score = best.1; "Move selected");
        best.0
    }

    /// Smallest shift in `direction` that clears every obstacle it runs into
    fn shift_clear(&self, current: &Bounds, obstacles: &[Bounds], direction: Direction) -> Point {
        let gap = self.gap();
        let mut offset = Point::default();
        for _ in 0..=obstacles.len() {
            let moved = current.translate(offset);
            let hits = obstacles.iter().filter(|obstacle| obstacle.is_intersecting(&moved));
            let step = match direction {
                Direction::Up => hits.map(|o| moved.max_y() - (o.min_y() - gap)).fold(0.0, f64::max),
                Direction::Down => hits.map(|o| o.max_y() + gap - moved.min_y()).fold(0.0, f64::max),
                Direction::Left => hits.map(|o| moved.max_x() - (o.min_x() - gap)).fold(0.0, f64::max),
                Direction::Right => hits.map(|o| o.max_x() + gap - moved.min_x()).fold(0.0, f64::max),
                _ => 0.0,
            };
            if step <= 0.0 {
                break;
            }
            offset = offset.add_point(direction.unit().scale(step));
        }
        offset
    }

    /// Offset to the free slot nearest to the current position.
    ///
    /// The search area is the envelope grown by half its size plus the gap
    /// on each side, clipped to the draw area. It is narrowed obstacle by
    /// obstacle to the remaining strip nearest to the current center that
    /// still fits the envelope.
    fn anchored_offset(&self, current: &Bounds, obstacles: &[Bounds], draw_area: &Bounds) -> Option<Point> {
        let gap = self.gap();
        let size = current.to_size();
        let center = current.center();
        let fits = |free: &Bounds| free.width() >= size.width() && free.height() >= size.height();
        let distance = |free: &Bounds| {
            center_region(free, size)
                .nearest_point(center)
                .sub_point(center)
                .manhattan_length()
        };

        let mut free = current
            .expand(size.width() + 2.0 * gap, size.height() + 2.0 * gap)
            .intersect(draw_area);
        if !fits(&free) {
            return None;
        }
        for obstacle in obstacles {
            if !obstacle.is_intersecting(&free) {
                continue;
            }
            free = free
                .strips_outside(obstacle)
                .into_iter()
                .filter(|strip| fits(strip))
                .min_by(|a, b| distance(a).total_cmp(&distance(b)))?;
        }
        Some(center_region(&free, size).nearest_point(center).sub_point(center))
    }

    /// Phase 3: grow containers around their children.
    ///
    /// Containment relationships are handled in ascending descendant count of
    /// the parent, so inner containers are complete before outer ones grow.
    /// The first child extends the parent's envelope; further children only
    /// extend its space. Growth is rejected if it leaves the draw area or
    /// adds overlap with an unrelated classifier.
    pub fn embrace_children(&self, layout: &mut LayoutVisibleSet<'_>) {
        let containment = layout.containment().clone();
        let draw_area = layout.diagram().draw_area();
        let padding = Insets::uniform(self.gap());
        let (pairs, skipped) = containment_pairs(layout, &containment);
        for relationship in skipped {
            warn!(relationship = layout.relationship_data(relationship).id().value(); "Self or cyclic containment skipped");
        }

        let mut sorter = IndexSorter::with_capacity(self.config.limits().relationships);
        for (position, pair) in pairs.iter().enumerate() {
            sorter.insert_or_warn(position, containment.descendant_count(pair.parent) as f64);
        }

        let mut embraced = vec![false; layout.classifier_count()];
        let mut accepted = 0;
        for position in sorter.iter() {
            let pair = pairs[position];
            let parent = *layout.classifier(pair.parent);
            let child = layout.classifier(pair.child).envelope().add_padding(padding);
            let base = if embraced[pair.parent.index()] {
                parent.space()
            } else {
                parent.envelope()
            };
            let grown = self.composer.compose_around_space(
                layout.classifier_data(pair.parent),
                base.merge(&child),
                true,
            );
            let envelope = grown.envelope();

            if !draw_area.contains(&envelope) {
                trace!(parent:% = pair.parent, child:% = pair.child; "Embrace leaves draw area");
                continue;
            }
            let conflict = layout.classifier_indices().any(|other| {
                if containment.is_related(pair.parent, other) {
                    return false;
                }
                let obstacle = layout.classifier(other).envelope();
                envelope.intersect_area(&obstacle) > parent.envelope().intersect_area(&obstacle)
            });
            if conflict {
                trace!(parent:% = pair.parent, child:% = pair.child; "Embrace adds overlap");
                continue;
            }
            layout.set_classifier(pair.parent, grown);
            embraced[pair.parent.index()] = true;
            accepted += 1;
        }
        debug!(accepted, containments = pairs.len(); "Children embraced");
    }

    /// Phase 4: containment shown by nesting is not drawn.
    ///
    /// A containment relationship becomes implicit if the parent's space
    /// holds the child's symbol; otherwise its visibility is left alone.
    pub fn hide_relations_of_embraced_children(&self, layout: &mut LayoutVisibleSet<'_>) {
        let (pairs, _) = containment_pairs(layout, layout.containment());
        let mut hidden = 0;
        for pair in pairs {
            let space = layout.classifier(pair.parent).space();
            if space.contains(&layout.classifier(pair.child).symbol_box()) {
                layout.relationship_mut(pair.relationship).set_visibility(Visibility::Implicit);
                hidden += 1;
            }
        }
        debug!(hidden; "Embraced containment hidden");
    }

    /// Phase 5: fit containers around their descendants and move them into free space.
    ///
    /// For each container, in ascending descendant count, the container is
    /// composed around the union of its descendants. If the result fits into
    /// the free space left by unrelated classifiers with room to spare, the
    /// group is moved a third of the way toward the center of that free
    /// space.
    pub fn move_and_embrace_children(&self, layout: &mut LayoutVisibleSet<'_>) {
        let containment = layout.containment().clone();
        let draw_area = layout.diagram().draw_area();
        let padding = Insets::uniform(self.gap());

        let mut sorter = IndexSorter::with_capacity(self.config.limits().classifiers);
        for classifier in layout.classifier_indices() {
            let count = containment.descendant_count(classifier);
            if count > 0 {
                sorter.insert_or_warn(classifier.index(), count as f64);
            }
        }

        let mut moved = 0;
        for index in sorter.iter() {
            let parent = ClassifierIndex::new(index);
            let descendants: Vec<ClassifierIndex> = containment.descendants(parent).collect();
            if descendants.iter().any(|&descendant| containment.is_ancestor(descendant, parent)) {
                warn!(classifier = layout.classifier_data(parent).id().value(); "Cyclic containment not embraced");
                continue;
            }
            let Some(union) = descendants
                .iter()
                .map(|&descendant| layout.classifier(descendant).envelope())
                .reduce(|a, b| a.merge(&b))
            else {
                continue;
            };

            let composed = self.composer.compose_around_space(
                layout.classifier_data(parent),
                union.add_padding(padding),
                true,
            );
            let envelope = composed.envelope();

            let mut free = draw_area;
            for other in layout.classifier_indices() {
                if containment.is_related(parent, other) {
                    continue;
                }
                let obstacle = layout.classifier(other).envelope();
                if !obstacle.is_intersecting(&free) {
                    continue;
                }
                let mut best = Bounds::default();
                for strip in free.strips_outside(&obstacle) {
                    if strip.intersect_area(&envelope) > best.intersect_area(&envelope) || best.is_empty() {
                        best = strip;
                    }
                }
                free = best;
            }

            if free.width() - envelope.width() <= 0.0 || free.height() - envelope.height() <= 0.0 {
                trace!(classifier:% = parent, free:? = free; "No room to embrace descendants");
                continue;
            }

            let current = envelope.center();
            let target = free.center().scale(1.0 / 3.0).add_point(current.scale(2.0 / 3.0));
            let delta = center_region(&free, envelope.to_size())
                .nearest_point(target)
                .sub_point(current);

            layout.set_classifier(parent, composed.translate(delta));
            for descendant in descendants {
                let shifted = layout.classifier(descendant).translate(delta);
                layout.set_classifier(descendant, shifted);
            }
            moved += 1;
        }
        debug!(moved; "Descendants embraced");
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use trellis_core::{
        identifier::RowId,
        semantic::{
            ClassifierKind, Diagram, DiagramKind, Feature, FeatureKind, Relationship,
            RelationshipKind, VisibleClassifier, VisibleSet,
        },
    };

    use super::*;
    use crate::layout::composer::BoxComposer;

    fn set_of(kind: DiagramKind, orders: &[(i32, i32)], containments: &[(i64, i64)]) -> VisibleSet {
        let mut set = VisibleSet::new(Diagram::new(RowId::new(1), kind, "d"));
        for (i, &(x, y)) in orders.iter().enumerate() {
            set.add_classifier(
                VisibleClassifier::new(RowId::new(10 + i as i64), ClassifierKind::Class, format!("C{i}"))
                    .with_orders(x, y),
            )
            .unwrap();
        }
        for (i, &(parent, child)) in containments.iter().enumerate() {
            set.add_relationship(Relationship::new(
                RowId::new(100 + i as i64),
                RelationshipKind::Containment,
                RowId::new(10 + parent),
                RowId::new(10 + child),
            ))
            .unwrap();
        }
        set
    }

    fn with_boxes<'a>(set: &'a VisibleSet, boxes: &[Bounds]) -> LayoutVisibleSet<'a> {
        with_boxes_in(set, Bounds::new(0.0, 0.0, 1008.0, 1008.0), boxes)
    }

    fn with_boxes_in<'a>(set: &'a VisibleSet, bounds: Bounds, boxes: &[Bounds]) -> LayoutVisibleSet<'a> {
        let mut layout = LayoutVisibleSet::new(set, bounds, &LayoutConfig::default()).unwrap();
        for (i, symbol) in boxes.iter().enumerate() {
            layout.set_classifier(
                ClassifierIndex::new(i),
                ClassifierLayout::new(*symbol, symbol.shrink(Insets::uniform(4.0)), Bounds::default(), Bounds::default()),
            );
        }
        layout
    }

    fn total_unrelated_overlap(layout: &LayoutVisibleSet<'_>) -> f64 {
        let envelopes: Vec<Bounds> = layout.classifiers().iter().map(ClassifierLayout::envelope).collect();
        let mut total = 0.0;
        for i in 0..envelopes.len() {
            for j in (i + 1)..envelopes.len() {
                if !layout
                    .containment()
                    .is_related(ClassifierIndex::new(i), ClassifierIndex::new(j))
                {
                    total += envelopes[i].intersect_area(&envelopes[j]);
                }
            }
        }
        total
    }

    #[test]
    fn test_estimate_bounds_centers_on_grid() {
        let set = set_of(DiagramKind::Class, &[(0, 0), (1, 0)], &[]);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 808.0, 608.0), &config).unwrap();
        ClassifierLayouter::new(&config, &composer).estimate_bounds(&mut layout);

        // draw area 4..804 x 4..604; two columns, one row
        let first = layout.classifier(ClassifierIndex::new(0)).symbol_box();
        let second = layout.classifier(ClassifierIndex::new(1)).symbol_box();
        assert_eq!(first.center(), Point::new(204.0, 304.0));
        assert_eq!(second.center(), Point::new(604.0, 304.0));
        assert_eq!(first.to_size(), config.default_classifier_size());
    }

    #[test]
    fn test_estimate_bounds_grows_for_compartments() {
        let mut set = set_of(DiagramKind::Class, &[(0, 0)], &[]);
        for i in 0..8 {
            set.add_feature(Feature::new(
                RowId::new(200 + i),
                RowId::new(10),
                FeatureKind::Property,
                "a_rather_long_property_name",
            ))
            .unwrap();
        }
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 808.0, 608.0), &config).unwrap();
        ClassifierLayouter::new(&config, &composer).estimate_bounds(&mut layout);

        let classifier = layout.classifier(ClassifierIndex::new(0));
        let needed = FeatureLayouter::new(&config, &composer)
            .calculate_features_bounds(&layout, ClassifierIndex::new(0));
        assert!(classifier.space().width() >= needed.width());
        assert!(classifier.space().height() >= needed.height());
        assert_eq!(classifier.symbol_box().center(), Point::new(404.0, 304.0));
    }

    #[test]
    fn test_sequence_heads_share_a_row() {
        let set = set_of(DiagramKind::Sequence, &[(0, 5), (1, -7)], &[]);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 808.0, 608.0), &config).unwrap();
        ClassifierLayouter::new(&config, &composer).estimate_bounds(&mut layout);
        let first = layout.classifier(ClassifierIndex::new(0)).symbol_box();
        let second = layout.classifier(ClassifierIndex::new(1)).symbol_box();
        assert_eq!(first.min_y(), 20.0);
        assert_eq!(second.min_y(), 20.0);
        assert!(second.min_x() > first.max_x());
    }

    #[test]
    fn test_overlapping_pair_is_separated() {
        let set = set_of(DiagramKind::Class, &[(0, 0), (0, 0)], &[]);
        let boxes = [Bounds::new(100.0, 100.0, 120.0, 60.0), Bounds::new(150.0, 120.0, 120.0, 60.0)];
        let mut layout = with_boxes(&set, &boxes);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let layouter = ClassifierLayouter::new(&config, &composer);

        let offsets = layouter.move_to_avoid_overlaps(&mut layout);
        assert!(offsets[0].is_zero());
        // the nearest free slot is directly below the first box
        assert_eq!(offsets[1], Point::new(0.0, 40.0));
        assert_eq!(total_unrelated_overlap(&layout), 0.0);

        let again = layouter.move_to_avoid_overlaps(&mut layout);
        assert!(again.iter().all(|offset| offset.is_zero()));
    }

    #[test]
    fn test_classifier_outside_is_pulled_in() {
        let set = set_of(DiagramKind::Class, &[(0, 0)], &[]);
        let mut layout = with_boxes(&set, &[Bounds::new(-50.0, 100.0, 120.0, 60.0)]);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let offsets = ClassifierLayouter::new(&config, &composer).move_to_avoid_overlaps(&mut layout);
        assert_eq!(offsets[0], Point::new(54.0, 0.0));
        assert_eq!(layout.classifier(ClassifierIndex::new(0)).symbol_box().min_x(), 4.0);
    }

    #[test]
    fn test_head_straddling_left_edge_is_pulled_in_and_cleared() {
        // draw area 4..404; pulling head 0 straight in would hit head 1
        let set = set_of(DiagramKind::Sequence, &[(0, 0), (1, 0)], &[]);
        let boxes = [Bounds::new(-30.0, 20.0, 120.0, 60.0), Bounds::new(100.0, 20.0, 120.0, 60.0)];
        let mut layout = with_boxes_in(&set, Bounds::new(0.0, 0.0, 408.0, 408.0), &boxes);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);

        let offsets = ClassifierLayouter::new(&config, &composer).move_to_avoid_overlaps(&mut layout);
        assert_eq!(offsets[0], Point::new(266.0, 0.0));
        assert!(offsets[1].is_zero());

        let draw_area = layout.diagram().draw_area();
        for classifier in layout.classifiers() {
            assert!(draw_area.contains(&classifier.envelope()));
        }
        assert_eq!(total_unrelated_overlap(&layout), 0.0);
    }

    #[test]
    fn test_related_classifiers_may_overlap() {
        let set = set_of(DiagramKind::Class, &[(0, 0), (0, 0)], &[(0, 1)]);
        let boxes = [Bounds::new(100.0, 100.0, 300.0, 200.0), Bounds::new(150.0, 150.0, 100.0, 50.0)];
        let mut layout = with_boxes(&set, &boxes);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let offsets = ClassifierLayouter::new(&config, &composer).move_to_avoid_overlaps(&mut layout);
        assert!(offsets.iter().all(|offset| offset.is_zero()));
    }

    #[test]
    fn test_embrace_and_hide() {
        let set = set_of(DiagramKind::Package, &[(0, 0), (1, 0)], &[(0, 1)]);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 808.0, 608.0), &config).unwrap();
        let layouter = ClassifierLayouter::new(&config, &composer);
        layouter.estimate_bounds(&mut layout);
        layouter.move_to_avoid_overlaps(&mut layout);
        layouter.embrace_children(&mut layout);

        let parent = *layout.classifier(ClassifierIndex::new(0));
        let child = *layout.classifier(ClassifierIndex::new(1));
        assert!(parent.space().contains(&child.symbol_box()));

        layouter.hide_relations_of_embraced_children(&mut layout);
        assert_eq!(
            layout.relationship(RelationshipIndex::new(0)).visibility(),
            Visibility::Implicit
        );

        layouter.move_and_embrace_children(&mut layout);
        let parent = *layout.classifier(ClassifierIndex::new(0));
        let child = *layout.classifier(ClassifierIndex::new(1));
        assert!(parent.envelope().contains(&child.symbol_box()));
        assert!(layout.diagram().draw_area().contains(&parent.envelope()));
    }

    #[test]
    fn test_later_children_grow_around_the_space() {
        let set = set_of(DiagramKind::Package, &[(0, 0), (1, 0), (2, 0)], &[(0, 1), (0, 2)]);
        let boxes = [
            Bounds::new(100.0, 100.0, 120.0, 60.0),
            Bounds::new(300.0, 100.0, 100.0, 60.0),
            Bounds::new(500.0, 300.0, 100.0, 60.0),
        ];
        let mut layout = with_boxes(&set, &boxes);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        ClassifierLayouter::new(&config, &composer).embrace_children(&mut layout);

        // first child: old envelope [100, 100, 220, 160] joined with the
        // padded child gives space [100, 84, 416, 176]; the second child
        // then extends that space, not the envelope with its label tab
        let parent = layout.classifier(ClassifierIndex::new(0));
        assert_eq!(parent.space(), Bounds::new(100.0, 84.0, 516.0, 292.0));
        assert_eq!(parent.envelope(), Bounds::new(96.0, 58.0, 524.0, 322.0));
        for child in [1, 2] {
            assert!(parent.space().contains(&layout.classifier(ClassifierIndex::new(child)).symbol_box()));
        }
    }

    #[test]
    fn test_group_moves_a_third_toward_free_space() {
        let set = set_of(DiagramKind::Package, &[(0, 0), (1, 0)], &[(0, 1)]);
        let boxes = [Bounds::new(600.0, 600.0, 60.0, 40.0), Bounds::new(100.0, 100.0, 120.0, 60.0)];
        let mut layout = with_boxes(&set, &boxes);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        ClassifierLayouter::new(&config, &composer).move_and_embrace_children(&mut layout);

        // composed around the padded child the envelope is [80, 58, 240, 180],
        // centered at (160, 119); the free space is the draw area centered at (504, 504)
        let delta = Point::new((504.0 - 160.0) / 3.0, (504.0 - 119.0) / 3.0);
        let parent = layout.classifier(ClassifierIndex::new(0));
        let center = parent.envelope().center();
        assert!(approx_eq!(f64, center.x(), 160.0 + delta.x(), epsilon = 1e-9));
        assert!(approx_eq!(f64, center.y(), 119.0 + delta.y(), epsilon = 1e-9));
        assert!(approx_eq!(f64, parent.envelope().width(), 160.0, epsilon = 1e-9));

        let child = layout.classifier(ClassifierIndex::new(1)).symbol_box();
        assert!(approx_eq!(f64, child.min_x(), 100.0 + delta.x(), epsilon = 1e-9));
        assert!(approx_eq!(f64, child.min_y(), 100.0 + delta.y(), epsilon = 1e-9));
        assert!(approx_eq!(f64, child.width(), 120.0, epsilon = 1e-9));
        assert!(parent.space().contains(&child));
    }

    #[test]
    fn test_group_without_free_margin_is_left_alone() {
        // draw area 4..164 is exactly as wide as the composed envelope
        let set = set_of(DiagramKind::Package, &[(0, 0), (1, 0)], &[(0, 1)]);
        let boxes = [Bounds::new(30.0, 250.0, 60.0, 40.0), Bounds::new(24.0, 100.0, 120.0, 60.0)];
        let mut layout = with_boxes_in(&set, Bounds::new(0.0, 0.0, 168.0, 400.0), &boxes);
        let before = layout.classifiers().to_vec();
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        ClassifierLayouter::new(&config, &composer).move_and_embrace_children(&mut layout);
        assert_eq!(layout.classifiers(), before.as_slice());
    }

    #[test]
    fn test_embrace_rejected_when_it_hits_a_stranger() {
        // the stranger sits between parent and child
        let set = set_of(DiagramKind::Package, &[(0, 0), (2, 0), (1, 0)], &[(0, 1)]);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 908.0, 608.0), &config).unwrap();
        let layouter = ClassifierLayouter::new(&config, &composer);
        layouter.estimate_bounds(&mut layout);
        let before = *layout.classifier(ClassifierIndex::new(0));
        layouter.embrace_children(&mut layout);
        assert_eq!(*layout.classifier(ClassifierIndex::new(0)), before);
        layouter.hide_relations_of_embraced_children(&mut layout);
        assert_eq!(
            layout.relationship(RelationshipIndex::new(0)).visibility(),
            Visibility::Show
        );
    }

    #[test]
    fn test_self_and_cyclic_containment_are_skipped() {
        let set = set_of(DiagramKind::Package, &[(0, 0), (1, 0)], &[(0, 0), (0, 1), (1, 0)]);
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 808.0, 608.0), &config).unwrap();
        ClassifierLayouter::new(&config, &composer).layout(&mut layout);
        for relationship in layout.relationship_indices() {
            assert_eq!(layout.relationship(relationship).visibility(), Visibility::Show);
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use trellis_core::{
        identifier::RowId,
        semantic::{ClassifierKind, Diagram, DiagramKind, VisibleClassifier, VisibleSet},
    };

    use super::*;
    use crate::layout::composer::BoxComposer;

    fn boxes_strategy() -> impl Strategy<Value = Vec<Bounds>> {
        prop::collection::vec(
            (0.0f64..500.0, 0.0f64..500.0, 20.0f64..200.0, 20.0f64..120.0)
                .prop_map(|(x, y, w, h)| Bounds::new(x, y, w, h)),
            1..7,
        )
    }

    fn total_overlap(envelopes: &[Bounds]) -> f64 {
        let mut total = 0.0;
        for i in 0..envelopes.len() {
            for j in (i + 1)..envelopes.len() {
                total += envelopes[i].intersect_area(&envelopes[j]);
            }
        }
        total
    }

    /// Moving never increases the total overlap of unrelated classifiers.
    fn check_overlap_never_grows(boxes: Vec<Bounds>) -> Result<(), TestCaseError> {
        let mut set = VisibleSet::new(Diagram::new(RowId::new(1), DiagramKind::Class, "d"));
        for i in 0..boxes.len() {
            set.add_classifier(VisibleClassifier::new(RowId::new(i as i64), ClassifierKind::Class, "c"))
                .unwrap();
        }
        let config = LayoutConfig::default();
        let composer = BoxComposer::new(&config);
        let mut layout = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 808.0, 808.0), &config).unwrap();
        for (i, symbol) in boxes.iter().enumerate() {
            layout.set_classifier(
                ClassifierIndex::new(i),
                ClassifierLayout::new(*symbol, *symbol, Bounds::default(), Bounds::default()),
            );
        }
        let before = total_overlap(&boxes);
        ClassifierLayouter::new(&config, &composer).move_to_avoid_overlaps(&mut layout);
        let after: Vec<Bounds> = layout.classifiers().iter().map(ClassifierLayout::envelope).collect();
        prop_assert!(total_overlap(&after) <= before + 1e-6);
        Ok(())
    }

    proptest! {
        #[test]
        fn overlap_never_grows(boxes in boxes_strategy()) {
            check_overlap_never_grows(boxes)?;
        }
    }
}
