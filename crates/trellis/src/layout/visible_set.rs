//! Layout records of one visible set.
//!
//! [`LayoutVisibleSet`] is the mutable view a layout pass works on. It keeps
//! one record per visible classifier, feature and relationship in contiguous
//! vectors that run parallel to the arrays of the borrowed [`VisibleSet`], so
//! a [`ClassifierIndex`] addresses both the model element and its layout.

use log::{debug, trace};

use trellis_core::{
    geometry::{Bounds, Connector, Direction, Point},
    identifier::{ClassifierIndex, FeatureIndex, RelationshipIndex},
    scale::{Grid, GridKind},
    semantic::{Feature, Relationship, VisibleClassifier, VisibleSet},
};

use crate::{LayoutError, config::LayoutConfig, layout::containment::ContainmentCache};

/// How a relationship is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Show,
    GrayOut,
    /// Expressed by other means (e.g. nesting) and not drawn as a connector
    Implicit,
}

/// Geometry of the diagram itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramLayout {
    bounds: Bounds,
    draw_area: Bounds,
    grid: Grid,
}

impl DiagramLayout {
    /// Lays out a diagram occupying `bounds`.
    ///
    /// The draw area is `bounds` shrunk by the standard border; the grid spans
    /// the draw area.
    pub fn new(bounds: Bounds, config: &LayoutConfig, grid_kind: GridKind) -> Self {
        let draw_area = bounds.shrink(config.border_insets());
        Self {
            bounds,
            draw_area,
            grid: Grid::new(draw_area, grid_kind),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Area available to classifiers
    pub fn draw_area(&self) -> Bounds {
        self.draw_area
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}

/// Computed geometry of a classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifierLayout {
    symbol_box: Bounds,
    space: Bounds,
    label_box: Bounds,
    icon_box: Bounds,
}

impl ClassifierLayout {
    pub fn new(symbol_box: Bounds, space: Bounds, label_box: Bounds, icon_box: Bounds) -> Self {
        Self {
            symbol_box,
            space,
            label_box,
            icon_box,
        }
    }

    /// The drawn shape's bounding rectangle
    pub fn symbol_box(&self) -> Bounds {
        self.symbol_box
    }

    /// Interior reserved for contained classifiers and compartments
    pub fn space(&self) -> Bounds {
        self.space
    }

    pub fn label_box(&self) -> Bounds {
        self.label_box
    }

    pub fn icon_box(&self) -> Bounds {
        self.icon_box
    }

    /// Union of symbol box and label box
    pub fn envelope(&self) -> Bounds {
        if self.label_box.is_empty() {
            return self.symbol_box;
        }
        self.symbol_box.merge(&self.label_box)
    }

    /// Moves all boxes by the offset
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            symbol_box: self.symbol_box.translate(offset),
            space: self.space.translate(offset),
            label_box: self.label_box.translate(offset),
            icon_box: self.icon_box.translate(offset),
        }
    }
}

/// Computed geometry of a feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureLayout {
    classifier: ClassifierIndex,
    symbol_box: Bounds,
    label_box: Bounds,
    icon_direction: Direction,
}

impl FeatureLayout {
    pub fn new(classifier: ClassifierIndex) -> Self {
        Self {
            classifier,
            symbol_box: Bounds::default(),
            label_box: Bounds::default(),
            icon_direction: Direction::Center,
        }
    }

    /// The owning classifier
    pub fn classifier(&self) -> ClassifierIndex {
        self.classifier
    }

    pub fn symbol_box(&self) -> Bounds {
        self.symbol_box
    }

    pub fn label_box(&self) -> Bounds {
        self.label_box
    }

    pub fn icon_direction(&self) -> Direction {
        self.icon_direction
    }

    pub fn set_symbol_box(&mut self, symbol_box: Bounds) {
        self.symbol_box = symbol_box;
    }

    pub fn set_label_box(&mut self, label_box: Bounds) {
        self.label_box = label_box;
    }

    pub fn set_icon_direction(&mut self, icon_direction: Direction) {
        self.icon_direction = icon_direction;
    }

    /// Union of symbol box and label box
    pub fn envelope(&self) -> Bounds {
        if self.label_box.is_empty() {
            return self.symbol_box;
        }
        self.symbol_box.merge(&self.label_box)
    }
}

/// Computed geometry of a relationship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelationshipLayout {
    from: ClassifierIndex,
    to: ClassifierIndex,
    from_feature: Option<FeatureIndex>,
    to_feature: Option<FeatureIndex>,
    shape: Connector,
    visibility: Visibility,
    label_box: Bounds,
}

impl RelationshipLayout {
    pub fn new(
        from: ClassifierIndex,
        to: ClassifierIndex,
        from_feature: Option<FeatureIndex>,
        to_feature: Option<FeatureIndex>,
    ) -> Self {
        Self {
            from,
            to,
            from_feature,
            to_feature,
            shape: Connector::default(),
            visibility: Visibility::Show,
            label_box: Bounds::default(),
        }
    }

    pub fn from(&self) -> ClassifierIndex {
        self.from
    }

    pub fn to(&self) -> ClassifierIndex {
        self.to
    }

    pub fn from_feature(&self) -> Option<FeatureIndex> {
        self.from_feature
    }

    pub fn to_feature(&self) -> Option<FeatureIndex> {
        self.to_feature
    }

    pub fn shape(&self) -> &Connector {
        &self.shape
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn label_box(&self) -> Bounds {
        self.label_box
    }

    /// True unless the relationship is implicit
    pub fn is_drawn(&self) -> bool {
        self.visibility != Visibility::Implicit
    }

    pub fn set_shape(&mut self, shape: Connector) {
        self.shape = shape;
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }

    pub fn set_label_box(&mut self, label_box: Bounds) {
        self.label_box = label_box;
    }
}

/// The layout-mutable view of one [`VisibleSet`].
#[derive(Debug, Clone)]
pub struct LayoutVisibleSet<'a> {
    data: &'a VisibleSet,
    diagram: DiagramLayout,
    classifiers: Vec<ClassifierLayout>,
    features: Vec<FeatureLayout>,
    relationships: Vec<RelationshipLayout>,
    containment: ContainmentCache,
}

impl<'a> LayoutVisibleSet<'a> {
    /// Resolves all references of `data` and creates empty layout records.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownClassifier`] or
    /// [`LayoutError::UnknownFeature`] if a feature or relationship refers
    /// to an element that is not part of the visible set.
    pub fn new(data: &'a VisibleSet, bounds: Bounds, config: &LayoutConfig) -> Result<Self, LayoutError> {
        let diagram = DiagramLayout::new(bounds, config, data.diagram().kind().grid_kind());
        let classifiers = vec![ClassifierLayout::default(); data.classifiers().len()];

        let resolve_classifier = |id| {
            data.classifier_position(id)
                .map(ClassifierIndex::new)
                .ok_or(LayoutError::UnknownClassifier(id))
        };
        let resolve_feature = |id| {
            data.feature_position(id)
                .map(FeatureIndex::new)
                .ok_or(LayoutError::UnknownFeature(id))
        };

        let features = data
            .features()
            .iter()
            .map(|feature| resolve_classifier(feature.classifier_id()).map(FeatureLayout::new))
            .collect::<Result<Vec<_>, _>>()?;

        let relationships = data
            .relationships()
            .iter()
            .map(|relationship| {
                Ok(RelationshipLayout::new(
                    resolve_classifier(relationship.from_classifier())?,
                    resolve_classifier(relationship.to_classifier())?,
                    relationship.from_feature().map(resolve_feature).transpose()?,
                    relationship.to_feature().map(resolve_feature).transpose()?,
                ))
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        let containment = ContainmentCache::build(data, config.containment_passes());
        debug!(
            classifiers = classifiers.len(),
            features = features.len(),
            relationships = relationships.len();
            "Layout records created"
        );

        Ok(Self {
            data,
            diagram,
            classifiers,
            features,
            relationships,
            containment,
        })
    }

    /// The model elements being laid out
    pub fn data(&self) -> &'a VisibleSet {
        self.data
    }

    pub fn diagram(&self) -> &DiagramLayout {
        &self.diagram
    }

    pub fn diagram_mut(&mut self) -> &mut DiagramLayout {
        &mut self.diagram
    }

    pub fn containment(&self) -> &ContainmentCache {
        &self.containment
    }

    pub fn classifier_count(&self) -> usize {
        self.classifiers.len()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn classifier_indices(&self) -> impl Iterator<Item = ClassifierIndex> + use<> {
        (0..self.classifiers.len()).map(ClassifierIndex::new)
    }

    pub fn feature_indices(&self) -> impl Iterator<Item = FeatureIndex> + use<> {
        (0..self.features.len()).map(FeatureIndex::new)
    }

    pub fn relationship_indices(&self) -> impl Iterator<Item = RelationshipIndex> + use<> {
        (0..self.relationships.len()).map(RelationshipIndex::new)
    }

    pub fn classifier(&self, index: ClassifierIndex) -> &ClassifierLayout {
        &self.classifiers[index.index()]
    }

    pub fn classifier_data(&self, index: ClassifierIndex) -> &'a VisibleClassifier {
        &self.data.classifiers()[index.index()]
    }

    pub fn set_classifier(&mut self, index: ClassifierIndex, layout: ClassifierLayout) {
        trace!(classifier:% = index, symbol_box:? = layout.symbol_box(); "Classifier layout updated");
        self.classifiers[index.index()] = layout;
    }

    pub fn feature(&self, index: FeatureIndex) -> &FeatureLayout {
        &self.features[index.index()]
    }

    pub fn feature_mut(&mut self, index: FeatureIndex) -> &mut FeatureLayout {
        &mut self.features[index.index()]
    }

    pub fn feature_data(&self, index: FeatureIndex) -> &'a Feature {
        &self.data.features()[index.index()]
    }

    pub fn relationship(&self, index: RelationshipIndex) -> &RelationshipLayout {
        &self.relationships[index.index()]
    }

    pub fn relationship_mut(&mut self, index: RelationshipIndex) -> &mut RelationshipLayout {
        &mut self.relationships[index.index()]
    }

    pub fn relationship_data(&self, index: RelationshipIndex) -> &'a Relationship {
        &self.data.relationships()[index.index()]
    }

    /// Features owned by `classifier`, in model order
    pub fn features_of(&self, classifier: ClassifierIndex) -> impl Iterator<Item = FeatureIndex> + '_ {
        self.features
            .iter()
            .enumerate()
            .filter(move |(_, feature)| feature.classifier() == classifier)
            .map(|(index, _)| FeatureIndex::new(index))
    }

    /// All classifier layouts in index order
    pub fn classifiers(&self) -> &[ClassifierLayout] {
        &self.classifiers
    }

    pub fn features(&self) -> &[FeatureLayout] {
        &self.features
    }

    pub fn relationships(&self) -> &[RelationshipLayout] {
        &self.relationships
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        identifier::RowId,
        semantic::{ClassifierKind, Diagram, DiagramKind, FeatureKind, RelationshipKind},
    };

    use super::*;

    fn sample_set() -> VisibleSet {
        let mut set = VisibleSet::new(Diagram::new(RowId::new(1), DiagramKind::Class, "d"));
        set.add_classifier(VisibleClassifier::new(RowId::new(10), ClassifierKind::Class, "A"))
            .unwrap();
        set.add_classifier(VisibleClassifier::new(RowId::new(11), ClassifierKind::Class, "B"))
            .unwrap();
        set.add_feature(Feature::new(RowId::new(20), RowId::new(11), FeatureKind::Port, "p"))
            .unwrap();
        set.add_relationship(
            Relationship::new(RowId::new(30), RelationshipKind::Containment, RowId::new(10), RowId::new(11))
                .with_features(None, Some(RowId::new(20))),
        )
        .unwrap();
        set
    }

    #[test]
    fn test_references_are_resolved() {
        let set = sample_set();
        let bounds = Bounds::new(0.0, 0.0, 400.0, 300.0);
        let layout = LayoutVisibleSet::new(&set, bounds, &LayoutConfig::default()).unwrap();
        assert_eq!(layout.feature(FeatureIndex::new(0)).classifier(), ClassifierIndex::new(1));
        let relationship = layout.relationship(RelationshipIndex::new(0));
        assert_eq!(relationship.from(), ClassifierIndex::new(0));
        assert_eq!(relationship.to_feature(), Some(FeatureIndex::new(0)));
        assert!(layout.containment().is_ancestor(ClassifierIndex::new(0), ClassifierIndex::new(1)));
        assert_eq!(layout.diagram().draw_area(), Bounds::new(4.0, 4.0, 392.0, 292.0));
        assert_eq!(layout.features_of(ClassifierIndex::new(1)).count(), 1);
    }

    #[test]
    fn test_unknown_classifier_is_reported() {
        let mut set = sample_set();
        set.add_feature(Feature::new(RowId::new(21), RowId::new(99), FeatureKind::Port, "q"))
            .unwrap();
        let err = LayoutVisibleSet::new(&set, Bounds::new(0.0, 0.0, 10.0, 10.0), &LayoutConfig::default())
            .unwrap_err();
        assert_eq!(err, LayoutError::UnknownClassifier(RowId::new(99)));
    }

    #[test]
    fn test_envelope_ignores_empty_label() {
        let symbol = Bounds::new(10.0, 10.0, 20.0, 20.0);
        let layout = ClassifierLayout::new(symbol, symbol, Bounds::default(), Bounds::default());
        assert_eq!(layout.envelope(), symbol);

        let label = Bounds::new(10.0, 0.0, 40.0, 10.0);
        let layout = ClassifierLayout::new(symbol, symbol, label, Bounds::default());
        assert_eq!(layout.envelope(), Bounds::new(10.0, 0.0, 40.0, 30.0));
    }
}
