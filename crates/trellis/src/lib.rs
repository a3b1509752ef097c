//! Trellis - automatic layout of UML and SysML diagrams.
//!
//! Given the visible set of a diagram (the diagram, its classifiers, their
//! features and the relationships between them) Trellis computes where every
//! element is drawn: classifier boxes, port and compartment positions,
//! connector routes and floating labels. Rendering is left to the caller.

pub mod config;
pub mod layout;

mod error;

pub use trellis_core::{geometry, identifier, scale, semantic};

pub use error::LayoutError;

use log::{debug, info};

use config::LayoutConfig;
use geometry::Bounds;
use layout::{
    BoxComposer, ClassifierLayouter, Composer, FeatureLayouter, LabelLayouter, LayoutVisibleSet,
    RelationshipLayouter1d, RelationshipLayouter2d,
};
use semantic::VisibleSet;

/// Builder running the complete layout pipeline.
///
/// # Examples
///
/// ```
/// use trellis::{LayoutBuilder, config::LayoutConfig, geometry::Bounds};
/// use trellis::identifier::RowId;
/// use trellis::semantic::{ClassifierKind, Diagram, DiagramKind, VisibleClassifier, VisibleSet};
///
/// let mut set = VisibleSet::new(Diagram::new(RowId::new(1), DiagramKind::Class, "model"));
/// set.add_classifier(VisibleClassifier::new(RowId::new(2), ClassifierKind::Class, "Engine"))
///     .expect("capacity");
///
/// let builder = LayoutBuilder::new(LayoutConfig::default());
/// let layout = builder
///     .layout(&set, Bounds::new(0.0, 0.0, 400.0, 300.0))
///     .expect("Failed to lay out");
/// assert!(!layout.classifiers()[0].symbol_box().is_empty());
/// ```
pub struct LayoutBuilder {
    config: LayoutConfig,
    composer: Box<dyn Composer>,
}

impl Default for LayoutBuilder {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutBuilder {
    /// Creates a builder using the [`BoxComposer`] for the given configuration.
    pub fn new(config: LayoutConfig) -> Self {
        let composer = Box::new(BoxComposer::new(&config));
        Self { config, composer }
    }

    /// Replaces the composer that shapes classifiers and measures text.
    pub fn with_composer(mut self, composer: Box<dyn Composer>) -> Self {
        self.composer = composer;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `set` in a diagram occupying `bounds`.
    ///
    /// Classifiers are placed first, then their features, then connectors
    /// (along the time axis for sequence and timing diagrams, freely
    /// otherwise), and finally the floating labels.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] for an unusable configuration,
    /// [`LayoutError::CapacityExceeded`] if `set` is larger than the
    /// configured limits, and [`LayoutError::UnknownClassifier`] or
    /// [`LayoutError::UnknownFeature`] for unresolved references.
    pub fn layout<'a>(&self, set: &'a VisibleSet, bounds: Bounds) -> Result<LayoutVisibleSet<'a>, LayoutError> {
        self.config.validate()?;
        self.check_limits(set)?;

        let kind = set.diagram().kind();
        info!(diagram_kind:? = kind, diagram = set.diagram().name(); "Laying out diagram");
        let mut layout = LayoutVisibleSet::new(set, bounds, &self.config)?;
        let composer = self.composer.as_ref();

        let relationships_2d = RelationshipLayouter2d::new(&self.config);
        if !kind.has_time_axis() {
            relationships_2d.init_visibility(&mut layout);
        }

        ClassifierLayouter::new(&self.config, composer).layout(&mut layout);
        debug!("Classifiers laid out");

        FeatureLayouter::new(&self.config, composer).layout_features(&mut layout);

        if kind.has_time_axis() {
            RelationshipLayouter1d::new(&self.config).layout(&mut layout);
        } else {
            relationships_2d.layout(&mut layout);
        }
        debug!("Relationships laid out");

        let labels = LabelLayouter::new(&self.config, composer);
        labels.layout_feature_labels(&mut layout);
        labels.layout_relationship_labels(&mut layout);

        info!(
            classifiers = layout.classifier_count(),
            features = layout.feature_count(),
            relationships = layout.relationship_count();
            "Layout calculated"
        );
        Ok(layout)
    }

    fn check_limits(&self, set: &VisibleSet) -> Result<(), LayoutError> {
        let limits = self.config.limits();
        let counts = [
            ("classifiers", set.classifiers().len(), limits.classifiers),
            ("features", set.features().len(), limits.features),
            ("relationships", set.relationships().len(), limits.relationships),
        ];
        for (what, count, capacity) in counts {
            if count > capacity {
                return Err(LayoutError::CapacityExceeded { what, capacity });
            }
        }
        Ok(())
    }
}
