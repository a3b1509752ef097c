//! Model elements as supplied by the model reader.
//!
//! A [`VisibleSet`] is the snapshot of one diagram: the diagram record and the
//! classifiers, features and relationships visible in it, each carrying its
//! persisted ordering hints. The layout engine only reads these records; all
//! computed geometry lives in separate layout records.
//!
//! The arrays are bounded. Adding beyond a limit fails with
//! [`CapacityError`] instead of growing, which keeps the quadratic layout
//! phases within a known cost.

use std::fmt;

use log::trace;
use serde::Deserialize;
use thiserror::Error;

use crate::{identifier::RowId, scale::GridKind};

/// Default maximum number of classifiers in one visible set
pub const MAX_CLASSIFIERS: usize = 256;
/// Default maximum number of features in one visible set
pub const MAX_FEATURES: usize = 1024;
/// Default maximum number of relationships in one visible set
pub const MAX_RELATIONSHIPS: usize = 512;

/// A fixed-capacity table is full.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("capacity of {capacity} {what} exceeded")]
pub struct CapacityError {
    pub what: &'static str,
    pub capacity: usize,
}

/// The type of diagram, which decides the coordinate system of the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    List,
    #[default]
    Box,
    Class,
    Component,
    Deployment,
    Package,
    UseCase,
    Activity,
    StateMachine,
    Sequence,
    Communication,
    Timing,
    InteractionOverview,
    BlockDefinition,
    InternalBlock,
    Parametric,
    Requirement,
}

impl DiagramKind {
    /// Sequence and timing diagrams place relationships along a time axis
    pub fn has_time_axis(self) -> bool {
        matches!(self, DiagramKind::Sequence | DiagramKind::Timing)
    }

    /// Grid used to turn element orders into locations
    pub fn grid_kind(self) -> GridKind {
        match self {
            DiagramKind::Sequence => GridKind::TimeY,
            DiagramKind::Timing => GridKind::TimeX,
            _ => GridKind::XY,
        }
    }
}

/// The type of a classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    Block,
    ConstraintBlock,
    Requirement,
    Actor,
    UseCase,
    SystemBoundary,
    Activity,
    Action,
    State,
    Interaction,
    DiagramReference,
    Node,
    Component,
    Part,
    Interface,
    Package,
    #[default]
    Class,
    Object,
    Artifact,
    Comment,
    Image,
    Stereotype,
    AcceptEvent,
    SendSignal,
    TimeEvent,
    InitialNode,
    FinalNode,
    ForkNode,
    JoinNode,
    DecisionNode,
    HistoryNode,
}

impl ClassifierKind {
    /// Classifiers describing behavior; their pins sit outside the border
    pub fn is_behavioral(self) -> bool {
        matches!(
            self,
            ClassifierKind::UseCase
                | ClassifierKind::Activity
                | ClassifierKind::Action
                | ClassifierKind::State
                | ClassifierKind::Interaction
                | ClassifierKind::AcceptEvent
                | ClassifierKind::SendSignal
                | ClassifierKind::TimeEvent
        )
    }

    /// Constraint blocks draw their parameters inside the border
    pub fn is_constraint_block(self) -> bool {
        self == ClassifierKind::ConstraintBlock
    }

    /// Whether this classifier can act as a participant with a lifeline
    pub fn can_have_lifeline(self) -> bool {
        !matches!(
            self,
            ClassifierKind::Comment
                | ClassifierKind::Image
                | ClassifierKind::Stereotype
                | ClassifierKind::SystemBoundary
                | ClassifierKind::Package
                | ClassifierKind::InitialNode
                | ClassifierKind::FinalNode
                | ClassifierKind::ForkNode
                | ClassifierKind::JoinNode
                | ClassifierKind::DecisionNode
                | ClassifierKind::HistoryNode
        )
    }
}

/// The type of a feature.
///
/// Kinds this version does not know deserialize as [`FeatureKind::Unknown`]
/// and are laid out like tagged values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Property,
    Operation,
    Port,
    Lifeline,
    ProvidedInterface,
    RequiredInterface,
    InPin,
    OutPin,
    EntryPoint,
    ExitPoint,
    TaggedValue,
    #[serde(other)]
    Unknown,
}

impl FeatureKind {
    /// Features attached to the classifier border
    pub fn is_border_feature(self) -> bool {
        matches!(
            self,
            FeatureKind::Port
                | FeatureKind::InPin
                | FeatureKind::OutPin
                | FeatureKind::EntryPoint
                | FeatureKind::ExitPoint
        )
    }

    /// Interface lollipops and sockets outside the classifier
    pub fn is_interface(self) -> bool {
        matches!(
            self,
            FeatureKind::ProvidedInterface | FeatureKind::RequiredInterface
        )
    }

    /// Features listed in the classifier's compartments
    pub fn is_compartment_entry(self) -> bool {
        matches!(
            self,
            FeatureKind::Property
                | FeatureKind::Operation
                | FeatureKind::TaggedValue
                | FeatureKind::Unknown
        )
    }
}

/// The type of a relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    #[default]
    Dependency,
    Association,
    Aggregation,
    Composition,
    Generalization,
    Realization,
    AsyncCall,
    SyncCall,
    ReturnCall,
    CommunicationPath,
    ControlFlow,
    ObjectFlow,
    DeployTo,
    Manifest,
    Include,
    Extend,
    Refine,
    Trace,
    Containment,
}

impl RelationshipKind {
    /// The parent embraces the child
    pub fn is_containment(self) -> bool {
        self == RelationshipKind::Containment
    }

    /// Messages and flows, which attach to the center of a lifeline
    pub fn is_call_or_flow(self) -> bool {
        matches!(
            self,
            RelationshipKind::AsyncCall
                | RelationshipKind::SyncCall
                | RelationshipKind::ReturnCall
                | RelationshipKind::ControlFlow
                | RelationshipKind::ObjectFlow
        )
    }
}

/// The diagram record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Diagram {
    id: RowId,
    kind: DiagramKind,
    #[serde(default)]
    name: String,
}

impl Diagram {
    pub fn new(id: RowId, kind: DiagramKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A classifier as it appears in the diagram.
///
/// `x_order`/`y_order` locate the classifier on the diagram grid.
/// `gray_out` is the display flag of the diagram element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VisibleClassifier {
    id: RowId,
    kind: ClassifierKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    x_order: i32,
    #[serde(default)]
    y_order: i32,
    #[serde(default)]
    gray_out: bool,
}

impl VisibleClassifier {
    pub fn new(id: RowId, kind: ClassifierKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            x_order: 0,
            y_order: 0,
            gray_out: false,
        }
    }

    /// Sets the grid orders
    pub fn with_orders(mut self, x_order: i32, y_order: i32) -> Self {
        self.x_order = x_order;
        self.y_order = y_order;
        self
    }

    /// Marks the diagram element as grayed out
    pub fn with_gray_out(mut self, gray_out: bool) -> Self {
        self.gray_out = gray_out;
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x_order(&self) -> i32 {
        self.x_order
    }

    pub fn y_order(&self) -> i32 {
        self.y_order
    }

    pub fn is_gray_out(&self) -> bool {
        self.gray_out
    }
}

impl fmt::Display for VisibleClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} '{}'", self.id, self.kind, self.name)
    }
}

/// A feature of a visible classifier
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    id: RowId,
    classifier_id: RowId,
    kind: FeatureKind,
    #[serde(default)]
    key: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    list_order: i32,
}

impl Feature {
    pub fn new(id: RowId, classifier_id: RowId, kind: FeatureKind, key: impl Into<String>) -> Self {
        Self {
            id,
            classifier_id,
            kind,
            key: key.into(),
            value: String::new(),
            list_order: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_list_order(mut self, list_order: i32) -> Self {
        self.list_order = list_order;
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Row id of the owning classifier
    pub fn classifier_id(&self) -> RowId {
        self.classifier_id
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn list_order(&self) -> i32 {
        self.list_order
    }

    /// Text shown for the feature: `key` or `key: value`
    pub fn display_text(&self) -> String {
        if self.value.is_empty() {
            self.key.clone()
        } else {
            format!("{}: {}", self.key, self.value)
        }
    }
}

/// A relationship between two classifiers, optionally attached to features
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Relationship {
    id: RowId,
    kind: RelationshipKind,
    #[serde(default)]
    name: String,
    from_classifier: RowId,
    to_classifier: RowId,
    #[serde(default)]
    from_feature: Option<RowId>,
    #[serde(default)]
    to_feature: Option<RowId>,
    #[serde(default)]
    list_order: i32,
}

impl Relationship {
    pub fn new(
        id: RowId,
        kind: RelationshipKind,
        from_classifier: RowId,
        to_classifier: RowId,
    ) -> Self {
        Self {
            id,
            kind,
            name: String::new(),
            from_classifier,
            to_classifier,
            from_feature: None,
            to_feature: None,
            list_order: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attaches the relationship ends to features of the end classifiers
    pub fn with_features(mut self, from_feature: Option<RowId>, to_feature: Option<RowId>) -> Self {
        self.from_feature = from_feature;
        self.to_feature = to_feature;
        self
    }

    pub fn with_list_order(mut self, list_order: i32) -> Self {
        self.list_order = list_order;
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from_classifier(&self) -> RowId {
        self.from_classifier
    }

    pub fn to_classifier(&self) -> RowId {
        self.to_classifier
    }

    pub fn from_feature(&self) -> Option<RowId> {
        self.from_feature
    }

    pub fn to_feature(&self) -> Option<RowId> {
        self.to_feature
    }

    pub fn list_order(&self) -> i32 {
        self.list_order
    }
}

/// Maximum element counts of a [`VisibleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SetLimits {
    pub classifiers: usize,
    pub features: usize,
    pub relationships: usize,
}

impl Default for SetLimits {
    fn default() -> Self {
        Self {
            classifiers: MAX_CLASSIFIERS,
            features: MAX_FEATURES,
            relationships: MAX_RELATIONSHIPS,
        }
    }
}

/// The visible elements of one diagram.
///
/// # Examples
///
/// ```
/// use trellis_core::{
///     identifier::RowId,
///     semantic::{ClassifierKind, Diagram, DiagramKind, VisibleClassifier, VisibleSet},
/// };
///
/// let mut set = VisibleSet::new(Diagram::new(RowId::new(1), DiagramKind::Class, "overview"));
/// set.add_classifier(VisibleClassifier::new(RowId::new(10), ClassifierKind::Class, "Engine"))
///     .expect("below capacity");
/// assert_eq!(set.classifiers().len(), 1);
/// assert_eq!(set.classifier_position(RowId::new(10)), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSet {
    diagram: Diagram,
    limits: SetLimits,
    classifiers: Vec<VisibleClassifier>,
    features: Vec<Feature>,
    relationships: Vec<Relationship>,
}

impl VisibleSet {
    /// Creates an empty set with the default limits
    pub fn new(diagram: Diagram) -> Self {
        Self::with_limits(diagram, SetLimits::default())
    }

    /// Creates an empty set with custom limits
    pub fn with_limits(diagram: Diagram, limits: SetLimits) -> Self {
        Self {
            diagram,
            limits,
            classifiers: Vec::new(),
            features: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn limits(&self) -> SetLimits {
        self.limits
    }

    pub fn classifiers(&self) -> &[VisibleClassifier] {
        &self.classifiers
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Appends a classifier.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the classifier limit is reached.
    pub fn add_classifier(&mut self, classifier: VisibleClassifier) -> Result<(), CapacityError> {
        if self.classifiers.len() >= self.limits.classifiers {
            return Err(CapacityError {
                what: "classifiers",
                capacity: self.limits.classifiers,
            });
        }
        trace!(classifier:% = classifier; "Classifier added to visible set");
        self.classifiers.push(classifier);
        Ok(())
    }

    /// Appends a feature.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the feature limit is reached.
    pub fn add_feature(&mut self, feature: Feature) -> Result<(), CapacityError> {
        if self.features.len() >= self.limits.features {
            return Err(CapacityError {
                what: "features",
                capacity: self.limits.features,
            });
        }
        self.features.push(feature);
        Ok(())
    }

    /// Appends a relationship.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] if the relationship limit is reached.
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<(), CapacityError> {
        if self.relationships.len() >= self.limits.relationships {
            return Err(CapacityError {
                what: "relationships",
                capacity: self.limits.relationships,
            });
        }
        self.relationships.push(relationship);
        Ok(())
    }

    /// Position of the first classifier with this row id
    pub fn classifier_position(&self, id: RowId) -> Option<usize> {
        self.classifiers.iter().position(|c| c.id() == id)
    }

    /// Position of the first feature with this row id
    pub fn feature_position(&self, id: RowId) -> Option<usize> {
        self.features.iter().position(|f| f.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram() -> Diagram {
        Diagram::new(RowId::new(1), DiagramKind::Class, "test")
    }

    #[test]
    fn test_capacity_is_enforced() {
        let limits = SetLimits {
            classifiers: 1,
            features: 0,
            relationships: 0,
        };
        let mut set = VisibleSet::with_limits(diagram(), limits);
        set.add_classifier(VisibleClassifier::new(RowId::new(1), ClassifierKind::Class, "A"))
            .expect("first classifier fits");
        let err = set
            .add_classifier(VisibleClassifier::new(RowId::new(2), ClassifierKind::Class, "B"))
            .unwrap_err();
        assert_eq!(err.capacity, 1);
        assert_eq!(err.what, "classifiers");
        assert_eq!(set.classifiers().len(), 1);

        let feature = Feature::new(RowId::new(3), RowId::new(1), FeatureKind::Port, "p");
        assert!(set.add_feature(feature).is_err());
    }

    #[test]
    fn test_grid_kind_by_diagram() {
        assert_eq!(DiagramKind::Sequence.grid_kind(), GridKind::TimeY);
        assert_eq!(DiagramKind::Timing.grid_kind(), GridKind::TimeX);
        assert_eq!(DiagramKind::Communication.grid_kind(), GridKind::XY);
        assert!(!DiagramKind::Communication.has_time_axis());
    }

    #[test]
    fn test_feature_display_text() {
        let feature = Feature::new(RowId::new(3), RowId::new(1), FeatureKind::Property, "speed");
        assert_eq!(feature.display_text(), "speed");
        assert_eq!(feature.with_value("u32").display_text(), "speed: u32");
    }

    #[test]
    fn test_feature_kind_groups() {
        assert!(FeatureKind::Unknown.is_compartment_entry());
        assert!(FeatureKind::InPin.is_border_feature());
        assert!(!FeatureKind::Lifeline.is_border_feature());
        assert!(FeatureKind::RequiredInterface.is_interface());
    }

    #[test]
    fn test_relationship_kind_groups() {
        assert!(RelationshipKind::Containment.is_containment());
        assert!(RelationshipKind::SyncCall.is_call_or_flow());
        assert!(!RelationshipKind::Association.is_call_or_flow());
    }
}
