//! Layout passes over a visible set.
//!
//! [`LayoutVisibleSet`] holds one layout record per diagram, classifier,
//! feature and relationship. The layouters in this module fill those records
//! in a fixed order; see [`LayoutBuilder`](crate::LayoutBuilder) for the
//! pipeline.

pub mod classifier_2d;
pub mod composer;
pub mod containment;
pub mod feature;
pub mod label;
pub mod quality;
pub mod relationship_1d;
pub mod relationship_2d;
pub mod sorter;
pub mod visible_set;

pub use classifier_2d::ClassifierLayouter;
pub use composer::{BoxComposer, Composer};
pub use containment::ContainmentCache;
pub use feature::FeatureLayouter;
pub use label::LabelLayouter;
pub use relationship_1d::RelationshipLayouter1d;
pub use relationship_2d::RelationshipLayouter2d;
pub use sorter::IndexSorter;
pub use visible_set::{
    ClassifierLayout, DiagramLayout, FeatureLayout, LayoutVisibleSet, RelationshipLayout,
    Visibility,
};
