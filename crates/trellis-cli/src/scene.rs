//! Scene files: a visible set and the size of its diagram, as TOML.
//!
//! ```toml
//! width = 800.0
//! height = 600.0
//!
//! [diagram]
//! id = 1
//! kind = "class"
//! name = "Vehicle"
//!
//! [[classifiers]]
//! id = 10
//! kind = "class"
//! name = "Engine"
//! x_order = 0
//!
//! [[features]]
//! id = 20
//! classifier_id = 10
//! kind = "property"
//! key = "power"
//!
//! [[relationships]]
//! id = 30
//! kind = "association"
//! from_classifier = 10
//! to_classifier = 11
//! ```

use log::debug;
use serde::Deserialize;

use trellis::{
    geometry::Bounds,
    semantic::{Diagram, Feature, Relationship, SetLimits, VisibleClassifier, VisibleSet},
};

use crate::error::CliError;

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

/// A diagram's visible elements together with the diagram size.
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    diagram: Diagram,
    #[serde(default)]
    classifiers: Vec<VisibleClassifier>,
    #[serde(default)]
    features: Vec<Feature>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl Scene {
    /// Parses a scene from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Scene`] pointing at the offending part of `src`.
    pub fn parse(src: &str) -> Result<Self, CliError> {
        toml::from_str(src).map_err(|err| CliError::new_scene_error(err, src))
    }

    /// The diagram occupies the rectangle from the origin to `(width, height)`
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.height)
    }

    /// Builds the visible set under the given limits.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Layout`] if the scene has more elements than the
    /// limits allow.
    pub fn into_visible_set(self, limits: SetLimits) -> Result<VisibleSet, CliError> {
        let mut set = VisibleSet::with_limits(self.diagram, limits);
        for classifier in self.classifiers {
            set.add_classifier(classifier).map_err(trellis::LayoutError::from)?;
        }
        for feature in self.features {
            set.add_feature(feature).map_err(trellis::LayoutError::from)?;
        }
        for relationship in self.relationships {
            set.add_relationship(relationship).map_err(trellis::LayoutError::from)?;
        }
        debug!(
            classifiers = set.classifiers().len(),
            features = set.features().len(),
            relationships = set.relationships().len();
            "Scene loaded"
        );
        Ok(set)
    }
}
