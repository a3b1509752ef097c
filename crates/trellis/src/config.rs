//! Configuration types for Trellis layout.
//!
//! [`LayoutConfig`] carries the size and style policy the engine treats as
//! immutable input: gaps, default sizes and font metrics. It implements
//! [`serde::Deserialize`] so it can be loaded from external sources; every
//! field is optional and falls back to [`LayoutConfig::default`].
//!
//! # Example
//!
//! ```
//! # use trellis::config::LayoutConfig;
//! let config = LayoutConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.containment_passes(), 4);
//! ```

use serde::Deserialize;

use trellis_core::{
    geometry::{Insets, Size},
    semantic::SetLimits,
};

use crate::LayoutError;

/// Size and style policy of a layout pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between a classifier's outline and its interior space.
    standard_object_border: f64,

    /// Preferred gap between neighboring elements.
    preferred_object_distance: f64,

    default_classifier_width: f64,
    default_classifier_height: f64,

    /// Height of one line of text.
    line_height: f64,

    /// Advance of one character of the (monospace) label font.
    char_width: f64,

    /// Edge length of feature icons such as ports and pins.
    icon_size: f64,

    /// Width of a drawn connector line, used for overlap estimation.
    line_width: f64,

    /// Number of propagation passes of the containment cache.
    containment_passes: usize,

    /// Maximum element counts of a visible set.
    limits: SetLimits,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            standard_object_border: 4.0,
            preferred_object_distance: 16.0,
            default_classifier_width: 120.0,
            default_classifier_height: 60.0,
            line_height: 14.0,
            char_width: 7.0,
            icon_size: 12.0,
            line_width: 2.0,
            containment_passes: 4,
            limits: SetLimits::default(),
        }
    }
}

impl LayoutConfig {
    pub fn standard_object_border(&self) -> f64 {
        self.standard_object_border
    }

    pub fn preferred_object_distance(&self) -> f64 {
        self.preferred_object_distance
    }

    /// Size a classifier starts with before its contents are considered
    pub fn default_classifier_size(&self) -> Size {
        Size::new(self.default_classifier_width, self.default_classifier_height)
    }

    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    pub fn char_width(&self) -> f64 {
        self.char_width
    }

    pub fn icon_size(&self) -> f64 {
        self.icon_size
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn containment_passes(&self) -> usize {
        self.containment_passes
    }

    pub fn limits(&self) -> SetLimits {
        self.limits
    }

    /// Uniform insets of the standard object border
    pub fn border_insets(&self) -> Insets {
        Insets::uniform(self.standard_object_border)
    }

    /// Returns a copy with a different preferred object distance
    pub fn with_preferred_object_distance(mut self, distance: f64) -> Self {
        self.preferred_object_distance = distance;
        self
    }

    /// Returns a copy with a different number of containment passes
    pub fn with_containment_passes(mut self, passes: usize) -> Self {
        self.containment_passes = passes;
        self
    }

    /// Returns a copy with different element limits
    pub fn with_limits(mut self, limits: SetLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Checks that all metrics are usable.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidConfig`] naming the first metric that is
    /// not a positive finite number (the border may be zero).
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("preferred_object_distance", self.preferred_object_distance),
            ("default_classifier_width", self.default_classifier_width),
            ("default_classifier_height", self.default_classifier_height),
            ("line_height", self.line_height),
            ("char_width", self.char_width),
            ("icon_size", self.icon_size),
            ("line_width", self.line_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.standard_object_border.is_finite() || self.standard_object_border < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "standard_object_border must not be negative, got {}",
                self.standard_object_border
            )));
        }
        Ok(())
    }
}
