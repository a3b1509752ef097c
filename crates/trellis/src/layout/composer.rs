//! Shape composition seam.
//!
//! The layouters decide where classifiers go and how large their envelope or
//! interior space must be; a [`Composer`] decides how that rectangle splits
//! into symbol, label, icon and space boxes for a concrete classifier type.
//! Renderers with their own shapes and fonts provide their own composer;
//! [`BoxComposer`] is a plain reference implementation.

use trellis_core::{
    geometry::{Bounds, Insets, Size},
    semantic::{ClassifierKind, Feature, Relationship, VisibleClassifier},
};

use crate::{config::LayoutConfig, layout::visible_set::ClassifierLayout};

/// Turns proposed rectangles into concrete classifier layouts and measures text.
pub trait Composer {
    /// Composes a classifier so its envelope fills `envelope`.
    ///
    /// `shows_children` is set when other classifiers will be nested in the
    /// classifier's space.
    fn compose_around_envelope(
        &self,
        classifier: &VisibleClassifier,
        envelope: Bounds,
        shows_children: bool,
    ) -> ClassifierLayout;

    /// Composes a classifier so its interior space is (at least) `space`
    fn compose_around_space(
        &self,
        classifier: &VisibleClassifier,
        space: Bounds,
        shows_children: bool,
    ) -> ClassifierLayout;

    /// Size of the floating label of a port, pin, interface or lifeline
    fn feature_label_size(&self, feature: &Feature) -> Size;

    /// Size of the floating label of a relationship
    fn relationship_label_size(&self, relationship: &Relationship) -> Size;

    /// Minimum size of a property, operation or tagged value compartment line
    fn compartment_entry_size(&self, feature: &Feature) -> Size;
}

/// Rectangular shapes with monospace text metrics.
///
/// ```text
///   plain classifier       nesting classifier       actor
///   ┌───────────┬──┐       ┌──────┐                 ┌─────┐
///   │ label     │ic│       │label │                 │     │
///   ├───────────┴──┤       ├──────┴──────┐          │space│
///   │    space     │       │    space    │          └─────┘
///   └──────────────┘       └─────────────┘           label
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BoxComposer {
    border: f64,
    line_height: f64,
    char_width: f64,
    icon_size: f64,
}

impl BoxComposer {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            border: config.standard_object_border(),
            line_height: config.line_height(),
            char_width: config.char_width(),
            icon_size: config.icon_size(),
        }
    }

    fn text_size(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::default();
        }
        Size::new(text.chars().count() as f64 * self.char_width, self.line_height)
    }

    /// Height of the label strip including its border gaps
    fn header_height(&self) -> f64 {
        self.line_height + 2.0 * self.border
    }
}

impl Default for BoxComposer {
    fn default() -> Self {
        Self::new(&LayoutConfig::default())
    }
}

impl Composer for BoxComposer {
    fn compose_around_envelope(
        &self,
        classifier: &VisibleClassifier,
        envelope: Bounds,
        shows_children: bool,
    ) -> ClassifierLayout {
        let header = self.header_height().min(envelope.height().max(0.0));
        let width = envelope.width().max(0.0);
        let border = Insets::uniform(self.border);

        if shows_children {
            // tab above the symbol
            let tab_width = (self.text_size(classifier.name()).width() + 2.0 * self.border).min(width);
            let label_box = Bounds::new(envelope.min_x(), envelope.min_y(), tab_width, header);
            let symbol_box = Bounds::new(
                envelope.min_x(),
                envelope.min_y() + header,
                width,
                envelope.height() - header,
            );
            return ClassifierLayout::new(
                symbol_box,
                symbol_box.shrink(border),
                label_box,
                Bounds::default(),
            );
        }

        if classifier.kind() == ClassifierKind::Actor {
            let symbol_box = Bounds::new(
                envelope.min_x(),
                envelope.min_y(),
                width,
                envelope.height() - header,
            );
            let label_box = Bounds::new(envelope.min_x(), symbol_box.max_y(), width, header);
            return ClassifierLayout::new(
                symbol_box,
                symbol_box.shrink(border),
                label_box,
                Bounds::default(),
            );
        }

        let symbol_box = envelope;
        let label_box = Bounds::new(
            envelope.min_x() + self.border,
            envelope.min_y() + self.border,
            (width - 2.0 * self.border).max(0.0),
            self.line_height.min(header),
        );
        let icon_box = if width >= self.icon_size + 2.0 * self.border {
            Bounds::new(
                envelope.max_x() - self.border - self.icon_size,
                envelope.min_y() + self.border,
                self.icon_size,
                self.icon_size,
            )
        } else {
            Bounds::default()
        };
        let space = symbol_box.shrink(border.with_top(header));
        ClassifierLayout::new(symbol_box, space, label_box, icon_box)
    }

    fn compose_around_space(
        &self,
        classifier: &VisibleClassifier,
        space: Bounds,
        shows_children: bool,
    ) -> ClassifierLayout {
        let header = self.header_height();
        let symbol_box = if shows_children || classifier.kind() == ClassifierKind::Actor {
            space.add_padding(Insets::uniform(self.border))
        } else {
            space.add_padding(Insets::uniform(self.border).with_top(header))
        };
        let envelope = if shows_children {
            Bounds::new(
                symbol_box.min_x(),
                symbol_box.min_y() - header,
                symbol_box.width(),
                symbol_box.height() + header,
            )
        } else if classifier.kind() == ClassifierKind::Actor {
            symbol_box.enlarge(0.0, header)
        } else {
            symbol_box
        };
        self.compose_around_envelope(classifier, envelope, shows_children)
    }

    fn feature_label_size(&self, feature: &Feature) -> Size {
        self.text_size(feature.key())
    }

    fn relationship_label_size(&self, relationship: &Relationship) -> Size {
        self.text_size(relationship.name())
    }

    fn compartment_entry_size(&self, feature: &Feature) -> Size {
        let text = self.text_size(&feature.display_text());
        Size::new(text.width(), self.line_height)
    }
}
