//! Plain-text rendering of a computed layout.
//!
//! One line per element, boxes as `[min_x, min_y, max_x, max_y]`:
//!
//! ```text
//! diagram #1 Class bounds=[0, 0, 800, 600]
//! classifier #10 Engine symbol=[144, 124, 264, 184] space=[148, 146, 260, 180]
//! feature #20 Property power symbol=[152, 150, 187, 164]
//! relationship #30 Association show route=(264, 154) (404, 154) (404, 154) (544, 154)
//! ```

use std::fmt::{self, Write};

use trellis::{
    geometry::{Bounds, Point},
    layout::{LayoutVisibleSet, Visibility},
};

struct Rect(Bounds);

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(f, "[{}, {}, {}, {}]", b.min_x(), b.min_y(), b.max_x(), b.max_y())
    }
}

struct At(Point);

impl fmt::Display for At {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0.x(), self.0.y())
    }
}

fn visibility_name(visibility: Visibility) -> &'static str {
    match visibility {
        Visibility::Show => "show",
        Visibility::GrayOut => "gray_out",
        Visibility::Implicit => "implicit",
    }
}

/// Renders every layout record of `layout`
pub fn render(layout: &LayoutVisibleSet<'_>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, layout);
    out
}

fn write_report(out: &mut String, layout: &LayoutVisibleSet<'_>) -> fmt::Result {
    let diagram = layout.data().diagram();
    writeln!(
        out,
        "diagram {} {:?} bounds={}",
        diagram.id(),
        diagram.kind(),
        Rect(layout.diagram().bounds())
    )?;

    for classifier in layout.classifier_indices() {
        let data = layout.classifier_data(classifier);
        let record = layout.classifier(classifier);
        writeln!(
            out,
            "classifier {} {} symbol={} space={}",
            data.id(),
            data.name(),
            Rect(record.symbol_box()),
            Rect(record.space())
        )?;
    }

    for feature in layout.feature_indices() {
        let data = layout.feature_data(feature);
        let record = layout.feature(feature);
        write!(
            out,
            "feature {} {:?} {} symbol={}",
            data.id(),
            data.kind(),
            data.key(),
            Rect(record.symbol_box())
        )?;
        if !record.label_box().is_empty() {
            write!(out, " label={}", Rect(record.label_box()))?;
        }
        writeln!(out)?;
    }

    for relationship in layout.relationship_indices() {
        let data = layout.relationship_data(relationship);
        let record = layout.relationship(relationship);
        write!(
            out,
            "relationship {} {:?} {}",
            data.id(),
            data.kind(),
            visibility_name(record.visibility())
        )?;
        if record.is_drawn() {
            let shape = record.shape();
            write!(
                out,
                " route={} {} {} {}",
                At(shape.source_end()),
                At(shape.main_line_start()),
                At(shape.main_line_end()),
                At(shape.destination_end())
            )?;
            if !record.label_box().is_empty() {
                write!(out, " label={}", Rect(record.label_box()))?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
