//! Identifiers of model rows and handles of layout records.
//!
//! [`RowId`] names an element as the model reader knows it. The index types
//! ([`ClassifierIndex`], [`FeatureIndex`], [`RelationshipIndex`]) are handles
//! into the contiguous arrays of one visible set; they are only meaningful for
//! the set that produced them.

use std::fmt;

use serde::Deserialize;

/// Database row id of a model element.
///
/// # Examples
///
/// ```
/// use trellis_core::identifier::RowId;
///
/// let id = RowId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "#42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct RowId(i64);

impl RowId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(usize);

        impl $name {
            pub fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position of the record in its array
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "[{}]"), self.0)
            }
        }
    };
}

handle!(
    /// Handle of a visible classifier
    ClassifierIndex,
    "classifier"
);
handle!(
    /// Handle of a visible feature
    FeatureIndex,
    "feature"
);
handle!(
    /// Handle of a visible relationship
    RelationshipIndex,
    "relationship"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_display_their_kind() {
        assert_eq!(ClassifierIndex::new(3).to_string(), "classifier[3]");
        assert_eq!(FeatureIndex::new(0).to_string(), "feature[0]");
        assert_eq!(RelationshipIndex::new(7).index(), 7);
    }

    #[test]
    fn test_row_ids_order_by_value() {
        assert!(RowId::new(-1) < RowId::new(2));
    }
}
