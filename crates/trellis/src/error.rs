//! Error types for Trellis layout operations.
//!
//! A layout pass absorbs degenerate geometry instead of failing. The variants
//! of [`LayoutError`] cover the remaining hard conditions: a full table, a
//! reference the visible set cannot resolve, and an unusable configuration.

use thiserror::Error;

use trellis_core::{identifier::RowId, semantic::CapacityError};

/// The main error type for Trellis operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("capacity of {capacity} {what} exceeded")]
    CapacityExceeded { what: &'static str, capacity: usize },

    #[error("unknown classifier {0}")]
    UnknownClassifier(RowId),

    #[error("unknown feature {0}")]
    UnknownFeature(RowId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<CapacityError> for LayoutError {
    fn from(error: CapacityError) -> Self {
        Self::CapacityExceeded {
            what: error.what,
            capacity: error.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_converts() {
        let error: LayoutError = CapacityError {
            what: "features",
            capacity: 8,
        }
        .into();
        assert_eq!(
            error,
            LayoutError::CapacityExceeded {
                what: "features",
                capacity: 8
            }
        );
        assert_eq!(error.to_string(), "capacity of 8 features exceeded");
    }
}
