//! Store errors
//!
//! Stores report what went wrong in their own terms; services decide how each
//! case surfaces to callers.

use eam_model::{EntityKind, EntityReference};

/// Errors raised by store implementations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Backing store could not be reached or failed the read/write
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Referenced entity does not exist
    #[error("entity not found: {0}")]
    NotFound(EntityReference),

    /// Selector cannot be resolved for this kind of entity
    #[error("unsupported selector kind: {0}")]
    UnsupportedSelector(EntityKind),

    /// Record already exists
    #[error("conflict: {0}")]
    Conflict(String),

    /// Store returned fewer records than were asked for
    #[error("missing records: {missing:?}")]
    MissingRecords { missing: Vec<i64> },
}

impl StoreError {
    /// Create unavailable error
    #[inline]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Check if error is a missing entity
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::NotFound(EntityReference::new(EntityKind::OrgUnit, 4));
        assert_eq!(err.to_string(), "entity not found: ORG_UNIT/4");
        assert!(err.is_not_found());
        assert!(!StoreError::unavailable("down").is_not_found());
    }
}
