//! Error types for EAM services
//!
//! Every service call surfaces one [`ServiceError`]:
//! - Missing grids, entities, definitions
//! - Malformed or unsupported requests
//! - Failures of the underlying stores
//! - Write attempts the caller is not allowed to make
//! - Deadlines exceeded

use eam_model::{EntityKind, EntityReference, ModelError};
use eam_store::StoreError;

/// Main service error type
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced entity does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: i64 },

    /// Request is malformed or unsupported
    #[error("validation failed: {0}")]
    Validation(String),

    /// An underlying store failed
    #[error("{store} store failed: {source}")]
    Dependency {
        /// Store that failed
        store: &'static str,
        #[source]
        source: StoreError,
    },

    /// Caller may not perform this write
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// Deadline exceeded
    #[error("operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Service wired or configured incorrectly
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    /// Not-found error for a reference
    #[inline]
    #[must_use]
    pub fn not_found(reference: EntityReference) -> Self {
        Self::NotFound {
            kind: reference.kind,
            id: reference.id,
        }
    }

    /// Classify a store failure
    ///
    /// Missing entities and unsupported selectors describe the request, not
    /// the store, so they keep their meaning; everything else is a dependency
    /// failure of `store`.
    #[must_use]
    pub fn from_store(store: &'static str, error: StoreError) -> Self {
        match error {
            StoreError::NotFound(reference) => Self::not_found(reference),
            StoreError::UnsupportedSelector(kind) => {
                Self::Validation(format!("cannot select applications from {kind}"))
            }
            StoreError::Conflict(message) => Self::Validation(message),
            other => Self::Dependency {
                store,
                source: other,
            },
        }
    }

    /// Check if error is a missing entity
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if error came from a failing store
    #[inline]
    #[must_use]
    pub fn is_dependency(&self) -> bool {
        matches!(self, Self::Dependency { .. })
    }
}

impl From<ModelError> for ServiceError {
    fn from(error: ModelError) -> Self {
        Self::Validation(error.to_string())
    }
}

/// Result alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Adapter for `map_err` at store call sites
pub(crate) fn store_failure(store: &'static str) -> impl FnOnce(StoreError) -> ServiceError {
    move |error| ServiceError::from_store(store, error)
}
