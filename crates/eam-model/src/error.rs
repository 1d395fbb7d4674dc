//! Errors raised while interpreting model values

/// Model parsing and validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Entity kind string not recognised
    #[error("unknown entity kind: '{0}'")]
    UnknownEntityKind(String),

    /// Hierarchy scope string not recognised
    #[error("unknown hierarchy scope: '{0}'")]
    UnknownScope(String),

    /// Lifecycle status string not recognised
    #[error("unknown lifecycle status: '{0}'")]
    UnknownStatus(String),
}
