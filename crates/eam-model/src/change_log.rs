//! Audit trail entries written by mutating services

use crate::entity::{EntityKind, EntityReference};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of change recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Add,
    Update,
    Remove,
}

/// One change log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLog {
    /// Entity the change is filed against
    pub parent_reference: EntityReference,
    pub message: String,
    pub user_id: String,
    pub operation: Operation,
    /// Kind of the thing actually changed, when different from the parent
    #[serde(default)]
    pub child_kind: Option<EntityKind>,
    pub created_at: DateTime<Utc>,
}

impl ChangeLog {
    /// Create entry stamped now
    #[must_use]
    pub fn new(
        operation: Operation,
        user_id: impl Into<String>,
        parent_reference: EntityReference,
        message: impl Into<String>,
    ) -> Self {
        Self {
            parent_reference,
            message: message.into(),
            user_id: user_id.into(),
            operation,
            child_kind: None,
            created_at: Utc::now(),
        }
    }

    /// With child kind
    #[inline]
    #[must_use]
    pub fn with_child_kind(mut self, kind: EntityKind) -> Self {
        self.child_kind = Some(kind);
        self
    }
}

/// Who changed something, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdate {
    pub at: DateTime<Utc>,
    pub by: String,
}

impl LastUpdate {
    /// Stamp for `user` at the current instant
    #[must_use]
    pub fn for_user(user: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            by: user.into(),
        }
    }
}
