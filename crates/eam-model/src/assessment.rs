//! Assessment definitions and the ratings recorded against them

use crate::entity::{EntityKind, EntityReference};
use crate::rating::RatingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Definition of an assessment that can be rated on entities of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentDefinition {
    pub id: i64,
    pub name: String,
    pub entity_kind: EntityKind,
    pub rating_scheme_id: i64,
    /// Role a user must hold to write ratings, if any
    #[serde(default)]
    pub permitted_role: Option<String>,
    #[serde(default)]
    pub is_read_only: bool,
}

impl AssessmentDefinition {
    /// Create writable definition with no role restriction
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, entity_kind: EntityKind, rating_scheme_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            entity_kind,
            rating_scheme_id,
            permitted_role: None,
            is_read_only: false,
        }
    }

    /// Restrict writes to holders of `role`
    #[inline]
    #[must_use]
    pub fn with_permitted_role(mut self, role: impl Into<String>) -> Self {
        self.permitted_role = Some(role.into());
        self
    }

    /// Mark read-only
    #[inline]
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.is_read_only = true;
        self
    }
}

/// Rating of one entity against one assessment definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRating {
    pub entity_reference: EntityReference,
    pub assessment_definition_id: i64,
    pub rating_id: RatingId,
    #[serde(default)]
    pub description: String,
    pub last_updated_at: DateTime<Utc>,
    pub last_updated_by: String,
    pub provenance: String,
}

/// Create or update request for an assessment rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAssessmentRatingCommand {
    pub entity_reference: EntityReference,
    pub assessment_definition_id: i64,
    pub rating_id: RatingId,
    #[serde(default)]
    pub description: Option<String>,
}

impl SaveAssessmentRatingCommand {
    /// Description, empty when absent
    #[inline]
    #[must_use]
    pub fn safe_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Removal request for an assessment rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveAssessmentRatingCommand {
    pub entity_reference: EntityReference,
    pub assessment_definition_id: i64,
}
