//! Entity kinds and references
//!
//! An [`EntityReference`] is the `(kind, id)` pair used everywhere an entity
//! is pointed at without being loaded.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of entity known to the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// Application
    Application,
    /// Named group of applications
    AppGroup,
    /// Assessment definition
    AssessmentDefinition,
    /// Measurable (capability, function, ...)
    Measurable,
    /// Organisational unit
    OrgUnit,
    /// Person
    Person,
    /// Physical data specification
    PhysicalSpecification,
    /// Report grid
    ReportGrid,
}

impl EntityKind {
    /// Wire name of this kind
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Application => "APPLICATION",
            EntityKind::AppGroup => "APP_GROUP",
            EntityKind::AssessmentDefinition => "ASSESSMENT_DEFINITION",
            EntityKind::Measurable => "MEASURABLE",
            EntityKind::OrgUnit => "ORG_UNIT",
            EntityKind::Person => "PERSON",
            EntityKind::PhysicalSpecification => "PHYSICAL_SPECIFICATION",
            EntityKind::ReportGrid => "REPORT_GRID",
        }
    }

    /// Every kind, in declaration order
    #[must_use]
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Application,
            EntityKind::AppGroup,
            EntityKind::AssessmentDefinition,
            EntityKind::Measurable,
            EntityKind::OrgUnit,
            EntityKind::Person,
            EntityKind::PhysicalSpecification,
            EntityKind::ReportGrid,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        EntityKind::all()
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownEntityKind(s.to_string()))
    }
}

/// Reference to an entity by kind and id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityReference {
    /// Entity kind
    pub kind: EntityKind,
    /// Entity id within its kind
    pub id: i64,
}

impl EntityReference {
    /// Create new reference
    #[inline]
    #[must_use]
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}
