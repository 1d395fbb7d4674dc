//! Physical data specification definitions
//!
//! A physical specification may carry several versioned definitions, each
//! describing the layout (delimited or fixed-length) of the data it carries,
//! its fields and example files.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Release lifecycle of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReleaseLifecycleStatus {
    Draft,
    Active,
    Deprecated,
    Obsolete,
}

impl fmt::Display for ReleaseLifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReleaseLifecycleStatus::Draft => "DRAFT",
            ReleaseLifecycleStatus::Active => "ACTIVE",
            ReleaseLifecycleStatus::Deprecated => "DEPRECATED",
            ReleaseLifecycleStatus::Obsolete => "OBSOLETE",
        })
    }
}

impl FromStr for ReleaseLifecycleStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "ACTIVE" => Ok(Self::Active),
            "DEPRECATED" => Ok(Self::Deprecated),
            "OBSOLETE" => Ok(Self::Obsolete),
            _ => Err(ModelError::UnknownStatus(s.to_string())),
        }
    }
}

/// Layout of the data described by a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhysicalSpecDefinitionType {
    DelimitedText,
    FixedLength,
}

/// Versioned definition of a physical specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalSpecDefinition {
    /// Assigned by the store on create
    #[serde(default)]
    pub id: Option<i64>,
    pub specification_id: i64,
    pub version: String,
    pub status: ReleaseLifecycleStatus,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(rename = "type")]
    pub definition_type: PhysicalSpecDefinitionType,
    pub provenance: String,
    pub created_by: String,
    pub last_updated_by: String,
}

/// Fields a caller supplies to create a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalSpecDefinitionChangeCommand {
    pub version: String,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(rename = "type")]
    pub definition_type: PhysicalSpecDefinitionType,
}

/// Field within a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalSpecDefinitionField {
    #[serde(default)]
    pub id: Option<i64>,
    pub spec_definition_id: i64,
    pub name: String,
    pub position: i32,
    #[serde(default)]
    pub description: String,
}

/// Example file attached to a definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalSpecDefinitionSampleFile {
    #[serde(default)]
    pub id: Option<i64>,
    pub spec_definition_id: i64,
    pub name: String,
    pub file_data: String,
}
