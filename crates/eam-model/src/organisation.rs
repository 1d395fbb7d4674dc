//! Organisational structure used to resolve selections
//!
//! Org units form a tree via `parent_id`; people form a reporting tree via
//! `manager_employee_id`. Applications attach to org units directly, to people
//! through involvements, and to app groups through membership entries.

use crate::application::ApplicationId;
use serde::{Deserialize, Serialize};

/// Organisational unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

impl OrgUnit {
    /// Create org unit
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, parent_id: Option<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }
}

/// Person in the reporting hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub employee_id: String,
    pub display_name: String,
    #[serde(default)]
    pub manager_employee_id: Option<String>,
}

impl Person {
    /// Create person
    #[must_use]
    pub fn new(
        id: i64,
        employee_id: impl Into<String>,
        display_name: impl Into<String>,
        manager_employee_id: Option<&str>,
    ) -> Self {
        Self {
            id,
            employee_id: employee_id.into(),
            display_name: display_name.into(),
            manager_employee_id: manager_employee_id.map(str::to_string),
        }
    }
}

/// A person's involvement with an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Involvement {
    pub employee_id: String,
    pub application_id: ApplicationId,
    #[serde(default)]
    pub kind: String,
}

/// Membership of an application in an app group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppGroupEntry {
    pub group_id: i64,
    pub application_id: ApplicationId,
}
