//! Applications

use serde::{Deserialize, Serialize};
use std::fmt;

/// Application identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ApplicationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// How an application is provisioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationKind {
    /// Built in-house
    #[default]
    InHouse,
    /// Hosted by a third party
    ExternallyHosted,
    /// Vendor product
    ThirdParty,
    /// End-user computing
    Euc,
}

/// Lifecycle phase of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecyclePhase {
    /// Under construction
    Conceptual,
    /// In development
    Development,
    /// Live
    #[default]
    Production,
    /// Decommissioned
    Retired,
}

/// Application record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub name: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    pub organisational_unit_id: i64,
    #[serde(default)]
    pub kind: ApplicationKind,
    #[serde(default)]
    pub lifecycle_phase: LifecyclePhase,
}

impl Application {
    /// Create an in-house production application
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, organisational_unit_id: i64) -> Self {
        Self {
            id: ApplicationId(id),
            name: name.into(),
            asset_code: None,
            organisational_unit_id,
            kind: ApplicationKind::default(),
            lifecycle_phase: LifecyclePhase::default(),
        }
    }

    /// With asset code
    #[inline]
    #[must_use]
    pub fn with_asset_code(mut self, code: impl Into<String>) -> Self {
        self.asset_code = Some(code.into());
        self
    }
}
