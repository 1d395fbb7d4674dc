//! Rating scheme items

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating scheme item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingId(pub i64);

impl fmt::Display for RatingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RatingId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Descriptive metadata for one rating in a rating scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSchemeItem {
    pub id: RatingId,
    pub scheme_id: i64,
    pub name: String,
    pub rating_code: String,
    /// Display color, `#rrggbb`
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: i32,
}

impl RatingSchemeItem {
    /// Create new rating item
    #[must_use]
    pub fn new(
        id: i64,
        scheme_id: i64,
        name: impl Into<String>,
        rating_code: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: RatingId(id),
            scheme_id,
            name: name.into(),
            rating_code: rating_code.into(),
            color: color.into(),
            description: String::new(),
            position: 0,
        }
    }

    /// With position
    #[inline]
    #[must_use]
    pub fn with_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }
}
