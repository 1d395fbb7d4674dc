//! Report grids
//!
//! A [`ReportGridDefinition`] names a grid and its ordered columns. Given a
//! selection, the grid is materialised as a [`ReportGridInstance`]: the
//! in-scope applications (rows), the rating cells, and the rating items those
//! cells reference. [`ReportGrid`] pairs the two for display.
//!
//! None of these are stored; instances are assembled per request.

use crate::application::{Application, ApplicationId};
use crate::entity::{EntityKind, EntityReference};
use crate::rating::{RatingId, RatingSchemeItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Report grid identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportGridId(pub i64);

impl fmt::Display for ReportGridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ReportGridId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One column of a grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGridColumnDefinition {
    /// Entity whose ratings populate this column
    pub column_entity_reference: EntityReference,
    /// Zero-based display position
    pub position: i32,
    /// Optional display name override
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Named grid and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGridDefinition {
    pub id: ReportGridId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub column_definitions: Vec<ReportGridColumnDefinition>,
    pub last_updated_at: DateTime<Utc>,
    pub last_updated_by: String,
}

impl ReportGridDefinition {
    /// Create definition with no columns
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, last_updated_by: impl Into<String>) -> Self {
        Self {
            id: ReportGridId(id),
            name: name.into(),
            description: String::new(),
            external_id: None,
            column_definitions: Vec::new(),
            last_updated_at: Utc::now(),
            last_updated_by: last_updated_by.into(),
        }
    }

    /// Append a column at the next position
    #[must_use]
    pub fn with_column(mut self, column_entity_reference: EntityReference) -> Self {
        let position = i32::try_from(self.column_definitions.len()).unwrap_or(i32::MAX);
        self.column_definitions.push(ReportGridColumnDefinition {
            column_entity_reference,
            position,
            display_name: None,
        });
        self
    }

    /// Columns in display order
    #[must_use]
    pub fn ordered_columns(&self) -> Vec<&ReportGridColumnDefinition> {
        let mut columns: Vec<_> = self.column_definitions.iter().collect();
        columns.sort_by_key(|c| c.position);
        columns
    }
}

/// One rating at a column/row intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGridCell {
    /// Row
    pub application_id: ApplicationId,
    pub column_entity_id: i64,
    pub column_entity_kind: EntityKind,
    pub rating_id: RatingId,
}

impl ReportGridCell {
    /// Create new cell
    #[inline]
    #[must_use]
    pub fn new(
        application_id: i64,
        column_entity_reference: EntityReference,
        rating_id: i64,
    ) -> Self {
        Self {
            application_id: ApplicationId(application_id),
            column_entity_id: column_entity_reference.id,
            column_entity_kind: column_entity_reference.kind,
            rating_id: RatingId(rating_id),
        }
    }

    /// Column this cell belongs to
    #[inline]
    #[must_use]
    pub fn column_ref(&self) -> EntityReference {
        EntityReference::new(self.column_entity_kind, self.column_entity_id)
    }
}

/// Resolved, display-ready data for a grid under one selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportGridInstance {
    applications: Vec<Application>,
    cell_data: BTreeSet<ReportGridCell>,
    rating_scheme_items: Vec<RatingSchemeItem>,
}

impl ReportGridInstance {
    /// Assemble an instance from already-resolved parts
    #[must_use]
    pub fn new(
        applications: Vec<Application>,
        cell_data: BTreeSet<ReportGridCell>,
        rating_scheme_items: Vec<RatingSchemeItem>,
    ) -> Self {
        Self {
            applications,
            cell_data,
            rating_scheme_items,
        }
    }

    /// Empty instance
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    #[inline]
    #[must_use]
    pub fn cell_data(&self) -> &BTreeSet<ReportGridCell> {
        &self.cell_data
    }

    #[inline]
    #[must_use]
    pub fn rating_scheme_items(&self) -> &[RatingSchemeItem] {
        &self.rating_scheme_items
    }

    /// Distinct rating ids referenced by the cells
    #[must_use]
    pub fn referenced_rating_ids(&self) -> BTreeSet<RatingId> {
        self.cell_data.iter().map(|c| c.rating_id).collect()
    }

    /// Whether the instance holds no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty() && self.cell_data.is_empty()
    }
}

/// Grid definition paired with its resolved instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportGrid {
    pub definition: ReportGridDefinition,
    pub instance: ReportGridInstance,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_rating_ids_are_distinct() {
        let column = EntityReference::new(EntityKind::Measurable, 5);
        let cells: BTreeSet<_> = [
            ReportGridCell::new(1, column, 1),
            ReportGridCell::new(2, column, 1),
            ReportGridCell::new(3, column, 2),
        ]
        .into_iter()
        .collect();

        let instance = ReportGridInstance::new(Vec::new(), cells, Vec::new());
        let ids: Vec<_> = instance.referenced_rating_ids().into_iter().collect();

        assert_eq!(ids, vec![RatingId(1), RatingId(2)]);
    }

    #[test]
    fn ordered_columns_sorts_by_position() {
        let mut def = ReportGridDefinition::new(1, "Grid", "admin")
            .with_column(EntityReference::new(EntityKind::Measurable, 10))
            .with_column(EntityReference::new(EntityKind::Measurable, 11));
        def.column_definitions[0].position = 5;

        let ids: Vec<_> = def
            .ordered_columns()
            .iter()
            .map(|c| c.column_entity_reference.id)
            .collect();
        assert_eq!(ids, vec![11, 10]);
    }

    #[test]
    fn empty_instance() {
        assert!(ReportGridInstance::empty().is_empty());
    }
}
