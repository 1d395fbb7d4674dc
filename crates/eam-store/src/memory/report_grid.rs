//! In-memory report grid and rating scheme stores

use crate::api::{RatingSchemeStore, ReportGridStore};
use crate::error::StoreResult;
use async_trait::async_trait;
use dashmap::DashMap;
use eam_model::{
    ApplicationId, RatingId, RatingSchemeItem, ReportGridCell, ReportGridDefinition, ReportGridId,
};
use std::collections::BTreeSet;

/// Grid definitions with their cells
#[derive(Debug, Default)]
pub struct InMemoryReportGridStore {
    definitions: DashMap<ReportGridId, ReportGridDefinition>,
    cells: DashMap<ReportGridId, BTreeSet<ReportGridCell>>,
}

impl InMemoryReportGridStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a definition
    pub fn insert_definition(&self, definition: ReportGridDefinition) {
        self.definitions.insert(definition.id, definition);
    }

    /// Add cells to a grid
    pub fn insert_cells<I>(&self, grid_id: ReportGridId, cells: I)
    where
        I: IntoIterator<Item = ReportGridCell>,
    {
        self.cells.entry(grid_id).or_default().extend(cells);
    }
}

#[async_trait]
impl ReportGridStore for InMemoryReportGridStore {
    async fn get_definition(&self, id: ReportGridId) -> StoreResult<Option<ReportGridDefinition>> {
        Ok(self.definitions.get(&id).map(|d| d.value().clone()))
    }

    async fn find_cell_data(
        &self,
        id: ReportGridId,
        application_ids: &BTreeSet<ApplicationId>,
    ) -> StoreResult<BTreeSet<ReportGridCell>> {
        Ok(self
            .cells
            .get(&id)
            .map(|cells| {
                cells
                    .value()
                    .iter()
                    .filter(|c| application_ids.contains(&c.application_id))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_all_definitions(&self) -> StoreResult<Vec<ReportGridDefinition>> {
        let mut all: Vec<_> = self.definitions.iter().map(|d| d.value().clone()).collect();
        all.sort_by_key(|d| d.id);
        Ok(all)
    }
}

/// Rating scheme items by id
#[derive(Debug, Default)]
pub struct InMemoryRatingSchemeStore {
    items: DashMap<RatingId, RatingSchemeItem>,
}

impl InMemoryRatingSchemeStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_item(&self, item: RatingSchemeItem) {
        self.items.insert(item.id, item);
    }
}

#[async_trait]
impl RatingSchemeStore for InMemoryRatingSchemeStore {
    async fn resolve_by_ids(&self, ids: &BTreeSet<RatingId>) -> StoreResult<Vec<RatingSchemeItem>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.items.get(id).map(|i| i.value().clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eam_model::{EntityKind, EntityReference};

    #[tokio::test]
    async fn find_cell_data_filters_by_row() {
        let store = InMemoryReportGridStore::new();
        let column = EntityReference::new(EntityKind::Measurable, 1);
        store.insert_definition(ReportGridDefinition::new(7, "Grid", "admin").with_column(column));
        store.insert_cells(
            ReportGridId(7),
            [ReportGridCell::new(10, column, 1), ReportGridCell::new(20, column, 2)],
        );

        let cells = store
            .find_cell_data(ReportGridId(7), &BTreeSet::from([ApplicationId(20)]))
            .await
            .unwrap();

        assert_eq!(cells.len(), 1);
        assert_eq!(cells.iter().next().unwrap().rating_id, RatingId(2));
    }

    #[tokio::test]
    async fn unknown_grid_has_no_definition_or_cells() {
        let store = InMemoryReportGridStore::new();
        assert!(store.get_definition(ReportGridId(1)).await.unwrap().is_none());
        assert!(store
            .find_cell_data(ReportGridId(1), &BTreeSet::from([ApplicationId(1)]))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn list_all_definitions_sorted_by_id() {
        let store = InMemoryReportGridStore::new();
        store.insert_definition(ReportGridDefinition::new(3, "C", "admin"));
        store.insert_definition(ReportGridDefinition::new(1, "A", "admin"));

        let ids: Vec<_> = store
            .list_all_definitions()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id.0)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn resolve_by_ids_skips_unknown() {
        let store = InMemoryRatingSchemeStore::new();
        store.insert_item(RatingSchemeItem::new(1, 1, "Good", "G", "#00ff00"));

        let items = store
            .resolve_by_ids(&BTreeSet::from([RatingId(1), RatingId(2)]))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
    }
}
