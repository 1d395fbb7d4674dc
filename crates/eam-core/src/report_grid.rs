//! Report grid assembly
//!
//! Builds a displayable [`ReportGrid`] for a grid id and a selection:
//! 1. Narrow the selection (person selections are always `EXACT`)
//! 2. Resolve the selection to application ids, alongside the definition lookup
//! 3. Fetch cells and applications for those ids concurrently
//! 4. Resolve the rating items the cells reference
//! 5. Pair the resulting instance with the definition
//!
//! The whole assembly runs under one deadline. Any store failure fails the
//! call; there is no partial result.

use crate::config::GridConfig;
use crate::error::{store_failure, ServiceError, ServiceResult};
use eam_model::{
    ApplicationId, EntityKind, HierarchyQueryScope, RatingId, RatingSchemeItem, ReportGrid,
    ReportGridDefinition, ReportGridId, ReportGridInstance, SelectionOptions,
};
use eam_store::{ApplicationStore, RatingSchemeStore, ReportGridStore, SelectorResolver, StoreError};
use futures::future::try_join;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Selection actually used to compute a grid
///
/// Resolving a person's full reporting tree makes grid computation
/// prohibitively slow, so person selections are restricted to `EXACT`.
/// Every other selection passes through unchanged.
#[must_use]
pub fn effective_selection_options(options: &SelectionOptions) -> SelectionOptions {
    if options.kind() == EntityKind::Person {
        options.with_scope(HierarchyQueryScope::Exact)
    } else {
        *options
    }
}

/// Assembles report grids from the grid, application and rating stores
pub struct ReportGridService {
    grid_store: Arc<dyn ReportGridStore>,
    application_store: Arc<dyn ApplicationStore>,
    rating_store: Arc<dyn RatingSchemeStore>,
    selector: Arc<dyn SelectorResolver>,
    config: GridConfig,
}

impl ReportGridService {
    /// Start building a service
    #[inline]
    #[must_use]
    pub fn builder() -> ReportGridServiceBuilder {
        ReportGridServiceBuilder::default()
    }

    /// Every grid definition
    ///
    /// # Errors
    /// `ServiceError::Dependency` if the grid store fails
    pub async fn list_all(&self) -> ServiceResult<Vec<ReportGridDefinition>> {
        self.grid_store
            .list_all_definitions()
            .await
            .map_err(store_failure("report grid"))
    }

    /// Grid `id` resolved for `options`, within the configured fetch timeout
    ///
    /// # Errors
    /// - `ServiceError::NotFound` if no grid has this id, or the selection's entity does not exist
    /// - `ServiceError::Validation` if the selection's entity kind cannot select applications
    /// - `ServiceError::Dependency` if any store fails
    /// - `ServiceError::Timeout` if assembly exceeds the fetch timeout
    pub async fn get_grid(
        &self,
        id: ReportGridId,
        options: &SelectionOptions,
    ) -> ServiceResult<ReportGrid> {
        self.get_grid_within(id, options, self.config.fetch_timeout())
            .await
    }

    /// Grid `id` resolved for `options`, failing if assembly takes longer than `limit`
    ///
    /// # Errors
    /// As [`ReportGridService::get_grid`]
    pub async fn get_grid_within(
        &self,
        id: ReportGridId,
        options: &SelectionOptions,
        limit: Duration,
    ) -> ServiceResult<ReportGrid> {
        let effective = effective_selection_options(options);
        if effective != *options {
            tracing::warn!(grid = %id, requested = %options, "Restricting person selection to EXACT scope");
        }

        tracing::info!(grid = %id, selection = %effective, "Assembling report grid");

        match tokio::time::timeout(limit, self.assemble(id, &effective)).await {
            Ok(result) => result,
            Err(_) => {
                let duration_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
                tracing::error!(grid = %id, duration_ms, "Report grid assembly timed out");
                Err(ServiceError::Timeout { duration_ms })
            }
        }
    }

    async fn assemble(
        &self,
        id: ReportGridId,
        options: &SelectionOptions,
    ) -> ServiceResult<ReportGrid> {
        // The definition must exist before any grid data is fetched
        let (definition, application_ids) =
            try_join(self.load_definition(id), self.resolve_targets(options)).await?;

        let instance = self.build_instance(id, &application_ids).await?;

        tracing::debug!(
            grid = %id,
            applications = instance.applications().len(),
            cells = instance.cell_data().len(),
            ratings = instance.rating_scheme_items().len(),
            "Report grid assembled"
        );

        Ok(ReportGrid {
            definition,
            instance,
        })
    }

    async fn load_definition(&self, id: ReportGridId) -> ServiceResult<ReportGridDefinition> {
        self.grid_store
            .get_definition(id)
            .await
            .map_err(store_failure("report grid"))?
            .ok_or(ServiceError::NotFound {
                kind: EntityKind::ReportGrid,
                id: id.0,
            })
    }

    async fn resolve_targets(
        &self,
        options: &SelectionOptions,
    ) -> ServiceResult<BTreeSet<ApplicationId>> {
        self.selector
            .resolve(options)
            .await
            .map_err(store_failure("selector"))
    }

    async fn build_instance(
        &self,
        id: ReportGridId,
        application_ids: &BTreeSet<ApplicationId>,
    ) -> ServiceResult<ReportGridInstance> {
        if application_ids.is_empty() {
            tracing::debug!(grid = %id, "Selection resolved to no applications");
            return Ok(ReportGridInstance::empty());
        }

        let cells = async {
            self.grid_store
                .find_cell_data(id, application_ids)
                .await
                .map_err(store_failure("report grid"))
        };
        let applications = async {
            self.application_store
                .find_by_id_set(application_ids)
                .await
                .map_err(store_failure("application"))
        };
        let (cell_data, applications) = try_join(cells, applications).await?;

        let rating_ids: BTreeSet<RatingId> = cell_data.iter().map(|c| c.rating_id).collect();
        let rating_scheme_items = self.resolve_rating_items(&rating_ids).await?;

        Ok(ReportGridInstance::new(
            applications,
            cell_data,
            rating_scheme_items,
        ))
    }

    /// One item per referenced rating id, ordered by id
    async fn resolve_rating_items(
        &self,
        rating_ids: &BTreeSet<RatingId>,
    ) -> ServiceResult<Vec<RatingSchemeItem>> {
        if rating_ids.is_empty() {
            return Ok(Vec::new());
        }

        let resolved = self
            .rating_store
            .resolve_by_ids(rating_ids)
            .await
            .map_err(store_failure("rating scheme"))?;

        let mut by_id: BTreeMap<RatingId, RatingSchemeItem> = BTreeMap::new();
        for item in resolved {
            if rating_ids.contains(&item.id) {
                by_id.entry(item.id).or_insert(item);
            }
        }

        let missing: Vec<i64> = rating_ids
            .iter()
            .filter(|id| !by_id.contains_key(id))
            .map(|id| id.0)
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::Dependency {
                store: "rating scheme",
                source: StoreError::MissingRecords { missing },
            });
        }

        Ok(by_id.into_values().collect())
    }

    /// Grid configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

impl fmt::Debug for ReportGridService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportGridService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ReportGridService`]
///
/// Every store is required; `build` fails if one is missing.
#[derive(Default)]
pub struct ReportGridServiceBuilder {
    grid_store: Option<Arc<dyn ReportGridStore>>,
    application_store: Option<Arc<dyn ApplicationStore>>,
    rating_store: Option<Arc<dyn RatingSchemeStore>>,
    selector: Option<Arc<dyn SelectorResolver>>,
    config: GridConfig,
}

impl ReportGridServiceBuilder {
    #[must_use]
    pub fn grid_store(mut self, store: Arc<dyn ReportGridStore>) -> Self {
        self.grid_store = Some(store);
        self
    }

    #[must_use]
    pub fn application_store(mut self, store: Arc<dyn ApplicationStore>) -> Self {
        self.application_store = Some(store);
        self
    }

    #[must_use]
    pub fn rating_store(mut self, store: Arc<dyn RatingSchemeStore>) -> Self {
        self.rating_store = Some(store);
        self
    }

    #[must_use]
    pub fn selector(mut self, selector: Arc<dyn SelectorResolver>) -> Self {
        self.selector = Some(selector);
        self
    }

    #[must_use]
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the service
    ///
    /// # Errors
    /// `ServiceError::Configuration` naming every missing store
    pub fn build(self) -> ServiceResult<ReportGridService> {
        let mut missing = Vec::new();
        if self.grid_store.is_none() {
            missing.push("grid_store");
        }
        if self.application_store.is_none() {
            missing.push("application_store");
        }
        if self.rating_store.is_none() {
            missing.push("rating_store");
        }
        if self.selector.is_none() {
            missing.push("selector");
        }

        match (
            self.grid_store,
            self.application_store,
            self.rating_store,
            self.selector,
        ) {
            (Some(grid_store), Some(application_store), Some(rating_store), Some(selector)) => {
                Ok(ReportGridService {
                    grid_store,
                    application_store,
                    rating_store,
                    selector,
                    config: self.config,
                })
            }
            _ => Err(ServiceError::Configuration(format!(
                "report grid service missing: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eam_model::{
        Application, EntityReference, Involvement, OrgUnit, Person, ReportGridCell,
    };
    use eam_store::{
        InMemoryDirectory, InMemoryRatingSchemeStore, InMemoryReportGridStore, StoreResult,
    };

    struct Fixture {
        directory: Arc<InMemoryDirectory>,
        grids: Arc<InMemoryReportGridStore>,
        ratings: Arc<InMemoryRatingSchemeStore>,
    }

    impl Fixture {
        fn service(&self) -> ReportGridService {
            ReportGridService::builder()
                .grid_store(self.grids.clone())
                .application_store(self.directory.clone())
                .rating_store(self.ratings.clone())
                .selector(self.directory.clone())
                .build()
                .unwrap()
        }
    }

    /// Org units 1 -> 2; apps 10@1, 20@2; person 42 involved with 10,
    /// reportee 43 involved with 20; grid 7 with one column.
    fn fixture() -> Fixture {
        let directory = Arc::new(InMemoryDirectory::new());
        directory.insert_org_unit(OrgUnit::new(1, "Group", None));
        directory.insert_org_unit(OrgUnit::new(2, "Markets", Some(1)));
        directory.insert_application(Application::new(10, "Ledger", 1));
        directory.insert_application(Application::new(20, "Pricer", 2));
        directory.insert_person(Person::new(42, "E42", "Manager", None));
        directory.insert_person(Person::new(43, "E43", "Reportee", Some("E42")));
        for (emp, app) in [("E42", 10), ("E43", 20)] {
            directory.insert_involvement(Involvement {
                employee_id: emp.into(),
                application_id: ApplicationId(app),
                kind: "OWNER".into(),
            });
        }

        let column = EntityReference::new(EntityKind::Measurable, 500);
        let grids = Arc::new(InMemoryReportGridStore::new());
        grids.insert_definition(ReportGridDefinition::new(7, "Capabilities", "admin").with_column(column));
        grids.insert_cells(
            ReportGridId(7),
            [ReportGridCell::new(10, column, 1), ReportGridCell::new(20, column, 2)],
        );

        let ratings = Arc::new(InMemoryRatingSchemeStore::new());
        ratings.insert_item(RatingSchemeItem::new(1, 1, "Invest", "I", "#00ff00"));
        ratings.insert_item(RatingSchemeItem::new(2, 1, "Divest", "D", "#ff0000"));

        Fixture {
            directory,
            grids,
            ratings,
        }
    }

    fn selection(kind: EntityKind, id: i64, scope: HierarchyQueryScope) -> SelectionOptions {
        SelectionOptions::new(EntityReference::new(kind, id), scope)
    }

    #[test]
    fn person_selection_is_narrowed_to_exact() {
        for scope in [HierarchyQueryScope::Children, HierarchyQueryScope::Parents, HierarchyQueryScope::Exact] {
            let options = selection(EntityKind::Person, 42, scope);
            assert_eq!(effective_selection_options(&options).scope, HierarchyQueryScope::Exact);
        }
    }

    #[test]
    fn other_selections_pass_through() {
        let options = selection(EntityKind::OrgUnit, 1, HierarchyQueryScope::Children);
        assert_eq!(effective_selection_options(&options), options);
    }

    #[tokio::test]
    async fn org_unit_grid_includes_children() {
        let fx = fixture();
        let grid = fx
            .service()
            .get_grid(ReportGridId(7), &selection(EntityKind::OrgUnit, 1, HierarchyQueryScope::Children))
            .await
            .unwrap();

        assert_eq!(grid.definition.name, "Capabilities");
        assert_eq!(grid.instance.applications().len(), 2);
        assert_eq!(grid.instance.cell_data().len(), 2);
        assert_eq!(grid.instance.rating_scheme_items().len(), 2);
    }

    #[tokio::test]
    async fn person_grid_ignores_reportees() {
        let fx = fixture();
        let grid = fx
            .service()
            .get_grid(ReportGridId(7), &selection(EntityKind::Person, 42, HierarchyQueryScope::Children))
            .await
            .unwrap();

        let app_ids: Vec<_> = grid.instance.applications().iter().map(|a| a.id).collect();
        assert_eq!(app_ids, vec![ApplicationId(10)]);
        assert_eq!(grid.instance.rating_scheme_items().len(), 1);
        assert_eq!(grid.instance.rating_scheme_items()[0].id, RatingId(1));
    }

    #[tokio::test]
    async fn unknown_grid_is_not_found() {
        let fx = fixture();
        let err = fx
            .service()
            .get_grid(ReportGridId(99), &selection(EntityKind::OrgUnit, 1, HierarchyQueryScope::Exact))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { kind: EntityKind::ReportGrid, id: 99 }));
    }

    #[tokio::test]
    async fn unsupported_selector_kind_is_validation_error() {
        let fx = fixture();
        let err = fx
            .service()
            .get_grid(ReportGridId(7), &selection(EntityKind::Measurable, 1, HierarchyQueryScope::Exact))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn dangling_rating_reference_fails() {
        let fx = fixture();
        let column = EntityReference::new(EntityKind::Measurable, 500);
        fx.grids.insert_cells(ReportGridId(7), [ReportGridCell::new(10, column, 77)]);

        let err = fx
            .service()
            .get_grid(ReportGridId(7), &selection(EntityKind::Application, 10, HierarchyQueryScope::Exact))
            .await
            .unwrap_err();

        match err {
            ServiceError::Dependency { source: StoreError::MissingRecords { missing }, .. } => {
                assert_eq!(missing, vec![77]);
            }
            other => panic!("expected missing rating records, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_all_passes_through() {
        let fx = fixture();
        let all = fx.service().list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, ReportGridId(7));
    }

    #[test]
    fn builder_reports_every_missing_store() {
        let fx = fixture();
        let err = ReportGridService::builder()
            .grid_store(fx.grids.clone())
            .build()
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("application_store"));
        assert!(message.contains("rating_store"));
        assert!(message.contains("selector"));
        assert!(!message.contains("grid_store"));
    }

    struct SlowSelector;

    #[async_trait]
    impl SelectorResolver for SlowSelector {
        async fn resolve(&self, _options: &SelectionOptions) -> StoreResult<BTreeSet<ApplicationId>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(BTreeSet::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_selector_times_out() {
        let fx = fixture();
        let service = ReportGridService::builder()
            .grid_store(fx.grids.clone())
            .application_store(fx.directory.clone())
            .rating_store(fx.ratings.clone())
            .selector(Arc::new(SlowSelector))
            .build()
            .unwrap();

        let err = service
            .get_grid_within(
                ReportGridId(7),
                &selection(EntityKind::OrgUnit, 1, HierarchyQueryScope::Exact),
                Duration::from_millis(500),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Timeout { duration_ms: 500 }));
    }
}
