//! Store traits
//!
//! Services depend only on these traits. Every method is a single read or a
//! single write against the backing store; composition happens in the
//! services.

use crate::error::StoreResult;
use async_trait::async_trait;
use eam_model::{
    Application, ApplicationId, AssessmentDefinition, AssessmentRating, ChangeLog, EntityKind,
    EntityReference, PhysicalSpecDefinition, RatingId, RatingSchemeItem, ReportGridCell,
    ReportGridDefinition, ReportGridId, SelectionOptions,
};
use std::collections::BTreeSet;

/// Turns selection options into a concrete set of application ids
#[async_trait]
pub trait SelectorResolver: Send + Sync {
    /// Resolve the applications in scope for `options`
    ///
    /// # Errors
    /// - `StoreError::UnsupportedSelector` if the anchoring kind cannot select applications
    /// - `StoreError::NotFound` if the anchoring entity does not exist
    async fn resolve(&self, options: &SelectionOptions) -> StoreResult<BTreeSet<ApplicationId>>;
}

/// Grid definitions and raw cell data
#[async_trait]
pub trait ReportGridStore: Send + Sync {
    /// Load a grid definition, `None` if no grid has this id
    async fn get_definition(&self, id: ReportGridId) -> StoreResult<Option<ReportGridDefinition>>;

    /// Cells of grid `id` whose row is one of `application_ids`
    async fn find_cell_data(
        &self,
        id: ReportGridId,
        application_ids: &BTreeSet<ApplicationId>,
    ) -> StoreResult<BTreeSet<ReportGridCell>>;

    /// Every grid definition
    async fn list_all_definitions(&self) -> StoreResult<Vec<ReportGridDefinition>>;
}

/// Application records
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    /// Applications with the given ids; unknown ids are skipped
    async fn find_by_id_set(&self, ids: &BTreeSet<ApplicationId>) -> StoreResult<Vec<Application>>;
}

/// Rating scheme metadata
#[async_trait]
pub trait RatingSchemeStore: Send + Sync {
    /// Rating items with the given ids
    async fn resolve_by_ids(&self, ids: &BTreeSet<RatingId>) -> StoreResult<Vec<RatingSchemeItem>>;
}

/// Append-only audit log
#[async_trait]
pub trait ChangeLogStore: Send + Sync {
    /// Append one entry
    async fn write(&self, entry: ChangeLog) -> StoreResult<()>;

    /// Entries filed against `parent`, oldest first
    async fn find_by_parent(&self, parent: &EntityReference) -> StoreResult<Vec<ChangeLog>>;
}

/// Physical spec definitions
#[async_trait]
pub trait PhysicalSpecDefinitionStore: Send + Sync {
    /// Insert a definition and return its new id
    async fn create(&self, definition: PhysicalSpecDefinition) -> StoreResult<i64>;

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<PhysicalSpecDefinition>>;

    /// Delete a definition, returning the number of rows removed
    async fn delete(&self, id: i64) -> StoreResult<usize>;

    async fn find_for_specification(&self, specification_id: i64) -> StoreResult<Vec<PhysicalSpecDefinition>>;
}

/// Fields belonging to physical spec definitions
#[async_trait]
pub trait PhysicalSpecDefinitionFieldStore: Send + Sync {
    /// Delete every field of a definition, returning the count removed
    async fn delete_for_spec_definition(&self, spec_definition_id: i64) -> StoreResult<usize>;
}

/// Sample files belonging to physical spec definitions
#[async_trait]
pub trait PhysicalSpecDefinitionSampleFileStore: Send + Sync {
    /// Delete every sample file of a definition, returning the count removed
    async fn delete_for_spec_definition(&self, spec_definition_id: i64) -> StoreResult<usize>;
}

/// Assessment definitions
#[async_trait]
pub trait AssessmentDefinitionStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<AssessmentDefinition>>;
}

/// Assessment ratings, keyed by `(entity reference, definition id)`
#[async_trait]
pub trait AssessmentRatingStore: Send + Sync {
    async fn find_for_entity(&self, entity: &EntityReference) -> StoreResult<Vec<AssessmentRating>>;

    /// Ratings on entities of `target_kind` whose id is in `target_ids`
    async fn find_by_target_kind(
        &self,
        target_kind: EntityKind,
        target_ids: &BTreeSet<i64>,
    ) -> StoreResult<Vec<AssessmentRating>>;

    async fn get(
        &self,
        entity: &EntityReference,
        assessment_definition_id: i64,
    ) -> StoreResult<Option<AssessmentRating>>;

    /// Insert, failing with `StoreError::Conflict` if the key exists
    async fn create(&self, rating: AssessmentRating) -> StoreResult<()>;

    /// Replace, returning false if the key does not exist
    async fn update(&self, rating: AssessmentRating) -> StoreResult<bool>;

    /// Delete, returning false if the key does not exist
    async fn remove(&self, entity: &EntityReference, assessment_definition_id: i64) -> StoreResult<bool>;
}
