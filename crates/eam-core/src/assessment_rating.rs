//! Assessment rating service
//!
//! Reads and writes ratings of entities against assessment definitions.
//! Writes are checked against the definition: it must exist, must not be
//! read-only, and the caller must hold its permitted role if it has one.

use crate::error::{store_failure, ServiceError, ServiceResult};
use crate::physical_spec_definition::require_user;
use chrono::Utc;
use eam_model::{
    AssessmentDefinition, AssessmentRating, ChangeLog, EntityKind, EntityReference, Operation,
    RemoveAssessmentRatingCommand, SaveAssessmentRatingCommand, SelectionOptions,
};
use eam_store::{AssessmentDefinitionStore, AssessmentRatingStore, ChangeLogStore, SelectorResolver};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Reads and writes assessment ratings
pub struct AssessmentRatingService {
    definitions: Arc<dyn AssessmentDefinitionStore>,
    ratings: Arc<dyn AssessmentRatingStore>,
    change_log: Arc<dyn ChangeLogStore>,
    selector: Arc<dyn SelectorResolver>,
    provenance: String,
}

impl AssessmentRatingService {
    /// Create service
    #[must_use]
    pub fn new(
        definitions: Arc<dyn AssessmentDefinitionStore>,
        ratings: Arc<dyn AssessmentRatingStore>,
        change_log: Arc<dyn ChangeLogStore>,
        selector: Arc<dyn SelectorResolver>,
    ) -> Self {
        Self {
            definitions,
            ratings,
            change_log,
            selector,
            provenance: "eam".to_string(),
        }
    }

    /// With provenance stamped on written ratings
    #[inline]
    #[must_use]
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = provenance.into();
        self
    }

    /// Ratings recorded against `entity`
    ///
    /// # Errors
    /// `ServiceError::Dependency` if the store fails
    pub async fn find_for_entity(&self, entity: &EntityReference) -> ServiceResult<Vec<AssessmentRating>> {
        self.ratings
            .find_for_entity(entity)
            .await
            .map_err(store_failure("assessment rating"))
    }

    /// Ratings on entities of `target_kind` related to the selection
    ///
    /// The selection is used as given; no scope narrowing applies here.
    ///
    /// # Errors
    /// - `ServiceError::Validation` if `target_kind` is not `APPLICATION`
    /// - `ServiceError::NotFound` if the selection's entity does not exist
    /// - `ServiceError::Dependency` if a store fails
    pub async fn find_by_target_kind_for_related_selector(
        &self,
        target_kind: EntityKind,
        options: &SelectionOptions,
    ) -> ServiceResult<Vec<AssessmentRating>> {
        if target_kind != EntityKind::Application {
            return Err(ServiceError::Validation(format!(
                "cannot find assessment ratings for target kind {target_kind}"
            )));
        }

        let application_ids = self
            .selector
            .resolve(options)
            .await
            .map_err(store_failure("selector"))?;
        if application_ids.is_empty() {
            return Ok(Vec::new());
        }

        let target_ids: BTreeSet<i64> = application_ids.iter().map(|id| id.0).collect();
        self.ratings
            .find_by_target_kind(target_kind, &target_ids)
            .await
            .map_err(store_failure("assessment rating"))
    }

    /// Record a new rating
    ///
    /// # Errors
    /// - `ServiceError::NotFound` if the assessment definition does not exist
    /// - `ServiceError::NotAuthorized` if the caller may not write this assessment
    /// - `ServiceError::Validation` if the entity is already rated
    /// - `ServiceError::Dependency` if a store fails
    pub async fn create(
        &self,
        command: &SaveAssessmentRatingCommand,
        user: &str,
        roles: &BTreeSet<String>,
    ) -> ServiceResult<()> {
        let definition = self
            .verify_can_write(command.assessment_definition_id, user, roles)
            .await?;

        self.ratings
            .create(self.rating_from(command, user))
            .await
            .map_err(store_failure("assessment rating"))?;

        self.write_change(
            Operation::Add,
            user,
            command.entity_reference,
            format!("Assessment: {} added", definition.name),
        )
        .await?;

        tracing::info!(user, entity = %command.entity_reference, assessment = definition.id, "Created assessment rating");
        Ok(())
    }

    /// Replace an existing rating
    ///
    /// # Errors
    /// - `ServiceError::NotFound` if the definition or the rating does not exist
    /// - `ServiceError::NotAuthorized` if the caller may not write this assessment
    /// - `ServiceError::Dependency` if a store fails
    pub async fn update(
        &self,
        command: &SaveAssessmentRatingCommand,
        user: &str,
        roles: &BTreeSet<String>,
    ) -> ServiceResult<()> {
        let definition = self
            .verify_can_write(command.assessment_definition_id, user, roles)
            .await?;

        let updated = self
            .ratings
            .update(self.rating_from(command, user))
            .await
            .map_err(store_failure("assessment rating"))?;
        if !updated {
            return Err(ServiceError::not_found(command.entity_reference));
        }

        self.write_change(
            Operation::Update,
            user,
            command.entity_reference,
            format!("Assessment: {} updated", definition.name),
        )
        .await?;

        tracing::info!(user, entity = %command.entity_reference, assessment = definition.id, "Updated assessment rating");
        Ok(())
    }

    /// Remove a rating
    ///
    /// # Errors
    /// - `ServiceError::NotFound` if the definition or the rating does not exist
    /// - `ServiceError::NotAuthorized` if the caller may not write this assessment
    /// - `ServiceError::Dependency` if a store fails
    pub async fn remove(
        &self,
        command: &RemoveAssessmentRatingCommand,
        user: &str,
        roles: &BTreeSet<String>,
    ) -> ServiceResult<()> {
        let definition = self
            .verify_can_write(command.assessment_definition_id, user, roles)
            .await?;

        let removed = self
            .ratings
            .remove(&command.entity_reference, command.assessment_definition_id)
            .await
            .map_err(store_failure("assessment rating"))?;
        if !removed {
            return Err(ServiceError::not_found(command.entity_reference));
        }

        self.write_change(
            Operation::Remove,
            user,
            command.entity_reference,
            format!("Assessment: {} removed", definition.name),
        )
        .await?;

        tracing::info!(user, entity = %command.entity_reference, assessment = definition.id, "Removed assessment rating");
        Ok(())
    }

    async fn verify_can_write(
        &self,
        assessment_definition_id: i64,
        user: &str,
        roles: &BTreeSet<String>,
    ) -> ServiceResult<AssessmentDefinition> {
        require_user(user)?;

        let definition = self
            .definitions
            .get_by_id(assessment_definition_id)
            .await
            .map_err(store_failure("assessment definition"))?
            .ok_or(ServiceError::NotFound {
                kind: EntityKind::AssessmentDefinition,
                id: assessment_definition_id,
            })?;

        if definition.is_read_only {
            tracing::warn!(user, assessment = definition.id, "Write to read-only assessment refused");
            return Err(ServiceError::NotAuthorized("Assessment is read-only".into()));
        }

        if let Some(role) = &definition.permitted_role {
            if !roles.contains(role) {
                tracing::warn!(user, assessment = definition.id, role = %role, "Write without permitted role refused");
                return Err(ServiceError::NotAuthorized(format!(
                    "user {user} lacks role {role} required by assessment {}",
                    definition.name
                )));
            }
        }

        Ok(definition)
    }

    fn rating_from(&self, command: &SaveAssessmentRatingCommand, user: &str) -> AssessmentRating {
        AssessmentRating {
            entity_reference: command.entity_reference,
            assessment_definition_id: command.assessment_definition_id,
            rating_id: command.rating_id,
            description: command.safe_description().to_string(),
            last_updated_at: Utc::now(),
            last_updated_by: user.to_string(),
            provenance: self.provenance.clone(),
        }
    }

    async fn write_change(
        &self,
        operation: Operation,
        user: &str,
        entity: EntityReference,
        message: String,
    ) -> ServiceResult<()> {
        let entry = ChangeLog::new(operation, user, entity, message)
            .with_child_kind(EntityKind::AssessmentDefinition);
        self.change_log
            .write(entry)
            .await
            .map_err(store_failure("change log"))
    }
}

impl fmt::Debug for AssessmentRatingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentRatingService")
            .field("provenance", &self.provenance)
            .finish_non_exhaustive()
    }
}
