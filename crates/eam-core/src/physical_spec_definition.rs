//! Physical spec definition service
//!
//! Creates and deletes versioned definitions of a physical specification.
//! Every mutation is recorded in the change log against the owning
//! specification.

use crate::error::{store_failure, ServiceError, ServiceResult};
use eam_model::{
    ChangeLog, EntityKind, EntityReference, Operation, PhysicalSpecDefinition,
    PhysicalSpecDefinitionChangeCommand, ReleaseLifecycleStatus,
};
use eam_store::{
    ChangeLogStore, PhysicalSpecDefinitionFieldStore, PhysicalSpecDefinitionSampleFileStore,
    PhysicalSpecDefinitionStore,
};
use std::fmt;
use std::sync::Arc;

/// Manages physical spec definitions and their dependent records
pub struct PhysicalSpecDefinitionService {
    change_log: Arc<dyn ChangeLogStore>,
    definitions: Arc<dyn PhysicalSpecDefinitionStore>,
    fields: Arc<dyn PhysicalSpecDefinitionFieldStore>,
    sample_files: Arc<dyn PhysicalSpecDefinitionSampleFileStore>,
    provenance: String,
}

impl PhysicalSpecDefinitionService {
    /// Create service
    #[must_use]
    pub fn new(
        change_log: Arc<dyn ChangeLogStore>,
        definitions: Arc<dyn PhysicalSpecDefinitionStore>,
        fields: Arc<dyn PhysicalSpecDefinitionFieldStore>,
        sample_files: Arc<dyn PhysicalSpecDefinitionSampleFileStore>,
    ) -> Self {
        Self {
            change_log,
            definitions,
            fields,
            sample_files,
            provenance: "eam".to_string(),
        }
    }

    /// With provenance stamped on created definitions
    #[inline]
    #[must_use]
    pub fn with_provenance(mut self, provenance: impl Into<String>) -> Self {
        self.provenance = provenance.into();
        self
    }

    /// Create a draft definition for `specification_id`
    ///
    /// # Returns
    /// Id of the new definition
    ///
    /// # Errors
    /// - `ServiceError::Validation` if `user` or the version is blank
    /// - `ServiceError::Dependency` if a store fails
    pub async fn create(
        &self,
        user: &str,
        specification_id: i64,
        command: PhysicalSpecDefinitionChangeCommand,
    ) -> ServiceResult<i64> {
        require_user(user)?;
        if command.version.trim().is_empty() {
            return Err(ServiceError::Validation("version cannot be blank".into()));
        }

        let definition = PhysicalSpecDefinition {
            id: None,
            specification_id,
            version: command.version,
            status: ReleaseLifecycleStatus::Draft,
            delimiter: command.delimiter,
            definition_type: command.definition_type,
            provenance: self.provenance.clone(),
            created_by: user.to_string(),
            last_updated_by: user.to_string(),
        };

        let id = self
            .definitions
            .create(definition)
            .await
            .map_err(store_failure("physical spec definition"))?;

        self.write_change(
            Operation::Add,
            user,
            specification_id,
            format!("Spec Definition Id: {id} added"),
        )
        .await?;

        tracing::info!(user, specification_id, definition_id = id, "Created physical spec definition");
        Ok(id)
    }

    /// Delete a definition with its fields and sample files
    ///
    /// # Returns
    /// Total number of records removed
    ///
    /// # Errors
    /// - `ServiceError::Validation` if `user` is blank
    /// - `ServiceError::NotFound` if the definition does not exist
    /// - `ServiceError::Dependency` if a store fails
    pub async fn delete(&self, user: &str, spec_definition_id: i64) -> ServiceResult<usize> {
        require_user(user)?;

        let definition = self
            .definitions
            .get_by_id(spec_definition_id)
            .await
            .map_err(store_failure("physical spec definition"))?
            .ok_or(ServiceError::NotFound {
                kind: EntityKind::PhysicalSpecification,
                id: spec_definition_id,
            })?;

        let definitions_removed = self
            .definitions
            .delete(spec_definition_id)
            .await
            .map_err(store_failure("physical spec definition"))?;
        let fields_removed = self
            .fields
            .delete_for_spec_definition(spec_definition_id)
            .await
            .map_err(store_failure("physical spec field"))?;
        let files_removed = self
            .sample_files
            .delete_for_spec_definition(spec_definition_id)
            .await
            .map_err(store_failure("physical spec sample file"))?;

        self.write_change(
            Operation::Remove,
            user,
            definition.specification_id,
            format!("Spec Definition Id: {spec_definition_id} removed"),
        )
        .await?;

        tracing::info!(
            user,
            definition_id = spec_definition_id,
            definitions_removed,
            fields_removed,
            files_removed,
            "Deleted physical spec definition"
        );
        Ok(definitions_removed + fields_removed + files_removed)
    }

    /// Definitions of a specification
    ///
    /// # Errors
    /// `ServiceError::Dependency` if the store fails
    pub async fn find_for_specification(
        &self,
        specification_id: i64,
    ) -> ServiceResult<Vec<PhysicalSpecDefinition>> {
        self.definitions
            .find_for_specification(specification_id)
            .await
            .map_err(store_failure("physical spec definition"))
    }

    async fn write_change(
        &self,
        operation: Operation,
        user: &str,
        specification_id: i64,
        message: String,
    ) -> ServiceResult<()> {
        let entry = ChangeLog::new(
            operation,
            user,
            EntityReference::new(EntityKind::PhysicalSpecification, specification_id),
            message,
        );
        self.change_log
            .write(entry)
            .await
            .map_err(store_failure("change log"))
    }
}

impl fmt::Debug for PhysicalSpecDefinitionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalSpecDefinitionService")
            .field("provenance", &self.provenance)
            .finish_non_exhaustive()
    }
}

pub(crate) fn require_user(user: &str) -> ServiceResult<()> {
    if user.trim().is_empty() {
        return Err(ServiceError::Validation("user cannot be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eam_model::{
        PhysicalSpecDefinitionField, PhysicalSpecDefinitionSampleFile, PhysicalSpecDefinitionType,
    };
    use eam_store::{InMemoryChangeLog, InMemoryPhysicalSpecStore};

    fn service() -> (PhysicalSpecDefinitionService, Arc<InMemoryPhysicalSpecStore>, Arc<InMemoryChangeLog>) {
        let store = Arc::new(InMemoryPhysicalSpecStore::new());
        let log = Arc::new(InMemoryChangeLog::new());
        let service = PhysicalSpecDefinitionService::new(
            log.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        );
        (service, store, log)
    }

    fn command(version: &str) -> PhysicalSpecDefinitionChangeCommand {
        PhysicalSpecDefinitionChangeCommand {
            version: version.into(),
            delimiter: Some(",".into()),
            definition_type: PhysicalSpecDefinitionType::DelimitedText,
        }
    }

    #[tokio::test]
    async fn create_stores_draft_and_logs() {
        let (service, _store, log) = service();

        let id = service.create("alice", 5, command("1.0")).await.unwrap();
        let found = service.find_for_specification(5).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(id));
        assert_eq!(found[0].status, ReleaseLifecycleStatus::Draft);
        assert_eq!(found[0].provenance, "eam");
        assert_eq!(found[0].created_by, "alice");

        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Add);
        assert_eq!(entries[0].message, format!("Spec Definition Id: {id} added"));
        assert_eq!(
            entries[0].parent_reference,
            EntityReference::new(EntityKind::PhysicalSpecification, 5)
        );
    }

    #[tokio::test]
    async fn create_rejects_blank_user() {
        let (service, _store, log) = service();
        let err = service.create("  ", 5, command("1.0")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn delete_cascades_and_counts() {
        let (service, store, log) = service();
        let id = service.create("alice", 5, command("1.0")).await.unwrap();
        let other = service.create("alice", 5, command("2.0")).await.unwrap();

        for (position, name) in ["id", "name"].into_iter().enumerate() {
            store.insert_field(PhysicalSpecDefinitionField {
                id: None,
                spec_definition_id: id,
                name: name.into(),
                position: i32::try_from(position).unwrap(),
                description: String::new(),
            });
        }
        store.insert_field(PhysicalSpecDefinitionField {
            id: None,
            spec_definition_id: other,
            name: "kept".into(),
            position: 0,
            description: String::new(),
        });
        store.insert_sample_file(PhysicalSpecDefinitionSampleFile {
            id: None,
            spec_definition_id: id,
            name: "sample.csv".into(),
            file_data: "id,name\n1,a".into(),
        });

        let removed = service.delete("bob", id).await.unwrap();

        assert_eq!(removed, 4);
        assert!(store.fields_for(id).is_empty());
        assert_eq!(store.fields_for(other).len(), 1);

        let last = log.entries().pop().unwrap();
        assert_eq!(last.operation, Operation::Remove);
        assert_eq!(last.user_id, "bob");
        assert_eq!(last.message, format!("Spec Definition Id: {id} removed"));
        assert_eq!(last.parent_reference.id, 5);
    }

    #[tokio::test]
    async fn delete_unknown_definition_is_not_found() {
        let (service, _store, log) = service();
        let err = service.delete("bob", 99).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn provenance_is_configurable() {
        let (service, _store, _log) = service();
        let service = service.with_provenance("import");
        service.create("alice", 1, command("1.0")).await.unwrap();
        let found = service.find_for_specification(1).await.unwrap();
        assert_eq!(found[0].provenance, "import");
    }
}
