//! In-memory physical spec definitions, fields and sample files

use crate::api::{
    PhysicalSpecDefinitionFieldStore, PhysicalSpecDefinitionSampleFileStore,
    PhysicalSpecDefinitionStore,
};
use crate::error::StoreResult;
use async_trait::async_trait;
use dashmap::DashMap;
use eam_model::{
    PhysicalSpecDefinition, PhysicalSpecDefinitionField, PhysicalSpecDefinitionSampleFile,
};
use std::sync::atomic::{AtomicI64, Ordering};

/// Definitions together with their fields and sample files
#[derive(Debug)]
pub struct InMemoryPhysicalSpecStore {
    next_id: AtomicI64,
    definitions: DashMap<i64, PhysicalSpecDefinition>,
    fields: DashMap<i64, PhysicalSpecDefinitionField>,
    sample_files: DashMap<i64, PhysicalSpecDefinitionSampleFile>,
}

impl InMemoryPhysicalSpecStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            definitions: DashMap::new(),
            fields: DashMap::new(),
            sample_files: DashMap::new(),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Add a field, assigning its id
    pub fn insert_field(&self, mut field: PhysicalSpecDefinitionField) -> i64 {
        let id = self.allocate_id();
        field.id = Some(id);
        self.fields.insert(id, field);
        id
    }

    /// Add a sample file, assigning its id
    pub fn insert_sample_file(&self, mut file: PhysicalSpecDefinitionSampleFile) -> i64 {
        let id = self.allocate_id();
        file.id = Some(id);
        self.sample_files.insert(id, file);
        id
    }

    /// Fields of a definition, by position
    #[must_use]
    pub fn fields_for(&self, spec_definition_id: i64) -> Vec<PhysicalSpecDefinitionField> {
        let mut fields: Vec<_> = self
            .fields
            .iter()
            .filter(|f| f.value().spec_definition_id == spec_definition_id)
            .map(|f| f.value().clone())
            .collect();
        fields.sort_by_key(|f| f.position);
        fields
    }
}

impl Default for InMemoryPhysicalSpecStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhysicalSpecDefinitionStore for InMemoryPhysicalSpecStore {
    async fn create(&self, mut definition: PhysicalSpecDefinition) -> StoreResult<i64> {
        let id = self.allocate_id();
        definition.id = Some(id);
        self.definitions.insert(id, definition);
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<PhysicalSpecDefinition>> {
        Ok(self.definitions.get(&id).map(|d| d.value().clone()))
    }

    async fn delete(&self, id: i64) -> StoreResult<usize> {
        Ok(usize::from(self.definitions.remove(&id).is_some()))
    }

    async fn find_for_specification(&self, specification_id: i64) -> StoreResult<Vec<PhysicalSpecDefinition>> {
        let mut found: Vec<_> = self
            .definitions
            .iter()
            .filter(|d| d.value().specification_id == specification_id)
            .map(|d| d.value().clone())
            .collect();
        found.sort_by_key(|d| d.id);
        Ok(found)
    }
}

#[async_trait]
impl PhysicalSpecDefinitionFieldStore for InMemoryPhysicalSpecStore {
    async fn delete_for_spec_definition(&self, spec_definition_id: i64) -> StoreResult<usize> {
        let before = self.fields.len();
        self.fields
            .retain(|_, f| f.spec_definition_id != spec_definition_id);
        Ok(before - self.fields.len())
    }
}

#[async_trait]
impl PhysicalSpecDefinitionSampleFileStore for InMemoryPhysicalSpecStore {
    async fn delete_for_spec_definition(&self, spec_definition_id: i64) -> StoreResult<usize> {
        let before = self.sample_files.len();
        self.sample_files
            .retain(|_, f| f.spec_definition_id != spec_definition_id);
        Ok(before - self.sample_files.len())
    }
}
