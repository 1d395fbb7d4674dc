//! In-memory assessment definitions and ratings

use crate::api::{AssessmentDefinitionStore, AssessmentRatingStore};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use eam_model::{AssessmentDefinition, AssessmentRating, EntityKind, EntityReference};
use std::collections::BTreeSet;

type RatingKey = (EntityReference, i64);

/// Assessment definitions and the ratings recorded against them
#[derive(Debug, Default)]
pub struct InMemoryAssessmentStore {
    definitions: DashMap<i64, AssessmentDefinition>,
    ratings: DashMap<RatingKey, AssessmentRating>,
}

impl InMemoryAssessmentStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_definition(&self, definition: AssessmentDefinition) {
        self.definitions.insert(definition.id, definition);
    }

    fn sorted(mut ratings: Vec<AssessmentRating>) -> Vec<AssessmentRating> {
        ratings.sort_by_key(|r| (r.entity_reference, r.assessment_definition_id));
        ratings
    }
}

#[async_trait]
impl AssessmentDefinitionStore for InMemoryAssessmentStore {
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<AssessmentDefinition>> {
        Ok(self.definitions.get(&id).map(|d| d.value().clone()))
    }
}

#[async_trait]
impl AssessmentRatingStore for InMemoryAssessmentStore {
    async fn find_for_entity(&self, entity: &EntityReference) -> StoreResult<Vec<AssessmentRating>> {
        Ok(Self::sorted(
            self.ratings
                .iter()
                .filter(|r| r.key().0 == *entity)
                .map(|r| r.value().clone())
                .collect(),
        ))
    }

    async fn find_by_target_kind(
        &self,
        target_kind: EntityKind,
        target_ids: &BTreeSet<i64>,
    ) -> StoreResult<Vec<AssessmentRating>> {
        Ok(Self::sorted(
            self.ratings
                .iter()
                .filter(|r| {
                    let entity = r.key().0;
                    entity.kind == target_kind && target_ids.contains(&entity.id)
                })
                .map(|r| r.value().clone())
                .collect(),
        ))
    }

    async fn get(
        &self,
        entity: &EntityReference,
        assessment_definition_id: i64,
    ) -> StoreResult<Option<AssessmentRating>> {
        Ok(self
            .ratings
            .get(&(*entity, assessment_definition_id))
            .map(|r| r.value().clone()))
    }

    async fn create(&self, rating: AssessmentRating) -> StoreResult<()> {
        let key = (rating.entity_reference, rating.assessment_definition_id);
        match self.ratings.entry(key) {
            Entry::Occupied(_) => Err(StoreError::Conflict(format!(
                "rating for {} on assessment {} already exists",
                key.0, key.1
            ))),
            Entry::Vacant(slot) => {
                slot.insert(rating);
                Ok(())
            }
        }
    }

    async fn update(&self, rating: AssessmentRating) -> StoreResult<bool> {
        let key = (rating.entity_reference, rating.assessment_definition_id);
        match self.ratings.get_mut(&key) {
            Some(mut existing) => {
                *existing = rating;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, entity: &EntityReference, assessment_definition_id: i64) -> StoreResult<bool> {
        Ok(self
            .ratings
            .remove(&(*entity, assessment_definition_id))
            .is_some())
    }
}
