//! JSON dataset loading
//!
//! A dataset is one JSON document holding every record the in-memory stores
//! need. Sections may be omitted.

use anyhow::{Context, Result};
use eam_core::{AssessmentRatingService, EamConfig, ReportGridService};
use eam_model::{
    AppGroupEntry, Application, AssessmentDefinition, AssessmentRating, Involvement, OrgUnit,
    Person, RatingSchemeItem, ReportGridCell, ReportGridDefinition,
};
use eam_store::{
    AssessmentRatingStore, InMemoryAssessmentStore, InMemoryChangeLog, InMemoryDirectory,
    InMemoryRatingSchemeStore, InMemoryReportGridStore,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Grid definition with its cells
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRecord {
    pub definition: ReportGridDefinition,
    #[serde(default)]
    pub cells: Vec<ReportGridCell>,
}

/// Raw dataset document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub org_units: Vec<OrgUnit>,
    pub people: Vec<Person>,
    pub applications: Vec<Application>,
    pub involvements: Vec<Involvement>,
    pub app_groups: Vec<AppGroupEntry>,
    pub grids: Vec<GridRecord>,
    pub rating_scheme_items: Vec<RatingSchemeItem>,
    pub assessment_definitions: Vec<AssessmentDefinition>,
    pub assessment_ratings: Vec<AssessmentRating>,
}

impl Dataset {
    /// Parse a dataset from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("dataset is not valid JSON")
    }

    /// Read and parse a dataset file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read dataset {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("cannot load dataset {}", path.display()))
    }

    /// Populate in-memory stores
    pub async fn into_estate(self) -> Result<Estate> {
        let directory = Arc::new(InMemoryDirectory::new());
        for unit in self.org_units {
            directory.insert_org_unit(unit);
        }
        for person in self.people {
            directory.insert_person(person);
        }
        for application in self.applications {
            directory.insert_application(application);
        }
        for involvement in self.involvements {
            directory.insert_involvement(involvement);
        }
        for entry in self.app_groups {
            directory.insert_app_group_entry(entry);
        }

        let grids = Arc::new(InMemoryReportGridStore::new());
        for record in self.grids {
            let id = record.definition.id;
            grids.insert_definition(record.definition);
            grids.insert_cells(id, record.cells);
        }

        let ratings = Arc::new(InMemoryRatingSchemeStore::new());
        for item in self.rating_scheme_items {
            ratings.insert_item(item);
        }

        let assessments = Arc::new(InMemoryAssessmentStore::new());
        for definition in self.assessment_definitions {
            assessments.insert_definition(definition);
        }
        for rating in self.assessment_ratings {
            let entity = rating.entity_reference;
            assessments
                .create(rating)
                .await
                .with_context(|| format!("duplicate assessment rating for {entity}"))?;
        }

        tracing::debug!(applications = directory.application_count(), "Dataset loaded");

        Ok(Estate {
            directory,
            grids,
            ratings,
            assessments,
            change_log: Arc::new(InMemoryChangeLog::new()),
        })
    }
}

/// Stores populated from a dataset
#[derive(Debug, Clone)]
pub struct Estate {
    pub directory: Arc<InMemoryDirectory>,
    pub grids: Arc<InMemoryReportGridStore>,
    pub ratings: Arc<InMemoryRatingSchemeStore>,
    pub assessments: Arc<InMemoryAssessmentStore>,
    pub change_log: Arc<InMemoryChangeLog>,
}

impl Estate {
    /// Report grid service over these stores
    pub fn grid_service(&self, config: &EamConfig) -> Result<ReportGridService> {
        ReportGridService::builder()
            .grid_store(self.grids.clone())
            .application_store(self.directory.clone())
            .rating_store(self.ratings.clone())
            .selector(self.directory.clone())
            .config(config.grid)
            .build()
            .context("cannot wire report grid service")
    }

    /// Assessment rating service over these stores
    #[must_use]
    pub fn assessment_service(&self, config: &EamConfig) -> AssessmentRatingService {
        AssessmentRatingService::new(
            self.assessments.clone(),
            self.assessments.clone(),
            self.change_log.clone(),
            self.directory.clone(),
        )
        .with_provenance(config.provenance.clone())
    }
}
