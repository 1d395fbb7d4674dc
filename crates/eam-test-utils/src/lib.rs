//! Testing utilities for EAM workspace
//!
//! Shared fixtures: a small seeded estate of org units, people, applications,
//! one report grid and its rating scheme.

#![allow(missing_docs)]

use eam_model::{
    AppGroupEntry, Application, ApplicationId, AssessmentDefinition, EntityKind, EntityReference,
    Involvement, OrgUnit, Person, RatingSchemeItem, ReportGridCell, ReportGridDefinition,
    ReportGridId,
};
use eam_store::{
    InMemoryAssessmentStore, InMemoryChangeLog, InMemoryDirectory, InMemoryPhysicalSpecStore,
    InMemoryRatingSchemeStore, InMemoryReportGridStore,
};
use std::sync::Arc;

pub const GRID_ID: ReportGridId = ReportGridId(7);
pub const ROOT_OU: i64 = 1;
pub const MARKETS_OU: i64 = 2;
pub const MANAGER: i64 = 42;
pub const REPORTEE: i64 = 43;
pub const APP_GROUP: i64 = 900;

pub const INVEST: i64 = 1;
pub const DIVEST: i64 = 2;

/// Column carrying the grid's ratings
#[must_use]
pub fn capability_column() -> EntityReference {
    EntityReference::new(EntityKind::Measurable, 500)
}

/// Every in-memory store, seeded with the sample estate
///
/// ```text
/// OU 1 Group            app 10 Ledger   (owner E42)
/// └── OU 2 Markets      app 20 Pricer   (owner E43, reports to E42)
///                       app 30 Risk     (no owner)
/// app group 900 = {10, 30}
/// grid 7: column MEASURABLE/500; 10 -> Invest, 20 -> Divest, 30 -> Invest
/// ```
#[derive(Debug, Clone)]
pub struct SampleEstate {
    pub directory: Arc<InMemoryDirectory>,
    pub grids: Arc<InMemoryReportGridStore>,
    pub ratings: Arc<InMemoryRatingSchemeStore>,
    pub assessments: Arc<InMemoryAssessmentStore>,
    pub physical_specs: Arc<InMemoryPhysicalSpecStore>,
    pub change_log: Arc<InMemoryChangeLog>,
}

impl SampleEstate {
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        directory.insert_org_unit(OrgUnit::new(ROOT_OU, "Group", None));
        directory.insert_org_unit(OrgUnit::new(MARKETS_OU, "Markets", Some(ROOT_OU)));
        directory.insert_application(Application::new(10, "Ledger", ROOT_OU).with_asset_code("LDG"));
        directory.insert_application(Application::new(20, "Pricer", MARKETS_OU));
        directory.insert_application(Application::new(30, "Risk", MARKETS_OU));
        directory.insert_person(Person::new(MANAGER, "E42", "Morgan Manager", None));
        directory.insert_person(Person::new(REPORTEE, "E43", "Riley Reportee", Some("E42")));
        directory.insert_involvement(involvement("E42", 10));
        directory.insert_involvement(involvement("E43", 20));
        for app in [10, 30] {
            directory.insert_app_group_entry(AppGroupEntry {
                group_id: APP_GROUP,
                application_id: ApplicationId(app),
            });
        }

        let column = capability_column();
        let grids = Arc::new(InMemoryReportGridStore::new());
        grids.insert_definition(ReportGridDefinition::new(GRID_ID.0, "Capabilities", "admin").with_column(column));
        grids.insert_cells(
            GRID_ID,
            [
                ReportGridCell::new(10, column, INVEST),
                ReportGridCell::new(20, column, DIVEST),
                ReportGridCell::new(30, column, INVEST),
            ],
        );

        let ratings = Arc::new(InMemoryRatingSchemeStore::new());
        ratings.insert_item(RatingSchemeItem::new(INVEST, 1, "Invest", "I", "#00aa00").with_position(1));
        ratings.insert_item(RatingSchemeItem::new(DIVEST, 1, "Divest", "D", "#aa0000").with_position(2));

        let assessments = Arc::new(InMemoryAssessmentStore::new());
        assessments.insert_definition(AssessmentDefinition::new(1, "Criticality", EntityKind::Application, 1));

        Self {
            directory,
            grids,
            ratings,
            assessments,
            physical_specs: Arc::new(InMemoryPhysicalSpecStore::new()),
            change_log: Arc::new(InMemoryChangeLog::new()),
        }
    }
}

impl Default for SampleEstate {
    fn default() -> Self {
        Self::new()
    }
}

fn involvement(employee_id: &str, application_id: i64) -> Involvement {
    Involvement {
        employee_id: employee_id.to_string(),
        application_id: ApplicationId(application_id),
        kind: "OWNER".to_string(),
    }
}
