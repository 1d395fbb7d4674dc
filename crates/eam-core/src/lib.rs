//! EAM Core - services over the EAM stores
//!
//! - Assembles report grids for a selection of applications
//! - Creates and deletes physical spec definitions
//! - Reads and writes assessment ratings, enforcing write permissions
//! - Records every mutation in the change log
//!
//! # Example
//!
//! ```rust,ignore
//! use eam_core::{EamConfig, ReportGridService};
//! use eam_model::{EntityKind, EntityReference, HierarchyQueryScope, ReportGridId, SelectionOptions};
//!
//! # async fn example(directory: std::sync::Arc<eam_store::InMemoryDirectory>,
//! #                  grids: std::sync::Arc<eam_store::InMemoryReportGridStore>,
//! #                  ratings: std::sync::Arc<eam_store::InMemoryRatingSchemeStore>)
//! #     -> Result<(), Box<dyn std::error::Error>> {
//! let service = ReportGridService::builder()
//!     .grid_store(grids)
//!     .application_store(directory.clone())
//!     .rating_store(ratings)
//!     .selector(directory)
//!     .config(EamConfig::new().grid)
//!     .build()?;
//!
//! let options = SelectionOptions::new(
//!     EntityReference::new(EntityKind::OrgUnit, 1),
//!     HierarchyQueryScope::Children,
//! );
//! let grid = service.get_grid(ReportGridId(7), &options).await?;
//! println!("{} applications", grid.instance.applications().len());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod assessment_rating;
pub mod config;
pub mod error;
pub mod physical_spec_definition;
pub mod report_grid;

pub use assessment_rating::AssessmentRatingService;
pub use config::{EamConfig, GridConfig, LoggingConfig};
pub use error::{ServiceError, ServiceResult};
pub use physical_spec_definition::PhysicalSpecDefinitionService;
pub use report_grid::{effective_selection_options, ReportGridService, ReportGridServiceBuilder};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with EAM services
    pub use crate::{
        effective_selection_options, AssessmentRatingService, EamConfig, PhysicalSpecDefinitionService,
        ReportGridService, ServiceError, ServiceResult,
    };
    pub use eam_model::{
        EntityKind, EntityReference, HierarchyQueryScope, ReportGrid, ReportGridId, SelectionOptions,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use eam_model::{Application, OrgUnit, ReportGridDefinition};
    use eam_store::{InMemoryDirectory, InMemoryRatingSchemeStore, InMemoryReportGridStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn grid_with_no_cells_has_applications_only() {
        let directory = Arc::new(InMemoryDirectory::new());
        directory.insert_org_unit(OrgUnit::new(1, "Group", None));
        directory.insert_application(Application::new(10, "Ledger", 1));

        let grids = Arc::new(InMemoryReportGridStore::new());
        grids.insert_definition(ReportGridDefinition::new(3, "Empty", "admin"));

        let service = ReportGridService::builder()
            .grid_store(grids)
            .application_store(directory.clone())
            .rating_store(Arc::new(InMemoryRatingSchemeStore::new()))
            .selector(directory)
            .config(EamConfig::new().grid)
            .build()
            .unwrap();

        let options = SelectionOptions::exact(EntityReference::new(EntityKind::OrgUnit, 1));
        let grid = service.get_grid(ReportGridId(3), &options).await.unwrap();

        assert_eq!(grid.instance.applications().len(), 1);
        assert!(grid.instance.cell_data().is_empty());
        assert!(grid.instance.rating_scheme_items().is_empty());
    }
}
