//! EAM Model - value types shared by every EAM crate
//!
//! Everything here is an immutable record:
//! - Entity references and kinds
//! - Selection options (entity reference + hierarchy scope)
//! - Report grid definitions, cells, instances
//! - Applications, rating scheme items
//! - Change log, physical spec definitions, assessment ratings
//!
//! # Example
//!
//! ```rust
//! use eam_model::{EntityKind, EntityReference, HierarchyQueryScope, SelectionOptions};
//!
//! let options = SelectionOptions::new(
//!     EntityReference::new(EntityKind::Person, 42),
//!     HierarchyQueryScope::Children,
//! );
//! let narrowed = options.with_scope(HierarchyQueryScope::Exact);
//!
//! assert_eq!(options.scope, HierarchyQueryScope::Children);
//! assert_eq!(narrowed.scope, HierarchyQueryScope::Exact);
//! ```

#![warn(unreachable_pub)]

pub mod application;
pub mod assessment;
pub mod change_log;
pub mod cost;
pub mod entity;
pub mod error;
pub mod organisation;
pub mod physical_spec;
pub mod rating;
pub mod report_grid;
pub mod selection;

pub use application::{Application, ApplicationId, ApplicationKind, LifecyclePhase};
pub use assessment::{
    AssessmentDefinition, AssessmentRating, RemoveAssessmentRatingCommand,
    SaveAssessmentRatingCommand,
};
pub use change_log::{ChangeLog, LastUpdate, Operation};
pub use cost::CostWidgetDatum;
pub use entity::{EntityKind, EntityReference};
pub use error::ModelError;
pub use organisation::{AppGroupEntry, Involvement, OrgUnit, Person};
pub use physical_spec::{
    PhysicalSpecDefinition, PhysicalSpecDefinitionChangeCommand, PhysicalSpecDefinitionField,
    PhysicalSpecDefinitionSampleFile, PhysicalSpecDefinitionType, ReleaseLifecycleStatus,
};
pub use rating::{RatingId, RatingSchemeItem};
pub use report_grid::{
    ReportGrid, ReportGridCell, ReportGridColumnDefinition, ReportGridDefinition, ReportGridId,
    ReportGridInstance,
};
pub use selection::{HierarchyQueryScope, SelectionOptions};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
