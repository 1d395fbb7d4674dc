//! EAM Store - persistence seams for EAM services
//!
//! Defines the read/write traits services depend on:
//! - Selector resolution (selection options → application ids)
//! - Report grid definitions and cell data
//! - Applications and rating scheme items
//! - Change log, physical spec definitions, assessments
//!
//! and in-memory implementations of each in [`memory`].

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod api;
pub mod error;
pub mod memory;

pub use api::{
    ApplicationStore, AssessmentDefinitionStore, AssessmentRatingStore, ChangeLogStore,
    PhysicalSpecDefinitionFieldStore, PhysicalSpecDefinitionSampleFileStore,
    PhysicalSpecDefinitionStore, RatingSchemeStore, ReportGridStore, SelectorResolver,
};
pub use error::{StoreError, StoreResult};
pub use memory::{
    InMemoryAssessmentStore, InMemoryChangeLog, InMemoryDirectory, InMemoryPhysicalSpecStore,
    InMemoryRatingSchemeStore, InMemoryReportGridStore,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
