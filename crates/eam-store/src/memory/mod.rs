//! In-memory store implementations
//!
//! Thread-safe, process-local stores backed by `DashMap` and `parking_lot`
//! locks. Used by the CLI and by tests; a database-backed store implements the
//! same traits.

mod assessment;
mod change_log;
mod directory;
mod physical_spec;
mod report_grid;

pub use assessment::InMemoryAssessmentStore;
pub use change_log::InMemoryChangeLog;
pub use directory::InMemoryDirectory;
pub use physical_spec::InMemoryPhysicalSpecStore;
pub use report_grid::{InMemoryRatingSchemeStore, InMemoryReportGridStore};
