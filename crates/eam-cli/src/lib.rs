//! EAM CLI - query report grids and assessments over a JSON dataset

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod dataset;
pub mod logging;

pub use commands::{parse_selection, run, Command};
pub use dataset::{Dataset, Estate, GridRecord};
pub use logging::init_tracing;
