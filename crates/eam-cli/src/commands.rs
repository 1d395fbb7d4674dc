//! CLI commands and their execution

use crate::dataset::Estate;
use anyhow::{Context, Result};
use eam_core::EamConfig;
use eam_model::{EntityKind, EntityReference, HierarchyQueryScope, ReportGridId, SelectionOptions};
use serde_json::Value;

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every grid definition
    GridList,
    /// Assemble one grid for a selection
    GridShow {
        id: ReportGridId,
        selection: SelectionOptions,
    },
    /// Assessment ratings of the applications a selection resolves to
    Ratings { selection: SelectionOptions },
}

/// Build selection options from raw CLI values
pub fn parse_selection(kind: &str, entity_id: i64, scope: Option<&str>) -> Result<SelectionOptions> {
    let kind: EntityKind = kind.parse().with_context(|| format!("bad --kind {kind:?}"))?;
    let scope = match scope {
        Some(raw) => raw
            .parse::<HierarchyQueryScope>()
            .with_context(|| format!("bad --scope {raw:?}"))?,
        None => HierarchyQueryScope::default(),
    };
    Ok(SelectionOptions::new(EntityReference::new(kind, entity_id), scope))
}

/// Run `command` against `estate`, returning the JSON to print
pub async fn run(command: &Command, estate: &Estate, config: &EamConfig) -> Result<Value> {
    match command {
        Command::GridList => {
            let definitions = estate.grid_service(config)?.list_all().await?;
            Ok(serde_json::to_value(definitions)?)
        }
        Command::GridShow { id, selection } => {
            let grid = estate
                .grid_service(config)?
                .get_grid(*id, selection)
                .await
                .with_context(|| format!("cannot assemble grid {id} for {selection}"))?;
            Ok(serde_json::to_value(grid)?)
        }
        Command::Ratings { selection } => {
            let ratings = estate
                .assessment_service(config)
                .find_by_target_kind_for_related_selector(EntityKind::Application, selection)
                .await
                .with_context(|| format!("cannot find ratings for {selection}"))?;
            Ok(serde_json::to_value(ratings)?)
        }
    }
}
