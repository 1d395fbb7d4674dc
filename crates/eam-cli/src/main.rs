use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command as ClapCommand};
use eam_cli::{init_tracing, parse_selection, run, Command, Dataset};
use eam_core::EamConfig;
use eam_model::ReportGridId;
use std::path::PathBuf;

fn selection_args(command: ClapCommand) -> ClapCommand {
    command
        .arg(
            Arg::new("kind")
                .long("kind")
                .required(true)
                .help("Kind of the anchoring entity (APPLICATION, APP_GROUP, ORG_UNIT, PERSON)"),
        )
        .arg(
            Arg::new("entity-id")
                .long("entity-id")
                .required(true)
                .value_parser(value_parser!(i64))
                .help("Id of the anchoring entity"),
        )
        .arg(
            Arg::new("scope")
                .long("scope")
                .help("Hierarchy scope: EXACT, PARENTS or CHILDREN (default CHILDREN)"),
        )
}

fn cli() -> ClapCommand {
    ClapCommand::new("eam")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Enterprise architecture report grids over a JSON dataset")
        .subcommand_required(true)
        .arg(
            Arg::new("data")
                .long("data")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Dataset JSON file"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .help("Configuration TOML file"),
        )
        .subcommand(
            ClapCommand::new("grid")
                .about("Report grids")
                .subcommand_required(true)
                .subcommand(ClapCommand::new("list").about("List grid definitions"))
                .subcommand(selection_args(
                    ClapCommand::new("show").about("Assemble a grid for a selection").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64))
                            .help("Grid id"),
                    ),
                )),
        )
        .subcommand(selection_args(
            ClapCommand::new("ratings").about("Assessment ratings of the selected applications"),
        ))
}

fn selection_from(args: &ArgMatches) -> Result<eam_model::SelectionOptions> {
    let kind = args.get_one::<String>("kind").context("--kind is required")?;
    let entity_id = *args.get_one::<i64>("entity-id").context("--entity-id is required")?;
    let scope = args.get_one::<String>("scope").map(String::as_str);
    parse_selection(kind, entity_id, scope)
}

fn command_from(matches: &ArgMatches) -> Result<Command> {
    match matches.subcommand() {
        Some(("grid", grid)) => match grid.subcommand() {
            Some(("list", _)) => Ok(Command::GridList),
            Some(("show", args)) => {
                let id = *args.get_one::<i64>("id").context("--id is required")?;
                Ok(Command::GridShow {
                    id: ReportGridId(id),
                    selection: selection_from(args)?,
                })
            }
            _ => anyhow::bail!("unknown grid command"),
        },
        Some(("ratings", args)) => Ok(Command::Ratings {
            selection: selection_from(args)?,
        }),
        _ => anyhow::bail!("unknown command"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => EamConfig::load(path)?,
        None => EamConfig::default(),
    };
    init_tracing(&config.logging)?;

    let command = command_from(&matches)?;
    let data = matches.get_one::<PathBuf>("data").context("--data is required")?;
    let estate = Dataset::load(data)?.into_estate().await?;

    let output = run(&command, &estate, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
