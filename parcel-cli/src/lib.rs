//! Command-line interface for the parcel delivery engine.
//!
//! Every subcommand loads the same delivery day (distance table, package
//! manifest and optional schedule), runs the fleet to completion and then
//! answers questions about the result. Input paths can come from CLI flags,
//! configuration files, or environment variables.
#![forbid(unsafe_code)]

use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};

mod day;
mod error;
mod menu;
mod query;
mod view;

pub use error::{CliError, QueryError};

use day::{DayArgs, DayConfig, SimulatedDay};
use query::{parse_package_id, parse_query_time};

const ARG_DISTANCES: &str = "distances";
const ARG_PACKAGES: &str = "packages";
const ARG_SCHEDULE: &str = "schedule";
const ENV_DISTANCES: &str = "PARCEL_CMDS_DAY_DISTANCES";
const ENV_PACKAGES: &str = "PARCEL_CMDS_DAY_PACKAGES";

/// Run the parcel CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments do not parse, the configured inputs
/// cannot be loaded or simulated, a one-shot query is invalid, or output
/// cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = io::stdout().lock();
    match cli.command {
        Command::Report(args) => run_report_with(args, &mut stdout),
        Command::Status(args) => run_status_with(args, &mut stdout),
        Command::Menu(args) => {
            let mut stdin = io::stdin().lock();
            run_menu_with(args, &mut stdin, &mut stdout)
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "parcel",
    about = "Simulate a day of local parcel deliveries and query the outcome",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every package and the total mileage at the end of the day.
    Report(ReportArgs),
    /// Show package status at a time of day.
    Status(StatusArgs),
    /// Answer repeated questions from an interactive menu.
    Menu(MenuArgs),
}

#[derive(Debug, Clone, Args)]
struct ReportArgs {
    #[command(flatten)]
    day: DayArgs,
    /// Emit a JSON summary instead of the text table.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Args)]
struct StatusArgs {
    #[command(flatten)]
    day: DayArgs,
    /// Time of day as four digits, e.g. 0930.
    #[arg(long, value_name = "HHMM")]
    at: String,
    /// Report a single package instead of all of them.
    #[arg(long, value_name = "id")]
    package: Option<String>,
}

#[derive(Debug, Clone, Args)]
struct MenuArgs {
    #[command(flatten)]
    day: DayArgs,
}

fn simulate(args: DayArgs) -> Result<SimulatedDay, CliError> {
    let config = resolve_day_config(args)?;
    SimulatedDay::run(&config)
}

fn resolve_day_config(args: DayArgs) -> Result<DayConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn run_report_with(args: ReportArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let day = simulate(args.day)?;
    if args.json {
        view::write_json_report(writer, &day)
    } else {
        view::write_report(writer, &day).map_err(CliError::WriteOutput)
    }
}

fn run_status_with(args: StatusArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let at = parse_query_time(&args.at)?;
    let day = simulate(args.day)?;
    match args.package {
        Some(raw) => {
            let id = parse_package_id(&raw, day.directory.len())?;
            let record = day
                .directory
                .get(id)
                .ok_or(QueryError::UnknownPackage { id })?;
            view::write_status(writer, record, at)
        }
        None => view::write_all_statuses(writer, &day, at),
    }
    .map_err(CliError::WriteOutput)
}

fn run_menu_with(
    args: MenuArgs,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let day = simulate(args.day)?;
    menu::run_menu(&day, input, output)
}

#[cfg(test)]
mod tests;
