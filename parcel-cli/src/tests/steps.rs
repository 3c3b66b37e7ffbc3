//! Behaviour-driven step definitions driving the report and status commands.

use super::helpers::{demo_args, output_text};
use super::*;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Scenario state: the configured inputs, captured output and the outcome of
/// the last command.
#[derive(Debug, Default)]
struct CommandWorld {
    args: RefCell<DayArgs>,
    output: RefCell<String>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn record(&self, buffer: Vec<u8>, result: Result<(), CliError>) {
        self.output.replace(output_text(buffer));
        self.result.replace(Some(result));
    }

    fn take_error(&self) -> CliError {
        match self.result.take() {
            Some(Err(err)) => err,
            Some(Ok(())) => panic!("expected the command to fail"),
            None => panic!("no command was run"),
        }
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::default()
}

#[given("the demo delivery day inputs")]
fn demo_inputs(world: &CommandWorld) {
    world.args.replace(demo_args());
}

#[given("no package manifest is configured")]
fn no_manifest(world: &CommandWorld) {
    world.args.borrow_mut().packages = None;
}

#[when("the report command runs")]
fn report_runs(world: &CommandWorld) {
    let args = ReportArgs {
        day: world.args.borrow().clone(),
        json: false,
    };
    let mut buffer = Vec::new();
    let result = run_report_with(args, &mut buffer);
    world.record(buffer, result);
}

#[when("the status command runs at {time} for package {id}")]
fn status_runs(world: &CommandWorld, time: String, id: String) {
    let args = StatusArgs {
        day: world.args.borrow().clone(),
        at: time.trim_matches('"').to_owned(),
        package: Some(id.trim_matches('"').to_owned()),
    };
    let mut buffer = Vec::new();
    let result = run_status_with(args, &mut buffer);
    world.record(buffer, result);
}

#[then("the command succeeds")]
fn command_succeeds(world: &CommandWorld) {
    match world.result.borrow().as_ref() {
        Some(Ok(())) => {}
        Some(Err(err)) => panic!("command failed: {err}"),
        None => panic!("no command was run"),
    }
}

#[then("the output lists {count} packages")]
fn output_lists_packages(world: &CommandWorld, count: usize) {
    let output = world.output.borrow();
    let rows = output
        .lines()
        .filter(|line| {
            line.split_whitespace()
                .next()
                .is_some_and(|token| token.parse::<u32>().is_ok())
        })
        .count();
    assert_eq!(rows, count);
}

#[then("the output includes the total mileage")]
fn output_includes_mileage(world: &CommandWorld) {
    assert!(world.output.borrow().contains("Total mileage: "));
}

#[then("the output ends with {text}")]
fn output_ends_with(world: &CommandWorld, text: String) {
    let output = world.output.borrow();
    assert!(
        output.trim_end().ends_with(text.trim_matches('"')),
        "unexpected output {output:?}"
    );
}

#[then("the command fails because the hub is closed")]
fn fails_before_opening(world: &CommandWorld) {
    match world.take_error() {
        CliError::Query(QueryError::BeforeOpening { .. }) => {}
        other => panic!("expected BeforeOpening, found {other:?}"),
    }
}

#[then("the command fails naming the packages flag")]
fn fails_naming_packages(world: &CommandWorld) {
    match world.take_error() {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PACKAGES);
            assert_eq!(env, ENV_PACKAGES);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/report_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(reporting_demo_day, "Reporting the demo day");
register_command_scenario!(querying_one_package, "Querying one package mid-morning");
register_command_scenario!(querying_before_opening, "Querying before the hub opens");
register_command_scenario!(omitting_manifest, "Omitting the package manifest");
