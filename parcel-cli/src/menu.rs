//! The interactive four-option menu.
//!
//! Invalid times, package ids and menu choices are reported and asked for
//! again. End of input ends the session as if the user chose to exit.

use std::io::{BufRead, Write};

use chrono::NaiveTime;
use parcel_core::PackageId;

use crate::day::SimulatedDay;
use crate::query::{parse_package_id, parse_query_time};
use crate::{CliError, QueryError, view};

const RULE: &str = "************************************************************";
const FAREWELL: &str = "Exiting Application. Have a nice day!";

struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl Console<'_> {
    fn say(&mut self, text: &str) -> Result<(), CliError> {
        writeln!(self.output, "{text}").map_err(CliError::WriteOutput)
    }

    /// Print `question` and read one line; `None` at end of input.
    fn ask(&mut self, question: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{question}").map_err(CliError::WriteOutput)?;
        self.output.flush().map_err(CliError::WriteOutput)?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(CliError::ReadInput)?;
        Ok((read > 0).then(|| line.trim().to_owned()))
    }

    /// Ask until `parse` accepts the answer.
    fn ask_until<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, QueryError>,
    ) -> Result<Option<T>, CliError> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => {
                    tracing::debug!(%err, "rejected menu input");
                    self.say(&format!("{err}, please try again."))?;
                }
            }
        }
    }

    fn ask_time(&mut self) -> Result<Option<NaiveTime>, CliError> {
        self.ask_until("Enter a time in HHMM format (e.g. 0930): ", parse_query_time)
    }

    fn ask_package(&mut self, max: usize) -> Result<Option<PackageId>, CliError> {
        let question = format!("Enter a package id (1 to {max}): ");
        self.ask_until(&question, |text| parse_package_id(text, max))
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Serve menu choices from `input` until the user exits or input ends.
pub(crate) fn run_menu(
    day: &SimulatedDay,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), CliError> {
    let mut console = Console { input, output };
    console.say("Welcome to the parcel delivery route planner")?;
    loop {
        console.say("")?;
        console.say(RULE)?;
        console.say("Please select an option:")?;
        console.say(" [1] Show all packages and total mileage at end of day")?;
        console.say(" [2] Get a package status at a time")?;
        console.say(" [3] Show all package statuses at a time")?;
        console.say(" [4] Exit program")?;
        console.say(RULE)?;
        let Some(choice) = console.ask("Choose an option [1], [2], [3], or [4]: ")? else {
            break;
        };
        if let Flow::Exit = handle_choice(&mut console, day, &choice)? {
            break;
        }
    }
    console.say(FAREWELL)
}

fn handle_choice(
    console: &mut Console<'_>,
    day: &SimulatedDay,
    choice: &str,
) -> Result<Flow, CliError> {
    match choice {
        "1" => {
            view::write_report(console.output, day).map_err(CliError::WriteOutput)?;
        }
        "2" => {
            let Some(at) = console.ask_time()? else {
                return Ok(Flow::Exit);
            };
            let Some(id) = console.ask_package(day.directory.len())? else {
                return Ok(Flow::Exit);
            };
            let Some(record) = day.directory.get(id) else {
                console.say(&QueryError::UnknownPackage { id }.to_string())?;
                return Ok(Flow::Continue);
            };
            view::write_status(console.output, record, at).map_err(CliError::WriteOutput)?;
        }
        "3" => {
            let Some(at) = console.ask_time()? else {
                return Ok(Flow::Exit);
            };
            view::write_all_statuses(console.output, day, at).map_err(CliError::WriteOutput)?;
        }
        "4" => return Ok(Flow::Exit),
        _ => console.say("Wrong option, please try again!")?,
    }
    Ok(Flow::Continue)
}
