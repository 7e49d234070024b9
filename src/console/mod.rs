//! Line-oriented front end: one command per line on stdin, JSON on stdout.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::{navigation::Page, store::commands, AppContext};

#[derive(Debug, Parser)]
#[command(name = "wtrash", no_binary_name = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ConsoleCommand {
    /// Print the current page
    Show,
    /// Jump to a page, e.g. `go task-ai`
    Go { page: Page },
    /// Return to the previous page
    Back,
    /// Start over from the home page with no devices
    Reset,
    /// Type into the device name field
    Name { words: Vec<String> },
    /// Pair a device, using the typed name when none is given
    Add { words: Vec<String> },
    /// Open the task menu for a paired device
    Select { id: String },
    /// Open the pre-compost task
    Compost,
    /// Start the composting cycle
    Start,
    /// Demo button on the inorganic task
    Fill,
    /// Message someone to empty a full bin
    Alert,
    /// Open the date picker on the AI task
    Calendar,
    /// Close the date picker
    Close,
    /// Pick a date, e.g. `date 2025-09-13`
    Date { date: NaiveDate },
    /// Request location access
    Locate,
    /// Re-centre the map on the current position
    Recenter,
    /// Show who receives the full-bin message, or change it
    Contact { number: Option<String> },
    /// Leave the console
    Quit,
}

pub fn parse_line(line: &str) -> Result<ConsoleCommand, clap::Error> {
    ConsoleLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
}

fn joined(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

pub async fn execute(context: &AppContext, command: ConsoleCommand) -> Result<Value, String> {
    match command {
        ConsoleCommand::Show => to_value(commands::get_snapshot(context).await?.view),
        ConsoleCommand::Go { page } => to_value(commands::navigate(context, page).await?.view),
        ConsoleCommand::Back => to_value(commands::go_back(context).await?.view),
        ConsoleCommand::Reset => to_value(commands::reset_app(context).await?.view),
        ConsoleCommand::Name { words } => {
            let name = joined(&words).unwrap_or_default();
            to_value(commands::set_device_name(context, name).await?.view)
        }
        ConsoleCommand::Add { words } => {
            let device = commands::add_device(context, joined(&words)).await?;
            Ok(json!({ "device": device }))
        }
        ConsoleCommand::Select { id } => to_value(commands::select_device(context, id).await?.view),
        ConsoleCommand::Compost => to_value(commands::open_composting(context).await?.view),
        ConsoleCommand::Start => to_value(commands::start_composting(context).await?.view),
        ConsoleCommand::Fill => to_value(commands::toggle_fill_demo(context).await?.view),
        ConsoleCommand::Alert => {
            let url = commands::send_full_alert(context).await?;
            Ok(json!({ "url": url }))
        }
        ConsoleCommand::Calendar => to_value(commands::open_calendar(context).await?.view),
        ConsoleCommand::Close => to_value(commands::close_calendar(context).await?.view),
        ConsoleCommand::Date { date } => to_value(commands::select_date(context, date).await?.view),
        ConsoleCommand::Locate => {
            let granted = commands::request_permissions(context).await?;
            Ok(json!({ "granted": granted }))
        }
        ConsoleCommand::Recenter => {
            let updated = commands::refresh_location(context).await?;
            Ok(json!({ "updated": updated }))
        }
        ConsoleCommand::Contact { number: Some(number) } => {
            to_value(commands::set_alert_contact(context, number).await?)
        }
        ConsoleCommand::Contact { number: None } => {
            to_value(commands::get_alert_settings(context).await?)
        }
        ConsoleCommand::Quit => Ok(Value::Null),
    }
}

/// Reads commands until `quit` or end of input.
pub async fn run_console(context: &AppContext) -> anyhow::Result<()> {
    let mut events = context.store.subscribe();
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if let Ok(line) = serde_json::to_string(&event) {
                eprintln!("{line}");
            }
        }
    });

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        if command == ConsoleCommand::Quit {
            break;
        }

        match execute(context, command).await {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(err) => println!("{}", json!({ "error": err })),
        }
    }

    printer.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pages_and_dates() {
        assert_eq!(
            parse_line("go task-pra-kompos").unwrap(),
            ConsoleCommand::Go {
                page: Page::TaskPraKompos
            }
        );
        assert_eq!(
            parse_line("date 2025-09-13").unwrap(),
            ConsoleCommand::Date {
                date: NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()
            }
        );
        assert!(parse_line("go nowhere").is_err());
    }

    #[test]
    fn device_names_keep_their_words() {
        match parse_line("add Tempat Sampah Dapur").unwrap() {
            ConsoleCommand::Add { words } => {
                assert_eq!(joined(&words).as_deref(), Some("Tempat Sampah Dapur"))
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse_line("add").unwrap(), ConsoleCommand::Add { words: vec![] });
    }

    #[test]
    fn contact_number_is_optional() {
        assert_eq!(
            parse_line("contact").unwrap(),
            ConsoleCommand::Contact { number: None }
        );
        assert_eq!(
            parse_line("contact 628777").unwrap(),
            ConsoleCommand::Contact {
                number: Some("628777".into())
            }
        );
    }
}
