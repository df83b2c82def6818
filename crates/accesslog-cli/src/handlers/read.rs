use crate::args::ReadArgs;
use crate::types::OutputFormat;
use accesslog_store::{BuildingState, LogStore, StateSummary, room_history};
use accesslog_types::{LogFile, Person, RoomId, validate_name, validate_token};
use anyhow::{Result, bail};
use serde::Serialize;

#[derive(Serialize)]
struct RoomHistoryView<'a> {
    person: &'a Person,
    rooms: Vec<RoomId>,
}

pub fn handle(args: &ReadArgs) -> Result<()> {
    validate_token(&args.token)?;

    let store = LogStore::new(&args.log);
    let Some(log) = store.load(&args.token)? else {
        bail!("log file {} does not exist", args.log.display());
    };
    tracing::debug!(records = log.len(), "loaded log for query");

    if args.state {
        let summary = BuildingState::replay(&log).summary();
        return match args.format {
            OutputFormat::Plain => {
                print!("{}", render_state(&summary));
                Ok(())
            }
            OutputFormat::Json => print_json(&summary),
        };
    }

    if args.rooms {
        let person = requested_person(args)?;
        return print_history(&log, &person, args.format);
    }

    bail!("one of -S or -R is required");
}

fn requested_person(args: &ReadArgs) -> Result<Person> {
    let person = match (&args.employee, &args.guest) {
        (Some(name), None) => Person::employee(name.as_str()),
        (None, Some(name)) => Person::guest(name.as_str()),
        _ => bail!("-R needs exactly one of -E or -G"),
    };
    validate_name(&person.name)?;
    Ok(person)
}

fn print_history(log: &LogFile, person: &Person, format: OutputFormat) -> Result<()> {
    let rooms = room_history(log, person);
    match format {
        OutputFormat::Plain => {
            println!("{}", join(rooms.iter().map(|room| room.to_string())));
            Ok(())
        }
        OutputFormat::Json => print_json(&RoomHistoryView { person, rooms }),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn join<I: IntoIterator<Item = String>>(items: I) -> String {
    items.into_iter().collect::<Vec<_>>().join(",")
}

/// Employees line, guests line, then one `<room>: <names>` line per occupied room
fn render_state(summary: &StateSummary) -> String {
    let mut out = String::new();
    out.push_str(&summary.employees.join(","));
    out.push('\n');
    out.push_str(&summary.guests.join(","));
    out.push('\n');
    for entry in &summary.rooms {
        out.push_str(&format!("{}: {}\n", entry.room, entry.occupants.join(",")));
    }
    out
}
