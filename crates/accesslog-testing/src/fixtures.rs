//! Fixtures for sample data generation and placement.
//!
//! Logs are built in memory and written with the real encoder, so fixtures
//! always match the current on-disk format.

use accesslog_core::encode;
use accesslog_types::{Event, LogFile, Person, Record, Role, RoomId, Timestamp};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Build one record from plain values.
pub fn record(ts: u32, person: Person, event: Event, room: Option<u32>) -> Result<Record> {
    let timestamp = Timestamp::new(ts.into()).context("timestamp out of range")?;
    let room = match room {
        Some(id) => Some(RoomId::new(id.into()).context("room id out of range")?),
        None => None,
    };
    Ok(Record {
        timestamp,
        room,
        person,
        event,
    })
}

/// A short day at the office.
///
/// Final state: employees Alice and Carol, guest Bob; Alice and Bob in room
/// 5, Carol in the building but in no room. Dave came and went.
pub fn office_day(token: &str) -> Result<LogFile> {
    let alice = Person::employee("Alice");
    let bob = Person::guest("Bob");
    let carol = Person::employee("Carol");
    let dave = Person::employee("Dave");

    let records = vec![
        record(1, alice.clone(), Event::Arrival, None)?,
        record(2, alice.clone(), Event::Arrival, Some(3))?,
        record(3, bob.clone(), Event::Arrival, None)?,
        record(4, alice.clone(), Event::Departure, Some(3))?,
        record(5, alice, Event::Arrival, Some(5))?,
        record(6, bob, Event::Arrival, Some(5))?,
        record(7, carol, Event::Arrival, None)?,
        record(8, dave.clone(), Event::Arrival, None)?,
        record(9, dave, Event::Departure, None)?,
    ];
    Ok(LogFile::with_records(token, records))
}

/// Encode `log` and write it to `path`.
pub fn write_log(path: &Path, log: &LogFile) -> Result<()> {
    fs::write(path, encode(log))
        .with_context(|| format!("failed to write log fixture {}", path.display()))
}

/// Argument vector for one append command, as `append` and batch lines take it.
pub fn command_fields(token: &str, record: &Record, log_path: &Path) -> Vec<String> {
    let mut fields = vec![
        "-T".to_string(),
        record.timestamp.to_string(),
        "-K".to_string(),
        token.to_string(),
        match record.person.role {
            Role::Employee => "-E".to_string(),
            Role::Guest => "-G".to_string(),
        },
        record.person.name.clone(),
        match record.event {
            Event::Arrival => "-A".to_string(),
            Event::Departure => "-L".to_string(),
        },
    ];
    if let Some(room) = record.room {
        fields.push("-R".to_string());
        fields.push(room.to_string());
    }
    fields.push(log_path.display().to_string());
    fields
}

/// Batch file text with one line per record of `log`, all targeting `log_path`.
pub fn batch_text(log: &LogFile, log_path: &Path) -> String {
    log.records()
        .iter()
        .map(|record| command_fields(log.token(), record, log_path).join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}
