//! On-disk log format.
//!
//! ```text
//! STARTLOG<token>\n
//! <timestamp>#<role-tag><name>#<event-tag>#<room>\n
//! ...
//! ENDLOG
//! ```
//!
//! Numbers are decimal. The room subfield is empty for whole-building
//! events, so every record line has exactly four `#`-separated subfields.

use accesslog_types::{
    Error, Event, LogFile, Person, Record, Result, Role, RoomId, Timestamp, validate_name,
};

use crate::args::parse_decimal;

pub const MAGIC: &str = "STARTLOG";
pub const END_MARKER: &str = "ENDLOG";

const SUBFIELD_SEPARATOR: char = '#';
const RECORD_TERMINATOR: char = '\n';

/// Serialize a log file into its framed text form
pub fn encode(log: &LogFile) -> Vec<u8> {
    let mut out = String::with_capacity(
        MAGIC.len() + log.token().len() + 1 + log.len() * 32 + END_MARKER.len(),
    );

    out.push_str(MAGIC);
    out.push_str(log.token());
    out.push(RECORD_TERMINATOR);

    for record in log.records() {
        encode_record(&mut out, record);
    }

    out.push_str(END_MARKER);
    out.into_bytes()
}

fn encode_record(out: &mut String, record: &Record) {
    out.push_str(&record.timestamp.to_string());
    out.push(SUBFIELD_SEPARATOR);
    out.push(record.person.role.tag());
    out.push_str(&record.person.name);
    out.push(SUBFIELD_SEPARATOR);
    out.push(record.event.tag());
    out.push(SUBFIELD_SEPARATOR);
    if let Some(room) = record.room {
        out.push_str(&room.to_string());
    }
    out.push(RECORD_TERMINATOR);
}

/// Parse a log file and check that it is bound to `expected_token`.
///
/// The token is compared before any record is looked at, so a caller with
/// the wrong token learns nothing about the records beyond the header.
pub fn decode(bytes: &[u8], expected_token: &str) -> Result<LogFile> {
    let body = bytes.strip_prefix(MAGIC.as_bytes()).ok_or(Error::BadMagic)?;

    let header_len = body
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(Error::UnterminatedLog)?;
    let (stored_token, rest) = body.split_at(header_len);

    if stored_token != expected_token.as_bytes() {
        return Err(Error::TokenMismatch);
    }

    // Line 1 is the header; records start on line 2.
    let rest = &rest[1..];
    let text = std::str::from_utf8(rest).map_err(|err| {
        let line = 2 + rest[..err.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        Error::malformed_record(line, "invalid UTF-8")
    })?;

    let records = decode_records(text)?;
    Ok(LogFile::with_records(expected_token, records))
}

fn decode_records(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut rest = text;
    let mut line_number = 2;

    loop {
        if rest == END_MARKER || rest.strip_suffix(RECORD_TERMINATOR) == Some(END_MARKER) {
            return Ok(records);
        }

        let Some(end) = rest.find(RECORD_TERMINATOR) else {
            if rest.starts_with(END_MARKER) {
                return Err(Error::malformed_record(
                    line_number,
                    "trailing data after end marker",
                ));
            }
            return Err(Error::UnterminatedLog);
        };

        let line = &rest[..end];
        if line == END_MARKER {
            return Err(Error::malformed_record(
                line_number + 1,
                "trailing data after end marker",
            ));
        }

        records.push(decode_record(line, line_number)?);
        rest = &rest[end + 1..];
        line_number += 1;
    }
}

fn single_char(field: &str) -> Option<char> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn decode_record(line: &str, line_number: usize) -> Result<Record> {
    let malformed = |reason: String| Error::malformed_record(line_number, reason);

    let subfields: Vec<&str> = line.split(SUBFIELD_SEPARATOR).collect();
    let [timestamp, person, event, room] = subfields.as_slice() else {
        return Err(malformed(format!(
            "expected 4 subfields, found {}",
            subfields.len()
        )));
    };

    let timestamp = parse_decimal(timestamp)
        .and_then(Timestamp::new)
        .ok_or_else(|| malformed(format!("invalid timestamp {:?}", timestamp)))?;

    let mut person_chars = person.chars();
    let role = person_chars
        .next()
        .and_then(Role::from_tag)
        .ok_or_else(|| malformed(format!("invalid role tag in {:?}", person)))?;
    let name = person_chars.as_str();
    validate_name(name).map_err(|err| malformed(err.to_string()))?;

    let event = single_char(event)
        .and_then(Event::from_tag)
        .ok_or_else(|| malformed(format!("invalid event tag {:?}", event)))?;

    let room = if room.is_empty() {
        None
    } else {
        let id = parse_decimal(room)
            .and_then(RoomId::new)
            .ok_or_else(|| malformed(format!("invalid room id {:?}", room)))?;
        Some(id)
    };

    Ok(Record {
        timestamp,
        room,
        person: Person::new(name, role),
        event,
    })
}
