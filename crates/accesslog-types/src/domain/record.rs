use serde::{Deserialize, Serialize};
use std::fmt;

use super::person::Person;

/// Exclusive upper bound for timestamps and room ids (values must fit 30 bits)
pub const FIELD_LIMIT: u64 = 1 << 30;

/// Raw room value that callers may pass to mean "the whole building"
pub const WHOLE_BUILDING_RAW: u64 = u32::MAX as u64;

/// Event time, guaranteed to fit in 30 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u32);

impl Timestamp {
    pub const MAX: u32 = (FIELD_LIMIT - 1) as u32;

    /// Returns `None` when the value does not fit in 30 bits
    pub fn new(value: u64) -> Option<Self> {
        if value < FIELD_LIMIT {
            Some(Self(value as u32))
        } else {
            None
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Specific room identifier, guaranteed to fit in 30 bits
///
/// "No specific room" is modelled as `Option<RoomId>::None`, never as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(u32);

impl RoomId {
    pub const MAX: u32 = (FIELD_LIMIT - 1) as u32;

    pub fn new(value: u64) -> Option<Self> {
        if value < FIELD_LIMIT {
            Some(Self(value as u32))
        } else {
            None
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of an access event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Arrival,
    Departure,
}

impl Event {
    /// Single-character tag used in the on-disk record format
    pub fn tag(self) -> char {
        match self {
            Event::Arrival => '>',
            Event::Departure => '<',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            '>' => Some(Event::Arrival),
            '<' => Some(Event::Departure),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Arrival => write!(f, "arrival"),
            Event::Departure => write!(f, "departure"),
        }
    }
}

/// One validated arrival or departure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub timestamp: Timestamp,
    /// `None` means the event concerns the whole building
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomId>,
    pub person: Person,
    pub event: Event,
}

impl Record {
    pub fn is_whole_building(&self) -> bool {
        self.room.is_none()
    }
}

/// Record under construction; every field may still be missing.
///
/// Numeric fields keep the raw parsed value so range checks happen in one
/// place (`validate_record`) with their own diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub timestamp: Option<u64>,
    pub room: Option<u64>,
    pub person: Option<Person>,
    pub event: Option<Event>,
}

impl From<&Record> for RecordDraft {
    fn from(record: &Record) -> Self {
        Self {
            timestamp: Some(u64::from(record.timestamp.get())),
            room: record.room.map(|room| u64::from(room.get())),
            person: Some(record.person.clone()),
            event: Some(record.event),
        }
    }
}
