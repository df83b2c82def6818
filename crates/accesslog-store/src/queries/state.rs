use accesslog_types::{Event, LogFile, Person, Record, Role, RoomId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Who is where after replaying a log
///
/// A person present in the map is inside the building; the value is the room
/// they are currently in, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildingState {
    present: BTreeMap<Person, Option<RoomId>>,
}

impl BuildingState {
    /// Replay every record in file order.
    ///
    /// Departures by people who are not inside are ignored, as are departures
    /// from a room the person is not in.
    pub fn replay(log: &LogFile) -> Self {
        let mut state = Self::default();
        for record in log.records() {
            state.apply(record);
        }
        state
    }

    pub fn apply(&mut self, record: &Record) {
        match (record.event, record.room) {
            (Event::Arrival, None) => {
                self.present.entry(record.person.clone()).or_insert(None);
            }
            (Event::Arrival, Some(room)) => {
                self.present.insert(record.person.clone(), Some(room));
            }
            (Event::Departure, Some(room)) => {
                if let Some(current) = self.present.get_mut(&record.person) {
                    if *current == Some(room) {
                        *current = None;
                    }
                }
            }
            (Event::Departure, None) => {
                self.present.remove(&record.person);
            }
        }
    }

    pub fn is_present(&self, person: &Person) -> bool {
        self.present.contains_key(person)
    }

    pub fn room_of(&self, person: &Person) -> Option<RoomId> {
        self.present.get(person).copied().flatten()
    }

    /// Names of employees in the building, sorted
    pub fn employees(&self) -> Vec<&str> {
        self.names_with_role(Role::Employee)
    }

    /// Names of guests in the building, sorted
    pub fn guests(&self) -> Vec<&str> {
        self.names_with_role(Role::Guest)
    }

    /// Occupied rooms in ascending order, each with its sorted occupant names
    pub fn rooms(&self) -> BTreeMap<RoomId, Vec<&str>> {
        let mut rooms: BTreeMap<RoomId, Vec<&str>> = BTreeMap::new();
        for (person, room) in &self.present {
            if let Some(room) = room {
                rooms.entry(*room).or_default().push(&person.name);
            }
        }
        for names in rooms.values_mut() {
            names.sort_unstable();
        }
        rooms
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            employees: to_owned(self.employees()),
            guests: to_owned(self.guests()),
            rooms: self
                .rooms()
                .into_iter()
                .map(|(room, names)| RoomOccupants {
                    room,
                    occupants: to_owned(names),
                })
                .collect(),
        }
    }

    // BTreeMap keys are ordered by name first, so filtering keeps them sorted.
    fn names_with_role(&self, role: Role) -> Vec<&str> {
        self.present
            .keys()
            .filter(|person| person.role == role)
            .map(|person| person.name.as_str())
            .collect()
    }
}

fn to_owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Owned snapshot of a [`BuildingState`] for printing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    pub employees: Vec<String>,
    pub guests: Vec<String>,
    pub rooms: Vec<RoomOccupants>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomOccupants {
    pub room: RoomId,
    pub occupants: Vec<String>,
}
