use accesslog_types::{Event, LogFile, Person, RoomId};

/// Rooms `person` entered, in the order the log records them
pub fn room_history(log: &LogFile, person: &Person) -> Vec<RoomId> {
    log.records()
        .iter()
        .filter(|record| record.event == Event::Arrival && &record.person == person)
        .filter_map(|record| record.room)
        .collect()
}
