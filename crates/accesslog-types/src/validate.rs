use crate::domain::{Record, RecordDraft, RoomId, Timestamp, WHOLE_BUILDING_RAW};
use crate::error::{Error, NameProblem, Result, TokenProblem};

/// Check that a token is non-empty ASCII alphanumeric text
pub fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(Error::InvalidToken(TokenProblem::Empty));
    }

    match token.chars().find(|c| !c.is_ascii_alphanumeric()) {
        Some(c) => Err(Error::InvalidToken(TokenProblem::InvalidCharacter(c))),
        None => Ok(()),
    }
}

/// Check that a person name is non-empty and made of ASCII letters only
pub fn validate_name(name: &str) -> Result<()> {
    let problem = if name.is_empty() {
        Some(NameProblem::Empty)
    } else if name.contains(' ') {
        Some(NameProblem::ContainsSpace)
    } else {
        name.chars().find_map(|c| {
            if c.is_ascii_digit() {
                Some(NameProblem::ContainsDigit(c))
            } else if !c.is_ascii_alphabetic() {
                Some(NameProblem::InvalidCharacter(c))
            } else {
                None
            }
        })
    };

    match problem {
        Some(problem) => Err(Error::InvalidName {
            name: name.to_string(),
            problem,
        }),
        None => Ok(()),
    }
}

/// Turn a draft into a [`Record`], reporting the first violated rule.
///
/// Rules are checked in a fixed order: timestamp, room, person presence,
/// event presence, name shape.
pub fn validate_record(draft: &RecordDraft) -> Result<Record> {
    let timestamp = draft
        .timestamp
        .and_then(Timestamp::new)
        .ok_or(Error::MissingTimestamp)?;

    let room = match draft.room {
        None => None,
        Some(WHOLE_BUILDING_RAW) => None,
        Some(raw) => Some(RoomId::new(raw).ok_or(Error::InvalidRoomId(raw))?),
    };

    let person = draft.person.as_ref().ok_or(Error::MissingPerson)?;
    let event = draft.event.ok_or(Error::MissingEvent)?;

    validate_name(&person.name)?;

    Ok(Record {
        timestamp,
        room,
        person: person.clone(),
        event,
    })
}
