use accesslog_types::{
    Error, Event, PendingCommand, Person, RecordDraft, Result, Role, validate_record,
    validate_token,
};

/// Recognized command flags; only the first two characters of a field count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    /// `-A` / `-L`: takes no value
    Event(Event),
    /// Flags that consume the following field
    Valued(ValueFlag),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueFlag {
    Timestamp,
    Token,
    Employee,
    Guest,
    Room,
}

impl Flag {
    fn classify(field: &str) -> Option<Self> {
        match field.as_bytes() {
            [b'-', b'T', ..] => Some(Flag::Valued(ValueFlag::Timestamp)),
            [b'-', b'K', ..] => Some(Flag::Valued(ValueFlag::Token)),
            [b'-', b'E', ..] => Some(Flag::Valued(ValueFlag::Employee)),
            [b'-', b'G', ..] => Some(Flag::Valued(ValueFlag::Guest)),
            [b'-', b'R', ..] => Some(Flag::Valued(ValueFlag::Room)),
            [b'-', b'A', ..] => Some(Flag::Event(Event::Arrival)),
            [b'-', b'L', ..] => Some(Flag::Event(Event::Departure)),
            _ => None,
        }
    }
}

impl ValueFlag {
    fn letter(self) -> char {
        match self {
            ValueFlag::Timestamp => 'T',
            ValueFlag::Token => 'K',
            ValueFlag::Employee => 'E',
            ValueFlag::Guest => 'G',
            ValueFlag::Room => 'R',
        }
    }
}

/// Parse a complete base-10 unsigned integer (no sign, no whitespace)
pub(crate) fn parse_decimal(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[derive(Default)]
struct CommandBuilder {
    draft: RecordDraft,
    token: Option<String>,
    target_file: Option<String>,
}

impl CommandBuilder {
    fn number(flag: ValueFlag, value: &str) -> Result<u64> {
        parse_decimal(value).ok_or_else(|| Error::MalformedNumber {
            flag: flag.letter(),
            value: value.to_string(),
        })
    }

    fn set_person(&mut self, name: &str, role: Role) -> Result<()> {
        if self.draft.person.is_some() {
            return Err(Error::DuplicatePerson);
        }
        self.draft.person = Some(Person::new(name, role));
        Ok(())
    }

    fn set_event(&mut self, event: Event) -> Result<()> {
        if self.draft.event.is_some() {
            return Err(Error::DuplicateEvent);
        }
        self.draft.event = Some(event);
        Ok(())
    }

    fn set_target(&mut self, field: &str) -> Result<()> {
        if let Some(first) = &self.target_file {
            return Err(Error::DuplicateLogFile {
                first: first.clone(),
                second: field.to_string(),
            });
        }
        self.target_file = Some(field.to_string());
        Ok(())
    }

    fn apply_valued(&mut self, flag: ValueFlag, value: &str) -> Result<()> {
        match flag {
            ValueFlag::Timestamp => self.draft.timestamp = Some(Self::number(flag, value)?),
            ValueFlag::Room => self.draft.room = Some(Self::number(flag, value)?),
            ValueFlag::Token => self.token = Some(value.to_string()),
            ValueFlag::Employee => self.set_person(value, Role::Employee)?,
            ValueFlag::Guest => self.set_person(value, Role::Guest)?,
        }
        Ok(())
    }

    fn finish(self) -> Result<PendingCommand> {
        let record = validate_record(&self.draft)?;

        let token = self.token.unwrap_or_default();
        validate_token(&token)?;

        let target_file = self.target_file.ok_or(Error::MissingLogFile)?;

        Ok(PendingCommand {
            token,
            record,
            target_file,
        })
    }
}

/// Interpret one argument vector as an append command.
///
/// Flags that need a value consume the following field whatever it looks
/// like; when there is no following field the flag itself is treated as a
/// bare field. Structural errors (duplicates, bad numbers) surface as soon as
/// they are seen; record, token and file-name checks run after all fields
/// are consumed, in that order.
pub fn parse_command<S: AsRef<str>>(fields: &[S]) -> Result<PendingCommand> {
    let mut builder = CommandBuilder::default();
    let mut index = 0;

    while index < fields.len() {
        let field = fields[index].as_ref();
        let next: Option<&str> = fields.get(index + 1).map(|f| f.as_ref());

        match (Flag::classify(field), next) {
            (Some(Flag::Event(event)), _) => builder.set_event(event)?,
            (Some(Flag::Valued(flag)), Some(value)) => {
                builder.apply_valued(flag, value)?;
                index += 1;
            }
            _ => builder.set_target(field)?,
        }

        index += 1;
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use accesslog_types::ErrorKind;

    fn kind_of(fields: &[&str]) -> ErrorKind {
        parse_command(fields).unwrap_err().kind()
    }

    #[test]
    fn test_full_command() {
        let cmd = parse_command(&["-T", "200", "-K", "abc123", "-G", "Bob", "-L", "-R", "5", "file.log"])
            .unwrap();

        assert_eq!(cmd.token, "abc123");
        assert_eq!(cmd.target_file, "file.log");
        assert_eq!(cmd.record.timestamp.get(), 200);
        assert_eq!(cmd.record.room.map(|r| r.get()), Some(5));
        assert_eq!(cmd.record.person, Person::guest("Bob"));
        assert_eq!(cmd.record.event, Event::Departure);
    }

    #[test]
    fn test_only_first_two_characters_matter() {
        let cmd = parse_command(&["-Tstamp", "1", "-Key", "k", "-Employee", "Ann", "-Arrive", "log"])
            .unwrap();
        assert_eq!(cmd.record.person, Person::employee("Ann"));
        assert_eq!(cmd.record.event, Event::Arrival);
    }

    #[test]
    fn test_flags_are_case_sensitive() {
        // "-t" is a bare field, so "1" becomes a second bare field.
        assert_eq!(kind_of(&["-t", "1", "-K", "k", "-E", "Ann", "-A", "log"]), ErrorKind::DuplicateLogFile);
    }

    #[test]
    fn test_value_flag_consumes_next_field_verbatim() {
        // "-K -E" sets the token to "-E", which then fails validation after
        // the record checks pass.
        assert_eq!(kind_of(&["-T", "1", "-G", "Bo", "-A", "-K", "-E", "log"]), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_trailing_value_flag_falls_through_to_bare() {
        let cmd = parse_command(&["-T", "1", "-K", "k", "-E", "Ann", "-A", "-R"]).unwrap();
        assert_eq!(cmd.target_file, "-R");
        assert_eq!(cmd.record.room, None);

        assert_eq!(kind_of(&["-T", "1", "-K", "k", "-E", "Ann", "-A", "log", "-T"]), ErrorKind::DuplicateLogFile);
    }

    #[test]
    fn test_duplicates() {
        assert_eq!(kind_of(&["-E", "Ann", "-G", "Bob"]), ErrorKind::DuplicatePerson);
        assert_eq!(kind_of(&["-A", "-L"]), ErrorKind::DuplicateEvent);
        assert_eq!(kind_of(&["-A", "-A"]), ErrorKind::DuplicateEvent);
        assert_eq!(kind_of(&["one.log", "two.log"]), ErrorKind::DuplicateLogFile);
    }

    #[test]
    fn test_repeated_scalar_flags_keep_last_value() {
        let cmd = parse_command(&["-T", "1", "-T", "2", "-K", "a", "-K", "b", "-E", "Ann", "-A", "log"])
            .unwrap();
        assert_eq!(cmd.record.timestamp.get(), 2);
        assert_eq!(cmd.token, "b");
    }

    #[test]
    fn test_malformed_numbers() {
        for bad in ["", "12a", "+5", "-5", " 5", "0x10", "99999999999999999999999"] {
            assert_eq!(
                kind_of(&["-T", bad, "-K", "k", "-E", "Ann", "-A", "log"]),
                ErrorKind::MalformedNumber,
                "value {:?}",
                bad
            );
        }
        assert_eq!(kind_of(&["-R", "5x"]), ErrorKind::MalformedNumber);
    }

    #[test]
    fn test_final_validation_order() {
        assert_eq!(kind_of(&[]), ErrorKind::MissingTimestamp);
        assert_eq!(kind_of(&["-T", "1"]), ErrorKind::MissingPerson);
        assert_eq!(kind_of(&["-T", "1", "-E", "Ann"]), ErrorKind::MissingEvent);
        assert_eq!(kind_of(&["-T", "1", "-E", "Ann", "-A"]), ErrorKind::InvalidToken);
        assert_eq!(kind_of(&["-T", "1", "-E", "Ann", "-A", "-K", "k"]), ErrorKind::MissingLogFile);
        assert_eq!(kind_of(&["-T", "1", "-E", "A9", "-A", "-K", "k", "log"]), ErrorKind::InvalidName);
    }

    #[test]
    fn test_whole_building_sentinel() {
        let cmd = parse_command(&["-T", "1", "-K", "k", "-E", "Ann", "-A", "-R", "4294967295", "log"])
            .unwrap();
        assert!(cmd.record.is_whole_building());

        assert_eq!(
            kind_of(&["-T", "1", "-K", "k", "-E", "Ann", "-A", "-R", "1073741824", "log"]),
            ErrorKind::InvalidRoomId
        );
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("0"), Some(0));
        assert_eq!(parse_decimal("007"), Some(7));
        assert_eq!(parse_decimal("18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_decimal("18446744073709551616"), None);
        assert_eq!(parse_decimal("-1"), None);
    }
}
